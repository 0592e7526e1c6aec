//! Factory functions for in-memory user models.

use chrono::Utc;

use crate::model::UserModel;

/// Create an active user model without touching the database.
///
/// The password is unusable.
pub fn mock_user_model(id: i32, username: &str) -> UserModel {
    UserModel {
        id,
        username: username.to_string(),
        password: String::new(),
        is_active: true,
        date_joined: Utc::now().naive_utc(),
    }
}
