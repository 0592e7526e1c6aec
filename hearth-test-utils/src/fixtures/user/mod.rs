//! User fixture utilities.

pub mod factory;

use hearth::{data::user::UserRepository, service::auth::hash_password};

use crate::{error::TestError, model::UserModel, TestContext};

impl TestContext {
    pub fn user(&self) -> UserFixtures<'_> {
        UserFixtures { context: self }
    }
}

pub struct UserFixtures<'a> {
    context: &'a TestContext,
}

impl<'a> UserFixtures<'a> {
    /// Insert an active user without a usable password.
    pub async fn insert_user(&self, username: &str) -> Result<UserModel, TestError> {
        Ok(UserRepository::new(&self.context.db)
            .create(username, "", true)
            .await?)
    }

    /// Insert a user whose password is hashed and stored.
    pub async fn insert_user_with_password(
        &self,
        username: &str,
        password: &str,
        is_active: bool,
    ) -> Result<UserModel, TestError> {
        let hash = hash_password(password)?;

        Ok(UserRepository::new(&self.context.db)
            .create(username, &hash, is_active)
            .await?)
    }
}
