use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::Error;

/// Session key holding the id of the logged in user.
pub const SESSION_USER_ID_KEY: &str = "hearth:auth:user_id";

#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionUserId(pub i32);

impl SessionUserId {
    /// Insert user ID into session
    pub async fn insert(session: &Session, user_id: i32) -> Result<(), Error> {
        session
            .insert(SESSION_USER_ID_KEY, SessionUserId(user_id))
            .await?;

        Ok(())
    }

    /// Get user ID from session
    pub async fn get(session: &Session) -> Result<Option<i32>, Error> {
        Ok(session
            .get::<SessionUserId>(SESSION_USER_ID_KEY)
            .await?
            .map(|SessionUserId(id)| id))
    }

    /// Remove user ID from session, returning it if present
    pub async fn remove(session: &Session) -> Result<Option<i32>, Error> {
        Ok(session
            .remove::<SessionUserId>(SESSION_USER_ID_KEY)
            .await?
            .map(|SessionUserId(id)| id))
    }
}
