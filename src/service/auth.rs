//! Password authentication and session login.
//!
//! Passwords are stored as Argon2 PHC strings. Logging a user in writes their id into the
//! session after rotating the session id; inactive users can never authenticate.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sea_orm::ConnectionTrait;
use tower_sessions::Session;

use crate::{
    data::user::UserRepository,
    error::Error,
    model::session::user::SessionUserId,
};

/// Hashes a raw password into an Argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;

    Ok(hash.to_string())
}

/// Checks a raw password against a stored hash.
///
/// An empty or malformed hash is an unusable password and never matches.
pub fn check_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

pub struct AuthService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AuthService<'a, C> {
    /// Creates a new instance of [`AuthService`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Verifies credentials
    ///
    /// # Returns
    /// - `Ok(Some(user))` - Active user whose password matches
    /// - `Ok(None)` - Unknown username, wrong password or inactive user
    /// - `Err(Error::DbErr)` - User lookup failed
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<entity::auth_user::Model>, Error> {
        let Some(user) = UserRepository::new(self.db)
            .get_by_username(username)
            .await?
        else {
            return Ok(None);
        };

        if !user.is_active || !check_password(password, &user.password) {
            tracing::debug!(username = %username, "Rejected login attempt");

            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Hashes and stores a new password for the user
    ///
    /// Returns `Ok(None)` when the user no longer exists.
    pub async fn set_password(
        &self,
        user_id: i32,
        password: &str,
    ) -> Result<Option<entity::auth_user::Model>, Error> {
        let hash = hash_password(password)?;

        Ok(UserRepository::new(self.db)
            .set_password(user_id, &hash)
            .await?)
    }

    /// Resolves the logged in user from the session
    ///
    /// A session pointing at a user that no longer exists or was deactivated is cleared.
    pub async fn current_user(
        &self,
        session: &Session,
    ) -> Result<Option<entity::auth_user::Model>, Error> {
        let Some(user_id) = SessionUserId::get(session).await? else {
            return Ok(None);
        };

        match UserRepository::new(self.db).get(user_id).await? {
            Some(user) if user.is_active => Ok(Some(user)),
            _ => {
                session.clear().await;

                tracing::warn!(
                    user_id = %user_id,
                    "Cleared session for user that is missing or inactive"
                );

                Ok(None)
            }
        }
    }
}

/// Logs the user into the session.
///
/// Data belonging to a different user is discarded and the session id is rotated so a
/// pre-login id cannot be reused.
pub async fn login(session: &Session, user: &entity::auth_user::Model) -> Result<(), Error> {
    if SessionUserId::get(session)
        .await?
        .is_some_and(|id| id != user.id)
    {
        session.clear().await;
    }

    session.cycle_id().await?;
    SessionUserId::insert(session, user.id).await?;

    tracing::debug!(user_id = %user.id, "Logged in user");

    Ok(())
}

/// Logs out by deleting the session from the store.
pub async fn logout(session: &Session) -> Result<(), Error> {
    session.flush().await?;

    Ok(())
}

#[cfg(test)]
mod tests {

    mod password {
        use crate::service::auth::{check_password, hash_password};

        #[test]
        fn hashed_password_verifies() {
            let hash = hash_password("testpassword").unwrap();

            assert!(check_password("testpassword", &hash));
            assert!(!check_password("wrongpassword", &hash));
        }

        #[test]
        fn empty_hash_never_matches() {
            assert!(!check_password("", ""));
            assert!(!check_password("testpassword", "not-a-hash"));
        }
    }

    mod authenticate {
        use crate::{
            data::user::UserRepository,
            error::Error,
            service::auth::{hash_password, AuthService},
            util::test::test_db,
        };

        /// Expect the user for matching credentials
        #[tokio::test]
        async fn accepts_valid_credentials() -> Result<(), Error> {
            let db = test_db().await?;
            let user = UserRepository::new(&db)
                .create("user1", &hash_password("pw")?, true)
                .await?;

            let result = AuthService::new(&db).authenticate("user1", "pw").await?;

            assert_eq!(result, Some(user));

            Ok(())
        }

        /// Expect None for a wrong password
        #[tokio::test]
        async fn rejects_wrong_password() -> Result<(), Error> {
            let db = test_db().await?;
            UserRepository::new(&db)
                .create("user1", &hash_password("pw")?, true)
                .await?;

            let result = AuthService::new(&db).authenticate("user1", "nope").await?;

            assert!(result.is_none());

            Ok(())
        }

        /// Expect None for an inactive user even with the right password
        #[tokio::test]
        async fn rejects_inactive_user() -> Result<(), Error> {
            let db = test_db().await?;
            UserRepository::new(&db)
                .create("user1", &hash_password("pw")?, false)
                .await?;

            let result = AuthService::new(&db).authenticate("user1", "pw").await?;

            assert!(result.is_none());

            Ok(())
        }
    }

    mod login {
        use crate::{
            data::user::UserRepository,
            error::Error,
            model::session::{message::SessionMessages, user::SessionUserId},
            service::auth::{login, AuthService},
            util::test::{test_db, test_session},
        };

        /// Expect the user ID in session and the user resolvable from it
        #[tokio::test]
        async fn stores_user_in_session() -> Result<(), Error> {
            let db = test_db().await?;
            let session = test_session();
            let user = UserRepository::new(&db).create("user1", "", true).await?;

            login(&session, &user).await?;

            assert_eq!(SessionUserId::get(&session).await?, Some(user.id));
            assert_eq!(
                AuthService::new(&db).current_user(&session).await?,
                Some(user)
            );

            Ok(())
        }

        /// Expect another user's session data to be discarded
        #[tokio::test]
        async fn discards_previous_user_data() -> Result<(), Error> {
            let db = test_db().await?;
            let session = test_session();
            let users = UserRepository::new(&db);
            let first = users.create("user1", "", true).await?;
            let second = users.create("user2", "", true).await?;
            login(&session, &first).await?;
            SessionMessages::info(&session, "for user1").await?;

            login(&session, &second).await?;

            assert!(SessionMessages::peek(&session).await?.is_empty());
            assert_eq!(SessionUserId::get(&session).await?, Some(second.id));

            Ok(())
        }

        /// Expect a session for a deleted user to resolve to None and be cleared
        #[tokio::test]
        async fn clears_session_for_missing_user() -> Result<(), Error> {
            let db = test_db().await?;
            let session = test_session();
            SessionUserId::insert(&session, 99).await?;

            let result = AuthService::new(&db).current_user(&session).await?;

            assert!(result.is_none());
            assert_eq!(SessionUserId::get(&session).await?, None);

            Ok(())
        }
    }
}
