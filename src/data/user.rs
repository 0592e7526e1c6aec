use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new user
    ///
    /// `password` is stored as given and must already be hashed; pass an empty string for a
    /// user without a usable password.
    pub async fn create(
        &self,
        username: &str,
        password: &str,
        is_active: bool,
    ) -> Result<entity::auth_user::Model, DbErr> {
        let user = entity::auth_user::ActiveModel {
            username: ActiveValue::Set(username.to_string()),
            password: ActiveValue::Set(password.to_string()),
            is_active: ActiveValue::Set(is_active),
            date_joined: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    pub async fn get(&self, user_id: i32) -> Result<Option<entity::auth_user::Model>, DbErr> {
        entity::prelude::AuthUser::find_by_id(user_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_username(
        &self,
        username: &str,
    ) -> Result<Option<entity::auth_user::Model>, DbErr> {
        entity::prelude::AuthUser::find()
            .filter(entity::auth_user::Column::Username.eq(username))
            .one(self.db)
            .await
    }

    /// Replaces the stored password hash
    ///
    /// Returns `Ok(None)` when the user does not exist.
    pub async fn set_password(
        &self,
        user_id: i32,
        password: &str,
    ) -> Result<Option<entity::auth_user::Model>, DbErr> {
        let Some(user) = self.get(user_id).await? else {
            return Ok(None);
        };

        let mut user_am = user.into_active_model();
        user_am.password = ActiveValue::Set(password.to_string());

        let user = user_am.update(self.db).await?;

        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {

    mod create {
        use crate::{data::user::UserRepository, error::Error, util::test::test_db};

        /// Expect success when creating a new user
        #[tokio::test]
        async fn creates_user() -> Result<(), Error> {
            let db = test_db().await?;

            let user = UserRepository::new(&db).create("user1", "", true).await?;

            assert_eq!(user.username, "user1");
            assert!(user.is_active);

            Ok(())
        }

        /// Expect Error when the username is already taken
        #[tokio::test]
        async fn fails_for_duplicate_username() -> Result<(), Error> {
            let db = test_db().await?;
            let user_repository = UserRepository::new(&db);
            user_repository.create("user1", "", true).await?;

            let result = user_repository.create("user1", "", true).await;

            assert!(result.is_err());

            Ok(())
        }
    }

    mod get_by_username {
        use crate::{data::user::UserRepository, error::Error, util::test::test_db};

        /// Expect Some when the username exists
        #[tokio::test]
        async fn finds_existing_user() -> Result<(), Error> {
            let db = test_db().await?;
            let user_repository = UserRepository::new(&db);
            let user = user_repository.create("user1", "", true).await?;

            let result = user_repository.get_by_username("user1").await?;

            assert_eq!(result, Some(user));

            Ok(())
        }

        /// Expect None when the username does not exist
        #[tokio::test]
        async fn returns_none_for_unknown_user() -> Result<(), Error> {
            let db = test_db().await?;

            let result = UserRepository::new(&db).get_by_username("nobody").await?;

            assert!(result.is_none());

            Ok(())
        }
    }

    mod set_password {
        use crate::{data::user::UserRepository, error::Error, util::test::test_db};

        /// Expect the stored password to be replaced
        #[tokio::test]
        async fn replaces_password() -> Result<(), Error> {
            let db = test_db().await?;
            let user_repository = UserRepository::new(&db);
            let user = user_repository.create("user1", "", true).await?;

            let updated = user_repository.set_password(user.id, "hash").await?;

            assert_eq!(updated.map(|u| u.password), Some("hash".to_string()));

            Ok(())
        }

        /// Expect None for a user that does not exist
        #[tokio::test]
        async fn returns_none_for_nonexistent_user() -> Result<(), Error> {
            let db = test_db().await?;

            let result = UserRepository::new(&db).set_password(42, "hash").await?;

            assert!(result.is_none());

            Ok(())
        }
    }
}
