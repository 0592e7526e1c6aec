//! Tests for the in-process client: sessions, logins and cookies.

use entity::prelude::*;
use hearth::{
    data::{permission::PermissionRepository, user::UserRepository},
    model::{api::UserDto, session::user::SessionUserId},
    service::auth::check_password,
};
use hearth_test_utils::{constant::TEST_PASSWORD, prelude::*};
use sea_orm::{EntityTrait, PaginatorTrait};

mod login_as {
    use super::*;

    /// Expect a random active user to be created and logged in
    #[tokio::test]
    async fn creates_user() -> Result<(), TestError> {
        let test = TestBuilder::new().with_auth_tables().build().await?;
        let mut client = test.client();
        assert_eq!(AuthUser::find().count(&test.db).await?, 0);

        let user = client.login_as(LoginAs::new()).await?;

        let session = client.session().await?;
        assert_eq!(SessionUserId::get(&session).await?, Some(user.id));
        assert!(!user.username.is_empty());
        assert!(user.is_active);
        assert!(check_password(TEST_PASSWORD, &user.password));

        Ok(())
    }

    /// Expect an existing user to be logged in with a new password
    #[tokio::test]
    async fn existing_user() -> Result<(), TestError> {
        let test = TestBuilder::new().with_auth_tables().build().await?;
        let mut client = test.client();
        let existing_user = test.user().insert_user("existing").await?;

        let user = client.login_as(LoginAs::new().user(existing_user.clone())).await?;

        assert_eq!(user.id, existing_user.id);
        assert_eq!(user.username, existing_user.username);
        let session = client.session().await?;
        assert_eq!(SessionUserId::get(&session).await?, Some(user.id));
        assert!(check_password(TEST_PASSWORD, &user.password));

        Ok(())
    }

    /// Expect the user to be created with the given username
    #[tokio::test]
    async fn with_username() -> Result<(), TestError> {
        let test = TestBuilder::new().with_auth_tables().build().await?;
        let mut client = test.client();

        let user = client.login_as(LoginAs::new().username("test_user")).await?;

        let session = client.session().await?;
        assert_eq!(SessionUserId::get(&session).await?, Some(user.id));
        assert_eq!(user.username, "test_user");
        assert!(user.is_active);
        assert!(check_password(TEST_PASSWORD, &user.password));

        Ok(())
    }

    /// Expect the requested permissions to be granted
    #[tokio::test]
    async fn with_permissions() -> Result<(), TestError> {
        let test = TestBuilder::new().with_auth_tables().build().await?;
        let mut client = test.client();

        let user = client
            .login_as(LoginAs::new().permission("auth.change_user"))
            .await?;

        assert!(
            PermissionRepository::new(&test.db)
                .has_perm(&user, "auth.change_user")
                .await?
        );
        let session = client.session().await?;
        assert_eq!(SessionUserId::get(&session).await?, Some(user.id));

        Ok(())
    }

    /// Expect a custom password to be usable for a regular login
    #[tokio::test]
    async fn with_password() -> Result<(), TestError> {
        let test = TestBuilder::new().with_auth_tables().build().await?;
        let mut client = test.client();

        let user = client
            .login_as(LoginAs::new().username("alice").password("s3cret"))
            .await?;

        assert!(check_password("s3cret", &user.password));
        assert!(client.login("alice", "s3cret").await?);
        assert!(!client.login("alice", TEST_PASSWORD).await?);

        Ok(())
    }

    /// Expect an inactive user to fail to log in
    #[tokio::test]
    async fn fails_for_inactive_user() -> Result<(), TestError> {
        let test = TestBuilder::new().with_auth_tables().build().await?;
        let mut client = test.client();
        let user = UserRepository::new(&test.db)
            .create("inactive", "", false)
            .await?;

        let result = client.login_as(LoginAs::new().user(user)).await;

        let err = result.unwrap_err();
        assert!(matches!(err, TestError::LoginFailed(_)));
        assert!(err.to_string().contains("Can't login with user"));

        Ok(())
    }

    /// Expect the router to see the logged in user
    #[tokio::test]
    async fn router_sees_user() -> Result<(), TestError> {
        let test = TestBuilder::new().with_auth_tables().build().await?;
        let mut client = test.client();

        let user = client
            .login_as(LoginAs::new().username("alice").permission("auth.view_user"))
            .await?;

        let response = client.get("/auth/user").await?;

        assert_eq!(response.status, 200);
        assert_eq!(
            response.json::<UserDto>()?,
            UserDto {
                id: user.id,
                username: "alice".to_string(),
                permissions: vec!["auth.view_user".to_string()],
            }
        );

        Ok(())
    }
}

mod session {
    use super::*;

    /// Expect the session cookie to hold the session id
    #[tokio::test]
    async fn sets_cookie() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_auth_tables()
            .with_session_cookie_name("session_key")
            .build()
            .await?;
        let mut client = test.client();

        let session = client.session().await?;

        let session_id = session.id().map(|id| id.to_string());
        assert!(session_id.is_some());
        assert_eq!(client.cookie("session_key").map(str::to_string), session_id);

        Ok(())
    }

    /// Expect an existing session to be reused
    #[tokio::test]
    async fn reuses_existing_session() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_auth_tables()
            .with_session_cookie_name("session_key")
            .build()
            .await?;
        let mut client = test.client();

        let session_id = client.session().await?.id();

        let session = client.session().await?;

        assert_eq!(session.id(), session_id);
        assert_eq!(
            client.cookie("session_key").map(str::to_string),
            session.id().map(|id| id.to_string())
        );

        Ok(())
    }

    /// Expect values written to the session to reach the router
    #[tokio::test]
    async fn shared_with_router() -> Result<(), TestError> {
        let test = TestBuilder::new().with_auth_tables().build().await?;
        let mut client = test.client();
        let user = test.user().insert_user("alice").await?;

        let session = client.session().await?;
        SessionUserId::insert(&session, user.id).await?;
        session.save().await?;

        let response = client.get("/auth/user").await?;

        assert_eq!(response.status, 200);
        assert_eq!(response.json::<UserDto>()?.username, "alice");

        Ok(())
    }
}

mod login {
    use super::*;

    /// Expect wrong credentials to be rejected without a session
    #[tokio::test]
    async fn rejects_wrong_password() -> Result<(), TestError> {
        let test = TestBuilder::new().with_auth_tables().build().await?;
        let mut client = test.client();
        test.user()
            .insert_user_with_password("alice", "right", true)
            .await?;

        assert!(!client.login("alice", "wrong").await?);
        assert!(client.session_cookie().is_none());

        Ok(())
    }

    /// Expect the login endpoint to set the session cookie
    #[tokio::test]
    async fn through_router() -> Result<(), TestError> {
        let test = TestBuilder::new().with_auth_tables().build().await?;
        let mut client = test.client();
        test.user()
            .insert_user_with_password("alice", "right", true)
            .await?;

        let response = client
            .post("/auth/login", &[("username", "alice"), ("password", "right")])
            .await?;

        assert_eq!(response.status, 200);
        assert!(client.session_cookie().is_some());

        let response = client.get("/auth/user").await?;
        assert_eq!(response.status, 200);

        Ok(())
    }
}

mod logout {
    use super::*;

    /// Expect logging out to forget the user
    #[tokio::test]
    async fn forgets_user() -> Result<(), TestError> {
        let test = TestBuilder::new().with_auth_tables().build().await?;
        let mut client = test.client();
        client.login_as(LoginAs::new()).await?;

        client.logout().await?;

        assert!(client.session_cookie().is_none());
        let response = client.get("/auth/user").await?;
        assert_eq!(response.status, 404);

        Ok(())
    }

    /// Expect the logout endpoint to drop the session cookie
    #[tokio::test]
    async fn through_router() -> Result<(), TestError> {
        let test = TestBuilder::new().with_auth_tables().build().await?;
        let mut client = test.client();
        client.login_as(LoginAs::new()).await?;

        let response = client.post("/auth/logout", &[("", ""); 0]).await?;

        assert_eq!(response.status, 204);
        let response = client.get("/auth/user").await?;
        assert_eq!(response.status, 404);

        Ok(())
    }
}
