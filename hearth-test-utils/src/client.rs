//! In-process HTTP client for the hearth router.
//!
//! Requests are dispatched straight into the [`Router`] without binding a socket. The
//! client keeps a cookie jar, and can create sessions and log users in directly through the
//! shared [`MemoryStore`], the same way the login endpoint would.

use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Body,
    http::{
        header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
        request, HeaderMap, Method, Request,
    },
    Router,
};
use hearth::{data::user::UserRepository, service::auth::AuthService};
use rand::{distr::Alphanumeric, Rng};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tower::ServiceExt;
use tower_sessions::{cookie::Cookie, session::Id, MemoryStore, Session};

use crate::{
    constant::{RANDOM_USERNAME_LENGTH, TEST_PASSWORD},
    error::TestError,
    model::UserModel,
    permission::add_user_permissions,
    response::TestResponse,
};

pub struct Client {
    router: Router,
    db: DatabaseConnection,
    store: MemoryStore,
    cookie_name: String,
    cookies: HashMap<String, String>,
}

impl Client {
    pub fn new(
        router: Router,
        db: DatabaseConnection,
        store: MemoryStore,
        cookie_name: impl Into<String>,
    ) -> Self {
        Self {
            router,
            db,
            store,
            cookie_name: cookie_name.into(),
            cookies: HashMap::new(),
        }
    }

    /// Value of a cookie in the jar.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Session id currently held in the session cookie.
    pub fn session_cookie(&self) -> Option<&str> {
        self.cookie(&self.cookie_name)
    }

    /// The session named by the session cookie, created and saved if there is none yet.
    ///
    /// The cookie is (re)set to the session's id so following requests use this session.
    /// An unknown or expired id in the cookie is replaced by a fresh session.
    pub async fn session(&mut self) -> Result<Session, TestError> {
        let session = self.load_session();
        session.save().await?;
        self.set_session_cookie(&session);

        Ok(session)
    }

    /// Logs a user in with their credentials.
    ///
    /// Returns `Ok(false)` for unknown users, wrong passwords and inactive users.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<bool, TestError> {
        let Some(user) = AuthService::new(&self.db)
            .authenticate(username, password)
            .await?
        else {
            return Ok(false);
        };

        let session = self.session().await?;
        hearth::service::auth::login(&session, &user).await?;
        session.save().await?;
        self.set_session_cookie(&session);

        Ok(true)
    }

    /// Creates or updates a user as described by `options` and logs them in.
    ///
    /// ```ignore
    /// let user = client
    ///     .login_as(LoginAs::new().username("alice").permission("auth.change_user"))
    ///     .await?;
    /// ```
    ///
    /// # Returns
    /// - `Ok(UserModel)` - The logged in user, with its new password hash
    /// - `Err(TestError::LoginFailed)` - The user could not log in, e.g. it is inactive
    /// - `Err(TestError::InvalidPermissionName)` / `Err(TestError::PermissionNotFound)` - A
    ///   requested permission could not be granted
    pub async fn login_as(&mut self, options: LoginAs) -> Result<UserModel, TestError> {
        let password = options
            .password
            .unwrap_or_else(|| TEST_PASSWORD.to_string());

        let user = match options.user {
            Some(user) => user,
            None => {
                let username = options.username.unwrap_or_else(random_username);

                UserRepository::new(&self.db)
                    .create(&username, "", options.is_active)
                    .await?
            }
        };

        let Some(user) = AuthService::new(&self.db)
            .set_password(user.id, &password)
            .await?
        else {
            return Err(TestError::LoginFailed(user.username));
        };

        let user = add_user_permissions(&self.db, user, &options.permissions).await?;

        if !self.login(&user.username, &password).await? {
            return Err(TestError::LoginFailed(user.username));
        }

        Ok(user)
    }

    /// Deletes the current session from the store and drops the session cookie.
    pub async fn logout(&mut self) -> Result<(), TestError> {
        if self.session_cookie().is_some() {
            let session = self.load_session();
            hearth::service::auth::logout(&session).await?;
        }

        self.cookies.remove(&self.cookie_name);

        Ok(())
    }

    pub async fn get(&mut self, path: &str) -> Result<TestResponse, TestError> {
        let request = self.request(Method::GET, path).body(Body::empty())?;

        self.send(request).await
    }

    /// Posts `form` URL-encoded, e.g. `&[("username", "jim")]`.
    pub async fn post<T>(&mut self, path: &str, form: &T) -> Result<TestResponse, TestError>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_urlencoded::to_string(form)?;
        let request = self
            .request(Method::POST, path)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))?;

        self.send(request).await
    }

    fn request(&self, method: Method, path: &str) -> request::Builder {
        let builder = Request::builder().method(method).uri(path);

        if self.cookies.is_empty() {
            return builder;
        }

        let cookies = self
            .cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");

        builder.header(COOKIE, cookies)
    }

    async fn send(&mut self, request: Request<Body>) -> Result<TestResponse, TestError> {
        let method = request.method().clone();
        let uri = request.uri().clone();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|never| match never {});

        let (parts, body) = response.into_parts();
        self.store_cookies(&parts.headers);
        let body = axum::body::to_bytes(body, usize::MAX).await?;

        tracing::debug!(%method, %uri, status = %parts.status, "Test request completed");

        Ok(TestResponse::new(parts.status, parts.headers, body))
    }

    fn store_cookies(&mut self, headers: &HeaderMap) {
        for value in headers.get_all(SET_COOKIE) {
            let Some(cookie) = value
                .to_str()
                .ok()
                .and_then(|value| Cookie::parse(value.to_owned()).ok())
            else {
                continue;
            };

            let expired = cookie
                .max_age()
                .is_some_and(|age| age.is_zero() || age.is_negative());

            if expired {
                self.cookies.remove(cookie.name());
            } else {
                self.cookies
                    .insert(cookie.name().to_string(), cookie.value().to_string());
            }
        }
    }

    fn load_session(&self) -> Session {
        let session_id = self
            .session_cookie()
            .and_then(|value| value.parse::<Id>().ok());

        Session::new(session_id, Arc::new(self.store.clone()), None)
    }

    fn set_session_cookie(&mut self, session: &Session) {
        match session.id() {
            Some(id) => {
                self.cookies.insert(self.cookie_name.clone(), id.to_string());
            }
            None => {
                self.cookies.remove(&self.cookie_name);
            }
        }
    }
}

/// Options for [`Client::login_as`].
///
/// Without a user, an active user is created with `username`, or a random 6 to 20
/// character alphanumeric name. The password defaults to
/// [`TEST_PASSWORD`](crate::constant::TEST_PASSWORD).
#[derive(Clone, Debug)]
pub struct LoginAs {
    user: Option<UserModel>,
    username: Option<String>,
    password: Option<String>,
    permissions: Vec<String>,
    is_active: bool,
}

impl LoginAs {
    pub fn new() -> Self {
        Self {
            user: None,
            username: None,
            password: None,
            permissions: Vec::new(),
            is_active: true,
        }
    }

    /// Log in as an existing user. Its password is replaced.
    pub fn user(mut self, user: UserModel) -> Self {
        self.user = Some(user);
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Grant `"app_label.codename"` before logging in.
    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.push(permission.into());
        self
    }

    pub fn permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions
            .extend(permissions.into_iter().map(Into::into));
        self
    }

    /// Whether a created user is active. Ignored for an existing user.
    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

impl Default for LoginAs {
    fn default() -> Self {
        Self::new()
    }
}

fn random_username() -> String {
    let mut rng = rand::rng();
    let length = rng.random_range(RANDOM_USERNAME_LENGTH);

    (&mut rng)
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
