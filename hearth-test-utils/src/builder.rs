//! Declarative test builder.
//!
//! Configuration calls are only queued; tables and fixtures are created in the final
//! `build()` call.

use sea_orm::{sea_query::TableCreateStatement, DbBackend, EntityTrait, Schema};

use crate::{constant::TEST_SESSION_COOKIE_NAME, error::TestError, TestContext};

/// Builder for declarative test initialization.
///
/// ```ignore
/// let test = TestBuilder::new()
///     .with_auth_tables()
///     .with_session_cookie_name("my_session")
///     .with_user("alice")
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_auth_tables: bool,
    session_cookie_name: String,

    users: Vec<String>,
    groups: Vec<String>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_auth_tables: false,
            session_cookie_name: TEST_SESSION_COOKIE_NAME.to_string(),
            users: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Add the auth tables and seed their default permissions.
    ///
    /// Creates the user, group, permission and user permission tables, then the `add`,
    /// `change`, `delete` and `view` permissions for `user`, `group` and `permission` under
    /// the `auth` app label, exactly as the hearth binary does at startup.
    pub fn with_auth_tables(mut self) -> Self {
        self.include_auth_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// Custom tables are created after the auth tables.
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Override the name of the session cookie the router sets and reads.
    pub fn with_session_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.session_cookie_name = name.into();
        self
    }

    /// Insert an active user without a usable password.
    ///
    /// Requires `with_auth_tables`.
    pub fn with_user(mut self, username: impl Into<String>) -> Self {
        self.users.push(username.into());
        self
    }

    /// Insert a group. Requires `with_auth_tables`.
    pub fn with_group(mut self, name: impl Into<String>) -> Self {
        self.groups.push(name.into());
        self
    }

    /// Build the test context by creating all configured tables and fixtures.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::HearthError)` - Auth table creation or permission seeding failed
    /// - `Err(TestError::DbErr)` - Custom table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let context = TestContext::new(self.session_cookie_name).await?;

        if self.include_auth_tables {
            hearth::startup::create_tables(&context.db).await?;
        }

        context.with_tables(self.tables).await?;

        for username in self.users {
            context.user().insert_user(&username).await?;
        }

        for name in self.groups {
            context.group().insert_group(&name).await?;
        }

        Ok(context)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use entity::prelude::*;
    use sea_orm::{EntityTrait, PaginatorTrait};

    use super::*;

    #[tokio::test]
    async fn test_builder_creates_auth_tables() -> Result<(), TestError> {
        let test = TestBuilder::new().with_auth_tables().build().await?;

        let permissions = AuthPermission::find().count(&test.db).await?;
        assert_eq!(permissions, 12);

        Ok(())
    }

    #[tokio::test]
    async fn test_builder_inserts_fixtures() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_auth_tables()
            .with_user("user1")
            .with_group("group1")
            .build()
            .await?;

        assert_eq!(AuthUser::find().count(&test.db).await?, 1);
        assert_eq!(AuthGroup::find().count(&test.db).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_builder_creates_custom_table() -> Result<(), TestError> {
        let test = TestBuilder::new().with_table(AuthGroup).build().await?;

        test.group().insert_group("group1").await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_builder_sets_session_cookie_name() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_session_cookie_name("my_session")
            .build()
            .await?;

        assert_eq!(test.config.session_cookie_name, "my_session");

        Ok(())
    }
}
