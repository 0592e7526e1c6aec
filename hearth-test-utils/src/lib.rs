//! Test utilities for the hearth web application.
//!
//! - [`query`] - result sets over stored rows or hand-picked models
//! - [`client`] - an in-process HTTP client that can log users in
//! - [`assertions`] - assertions over rendered flash messages and forms
//! - [`permission`] - granting permissions by `app_label.codename`
//! - [`TestBuilder`] / [`TestContext`] - per-test database, session store and fixtures

pub mod assertions;
pub mod builder;
pub mod client;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;
pub mod model;
pub mod permission;
pub mod query;
pub mod response;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        assertions::{ExpectedLevel, ResponseAssertions},
        client::{Client, LoginAs},
        permission::add_user_permissions,
        query::{AnyRecord, MaterializedResultSet, RecordType, ResultSet, StoredResultSet},
        response::TestResponse,
        TestBuilder, TestContext, TestError,
    };
}
