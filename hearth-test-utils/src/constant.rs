//! Standard values shared by the test fixtures.

use std::ops::RangeInclusive;

/// Password given to users created or logged in by [`Client::login_as`](crate::client::Client::login_as).
pub static TEST_PASSWORD: &str = "testpassword";

/// Every test context gets its own private in-memory database.
pub static TEST_DATABASE_URL: &str = "sqlite::memory:";

pub static TEST_SESSION_COOKIE_NAME: &str = "sessionid";

/// Length range of generated usernames.
pub const RANDOM_USERNAME_LENGTH: RangeInclusive<usize> = 6..=20;
