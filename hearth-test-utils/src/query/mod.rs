//! Result sets: read-only query results that can be counted, indexed and narrowed.
//!
//! [`ResultSet`] is the capability set shared by a storage-backed query
//! ([`StoredResultSet`]) and a hand-picked list of already loaded models
//! ([`MaterializedResultSet`]). Either can be handed to code that only needs to read
//! results, and narrowing either one yields another value of the same concrete type.

pub mod error;
pub mod materialized;
pub mod record;
pub mod stored;

use sea_orm::{sea_query::IntoCondition, ConnectionTrait, DbErr, EntityTrait, Select};

pub use error::ResultSetError;
pub use materialized::MaterializedResultSet;
pub use record::{AnyRecord, RecordType};
pub use stored::StoredResultSet;

/// Read access to an ordered set of `E` models.
#[allow(async_fn_in_trait)]
pub trait ResultSet<E: EntityTrait>: Sized {
    /// Narrows the set with an additional predicate.
    ///
    /// Implementations return their own type, never a more generic one.
    fn filter<F: IntoCondition>(self, filter: F) -> Self;

    /// The query that selects this set from storage.
    fn into_select(self) -> Select<E>;

    /// Every model in the set, in result order.
    async fn all<C: ConnectionTrait>(&self, db: &C) -> Result<Vec<E::Model>, DbErr>;

    /// Number of models in the set.
    async fn count<C: ConnectionTrait>(&self, db: &C) -> Result<u64, DbErr>;

    /// The model at `index`, `None` when out of range.
    async fn nth<C: ConnectionTrait>(
        &self,
        db: &C,
        index: usize,
    ) -> Result<Option<E::Model>, DbErr>;

    async fn first<C: ConnectionTrait>(&self, db: &C) -> Result<Option<E::Model>, DbErr> {
        self.nth(db, 0).await
    }

    async fn exists<C: ConnectionTrait>(&self, db: &C) -> Result<bool, DbErr> {
        Ok(self.count(db).await? > 0)
    }
}
