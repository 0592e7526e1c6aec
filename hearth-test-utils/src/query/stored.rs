use sea_orm::{
    sea_query::IntoCondition, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};

use super::ResultSet;

/// A result set evaluated against storage on every access.
///
/// Rows come back in storage order unless an ordering is added.
#[derive(Clone, Debug)]
pub struct StoredResultSet<E: EntityTrait> {
    select: Select<E>,
}

impl<E: EntityTrait> StoredResultSet<E> {
    pub fn new(select: Select<E>) -> Self {
        Self { select }
    }

    /// Every row of the entity's table.
    pub fn all_rows() -> Self {
        Self::new(E::find())
    }

    pub fn order_by_asc<C: ColumnTrait>(self, column: C) -> Self {
        Self::new(QueryOrder::order_by_asc(self.select, column))
    }

    pub fn order_by_desc<C: ColumnTrait>(self, column: C) -> Self {
        Self::new(QueryOrder::order_by_desc(self.select, column))
    }
}

impl<E: EntityTrait> From<Select<E>> for StoredResultSet<E> {
    fn from(select: Select<E>) -> Self {
        Self::new(select)
    }
}

impl<E> ResultSet<E> for StoredResultSet<E>
where
    E: EntityTrait,
    E::Model: Sync,
{
    fn filter<F: IntoCondition>(self, filter: F) -> Self {
        Self::new(QueryFilter::filter(self.select, filter))
    }

    fn into_select(self) -> Select<E> {
        self.select
    }

    async fn all<C: ConnectionTrait>(&self, db: &C) -> Result<Vec<E::Model>, DbErr> {
        self.select.clone().all(db).await
    }

    async fn count<C: ConnectionTrait>(&self, db: &C) -> Result<u64, DbErr> {
        PaginatorTrait::count(self.select.clone(), db).await
    }

    async fn nth<C: ConnectionTrait>(
        &self,
        db: &C,
        index: usize,
    ) -> Result<Option<E::Model>, DbErr> {
        QuerySelect::offset(self.select.clone(), index as u64)
            .one(db)
            .await
    }
}
