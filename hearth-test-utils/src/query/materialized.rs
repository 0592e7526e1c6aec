//! A result set over a fixed list of already loaded models.

use std::ops::Index;

use sea_orm::{
    sea_query::IntoCondition, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    Select, Value,
};

use super::{
    record::{primary_key_condition, primary_key_of, position_of},
    AnyRecord, RecordType, ResultSet, ResultSetError,
};

static NARROWED_ACCESS_ERROR: &str = "A narrowed MaterializedResultSet holds no cached records: \
call materialize(db) or use the async ResultSet methods";

/// A result set built from models that are already in memory.
///
/// The models are served as-is, in the order given, without touching storage. The set
/// also carries a query selecting the same rows by primary key, so narrowing it with
/// [`ResultSet::filter`] runs against storage and still yields a `MaterializedResultSet`.
/// A narrowed set holds no cached models and its synchronous accessors panic: call
/// [`materialize`](Self::materialize) to load them, or use the async [`ResultSet`] methods.
///
/// ```ignore
/// let users = MaterializedResultSet::<AuthUser>::new(vec![user1, user2, user3]);
///
/// assert_eq!(users.len(), 3);
/// assert_eq!(users[0].username, "user1");
///
/// let picked = users.filter(auth_user::Column::Username.is_in(["user1", "user3"]));
/// assert_eq!(picked.count(&db).await?, 2);
/// ```
#[derive(Clone, Debug)]
pub struct MaterializedResultSet<E: EntityTrait> {
    record_type: RecordType,
    primary_keys: Vec<Vec<Value>>,
    /// `None` once the set has been narrowed.
    records: Option<Vec<E::Model>>,
    select: Select<E>,
}

impl<E> MaterializedResultSet<E>
where
    E: EntityTrait + 'static,
{
    /// Wraps `records`, which may be empty since the entity type names the record type.
    pub fn new(records: Vec<E::Model>) -> Self {
        let primary_keys: Vec<Vec<Value>> = records
            .iter()
            .map(|model| primary_key_of::<E>(model))
            .collect();
        let select = E::find().filter(primary_key_condition::<E>(&primary_keys));

        Self {
            record_type: RecordType::of::<E>(),
            primary_keys,
            records: Some(records),
            select,
        }
    }

    /// Builds a set from type-erased records.
    ///
    /// The record type is `record_type` when given, otherwise the type of the first record.
    ///
    /// # Errors
    /// - [`ResultSetError::MissingRecordType`] - `records` is empty and no type was given
    /// - [`ResultSetError::MixedRecordTypes`] - a record is not of the resolved type, or the
    ///   resolved type is not `E`
    pub fn from_records(
        records: Vec<AnyRecord>,
        record_type: Option<RecordType>,
    ) -> Result<Self, ResultSetError>
    where
        E::Model: 'static,
    {
        let record_type = record_type
            .or_else(|| records.first().map(AnyRecord::record_type))
            .ok_or(ResultSetError::MissingRecordType)?;

        if !record_type.is::<E>() {
            return Err(ResultSetError::MixedRecordTypes);
        }

        let models = records
            .into_iter()
            .map(|record| {
                if record.record_type() != record_type {
                    return Err(ResultSetError::MixedRecordTypes);
                }

                record
                    .downcast::<E::Model>()
                    .map_err(|_| ResultSetError::MixedRecordTypes)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(models))
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// Primary keys of the original records, in their original order.
    ///
    /// Narrowing does not change this list.
    pub fn primary_keys(&self) -> &[Vec<Value>] {
        &self.primary_keys
    }

    pub fn is_narrowed(&self) -> bool {
        self.records.is_none()
    }

    /// Number of cached models.
    ///
    /// # Panics
    /// The set has been narrowed, see [`as_slice`](Self::as_slice).
    #[track_caller]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[track_caller]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    #[track_caller]
    pub fn get(&self, index: usize) -> Option<&E::Model> {
        self.as_slice().get(index)
    }

    #[track_caller]
    pub fn iter(&self) -> std::slice::Iter<'_, E::Model> {
        self.as_slice().iter()
    }

    /// The cached models.
    ///
    /// # Panics
    /// The set has been narrowed and holds no cached models. Load them with
    /// [`materialize`](Self::materialize) or read them through the async [`ResultSet`] methods.
    #[track_caller]
    pub fn as_slice(&self) -> &[E::Model] {
        match &self.records {
            Some(records) => records,
            None => panic!("{NARROWED_ACCESS_ERROR}"),
        }
    }

    /// Returns a set that serves its models from memory again.
    ///
    /// A narrowed set is loaded from storage, keeping the original record order; an
    /// unnarrowed set is returned unchanged.
    pub async fn materialize<C: ConnectionTrait>(self, db: &C) -> Result<Self, DbErr>
    where
        E::Model: Sync,
    {
        if !self.is_narrowed() {
            return Ok(self);
        }

        let records = ResultSet::all(&self, db).await?;

        Ok(Self::new(records))
    }
}

impl<E: EntityTrait + 'static> Index<usize> for MaterializedResultSet<E> {
    type Output = E::Model;

    #[track_caller]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a, E: EntityTrait + 'static> IntoIterator for &'a MaterializedResultSet<E> {
    type Item = &'a E::Model;
    type IntoIter = std::slice::Iter<'a, E::Model>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E> ResultSet<E> for MaterializedResultSet<E>
where
    E: EntityTrait + 'static,
    E::Model: Sync,
{
    fn filter<F: IntoCondition>(self, filter: F) -> Self {
        tracing::debug!(
            record_type = %self.record_type,
            records = self.primary_keys.len(),
            "narrowing materialized result set"
        );

        Self {
            select: QueryFilter::filter(self.select, filter),
            records: None,
            ..self
        }
    }

    fn into_select(self) -> Select<E> {
        self.select
    }

    async fn all<C: ConnectionTrait>(&self, db: &C) -> Result<Vec<E::Model>, DbErr> {
        if let Some(records) = &self.records {
            return Ok(records.clone());
        }

        let mut records = self.select.clone().all(db).await?;
        records.sort_by_cached_key(|model| {
            position_of(&self.primary_keys, &primary_key_of::<E>(model))
        });

        Ok(records)
    }

    async fn count<C: ConnectionTrait>(&self, db: &C) -> Result<u64, DbErr> {
        if let Some(records) = &self.records {
            return Ok(records.len() as u64);
        }

        PaginatorTrait::count(self.select.clone(), db).await
    }

    async fn nth<C: ConnectionTrait>(
        &self,
        db: &C,
        index: usize,
    ) -> Result<Option<E::Model>, DbErr> {
        if let Some(records) = &self.records {
            return Ok(records.get(index).cloned());
        }

        Ok(self.all(db).await?.into_iter().nth(index))
    }
}
