//! Runtime record types and primary key helpers.

use std::{
    any::{type_name, Any, TypeId},
    fmt,
};

use sea_orm::{
    ColumnTrait, Condition, EntityTrait, Iterable, ModelTrait, PrimaryKeyToColumn, Value,
};

/// Runtime tag naming the entity a record belongs to.
///
/// Two tags are equal only for the exact same entity type.
#[derive(Clone, Copy)]
pub struct RecordType {
    id: TypeId,
    name: &'static str,
}

impl RecordType {
    pub fn of<E: EntityTrait + 'static>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            name: type_name::<E>(),
        }
    }

    pub fn is<E: EntityTrait + 'static>(&self) -> bool {
        self.id == TypeId::of::<E>()
    }

    /// Fully qualified name of the entity type.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RecordType {}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordType").field(&self.name).finish()
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A model of any entity, tagged with its [`RecordType`].
///
/// Lets fixtures of different entities travel in one list; the tag is checked when the
/// list is turned into a typed result set.
pub struct AnyRecord {
    record_type: RecordType,
    model: Box<dyn Any + Send>,
}

impl AnyRecord {
    pub fn new<M>(model: M) -> Self
    where
        M: ModelTrait + 'static,
        M::Entity: 'static,
    {
        Self {
            record_type: RecordType::of::<M::Entity>(),
            model: Box::new(model),
        }
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// Recovers the concrete model, handing the record back if it is another type.
    pub fn downcast<M: ModelTrait + 'static>(self) -> Result<M, Self> {
        let record_type = self.record_type;

        match self.model.downcast::<M>() {
            Ok(model) => Ok(*model),
            Err(model) => Err(Self { record_type, model }),
        }
    }
}

/// Only the record type is shown so test output never carries record contents.
impl fmt::Debug for AnyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyRecord")
            .field("record_type", &self.record_type)
            .finish_non_exhaustive()
    }
}

pub(crate) fn primary_key_columns<E: EntityTrait>() -> Vec<E::Column> {
    E::PrimaryKey::iter()
        .map(PrimaryKeyToColumn::into_column)
        .collect()
}

/// Primary key values of a model, one per key column.
pub(crate) fn primary_key_of<E: EntityTrait>(model: &E::Model) -> Vec<Value> {
    primary_key_columns::<E>()
        .into_iter()
        .map(|column| model.get(column))
        .collect()
}

/// Condition matching exactly the rows with the given primary keys.
///
/// Single column keys use `pk IN (...)`; composite keys become an `OR` of per-row `AND`s.
/// No keys matches nothing.
pub(crate) fn primary_key_condition<E: EntityTrait>(keys: &[Vec<Value>]) -> Condition {
    let columns = primary_key_columns::<E>();

    match columns.as_slice() {
        [column] => Condition::all()
            .add(column.is_in(keys.iter().filter_map(|key| key.first().cloned()))),
        [column, ..] if keys.is_empty() => {
            Condition::all().add(column.is_in(Vec::<Value>::new()))
        }
        _ => keys.iter().fold(Condition::any(), |any, key| {
            any.add(
                columns
                    .iter()
                    .zip(key)
                    .fold(Condition::all(), |all, (column, value)| {
                        all.add(column.eq(value.clone()))
                    }),
            )
        }),
    }
}

/// Index of `key` in `keys`, unknown keys sort last.
pub(crate) fn position_of(keys: &[Vec<Value>], key: &[Value]) -> usize {
    keys.iter()
        .position(|k| k.as_slice() == key)
        .unwrap_or(usize::MAX)
}
