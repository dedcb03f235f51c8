use std::any::Any;
use thiserror::Error;

/// A type-erased parsed value held by a [`Record`].
///
/// Implemented for every `Clone + PartialEq + Debug` type, so any [`Codec`](crate::Codec) value qualifies.
pub trait Value: Any + std::fmt::Debug + Send + Sync {
    #[doc(hidden)]
    fn as_any(&self) -> &dyn Any;

    #[doc(hidden)]
    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    #[doc(hidden)]
    fn eq_value(&self, other: &dyn Value) -> bool;

    #[doc(hidden)]
    fn clone_value(&self) -> Box<dyn Value>;
}

impl<T> Value for T
where
    T: Any + std::fmt::Debug + Clone + PartialEq + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn eq_value(&self, other: &dyn Value) -> bool {
        match other.as_any().downcast_ref::<T>() {
            Some(other) => self == other,
            None => false,
        }
    }

    fn clone_value(&self) -> Box<dyn Value> {
        Box::new(self.clone())
    }
}

/// Errors reading a field out of a [`Record`].
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record has no field '{field}'.")]
    MissingField { field: String },

    #[error("record field '{field}' is not of type {expected}.")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },
}

/// The aggregate produced by a successful parse: one named field per leaf, in declaration order.
///
/// ### Example
/// ```
/// # use braid_builder as braid;
/// use braid::{prelude::*, Opt};
///
/// let parser = Opt::<i32>::new("width").pattern("-w") | Opt::<i32>::new("height").pattern("-h");
/// let mut record = parser.parse(&["-h=20", "-w=30"]).unwrap();
///
/// assert_eq!(record.get::<i32>("width"), Some(&30));
/// assert_eq!(record.remove::<i32>("height").unwrap(), 20);
/// ```
#[derive(Default)]
pub struct Record {
    fields: Vec<(String, Box<dyn Value>)>,
}

impl Record {
    pub(crate) fn insert(&mut self, field: impl Into<String>, value: Box<dyn Value>) {
        self.fields.push((field.into(), value));
    }

    pub(crate) fn extend(&mut self, other: Record) {
        self.fields.extend(other.fields);
    }

    /// Borrow the value of `field`, if present and of type `T`.
    pub fn get<T: 'static>(&self, field: &str) -> Option<&T> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .and_then(|(_, value)| value.as_ref().as_any().downcast_ref::<T>())
    }

    /// Take the value of `field` out of the record.
    /// The record is left untouched when the field is absent or not of type `T`.
    pub fn remove<T: 'static>(&mut self, field: &str) -> Result<T, RecordError> {
        let index = self
            .fields
            .iter()
            .position(|(name, _)| name == field)
            .ok_or_else(|| RecordError::MissingField {
                field: field.to_string(),
            })?;

        if !self.fields[index].1.as_ref().as_any().is::<T>() {
            return Err(RecordError::TypeMismatch {
                field: field.to_string(),
                expected: std::any::type_name::<T>(),
            });
        }

        let (_, value) = self.fields.remove(index);
        value
            .into_any()
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| RecordError::TypeMismatch {
                field: field.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// Whether the record holds `field`.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|(name, _)| name == field)
    }

    /// The field names, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// The number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Clone for Record {
    fn clone(&self) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .map(|(name, value)| (name.clone(), value.as_ref().clone_value()))
                .collect(),
        }
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(other.fields.iter())
                .all(|((a, x), (b, y))| a == b && x.as_ref().eq_value(y.as_ref()))
    }
}

impl std::fmt::Debug for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.fields.iter().map(|(name, value)| (name, value)))
            .finish()
    }
}

/// One entry of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    name: String,
    type_name: String,
}

impl FieldSchema {
    pub(crate) fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    /// The field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The codec type name of the field.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// The shape of a [`Record`]: its ordered `(name, type)` pairs.
/// Two aggregates with equal schemas produce interchangeable records.
///
/// The schema of a nested command layer also lists the variants of its commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldSchema>,
    variants: Vec<Schema>,
}

impl Schema {
    pub(crate) fn nested(fields: Schema, variants: Vec<Schema>) -> Self {
        Self {
            fields: fields.fields,
            variants,
        }
    }

    pub(crate) fn push(&mut self, field: FieldSchema) {
        self.fields.push(field);
    }

    pub(crate) fn extend(&mut self, other: Schema) {
        self.fields.extend(other.fields);
    }

    /// The field entries, in declaration order.
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// The variants of the nested command layer, empty for an aggregate.
    pub fn variants(&self) -> &[Schema] {
        &self.variants
    }
}

/// The result of a command layer: which variant of the command union was parsed, and its record.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    variant: usize,
    command: Option<String>,
    record: Record,
    nested: Option<Box<Selection>>,
}

impl Selection {
    pub(crate) fn new(variant: usize, command: Option<String>, record: Record) -> Self {
        Self {
            variant,
            command,
            record,
            nested: None,
        }
    }

    pub(crate) fn nest(mut self, nested: Option<Selection>) -> Self {
        self.nested = nested.map(Box::new);
        self
    }

    /// The index of the variant within the union (see `variants()` on the command layer).
    pub fn variant(&self) -> usize {
        self.variant
    }

    /// The name of the dispatched command, or `None` when the implicit command was used.
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    /// The record parsed by the command.
    /// When the command wraps shared options, this holds the shared options.
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Take the record parsed by the command.
    pub fn into_record(self) -> Record {
        self.record
    }

    /// The selection made by a command layer nested under the command, if any.
    pub fn nested(&self) -> Option<&Selection> {
        self.nested.as_deref()
    }
}

/// The result of a [`CommandWithSharedOptions`](crate::CommandWithSharedOptions).
#[derive(Debug, Clone, PartialEq)]
pub struct SharedSelection {
    shared: Record,
    selection: Selection,
}

impl SharedSelection {
    pub(crate) fn new(shared: Record, selection: Selection) -> Self {
        Self { shared, selection }
    }

    /// The record of the options preceding the command.
    pub fn shared(&self) -> &Record {
        &self.shared
    }

    /// The dispatched command.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Split into the shared record and the command selection.
    pub fn into_parts(self) -> (Record, Selection) {
        (self.shared, self.selection)
    }
}
