//! Traits which, typically, may be imported without concern: `use braid::prelude::*`.

pub use crate::parser::{Aggregate, CommandBody, Parse};

use crate::model::{Record, RecordError};

/// Behaviour to convert between a value and its command line text.
// Needs to be imported in order to implement a custom `Codec`.
pub trait Codec: Sized + Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// The name rendered as the default hint, and reported by conversion errors.
    fn type_name() -> String;

    /// Convert the text into a value, or `None` when the text is malformed.
    fn decode(text: &str) -> Option<Self>;

    /// Render the value as text, such that `decode(encode(v)) == Some(v)`.
    fn encode(&self) -> String;
}

/// Behaviour to build a value out of a parsed [`Record`].
// Usually derived: `#[derive(FromRecord)]`.
pub trait FromRecord: Sized {
    /// Take the fields out of the record.
    fn from_record(record: Record) -> Result<Self, RecordError>;
}
