use thiserror::Error;

use crate::model::{FieldSchema, Record, Schema, Selection, Value};

/// A declaration mistake, reported by [`Parse::verify`].
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Config error: '{field}' cannot declare its {capability} more than once.")]
    DuplicateCapability {
        field: String,
        capability: &'static str,
    },

    #[error("Config error: option '{field}' has no pattern.")]
    MissingPattern { field: String },

    #[error("Config error: pattern '{pattern}' of option '{field}' must start with '-'.")]
    InvalidPattern { field: String, pattern: String },

    #[error("Config error: cannot duplicate the field '{field}'.")]
    DuplicateField { field: String },

    #[error("Config error: argument '{field}' has a default, but is followed by the required argument '{required}'.")]
    DefaultBeforeRequired { field: String, required: String },

    #[error("Config error: command selector has no commands.")]
    EmptySelector,

    #[error("Config error: cannot duplicate the command '{name}'.")]
    DuplicateCommand { name: String },
}

/// The single root cause of a failed parse.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unrecognized argument \"{token}\".")]
    UnrecognizedArgument { token: String },

    #[error("Could not convert argument \"{text}\" to type {type_name}.")]
    TypeConversion { text: String, type_name: String },

    #[error("Validation check failed for {target} with argument \"{text}\": {message}")]
    Validation {
        target: String,
        text: String,
        message: String,
    },

    #[error("No matching argument for option {patterns}.")]
    MissingOption { patterns: String },

    #[error("Missing argument {name}.")]
    MissingArgument { name: String },

    #[error("Too many arguments. Provided {provided} arguments, program expects {expected}.")]
    TooManyArguments { provided: usize, expected: usize },

    #[error("Expected command.")]
    ExpectedCommand,

    #[error("Unrecognized command \"{token}\".")]
    UnrecognizedCommand { token: String },
}

impl ParseError {
    /// The offending input text, when the error was caused by a specific token.
    pub fn token(&self) -> Option<&str> {
        match self {
            ParseError::UnrecognizedArgument { token }
            | ParseError::UnrecognizedCommand { token } => Some(token),
            ParseError::TypeConversion { text, .. } | ParseError::Validation { text, .. } => {
                Some(text)
            }
            _ => None,
        }
    }
}

/// A declared parser: maps a token list to its output, and renders its own help text.
///
/// Every combinator is immutable once declared, so one instance serves any number of `parse` calls.
pub trait Parse {
    /// The value produced by a successful parse.
    type Output;

    /// Parse the tokens (the program name excluded).
    fn parse(&self, tokens: &[&str]) -> Result<Self::Output, ParseError>;

    /// Render the help text, indented by `indent` columns.
    fn render(&self, indent: usize) -> String;

    /// Check the declaration invariants that composition cannot enforce by itself.
    /// `parse` never calls this; an unverified declaration parses permissively.
    fn verify(&self) -> Result<(), ConfigError>;
}

/// A parser whose output is a single [`Record`]: a leaf, or a compound of leaves.
/// Commands wrap aggregates.
pub trait Aggregate: Parse<Output = Record> + Send + Sync {
    /// The ordered `(name, type)` list of the produced record.
    fn schema(&self) -> Schema;
}

/// A parser which a [`Command`](crate::Command) hands its remaining tokens to.
///
/// Any aggregate is a command body, as is a nested command layer.
pub trait CommandBody: Send + Sync {
    /// Parse the tokens following the command name.
    /// A nested command layer also yields the selection it made.
    fn parse_body(&self, tokens: &[&str]) -> Result<(Record, Option<Selection>), ParseError>;

    /// The schema of the body's record, with the variants of a nested command layer.
    fn body_schema(&self) -> Schema;

    /// See [`Parse::verify`].
    fn verify_body(&self) -> Result<(), ConfigError>;
}

/// Behaviour of a decorated leaf with its value type erased.
///
/// We use this at the middle/top of the combinator graph so that leaves of different types sit in one compound.
pub(crate) trait AnonymousLeaf: Send + Sync {
    fn field(&self) -> &str;

    fn field_schema(&self) -> FieldSchema;

    fn has_default(&self) -> bool;

    /// Resolve a matched substring: implicit value, decode, then the validation chain.
    fn resolve(&self, text: &str) -> Result<Box<dyn Value>, ParseError>;

    /// Resolve the leaf when no token was supplied for it.
    fn resolve_absent(&self) -> Result<Box<dyn Value>, ParseError>;

    fn render_leaf(&self, indent: usize) -> String;

    fn verify_leaf(&self) -> Result<(), ConfigError>;
}

/// A leaf recognised by name, rather than by position.
pub(crate) trait AnonymousOption: AnonymousLeaf {
    /// The value substring of `token`, if `token` names this option.
    fn matches<'t>(&self, token: &'t str) -> Option<&'t str>;
}
