use std::sync::Arc;

use crate::constant::OPTION_PREFIX;
use crate::matcher::{resolve_arguments, resolve_options, Patterns};
use crate::model::{FieldSchema, Record, Schema, Value};
use crate::parser::{
    render_leaf, Aggregate, AnonymousLeaf, AnonymousOption, ConfigError, Parse, ParseError,
};
use crate::prelude::Codec;

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;
type Decoder<T> = Arc<dyn Fn(&str) -> Option<T> + Send + Sync>;

#[derive(Clone)]
struct Check<T> {
    predicate: Predicate<T>,
    message: String,
}

/// The capabilities attached to one leaf.
/// Each is set at most once, except checks which accumulate in order.
/// A repeat is kept for [`verify`](LeafConfig::verify) to report.
#[derive(Clone)]
struct LeafConfig<T> {
    field: String,
    description: Option<String>,
    default: Option<T>,
    implicit: Option<T>,
    checks: Vec<Check<T>>,
    decoder: Option<Decoder<T>>,
    hint: Option<String>,
    // Capabilities attached more than once. The decoder and hint keep the last attachment, the rest keep the first.
    duplicates: Vec<&'static str>,
}

fn set_once<V>(
    slot: &mut Option<V>,
    value: V,
    capability: &'static str,
    duplicates: &mut Vec<&'static str>,
) {
    if slot.is_some() {
        duplicates.push(capability);
    } else {
        slot.replace(value);
    }
}

fn set_last<V>(
    slot: &mut Option<V>,
    value: V,
    capability: &'static str,
    duplicates: &mut Vec<&'static str>,
) {
    if slot.replace(value).is_some() {
        duplicates.push(capability);
    }
}

impl<T: Codec> LeafConfig<T> {
    fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            description: None,
            default: None,
            implicit: None,
            checks: Vec::default(),
            decoder: None,
            hint: None,
            duplicates: Vec::default(),
        }
    }

    fn decode(&self, text: &str) -> Option<T> {
        match &self.decoder {
            Some(decoder) => decoder(text),
            None => T::decode(text),
        }
    }

    fn resolve(&self, text: &str, target: impl Fn() -> String) -> Result<T, ParseError> {
        if text.is_empty() {
            if let Some(implicit) = &self.implicit {
                return Ok(implicit.clone());
            }
        }

        let value = self
            .decode(text)
            .ok_or_else(|| ParseError::TypeConversion {
                text: text.to_string(),
                type_name: T::type_name(),
            })?;

        match self.checks.iter().find(|check| !(check.predicate)(&value)) {
            Some(check) => Err(ParseError::Validation {
                target: target(),
                text: text.to_string(),
                message: check.message.clone(),
            }),
            None => Ok(value),
        }
    }

    fn hint(&self) -> String {
        self.hint.clone().unwrap_or_else(T::type_name)
    }

    fn details(&self) -> Vec<String> {
        let mut details = Vec::default();

        if let Some(default) = &self.default {
            details.push(format!("By default: {}", default.encode()));
        }

        if let Some(implicit) = &self.implicit {
            details.push(format!("Implicitly: {}", implicit.encode()));
        }

        details
    }

    fn verify(&self) -> Result<(), ConfigError> {
        match self.duplicates.first().copied() {
            Some(capability) => Err(ConfigError::DuplicateCapability {
                field: self.field.clone(),
                capability,
            }),
            None => Ok(()),
        }
    }
}

/// A named option, recognised by one of its patterns: `<pattern>` or `<pattern>=<value>`.
///
/// ### Example
/// ```
/// # use braid_builder as braid;
/// use braid::{prelude::*, Opt};
///
/// let width = Opt::<u32>::new("width")
///     .pattern("-w")
///     .pattern("--width")
///     .help("The window width.")
///     .default_to(1920u32)
///     .check(|w| *w > 0, "Width must be positive.");
///
/// assert_eq!(width.parse(&["--width=800"]).unwrap().get::<u32>("width"), Some(&800));
/// assert_eq!(width.parse(&[]).unwrap().get::<u32>("width"), Some(&1920));
/// ```
#[derive(Clone)]
pub struct Opt<T> {
    config: LeafConfig<T>,
    patterns: Patterns,
}

impl<T: Codec> Opt<T> {
    /// Declare an option producing the record field `field`.
    /// It needs at least one pattern to be recognised.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            config: LeafConfig::new(field),
            patterns: Patterns::default(),
        }
    }

    /// Add a pattern alias (ex: `-w`, `--width`).
    /// Patterns are tried in the order added.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern);
        self
    }

    /// Describe the option in the help message.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        set_once(
            &mut self.config.description,
            description.into(),
            "description",
            &mut self.config.duplicates,
        );
        self
    }

    /// The value used when the option is absent.
    pub fn default_to(mut self, value: impl Into<T>) -> Self {
        set_once(
            &mut self.config.default,
            value.into(),
            "default",
            &mut self.config.duplicates,
        );
        self
    }

    /// The value used when the option is mentioned without `=<value>`.
    pub fn implicitly(mut self, value: impl Into<T>) -> Self {
        set_once(
            &mut self.config.implicit,
            value.into(),
            "implicit",
            &mut self.config.duplicates,
        );
        self
    }

    /// Validate the decoded value; `message` is reported when `predicate` is false.
    /// Checks run in the order added, and the first failure wins.
    pub fn check(
        mut self,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
        message: impl Into<String>,
    ) -> Self {
        self.config.checks.push(Check {
            predicate: Arc::new(predicate),
            message: message.into(),
        });
        self
    }

    /// Replace the [`Codec::decode`] of `T`.
    /// A repeated decoder replaces the earlier one.
    pub fn decode_with(
        mut self,
        decoder: impl Fn(&str) -> Option<T> + Send + Sync + 'static,
    ) -> Self {
        let decoder: Decoder<T> = Arc::new(decoder);
        set_last(
            &mut self.config.decoder,
            decoder,
            "decoder",
            &mut self.config.duplicates,
        );
        self
    }

    /// Replace the type name shown in the help message.
    /// A repeated hint replaces the earlier one.
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        set_last(
            &mut self.config.hint,
            hint.into(),
            "hint",
            &mut self.config.duplicates,
        );
        self
    }
}

impl Opt<bool> {
    /// Declare a switch: `false` when absent, `true` when mentioned.
    pub fn flag(field: impl Into<String>) -> Self {
        Self::new(field).default_to(false).implicitly(true)
    }
}

impl<T: Codec> AnonymousLeaf for Opt<T> {
    fn field(&self) -> &str {
        &self.config.field
    }

    fn field_schema(&self) -> FieldSchema {
        FieldSchema::new(self.config.field.clone(), T::type_name())
    }

    fn has_default(&self) -> bool {
        self.config.default.is_some()
    }

    fn resolve(&self, text: &str) -> Result<Box<dyn Value>, ParseError> {
        let value = self
            .config
            .resolve(text, || format!("option {}", self.patterns))?;
        Ok(Box::new(value))
    }

    fn resolve_absent(&self) -> Result<Box<dyn Value>, ParseError> {
        match &self.config.default {
            Some(default) => Ok(Box::new(default.clone())),
            None => Err(ParseError::MissingOption {
                patterns: self.patterns.to_string(),
            }),
        }
    }

    fn render_leaf(&self, indent: usize) -> String {
        render_leaf(
            indent,
            &format!("{} <{}>", self.patterns, self.config.hint()),
            self.config.description.as_deref().unwrap_or_default(),
            &self.config.details(),
        )
    }

    fn verify_leaf(&self) -> Result<(), ConfigError> {
        self.config.verify()?;

        if self.patterns.is_empty() {
            return Err(ConfigError::MissingPattern {
                field: self.config.field.clone(),
            });
        }

        match self
            .patterns
            .iter()
            .find(|pattern| !pattern.starts_with(OPTION_PREFIX))
        {
            Some(pattern) => Err(ConfigError::InvalidPattern {
                field: self.config.field.clone(),
                pattern: pattern.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl<T: Codec> AnonymousOption for Opt<T> {
    fn matches<'t>(&self, token: &'t str) -> Option<&'t str> {
        self.patterns.matches(token)
    }
}

impl<T: Codec> Parse for Opt<T> {
    type Output = Record;

    fn parse(&self, tokens: &[&str]) -> Result<Record, ParseError> {
        resolve_options(&[self as &dyn AnonymousOption], tokens)
    }

    fn render(&self, indent: usize) -> String {
        self.render_leaf(indent)
    }

    fn verify(&self) -> Result<(), ConfigError> {
        self.verify_leaf()
    }
}

impl<T: Codec> Aggregate for Opt<T> {
    fn schema(&self) -> Schema {
        let mut schema = Schema::default();
        schema.push(self.field_schema());
        schema
    }
}

/// A positional argument, recognised by its position amongst the non-option tokens.
#[derive(Clone)]
pub struct Arg<T> {
    config: LeafConfig<T>,
}

impl<T: Codec> Arg<T> {
    /// Declare a positional argument producing the record field `field`.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            config: LeafConfig::new(field),
        }
    }

    /// Describe the argument in the help message.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        set_once(
            &mut self.config.description,
            description.into(),
            "description",
            &mut self.config.duplicates,
        );
        self
    }

    /// The value used when the argument is absent.
    /// Only trailing arguments may have a default.
    pub fn default_to(mut self, value: impl Into<T>) -> Self {
        set_once(
            &mut self.config.default,
            value.into(),
            "default",
            &mut self.config.duplicates,
        );
        self
    }

    /// Validate the decoded value; `message` is reported when `predicate` is false.
    /// Checks run in the order added, and the first failure wins.
    pub fn check(
        mut self,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
        message: impl Into<String>,
    ) -> Self {
        self.config.checks.push(Check {
            predicate: Arc::new(predicate),
            message: message.into(),
        });
        self
    }

    /// Replace the [`Codec::decode`] of `T`.
    /// A repeated decoder replaces the earlier one.
    pub fn decode_with(
        mut self,
        decoder: impl Fn(&str) -> Option<T> + Send + Sync + 'static,
    ) -> Self {
        let decoder: Decoder<T> = Arc::new(decoder);
        set_last(
            &mut self.config.decoder,
            decoder,
            "decoder",
            &mut self.config.duplicates,
        );
        self
    }

    /// Replace the type name shown in the help message.
    /// A repeated hint replaces the earlier one.
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        set_last(
            &mut self.config.hint,
            hint.into(),
            "hint",
            &mut self.config.duplicates,
        );
        self
    }
}

impl<T: Codec> AnonymousLeaf for Arg<T> {
    fn field(&self) -> &str {
        &self.config.field
    }

    fn field_schema(&self) -> FieldSchema {
        FieldSchema::new(self.config.field.clone(), T::type_name())
    }

    fn has_default(&self) -> bool {
        self.config.default.is_some()
    }

    fn resolve(&self, text: &str) -> Result<Box<dyn Value>, ParseError> {
        let value = self
            .config
            .resolve(text, || format!("argument {}", self.config.field))?;
        Ok(Box::new(value))
    }

    fn resolve_absent(&self) -> Result<Box<dyn Value>, ParseError> {
        match &self.config.default {
            Some(default) => Ok(Box::new(default.clone())),
            None => Err(ParseError::MissingArgument {
                name: self.config.field.clone(),
            }),
        }
    }

    fn render_leaf(&self, indent: usize) -> String {
        render_leaf(
            indent,
            &format!("[{}] <{}>", self.config.field, self.config.hint()),
            self.config.description.as_deref().unwrap_or_default(),
            &self.config.details(),
        )
    }

    fn verify_leaf(&self) -> Result<(), ConfigError> {
        self.config.verify()
    }
}

impl<T: Codec> Parse for Arg<T> {
    type Output = Record;

    fn parse(&self, tokens: &[&str]) -> Result<Record, ParseError> {
        resolve_arguments(&[self as &dyn AnonymousLeaf], tokens)
    }

    fn render(&self, indent: usize) -> String {
        self.render_leaf(indent)
    }

    fn verify(&self) -> Result<(), ConfigError> {
        self.verify_leaf()
    }
}

impl<T: Codec> Aggregate for Arg<T> {
    fn schema(&self) -> Schema {
        let mut schema = Schema::default();
        schema.push(self.field_schema());
        schema
    }
}
