use std::collections::HashSet;
use std::ops::BitOr;

use crate::api::{Arg, Opt};
use crate::constant::{OPTION_PREFIX, SECTION_INDENT};
use crate::matcher::{resolve_arguments, resolve_options};
use crate::model::{Record, Schema};
use crate::parser::{
    render_section, Aggregate, AnonymousLeaf, AnonymousOption, ConfigError, Parse, ParseError,
};
use crate::prelude::Codec;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

fn verify_unique<'a>(fields: impl Iterator<Item = &'a str>) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for field in fields {
        if !seen.insert(field) {
            return Err(ConfigError::DuplicateField {
                field: field.to_string(),
            });
        }
    }

    Ok(())
}

/// A set of named options, matched irrespective of their order in the input.
///
/// ### Example
/// ```
/// # use braid_builder as braid;
/// use braid::{prelude::*, Opt};
///
/// let parser = Opt::<i32>::new("width").pattern("-w")
///     | Opt::<i32>::new("height").pattern("-h")
///     | Opt::<bool>::flag("fullscreen").pattern("--fullscreen");
///
/// let record = parser.parse(&["--fullscreen", "-h=20", "-w=30"]).unwrap();
/// assert_eq!(record.get::<i32>("width"), Some(&30));
/// assert_eq!(record.get::<bool>("fullscreen"), Some(&true));
/// ```
#[derive(Default)]
pub struct CompoundOption {
    options: Vec<Box<dyn AnonymousOption>>,
}

impl CompoundOption {
    fn push(mut self, option: impl AnonymousOption + 'static) -> Self {
        self.options.push(Box::new(option));
        self
    }

    fn append(mut self, other: CompoundOption) -> Self {
        self.options.extend(other.options);
        self
    }

    fn fields(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|option| option.field())
    }
}

impl<T: Codec> From<Opt<T>> for CompoundOption {
    fn from(option: Opt<T>) -> Self {
        CompoundOption::default().push(option)
    }
}

impl Parse for CompoundOption {
    type Output = Record;

    fn parse(&self, tokens: &[&str]) -> Result<Record, ParseError> {
        let options: Vec<&dyn AnonymousOption> =
            self.options.iter().map(|option| option.as_ref()).collect();
        resolve_options(&options, tokens)
    }

    fn render(&self, indent: usize) -> String {
        self.options
            .iter()
            .map(|option| option.render_leaf(indent))
            .collect()
    }

    fn verify(&self) -> Result<(), ConfigError> {
        for option in &self.options {
            option.verify_leaf()?;
        }

        verify_unique(self.fields())
    }
}

impl Aggregate for CompoundOption {
    fn schema(&self) -> Schema {
        let mut schema = Schema::default();

        for option in &self.options {
            schema.push(option.field_schema());
        }

        schema
    }
}

/// An ordered list of positional arguments.
/// Only the trailing arguments may have defaults.
#[derive(Default)]
pub struct CompoundArgument {
    arguments: Vec<Box<dyn AnonymousLeaf>>,
}

impl CompoundArgument {
    fn push(mut self, argument: impl AnonymousLeaf + 'static) -> Self {
        self.arguments.push(Box::new(argument));
        self
    }

    fn append(mut self, other: CompoundArgument) -> Self {
        self.arguments.extend(other.arguments);
        self
    }

    fn fields(&self) -> impl Iterator<Item = &str> {
        self.arguments.iter().map(|argument| argument.field())
    }
}

impl<T: Codec> From<Arg<T>> for CompoundArgument {
    fn from(argument: Arg<T>) -> Self {
        CompoundArgument::default().push(argument)
    }
}

impl Parse for CompoundArgument {
    type Output = Record;

    fn parse(&self, tokens: &[&str]) -> Result<Record, ParseError> {
        let arguments: Vec<&dyn AnonymousLeaf> = self
            .arguments
            .iter()
            .map(|argument| argument.as_ref())
            .collect();
        resolve_arguments(&arguments, tokens)
    }

    fn render(&self, indent: usize) -> String {
        self.arguments
            .iter()
            .map(|argument| argument.render_leaf(indent))
            .collect()
    }

    fn verify(&self) -> Result<(), ConfigError> {
        let mut defaulted: Option<&str> = None;

        for argument in &self.arguments {
            argument.verify_leaf()?;

            match defaulted {
                Some(field) if !argument.has_default() => {
                    return Err(ConfigError::DefaultBeforeRequired {
                        field: field.to_string(),
                        required: argument.field().to_string(),
                    });
                }
                None if argument.has_default() => {
                    defaulted.replace(argument.field());
                }
                _ => {}
            }
        }

        verify_unique(self.fields())
    }
}

impl Aggregate for CompoundArgument {
    fn schema(&self) -> Schema {
        let mut schema = Schema::default();

        for argument in &self.arguments {
            schema.push(argument.field_schema());
        }

        schema
    }
}

/// Positional arguments followed by named options.
///
/// The input is split at the first token starting with `-`: the arguments resolve the tokens before it, the options resolve the rest.
/// A negative number must therefore be passed through an option (ex: `--offset=-1`).
///
/// ### Example
/// ```
/// # use braid_builder as braid;
/// use braid::{prelude::*, Arg, Opt};
///
/// let parser = Arg::<String>::new("username") | Opt::<u32>::new("width").pattern("-w");
///
/// let record = parser.parse(&["Foobar", "-w=1920"]).unwrap();
/// assert_eq!(record.get::<String>("username"), Some(&"Foobar".to_string()));
/// assert_eq!(record.get::<u32>("width"), Some(&1920));
/// ```
#[derive(Default)]
pub struct CompoundParser {
    arguments: CompoundArgument,
    options: CompoundOption,
}

impl CompoundParser {
    /// Compose the arguments and the options side by side.
    pub fn new(arguments: impl Into<CompoundArgument>, options: impl Into<CompoundOption>) -> Self {
        Self {
            arguments: arguments.into(),
            options: options.into(),
        }
    }
}

impl From<CompoundArgument> for CompoundParser {
    fn from(arguments: CompoundArgument) -> Self {
        CompoundParser::new(arguments, CompoundOption::default())
    }
}

impl From<CompoundOption> for CompoundParser {
    fn from(options: CompoundOption) -> Self {
        CompoundParser::new(CompoundArgument::default(), options)
    }
}

impl Parse for CompoundParser {
    type Output = Record;

    fn parse(&self, tokens: &[&str]) -> Result<Record, ParseError> {
        let split = tokens
            .iter()
            .position(|token| token.starts_with(OPTION_PREFIX))
            .unwrap_or(tokens.len());

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Splitting arguments from options at {split}.");
        }

        let mut record = self.arguments.parse(&tokens[..split])?;
        record.extend(self.options.parse(&tokens[split..])?);
        Ok(record)
    }

    fn render(&self, indent: usize) -> String {
        let mut out = render_section(
            indent,
            "Arguments",
            &self.arguments.render(indent + SECTION_INDENT),
        );
        out.push('\n');
        out.push_str(&render_section(
            indent,
            "Options",
            &self.options.render(indent + SECTION_INDENT),
        ));
        out
    }

    fn verify(&self) -> Result<(), ConfigError> {
        self.arguments.verify()?;
        self.options.verify()?;
        verify_unique(self.arguments.fields().chain(self.options.fields()))
    }
}

impl Aggregate for CompoundParser {
    fn schema(&self) -> Schema {
        let mut schema = self.arguments.schema();
        schema.extend(self.options.schema());
        schema
    }
}

// Options with options.

impl<A: Codec, B: Codec> BitOr<Opt<B>> for Opt<A> {
    type Output = CompoundOption;

    fn bitor(self, rhs: Opt<B>) -> CompoundOption {
        CompoundOption::from(self).push(rhs)
    }
}

impl<B: Codec> BitOr<Opt<B>> for CompoundOption {
    type Output = CompoundOption;

    fn bitor(self, rhs: Opt<B>) -> CompoundOption {
        self.push(rhs)
    }
}

impl<A: Codec> BitOr<CompoundOption> for Opt<A> {
    type Output = CompoundOption;

    fn bitor(self, rhs: CompoundOption) -> CompoundOption {
        CompoundOption::from(self).append(rhs)
    }
}

impl BitOr<CompoundOption> for CompoundOption {
    type Output = CompoundOption;

    fn bitor(self, rhs: CompoundOption) -> CompoundOption {
        self.append(rhs)
    }
}

// Arguments with arguments.

impl<A: Codec, B: Codec> BitOr<Arg<B>> for Arg<A> {
    type Output = CompoundArgument;

    fn bitor(self, rhs: Arg<B>) -> CompoundArgument {
        CompoundArgument::from(self).push(rhs)
    }
}

impl<B: Codec> BitOr<Arg<B>> for CompoundArgument {
    type Output = CompoundArgument;

    fn bitor(self, rhs: Arg<B>) -> CompoundArgument {
        self.push(rhs)
    }
}

impl<A: Codec> BitOr<CompoundArgument> for Arg<A> {
    type Output = CompoundArgument;

    fn bitor(self, rhs: CompoundArgument) -> CompoundArgument {
        CompoundArgument::from(self).append(rhs)
    }
}

impl BitOr<CompoundArgument> for CompoundArgument {
    type Output = CompoundArgument;

    fn bitor(self, rhs: CompoundArgument) -> CompoundArgument {
        self.append(rhs)
    }
}

// Arguments with options.

impl<A: Codec, B: Codec> BitOr<Opt<B>> for Arg<A> {
    type Output = CompoundParser;

    fn bitor(self, rhs: Opt<B>) -> CompoundParser {
        CompoundParser::new(self, rhs)
    }
}

impl<B: Codec> BitOr<Opt<B>> for CompoundArgument {
    type Output = CompoundParser;

    fn bitor(self, rhs: Opt<B>) -> CompoundParser {
        CompoundParser::new(self, rhs)
    }
}

impl<A: Codec> BitOr<CompoundOption> for Arg<A> {
    type Output = CompoundParser;

    fn bitor(self, rhs: CompoundOption) -> CompoundParser {
        CompoundParser::new(self, rhs)
    }
}

impl BitOr<CompoundOption> for CompoundArgument {
    type Output = CompoundParser;

    fn bitor(self, rhs: CompoundOption) -> CompoundParser {
        CompoundParser::new(self, rhs)
    }
}

// Growing a parser.

impl<A: Codec> BitOr<CompoundParser> for Arg<A> {
    type Output = CompoundParser;

    fn bitor(self, rhs: CompoundParser) -> CompoundParser {
        CompoundParser::new(CompoundArgument::from(self).append(rhs.arguments), rhs.options)
    }
}

impl BitOr<CompoundParser> for CompoundArgument {
    type Output = CompoundParser;

    fn bitor(self, rhs: CompoundParser) -> CompoundParser {
        CompoundParser::new(self.append(rhs.arguments), rhs.options)
    }
}

impl<B: Codec> BitOr<Arg<B>> for CompoundParser {
    type Output = CompoundParser;

    fn bitor(self, rhs: Arg<B>) -> CompoundParser {
        CompoundParser::new(self.arguments.push(rhs), self.options)
    }
}

impl BitOr<CompoundArgument> for CompoundParser {
    type Output = CompoundParser;

    fn bitor(self, rhs: CompoundArgument) -> CompoundParser {
        CompoundParser::new(self.arguments.append(rhs), self.options)
    }
}

impl<B: Codec> BitOr<Opt<B>> for CompoundParser {
    type Output = CompoundParser;

    fn bitor(self, rhs: Opt<B>) -> CompoundParser {
        CompoundParser::new(self.arguments, self.options.push(rhs))
    }
}

impl BitOr<CompoundOption> for CompoundParser {
    type Output = CompoundParser;

    fn bitor(self, rhs: CompoundOption) -> CompoundParser {
        CompoundParser::new(self.arguments, self.options.append(rhs))
    }
}

impl BitOr<CompoundParser> for CompoundParser {
    type Output = CompoundParser;

    fn bitor(self, rhs: CompoundParser) -> CompoundParser {
        CompoundParser::new(
            self.arguments.append(rhs.arguments),
            self.options.append(rhs.options),
        )
    }
}
