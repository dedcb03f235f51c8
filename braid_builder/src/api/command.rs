use std::collections::HashSet;
use std::ops::BitOr;

use crate::api::{Arg, CompoundArgument, CompoundOption, CompoundParser, Opt};
use crate::constant::SECTION_INDENT;
use crate::model::{Record, Schema, Selection, SharedSelection};
use crate::parser::{
    render_command, render_section, Aggregate, CommandBody, ConfigError, Parse, ParseError,
};
use crate::prelude::Codec;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A named sub-command wrapping a [`CommandBody`]: an aggregate, or a nested command layer.
///
/// The command is recognised only when the first token equals its name exactly.
/// Its body receives the remaining tokens.
///
/// ### Example
/// ```
/// # use braid_builder as braid;
/// use braid::{prelude::*, Arg, Command};
///
/// let remote = Command::new(
///     "remote",
///     "Manage remotes.",
///     Command::new("add", "Add a remote.", Arg::<String>::new("name"))
///         | Command::new("rm", "Remove a remote.", Arg::<String>::new("name")),
/// );
///
/// let selection = remote.parse(&["remote", "rm", "origin"]).unwrap();
/// let nested = selection.nested().unwrap();
/// assert_eq!(nested.command(), Some("rm"));
/// assert_eq!(nested.record().get::<String>("name"), Some(&"origin".to_string()));
/// ```
pub struct Command {
    name: String,
    description: String,
    body: Box<dyn CommandBody>,
}

impl Command {
    /// Declare the command `name`, parsing its remaining tokens with `body`.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        body: impl CommandBody + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            body: Box::new(body),
        }
    }

    /// The name which selects this command.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, token: &str) -> bool {
        self.name == token
    }

    fn select(&self, variant: usize, tokens: &[&str]) -> Result<Selection, ParseError> {
        let (record, nested) = self.body.parse_body(tokens.get(1..).unwrap_or_default())?;
        Ok(Selection::new(variant, Some(self.name.clone()), record).nest(nested))
    }
}

impl Parse for Command {
    type Output = Selection;

    fn parse(&self, tokens: &[&str]) -> Result<Selection, ParseError> {
        match tokens.first() {
            Some(token) if self.matches(token) => self.select(0, tokens),
            Some(token) => Err(ParseError::UnrecognizedCommand {
                token: token.to_string(),
            }),
            None => Err(ParseError::ExpectedCommand),
        }
    }

    fn render(&self, indent: usize) -> String {
        render_command(indent, &self.name, &self.description)
    }

    fn verify(&self) -> Result<(), ConfigError> {
        self.body.verify_body()
    }
}

/// A choice between commands, made by the first token.
///
/// ### Example
/// ```
/// # use braid_builder as braid;
/// use braid::{prelude::*, Command, Opt};
///
/// let selector = Command::new("open-window", "Open a window.", Opt::<u32>::new("width").pattern("-w"))
///     | Command::new("fetch-url", "Fetch a url.", Opt::<String>::new("url").pattern("--url"));
///
/// let selection = selector.parse(&["fetch-url", "--url=x"]).unwrap();
/// assert_eq!(selection.variant(), 1);
/// assert_eq!(selection.command(), Some("fetch-url"));
/// assert_eq!(selection.record().get::<String>("url"), Some(&"x".to_string()));
/// ```
pub struct CommandSelector {
    commands: Vec<Command>,
}

impl CommandSelector {
    /// Select amongst `commands`, which are tried in order.
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    /// The record schema of each command, indexed by [`Selection::variant`].
    pub fn variants(&self) -> Vec<Schema> {
        self.commands
            .iter()
            .map(|command| command.body.body_schema())
            .collect()
    }

    fn position(&self, token: &str) -> Option<usize> {
        self.commands
            .iter()
            .position(|command| command.matches(token))
    }

    fn dispatch(&self, index: usize, tokens: &[&str]) -> Result<Selection, ParseError> {
        let command = &self.commands[index];

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Dispatching to command '{}'.", command.name);
        }

        command.select(index, tokens)
    }
}

impl From<Command> for CommandSelector {
    fn from(command: Command) -> Self {
        CommandSelector::new(vec![command])
    }
}

impl Parse for CommandSelector {
    type Output = Selection;

    fn parse(&self, tokens: &[&str]) -> Result<Selection, ParseError> {
        let token = tokens.first().ok_or(ParseError::ExpectedCommand)?;

        match self.position(token) {
            Some(index) => self.dispatch(index, tokens),
            None => Err(ParseError::UnrecognizedCommand {
                token: token.to_string(),
            }),
        }
    }

    fn render(&self, indent: usize) -> String {
        self.commands
            .iter()
            .map(|command| command.render(indent))
            .collect()
    }

    fn verify(&self) -> Result<(), ConfigError> {
        if self.commands.is_empty() {
            return Err(ConfigError::EmptySelector);
        }

        let mut seen = HashSet::new();

        for command in &self.commands {
            if !seen.insert(command.name()) {
                return Err(ConfigError::DuplicateCommand {
                    name: command.name.clone(),
                });
            }

            command.verify()?;
        }

        Ok(())
    }
}

impl BitOr<Command> for Command {
    type Output = CommandSelector;

    fn bitor(self, rhs: Command) -> CommandSelector {
        CommandSelector::new(vec![self, rhs])
    }
}

impl BitOr<Command> for CommandSelector {
    type Output = CommandSelector;

    fn bitor(mut self, rhs: Command) -> CommandSelector {
        self.commands.push(rhs);
        self
    }
}

impl BitOr<CommandSelector> for Command {
    type Output = CommandSelector;

    fn bitor(self, mut rhs: CommandSelector) -> CommandSelector {
        rhs.commands.insert(0, self);
        rhs
    }
}

impl BitOr<CommandSelector> for CommandSelector {
    type Output = CommandSelector;

    fn bitor(mut self, rhs: CommandSelector) -> CommandSelector {
        self.commands.extend(rhs.commands);
        self
    }
}

/// Options which precede the command, shared by every command.
/// Combine with commands through `|`.
pub struct SharedOptions<S> {
    parser: S,
}

impl<S: Aggregate> SharedOptions<S> {
    /// Wrap the shared options parser.
    pub fn new(parser: S) -> Self {
        Self { parser }
    }
}

/// Shared options, followed by a command.
///
/// The tokens before the first command name are the shared options, the rest belong to the command.
/// A shared option placed after the command is not recognised.
///
/// ### Example
/// ```
/// # use braid_builder as braid;
/// use braid::{prelude::*, Command, Opt, SharedOptions};
///
/// let parser = SharedOptions::new(Opt::<bool>::flag("verbose").pattern("-v"))
///     | Command::new("fetch-url", "Fetch a url.", Opt::<String>::new("url").pattern("--url"));
///
/// let (shared, selection) = parser.parse(&["-v", "fetch-url", "--url=x"]).unwrap().into_parts();
/// assert_eq!(shared.get::<bool>("verbose"), Some(&true));
/// assert_eq!(selection.command(), Some("fetch-url"));
/// ```
pub struct CommandWithSharedOptions<S> {
    shared: S,
    selector: CommandSelector,
}

impl<S: Aggregate> CommandWithSharedOptions<S> {
    /// Compose the shared options with the commands.
    pub fn new(shared: S, selector: impl Into<CommandSelector>) -> Self {
        Self {
            shared,
            selector: selector.into(),
        }
    }

    /// The record schema of each command, indexed by [`Selection::variant`].
    pub fn variants(&self) -> Vec<Schema> {
        self.selector.variants()
    }
}

impl<S: Aggregate> Parse for CommandWithSharedOptions<S> {
    type Output = SharedSelection;

    fn parse(&self, tokens: &[&str]) -> Result<SharedSelection, ParseError> {
        let (split, index) = tokens
            .iter()
            .enumerate()
            .find_map(|(split, token)| self.selector.position(token).map(|index| (split, index)))
            .ok_or(ParseError::ExpectedCommand)?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Splitting shared options from the command at {split}.");
        }

        let shared = self.shared.parse(&tokens[..split])?;
        let selection = self.selector.dispatch(index, &tokens[split..])?;
        Ok(SharedSelection::new(shared, selection))
    }

    fn render(&self, indent: usize) -> String {
        let mut out = render_section(
            indent,
            "Shared options",
            &self.shared.render(indent + SECTION_INDENT),
        );
        out.push('\n');
        out.push_str(&render_section(
            indent,
            "Commands",
            &self.selector.render(indent + SECTION_INDENT),
        ));
        out
    }

    fn verify(&self) -> Result<(), ConfigError> {
        self.shared.verify()?;
        self.selector.verify()
    }
}

impl<S: Aggregate> BitOr<Command> for SharedOptions<S> {
    type Output = CommandWithSharedOptions<S>;

    fn bitor(self, rhs: Command) -> CommandWithSharedOptions<S> {
        CommandWithSharedOptions::new(self.parser, rhs)
    }
}

impl<S: Aggregate> BitOr<CommandSelector> for SharedOptions<S> {
    type Output = CommandWithSharedOptions<S>;

    fn bitor(self, rhs: CommandSelector) -> CommandWithSharedOptions<S> {
        CommandWithSharedOptions::new(self.parser, rhs)
    }
}

impl<S: Aggregate> BitOr<Command> for CommandWithSharedOptions<S> {
    type Output = CommandWithSharedOptions<S>;

    fn bitor(self, rhs: Command) -> CommandWithSharedOptions<S> {
        CommandWithSharedOptions::new(self.shared, self.selector | rhs)
    }
}

/// Commands, with a fallback parser used when the first token names none of them.
///
/// The fallback receives every token, and its record is reported as an additional variant of the commands.
/// When the fallback has the same schema as one of the commands, it shares that command's variant.
pub struct CommandWithImplicitCommand<I> {
    selector: CommandSelector,
    implicit: I,
    implicit_variant: usize,
}

impl<I: Aggregate> CommandWithImplicitCommand<I> {
    /// Compose the commands with their fallback.
    pub fn new(selector: impl Into<CommandSelector>, implicit: I) -> Self {
        let selector = selector.into();
        let schema = implicit.schema();
        let variants = selector.variants();
        let implicit_variant = variants
            .iter()
            .position(|variant| *variant == schema)
            .unwrap_or(variants.len());

        Self {
            selector,
            implicit,
            implicit_variant,
        }
    }

    /// The record schema of each variant, the fallback's included exactly once.
    pub fn variants(&self) -> Vec<Schema> {
        let mut variants = self.selector.variants();

        if self.implicit_variant == variants.len() {
            variants.push(self.implicit.schema());
        }

        variants
    }
}

impl<I: Aggregate> Parse for CommandWithImplicitCommand<I> {
    type Output = Selection;

    fn parse(&self, tokens: &[&str]) -> Result<Selection, ParseError> {
        match tokens.first().and_then(|token| self.selector.position(token)) {
            Some(index) => self.selector.dispatch(index, tokens),
            None => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("No command matched, falling back to the implicit command.");
                }

                let record = self.implicit.parse(tokens)?;
                Ok(Selection::new(self.implicit_variant, None, record))
            }
        }
    }

    fn render(&self, indent: usize) -> String {
        let mut out = render_section(
            indent,
            "Commands",
            &self.selector.render(indent + SECTION_INDENT),
        );
        out.push('\n');
        out.push_str(&render_section(
            indent,
            "Options",
            &self.implicit.render(indent + SECTION_INDENT),
        ));
        out
    }

    fn verify(&self) -> Result<(), ConfigError> {
        self.selector.verify()?;
        self.implicit.verify()
    }
}

/// Grow the fallback parser.
impl<I, R> BitOr<R> for CommandWithImplicitCommand<I>
where
    I: Aggregate + BitOr<R>,
    <I as BitOr<R>>::Output: Aggregate,
{
    type Output = CommandWithImplicitCommand<<I as BitOr<R>>::Output>;

    fn bitor(self, rhs: R) -> Self::Output {
        CommandWithImplicitCommand::new(self.selector, self.implicit | rhs)
    }
}

macro_rules! impl_implicit_command {
    (@aggregate $commands:ty, $($implicit:ty),*) => {
        $(
            impl BitOr<$implicit> for $commands {
                type Output = CommandWithImplicitCommand<$implicit>;

                fn bitor(self, rhs: $implicit) -> Self::Output {
                    CommandWithImplicitCommand::new(self, rhs)
                }
            }
        )*
    };
    ($($commands:ty),*) => {
        $(
            impl<T: Codec> BitOr<Opt<T>> for $commands {
                type Output = CommandWithImplicitCommand<Opt<T>>;

                fn bitor(self, rhs: Opt<T>) -> Self::Output {
                    CommandWithImplicitCommand::new(self, rhs)
                }
            }

            impl<T: Codec> BitOr<Arg<T>> for $commands {
                type Output = CommandWithImplicitCommand<Arg<T>>;

                fn bitor(self, rhs: Arg<T>) -> Self::Output {
                    CommandWithImplicitCommand::new(self, rhs)
                }
            }

            impl_implicit_command!(@aggregate $commands, CompoundOption, CompoundArgument, CompoundParser);
        )*
    };
}

impl_implicit_command!(Command, CommandSelector);

macro_rules! impl_aggregate_body {
    ($([$($generics:tt)*] $aggregate:ty),* $(,)?) => {
        $(
            impl<$($generics)*> CommandBody for $aggregate {
                fn parse_body(&self, tokens: &[&str]) -> Result<(Record, Option<Selection>), ParseError> {
                    Ok((self.parse(tokens)?, None))
                }

                fn body_schema(&self) -> Schema {
                    self.schema()
                }

                fn verify_body(&self) -> Result<(), ConfigError> {
                    self.verify()
                }
            }
        )*
    };
}

impl_aggregate_body!(
    [T: Codec] Opt<T>,
    [T: Codec] Arg<T>,
    [] CompoundOption,
    [] CompoundArgument,
    [] CompoundParser,
);

impl CommandBody for Command {
    fn parse_body(&self, tokens: &[&str]) -> Result<(Record, Option<Selection>), ParseError> {
        Ok((Record::default(), Some(self.parse(tokens)?)))
    }

    fn body_schema(&self) -> Schema {
        Schema::nested(Schema::default(), vec![self.body.body_schema()])
    }

    fn verify_body(&self) -> Result<(), ConfigError> {
        self.verify()
    }
}

impl CommandBody for CommandSelector {
    fn parse_body(&self, tokens: &[&str]) -> Result<(Record, Option<Selection>), ParseError> {
        Ok((Record::default(), Some(self.parse(tokens)?)))
    }

    fn body_schema(&self) -> Schema {
        Schema::nested(Schema::default(), self.variants())
    }

    fn verify_body(&self) -> Result<(), ConfigError> {
        self.verify()
    }
}

/// The shared options form the command's record.
impl<S: Aggregate> CommandBody for CommandWithSharedOptions<S> {
    fn parse_body(&self, tokens: &[&str]) -> Result<(Record, Option<Selection>), ParseError> {
        let (shared, selection) = self.parse(tokens)?.into_parts();
        Ok((shared, Some(selection)))
    }

    fn body_schema(&self) -> Schema {
        Schema::nested(self.shared.schema(), self.variants())
    }

    fn verify_body(&self) -> Result<(), ConfigError> {
        self.verify()
    }
}

impl<I: Aggregate> CommandBody for CommandWithImplicitCommand<I> {
    fn parse_body(&self, tokens: &[&str]) -> Result<(Record, Option<Selection>), ParseError> {
        Ok((Record::default(), Some(self.parse(tokens)?)))
    }

    fn body_schema(&self) -> Schema {
        Schema::nested(Schema::default(), self.variants())
    }

    fn verify_body(&self) -> Result<(), ConfigError> {
        self.verify()
    }
}
