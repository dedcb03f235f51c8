use crate::parser::{ConfigError, ConsoleInterface, GeneralParser, Parse, UserInterface};

/// The program level command line parser: wraps a declared parser with a program name and about message.
///
/// ### Example
/// ```
/// # use braid_builder as braid;
/// use braid::{prelude::*, Arg, CommandLineParser, Opt};
///
/// let parser = CommandLineParser::new(
///     "program",
///     Arg::<u32>::new("a") | Opt::<u32>::new("b").pattern("-b").default_to(2u32),
/// )
/// .about("My program that does awesome stuff.")
/// .build();
///
/// let record = parser.parse_tokens(vec!["1"].as_slice()).unwrap();
///
/// assert_eq!(record.get::<u32>("a"), Some(&1));
/// assert_eq!(record.get::<u32>("b"), Some(&2));
/// ```
pub struct CommandLineParser<P> {
    program: String,
    about: Option<String>,
    parser: P,
}

impl<P: Parse> CommandLineParser<P> {
    /// Create a command line parser for `program`.
    pub fn new(program: impl Into<String>, parser: P) -> Self {
        Self {
            program: program.into(),
            about: None,
            parser,
        }
    }

    /// Document the about message for this command line parser.
    /// If repeated, only the final about message will apply.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.about.replace(description.into());
        self
    }

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Build the command line parser with a custom output.
    /// This finalizes the configuration and checks for errors (ex: a repeated field name).
    #[cfg(any(test, feature = "unit_test"))]
    pub fn build_with_interface(
        self,
        user_interface: Box<dyn UserInterface>,
    ) -> Result<GeneralParser<P>, ConfigError> {
        self.finalize(user_interface)
    }

    fn finalize(
        self,
        user_interface: Box<dyn UserInterface>,
    ) -> Result<GeneralParser<P>, ConfigError> {
        self.parser.verify()?;
        Ok(GeneralParser::new(
            self.program,
            self.about,
            self.parser,
            user_interface,
        ))
    }

    /// Build the command line parser as a Result.
    /// This finalizes the configuration and checks for errors (ex: a repeated field name).
    pub fn build_parser(self) -> Result<GeneralParser<P>, ConfigError> {
        self.finalize(Box::new(ConsoleInterface::default()))
    }

    /// Build the command line parser.
    /// This finalizes the configuration and checks for errors (ex: a repeated field name).
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> GeneralParser<P> {
        match self.build_parser() {
            Ok(gp) => gp,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}
