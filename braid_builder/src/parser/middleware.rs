use std::env;

use crate::constant::HELP_SWITCH;
use crate::parser::base::*;
use crate::parser::interface::UserInterface;
use crate::parser::ErrorContext;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The configured command line parser.
/// Built via [`CommandLineParser::build`](crate::CommandLineParser::build).
pub struct GeneralParser<P> {
    program: String,
    about: Option<String>,
    parser: P,
    user_interface: Box<dyn UserInterface>,
}

impl<P: Parse> GeneralParser<P> {
    pub(crate) fn new(
        program: impl Into<String>,
        about: Option<String>,
        parser: P,
        user_interface: Box<dyn UserInterface>,
    ) -> Self {
        Self {
            program: program.into(),
            about,
            parser,
            user_interface,
        }
    }

    /// The full help message: usage line, about text, then the rendering of the declared parser.
    pub fn help(&self) -> String {
        let mut out = format!("usage: {}\n", self.program);

        if let Some(about) = &self.about {
            out.push('\n');
            out.push_str(about);
            out.push('\n');
        }

        out.push('\n');
        out.push_str(&self.parser.render(0));
        out
    }

    /// Run the command line parser against the input tokens.
    ///
    /// If the parse fails, the error is printed along with its context in the input, returning `Err(1)`.
    ///
    /// If the parse fails while the help switch (`--help`) is amongst the tokens, the help message is printed instead, returning `Err(0)`.
    /// Help is only considered after a failure, so a declared `--help` option always takes precedence.
    pub fn parse_tokens(&self, tokens: &[&str]) -> Result<P::Output, i32> {
        match self.parser.parse(tokens) {
            Ok(output) => Ok(output),
            Err(error) => {
                if tokens.iter().any(|token| *token == HELP_SWITCH) {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Parse failed with the help switch present: {error}.");
                    }

                    self.user_interface.print(self.help());
                    Err(0)
                } else {
                    let error_context = ErrorContext::locate(&error, tokens);
                    self.user_interface.print_error(error);
                    self.user_interface.print_error_context(error_context);
                    Err(1)
                }
            }
        }
    }

    /// Run the command line parser against the Cli [`env::args`].
    ///
    /// On failure, exits with the code described in [`GeneralParser::parse_tokens`] (via [`std::process::exit`]).
    pub fn parse(&self) -> P::Output {
        let command_input: Vec<String> = env::args().skip(1).collect();

        match self.parse_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        ) {
            Ok(output) => output,
            Err(exit_code) => {
                std::process::exit(exit_code);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Arg, Opt};
    use crate::model::Record;
    use crate::parser::util::InMemoryInterface;
    use crate::test::assert_contains;
    use rstest::rstest;

    fn general_parser(
        interface: &InMemoryInterface,
    ) -> GeneralParser<impl Parse<Output = Record>> {
        let parser = Arg::<u32>::new("item").help("The item.")
            | Opt::<bool>::flag("verbose").pattern("-v").help("Talk more.");

        GeneralParser::new(
            "program",
            Some("About the program.".to_string()),
            parser,
            Box::new(interface.clone()),
        )
    }

    #[test]
    fn parse_tokens_empty() {
        // Setup
        let interface = InMemoryInterface::default();
        let general_parser = GeneralParser::new(
            "program",
            None,
            Opt::<bool>::flag("verbose").pattern("-v"),
            Box::new(interface.clone()),
        );

        // Execute
        let record = general_parser.parse_tokens(&[]).unwrap();

        // Verify
        assert_eq!(record.get::<bool>("verbose"), Some(&false));
        let (message, error, error_context) = interface.consume();
        assert_eq!(message, None);
        assert_eq!(error, None);
        assert_eq!(error_context, None);
    }

    #[rstest]
    #[case(vec!["1"], false)]
    #[case(vec!["1", "-v"], true)]
    fn parse_tokens(#[case] tokens: Vec<&str>, #[case] verbose: bool) {
        // Setup
        let interface = InMemoryInterface::default();
        let general_parser = general_parser(&interface);

        // Execute
        let record = general_parser.parse_tokens(tokens.as_slice()).unwrap();

        // Verify
        assert_eq!(record.get::<u32>("item"), Some(&1));
        assert_eq!(record.get::<bool>("verbose"), Some(&verbose));
        let (message, error, error_context) = interface.consume();
        assert_eq!(message, None);
        assert_eq!(error, None);
        assert_eq!(error_context, None);
    }

    #[rstest]
    #[case(vec!["--help"])]
    #[case(vec!["1", "--help"])]
    #[case(vec!["--help", "1"])]
    fn parse_tokens_help(#[case] tokens: Vec<&str>) {
        // Setup
        let interface = InMemoryInterface::default();
        let general_parser = general_parser(&interface);

        // Execute
        let error_code = general_parser.parse_tokens(tokens.as_slice()).unwrap_err();

        // Verify
        assert_eq!(error_code, 0);

        let message = interface.consume_message();
        assert_contains!(message, "usage: program");
        assert_contains!(message, "About the program.");
        assert_contains!(message, "[item] <u32>");
        assert_contains!(message, "Talk more.");
    }

    #[test]
    fn parse_tokens_help_declared() {
        // Setup
        let interface = InMemoryInterface::default();
        let general_parser = GeneralParser::new(
            "program",
            None,
            Opt::<bool>::flag("help").pattern("--help"),
            Box::new(interface.clone()),
        );

        // Execute
        let record = general_parser.parse_tokens(&["--help"]).unwrap();

        // Verify
        assert_eq!(record.get::<bool>("help"), Some(&true));
        let (message, _, _) = interface.consume();
        assert_eq!(message, None);
    }

    #[rstest]
    #[case(vec!["not-u32"], 0)]
    #[case(vec!["1", "-x"], 2)]
    #[case(vec![], 0)]
    fn parse_tokens_error(#[case] tokens: Vec<&str>, #[case] offset: usize) {
        // Setup
        let interface = InMemoryInterface::default();
        let general_parser = general_parser(&interface);

        // Execute
        let error_code = general_parser.parse_tokens(tokens.as_slice()).unwrap_err();

        // Verify
        assert_eq!(error_code, 1);

        let (message, error, error_context) = interface.consume();
        assert_eq!(message, None);
        assert!(error.is_some());
        assert_eq!(error_context.unwrap(), ErrorContext::new(offset, &tokens));
    }

    #[test]
    fn help() {
        // Setup
        let interface = InMemoryInterface::default();
        let general_parser = general_parser(&interface);

        // Execute
        let help = general_parser.help();

        // Verify
        assert!(help.starts_with("usage: program\n\nAbout the program.\n\nArguments:\n"));
        assert_contains!(help, "\nOptions:\n  -v <bool>");
    }
}
