use crate::parser::{ErrorContext, ParseError};

/// The output seam of a [`GeneralParser`](crate::GeneralParser).
pub trait UserInterface: Send + Sync {
    /// Display a (help) message.
    fn print(&self, message: String);

    /// Display a parse error.
    fn print_error(&self, error: ParseError);

    /// Display where in the input the parse error happened.
    fn print_error_context(&self, error_context: ErrorContext);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: ParseError) {
        eprintln!("Parse error: {error}");
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        eprintln!("{error_context}");
    }
}
