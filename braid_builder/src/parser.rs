mod base;
mod interface;
mod middleware;
mod printer;

pub use base::*;
pub(crate) use interface::ConsoleInterface;
pub use interface::UserInterface;
pub use middleware::*;
pub use printer::ErrorContext;
pub(crate) use printer::{render_command, render_leaf, render_section};

#[cfg(test)]
pub(crate) use interface::util;
