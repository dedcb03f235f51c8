mod pattern;
mod resolve;

pub(crate) use pattern::Patterns;
pub(crate) use resolve::{resolve_arguments, resolve_options};
