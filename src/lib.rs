//! `braid` is a declarative, composable combinator engine for command line arguments.
//!
//! A command line is declared, not coded.
//! Each option and argument is a typed *leaf*; leaves are combined with `|` into aggregates, and aggregates into commands.
//! The declaration parses a token list into a [`Record`] (or a [`Selection`] amongst commands) without any hand written `&str -> T` conversions.
//!
//! `braid` prioritizes the following design concerns:
//! * *Type safe argument parsing*:
//! every leaf carries a [`Codec`](./prelude/trait.Codec.html) for its value type, and the parsed record is read back with that same type.
//! * *Domain sensitive argument parsing*:
//! defaults, implicit values and validation checks are declared on the leaf, so the caller never sees a domain invalid value.
//! * *Composition*:
//! options combine irrespective of order, arguments combine by position, and commands combine into a selection.
//! Any of these may be nested under a command, including another command layer (read back through [`Selection::nested`]).
//! * *Plain UX*:
//! help and error output are fixed column plain text, with a caret under the offending input.
//!
//! # Usage
//! More demos are outlined in the `demos/` directory of the source.
//!
//! ```no_run
#![doc = include_str!("../demos/demo_window.rs")]
//! ```
//!
//! ```console
//! $ window --help
//! usage: window
//!
//! Opens a window.
//!
//! -w, --width <u32>                       The window width.
//!                                         By default: 1920
//! -h, --height <u32>                      The window height.
//!                                         By default: 1080
//! --fullscreen <bool>                     Open the window fullscreen.
//!                                         By default: false
//!                                         Implicitly: true
//!
//! $ window -w=800 --fullscreen
//! Window { width: 800, height: 1080, fullscreen: true }
//!
//! $ window -w=wide
//! Parse error: Could not convert argument "wide" to type u32.
//! -w=wide
//!    ^
//! ```
//!
//! # Leaves
//! * [`Opt`]: a named option, recognised by any of its patterns (ex: `-w` or `--width`).
//! The option takes its value as `-w=30`; a bare `-w` takes the option's implicit value.
//! * [`Arg`]: a positional argument, recognised by its position amongst the non-option tokens.
//!
//! Both leaves are configured by chaining decorators:
//! `help`, `default_to`, `check` (a validation predicate with its failure message), `decode_with` (a custom decoder) and `hint`.
//! Options additionally take `pattern` and `implicitly`.
//! Each decorator, other than `pattern` and `check`, may be applied at most once; a repeated `decode_with` or `hint` replaces the earlier one.
//!
//! # Combinators
//! * [`CompoundOption`]: `Opt | Opt`, the options match in any order.
//! Each option claims the first token it names; a repeated mention is ignored.
//! * [`CompoundArgument`]: `Arg | Arg`, the arguments match in declaration order.
//! Only trailing arguments may be defaulted.
//! * [`CompoundParser`]: `Arg | Opt`, the arguments before the first option token, then the options.
//! * [`Command`] and [`CommandSelector`]: `Command | Command`, the first token names the command.
//! * [`CommandWithSharedOptions`]: `SharedOptions | Command`, options which precede any command.
//! * [`CommandWithImplicitCommand`]: `Command | Opt` (or any aggregate), the aggregate applies when no command is named.
//!
//! ```
//! use braid::{prelude::*, Command, Opt};
//!
//! let selector = Command::new("open-window", "Open a window.", Opt::<u32>::new("width").pattern("-w"))
//!     | Command::new("fetch-url", "Fetch a url.", Opt::<String>::new("url").pattern("--url"));
//!
//! let selection = selector.parse(&["fetch-url", "--url=x"]).unwrap();
//! assert_eq!(selection.command(), Some("fetch-url"));
//! assert_eq!(selection.record().get::<String>("url"), Some(&"x".to_string()));
//! ```
//!
//! # Program
//! Wrap the declaration in a [`CommandLineParser`] to obtain a [`GeneralParser`].
//! Building verifies the declaration (ex: a repeated field name is a [`ConfigError`]).
//! The general parser prints the error and its [`ErrorContext`] when parsing fails, or the help message when the input asks for `--help`.
//!
//! # Features
//! * `unit_test`: For features that help with unit testing.
//! * `tracing_debug`: Emit `tracing` debug events at each parsing decision.
pub mod derive;
pub use braid_builder::*;
