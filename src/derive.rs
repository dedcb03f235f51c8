//! Derive Api for reading a [`Record`](../struct.Record.html) into a struct.
//!
//! ### Getting Started
//! Instrument a struct `S` with named fields via `#[derive(FromRecord)]`.
//! This generates [`FromRecord`](../prelude/trait.FromRecord.html) for `S`, which takes each field of `S` out of the record by the same name and type.
//! Map a struct field onto a differently named record field with `#[braid(field = "...")]`.
//!
//! ```
//! use braid::{derive::*, prelude::*, Arg, Opt};
//!
//! #[derive(Debug, FromRecord)]
//! struct Fetch {
//!     url: String,
//!     #[braid(field = "max-retries")]
//!     retries: u8,
//! }
//!
//! let parser = Arg::<String>::new("url")
//!     | Opt::<u8>::new("max-retries").pattern("--max-retries").default_to(3u8);
//! let record = parser.parse(&["example.com"]).unwrap();
//! let fetch = Fetch::from_record(record).unwrap();
//!
//! assert_eq!(fetch.url, "example.com");
//! assert_eq!(fetch.retries, 3);
//! ```
//!
//! A record field which is missing, or which holds a different type than the struct field, is a [`RecordError`](../enum.RecordError.html).
//! Record fields not named by the struct are ignored.
pub use braid_derive::*;
