mod codec;
mod command;
mod compound;
mod core;
mod leaf;

pub use self::core::*;
pub use command::*;
pub use compound::*;
pub use leaf::*;
