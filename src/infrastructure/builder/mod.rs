//! Documentation builder implementations

mod command;

pub use command::CommandDocBuilder;
