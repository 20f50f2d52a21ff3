//! Terminal and JSON output for the docpub binary

pub mod blocks;
pub mod context;
pub mod error;
pub mod json;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
