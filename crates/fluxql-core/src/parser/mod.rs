//! Query parser
//!
//! A hand-written recursive descent parser with precedence-climbing
//! expression parsing.

mod error;
mod parser;
mod precedence;

pub use error::ParseError;
pub use parser::Parser;
pub use precedence::attach;
