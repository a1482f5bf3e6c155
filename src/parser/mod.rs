mod common;
mod line;
mod result;

pub use line::parse_line;
pub use result::{ParseError, Span};
