mod decoder;
mod reader;

pub use decoder::{Decoder, LineProtocolDecoder};
pub use reader::{LineReader, NumberedLines};
