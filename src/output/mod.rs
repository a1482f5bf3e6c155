pub mod encoder;
mod writer;

pub use encoder::{Encoder, JsonEncoder, LineProtocolEncoder};
pub use writer::{LineWriter, Writer};
