mod json;
mod line;

pub use json::JsonEncoder;
pub use line::LineProtocolEncoder;

use crate::error::Result;
use crate::model::Metric;

pub trait Encoder {
    fn encode(&self, metric: &Metric) -> Result<Vec<u8>>;
}
