mod metric;
mod timestamp;
mod value;

pub use metric::*;
pub use timestamp::*;
pub use value::*;

pub type MetricName = String;

pub type FieldName = String;
