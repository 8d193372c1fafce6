pub mod hour;
pub mod record;

pub use hour::HourStamp;
pub use record::{Holiday, Record};
