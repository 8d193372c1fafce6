use crate::models::hour::HourStamp;

/// Literal written into every non-key field of a synthetic row.
pub const SENTINEL: &str = "-1";

/// Marks whether a row was read from input or synthesized for a missing hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Holiday {
    Original,
    Synthetic,
}

impl Holiday {
    pub fn as_str(&self) -> &'static str {
        match self {
            Holiday::Original => "0",
            Holiday::Synthetic => "1",
        }
    }
}

/// One output row: the field values in header order plus its holiday tag.
///
/// `stamp` is derived from the `dateTime` field and only drives gap
/// detection; it is never written on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub fields: Vec<String>,
    pub stamp: HourStamp,
    pub holiday: Holiday,
}

impl Record {
    pub fn original(fields: Vec<String>, stamp: HourStamp) -> Self {
        Self {
            fields,
            stamp,
            holiday: Holiday::Original,
        }
    }
}
