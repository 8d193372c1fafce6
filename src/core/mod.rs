pub mod aggregate;
pub mod calculator;
pub mod fill;
pub mod logic;
pub mod reader;
pub mod schema;
