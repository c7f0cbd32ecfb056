pub mod date;
pub mod password;
pub mod validate;

pub use date::parse_date;
