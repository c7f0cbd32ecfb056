//! 业务数据模型
//!
//! 与 `entity` 中的数据库实体分离，存储层负责两者之间的转换。

pub mod activities;
pub mod common;
pub mod progress;
pub mod students;
pub mod submissions;
pub mod users;

pub use common::{ErrorCode, Outcome};
