pub mod approve;
pub mod list;
pub mod register;
pub mod reject;
