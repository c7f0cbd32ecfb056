pub mod class;
pub mod students;
