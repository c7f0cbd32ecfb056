pub mod grade;
pub mod history;
pub mod submit;
