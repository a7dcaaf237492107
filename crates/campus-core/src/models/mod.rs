//! Entity models for the campus services

mod course;
mod university;

pub use course::Course;
pub use university::University;
