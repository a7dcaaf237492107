//! HTTP handlers for the campus REST APIs

pub mod courses;
pub mod university;
