//! campus-service - Per-entity business logic
//!
//! One service per entity kind, each owning its repository. Dependencies
//! are passed at construction; there is no ambient registry. Every
//! operation is a single synchronous store call with no retry logic, and
//! store failures propagate unmodified to the API layer.

pub mod course;
pub mod university;

pub use course::CourseService;
pub use university::UniversityService;
