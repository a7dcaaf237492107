//! campus-core - Core entity models and store contracts
//!
//! This crate provides the fundamental abstractions shared by the campus
//! services: the entity models (University, Course), the generic
//! `Repository` contract over an external relational store, and the
//! store-level error type.

pub mod error;
pub mod models;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use models::{Course, University};
pub use store::{CourseRepository, Entity, Repository};
