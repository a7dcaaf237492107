//! campus-store - Store adapter backing the campus repositories
//!
//! Provides `MemoryStore<E>`, an in-process table implementing the
//! `Repository` contract. It stands in for the external relational store
//! behind the same trait boundary a real store client would use.

pub mod memory;

pub use memory::MemoryStore;
