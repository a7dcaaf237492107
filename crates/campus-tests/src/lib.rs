//! Integration tests for the campus services and gateway
//!
//! This crate contains end-to-end tests that exercise the full stack:
//! - Resource services over real sockets
//! - Gateway routing, endpoint resolution and CORS
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p campus-tests
//! ```
//!
//! Servers bind ephemeral ports, so tests run in parallel without
//! colliding.
//!
//! # Test Structure
//!
//! - `service_crud_test.rs` - Resource service CRUD over HTTP
//! - `gateway_e2e_test.rs` - Gateway in front of live services

// This crate only contains tests, no library code
