//! Integration test crate for the Prism OPR engine.
//!
//! This crate has no library code — it only contains integration tests
//! that exercise end-to-end grading flows across the workspace crates.
//!
//! Run all integration tests:
//! ```sh
//! cargo test -p prism-integration-tests
//! ```
