//! Use-case services over the member and course stores.
//!
//! # Responsibility
//! - Keep both sides of an enrollment in step.
//! - Expose the operations presentation layers call, without storage details.

pub mod enrollment;
pub mod roster_service;
