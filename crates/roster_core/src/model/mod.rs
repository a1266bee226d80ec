//! Roster domain model.
//!
//! # Responsibility
//! - Define the member and course records and their JSON wire shape.
//! - Keep the member/course enrollment relationship as two id sets.
//!
//! # Invariants
//! - Member ids and course ids live in independent id spaces.
//! - Id `0` marks a record that has not been saved yet.

pub mod course;
mod ids;
pub mod member;

pub use ids::{CourseId, MemberId, UNSAVED_ID};
