//! Course store.
//!
//! # Invariants
//! - Mirrors `MemberStore`: same id policy, same persist-on-every-write rule.
//! - Deleting a course leaves member course sets untouched.

use super::collection::{CollectionKeys, JsonCollection};
use super::{RepoResult, WriteOutcome};
use crate::model::course::Course;
use crate::model::{CourseId, MemberId};
use crate::storage::Storage;
use log::info;

pub const COURSES_KEY: &str = "courses";
pub const COURSES_NEXT_ID_KEY: &str = "courses.nextId";

const KEYS: CollectionKeys = CollectionKeys {
    items: COURSES_KEY,
    next_id: COURSES_NEXT_ID_KEY,
};

/// Owns the course working set and its persistence.
pub struct CourseStore<S: Storage> {
    courses: JsonCollection<Course, S>,
}

impl<S: Storage> CourseStore<S> {
    pub fn try_new(storage: S) -> RepoResult<Self> {
        Ok(Self {
            courses: JsonCollection::load(storage, KEYS)?,
        })
    }

    pub fn list_courses(&self) -> &[Course] {
        self.courses.items()
    }

    pub fn get_course(&self, id: CourseId) -> Option<&Course> {
        self.courses.get(id)
    }

    pub fn create_course(&mut self, candidate: Course) -> RepoResult<CourseId> {
        let id = self.courses.insert(candidate)?;
        info!("event=course_create module=repo status=ok course_id={id}");
        Ok(id)
    }

    pub fn update_course(&mut self, id: CourseId, updated: Course) -> RepoResult<WriteOutcome> {
        let outcome = self.courses.replace(id, updated)?;
        info!(
            "event=course_update module=repo status=ok course_id={id} outcome={}",
            outcome.as_str()
        );
        Ok(outcome)
    }

    pub fn delete_course(&mut self, id: CourseId) -> RepoResult<WriteOutcome> {
        let outcome = self.courses.remove(id)?;
        info!(
            "event=course_delete module=repo status=ok course_id={id} outcome={}",
            outcome.as_str()
        );
        Ok(outcome)
    }

    /// Adds `member_id` to course `course_id`'s participants.
    pub fn enroll_participant(
        &mut self,
        course_id: CourseId,
        member_id: MemberId,
    ) -> RepoResult<WriteOutcome> {
        self.courses.add_link(course_id, member_id)
    }

    pub fn remove_participant_references(&mut self, member_id: MemberId) -> RepoResult<usize> {
        self.courses.remove_link_everywhere(member_id)
    }

    pub fn has_unflushed_changes(&self) -> bool {
        self.courses.has_unflushed_changes()
    }
}
