//! Bidirectional member/course enrollment.
//!
//! # Invariants
//! - `enroll` touches the member side first, then the course side.
//! - A missing id skips its half without raising an error; the outcome says so.
//! - Repeating `enroll` for the same pair never duplicates an id, and repairs a
//!   half that failed to persist on the previous attempt.

use crate::model::{CourseId, MemberId};
use crate::repo::course_repo::CourseStore;
use crate::repo::member_repo::MemberStore;
use crate::repo::{RepoResult, WriteOutcome};
use crate::storage::Storage;
use log::{info, warn};

/// Result of one `enroll` call, per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrollmentOutcome {
    /// Effect on the member's course set.
    pub member: WriteOutcome,
    /// Effect on the course's participant set.
    pub course: WriteOutcome,
}

impl EnrollmentOutcome {
    /// Both records existed, so both sides now hold the link.
    pub fn is_linked(&self) -> bool {
        !self.member.is_not_found() && !self.course.is_not_found()
    }

    /// Exactly one record existed, so only one side holds the link.
    pub fn is_one_sided(&self) -> bool {
        self.member.is_not_found() != self.course.is_not_found()
    }
}

/// Result of a cascading delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeOutcome {
    pub deleted: WriteOutcome,
    /// Records in the other collection that lost a reference.
    pub references_removed: usize,
}

/// Borrows both stores for operations that must update each side.
pub struct EnrollmentCoordinator<'s, M: Storage, C: Storage> {
    members: &'s mut MemberStore<M>,
    courses: &'s mut CourseStore<C>,
}

impl<'s, M: Storage, C: Storage> EnrollmentCoordinator<'s, M, C> {
    pub fn new(members: &'s mut MemberStore<M>, courses: &'s mut CourseStore<C>) -> Self {
        Self { members, courses }
    }

    /// Links `member_id` and `course_id` on both sides.
    ///
    /// # Errors
    /// Storage failures propagate. A failure on the course side leaves the
    /// member side written; calling `enroll` again completes the link.
    pub fn enroll(
        &mut self,
        member_id: MemberId,
        course_id: CourseId,
    ) -> RepoResult<EnrollmentOutcome> {
        let member = self.members.enroll_course(member_id, course_id)?;
        let course = self.courses.enroll_participant(course_id, member_id)?;
        let outcome = EnrollmentOutcome { member, course };

        if outcome.is_linked() {
            info!(
                "event=enroll module=service status=ok member_id={member_id} course_id={course_id} member_side={} course_side={}",
                member.as_str(),
                course.as_str()
            );
        } else {
            let status = if outcome.is_one_sided() {
                "partial"
            } else {
                "skipped"
            };
            warn!(
                "event=enroll module=service status={status} member_id={member_id} course_id={course_id} member_side={} course_side={}",
                member.as_str(),
                course.as_str()
            );
        }
        Ok(outcome)
    }

    /// Deletes a member and strips it from every course's participants.
    pub fn delete_member_cascade(&mut self, member_id: MemberId) -> RepoResult<CascadeOutcome> {
        let deleted = self.members.delete_member(member_id)?;
        let references_removed = self.courses.remove_participant_references(member_id)?;
        info!(
            "event=member_delete_cascade module=service status=ok member_id={member_id} outcome={} references_removed={references_removed}",
            deleted.as_str()
        );
        Ok(CascadeOutcome {
            deleted,
            references_removed,
        })
    }

    /// Deletes a course and strips it from every member's course set.
    pub fn delete_course_cascade(&mut self, course_id: CourseId) -> RepoResult<CascadeOutcome> {
        let deleted = self.courses.delete_course(course_id)?;
        let references_removed = self.members.remove_course_references(course_id)?;
        info!(
            "event=course_delete_cascade module=service status=ok course_id={course_id} outcome={} references_removed={references_removed}",
            deleted.as_str()
        );
        Ok(CascadeOutcome {
            deleted,
            references_removed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::EnrollmentOutcome;
    use crate::repo::WriteOutcome;

    #[test]
    fn outcome_classifies_sides() {
        let linked = EnrollmentOutcome {
            member: WriteOutcome::Applied,
            course: WriteOutcome::Unchanged,
        };
        assert!(linked.is_linked());
        assert!(!linked.is_one_sided());

        let one_sided = EnrollmentOutcome {
            member: WriteOutcome::Applied,
            course: WriteOutcome::NotFound,
        };
        assert!(!one_sided.is_linked());
        assert!(one_sided.is_one_sided());

        let neither = EnrollmentOutcome {
            member: WriteOutcome::NotFound,
            course: WriteOutcome::NotFound,
        };
        assert!(!neither.is_linked());
        assert!(!neither.is_one_sided());
    }
}
