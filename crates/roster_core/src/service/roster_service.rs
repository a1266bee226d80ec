//! Roster facade consumed by presentation layers.
//!
//! # Responsibility
//! - Own one member store and one course store over shared storage.
//! - Provide the guarded save flow (username check, then create or update).
//! - Resolve enrollment id sets into records for display.
//!
//! # Invariants
//! - `save_member` never writes a username another member already uses.
//! - Lookups skip dangling ids left behind by non-cascading deletes.

use crate::model::course::Course;
use crate::model::member::Member;
use crate::model::{CourseId, MemberId};
use crate::repo::course_repo::CourseStore;
use crate::repo::member_repo::MemberStore;
use crate::repo::{RepoError, RepoResult, WriteOutcome};
use crate::service::enrollment::{CascadeOutcome, EnrollmentCoordinator, EnrollmentOutcome};
use crate::storage::Storage;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from guarded roster use-cases.
#[derive(Debug)]
pub enum RosterServiceError {
    /// Another member already uses this username.
    UsernameTaken(String),
    Repo(RepoError),
}

impl Display for RosterServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UsernameTaken(_) => write!(f, "Username already exists!"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RosterServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::UsernameTaken(_) => None,
        }
    }
}

impl From<RepoError> for RosterServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Members, courses and enrollment behind one handle.
pub struct RosterService<S: Storage> {
    members: MemberStore<S>,
    courses: CourseStore<S>,
}

impl<S: Storage + Clone> RosterService<S> {
    /// Loads both collections from the same storage.
    pub fn open(storage: S) -> RepoResult<Self> {
        let members = MemberStore::try_new(storage.clone())?;
        let courses = CourseStore::try_new(storage)?;
        info!(
            "event=roster_open module=service status=ok members={} courses={}",
            members.list_members().len(),
            courses.list_courses().len()
        );
        Ok(Self { members, courses })
    }
}

impl<S: Storage> RosterService<S> {
    pub fn from_stores(members: MemberStore<S>, courses: CourseStore<S>) -> Self {
        Self { members, courses }
    }

    pub fn member_store(&self) -> &MemberStore<S> {
        &self.members
    }

    pub fn course_store(&self) -> &CourseStore<S> {
        &self.courses
    }

    pub fn list_members(&self) -> &[Member] {
        self.members.list_members()
    }

    pub fn get_member(&self, id: MemberId) -> Option<&Member> {
        self.members.get_member(id)
    }

    /// Unguarded create; see [`Self::save_member`] for the checked path.
    pub fn create_member(&mut self, candidate: Member) -> RepoResult<MemberId> {
        self.members.create_member(candidate)
    }

    pub fn update_member(&mut self, id: MemberId, updated: Member) -> RepoResult<WriteOutcome> {
        self.members.update_member(id, updated)
    }

    pub fn delete_member(&mut self, id: MemberId) -> RepoResult<WriteOutcome> {
        self.members.delete_member(id)
    }

    pub fn username_exists(&self, username: &str, excluding_id: Option<MemberId>) -> bool {
        self.members.username_exists(username, excluding_id)
    }

    pub fn list_courses(&self) -> &[Course] {
        self.courses.list_courses()
    }

    pub fn get_course(&self, id: CourseId) -> Option<&Course> {
        self.courses.get_course(id)
    }

    pub fn create_course(&mut self, candidate: Course) -> RepoResult<CourseId> {
        self.courses.create_course(candidate)
    }

    pub fn update_course(&mut self, id: CourseId, updated: Course) -> RepoResult<WriteOutcome> {
        self.courses.update_course(id, updated)
    }

    pub fn delete_course(&mut self, id: CourseId) -> RepoResult<WriteOutcome> {
        self.courses.delete_course(id)
    }

    pub fn enroll(
        &mut self,
        member_id: MemberId,
        course_id: CourseId,
    ) -> RepoResult<EnrollmentOutcome> {
        self.coordinator().enroll(member_id, course_id)
    }

    /// Opt-in delete that also clears the member from course participants.
    pub fn delete_member_cascade(&mut self, id: MemberId) -> RepoResult<CascadeOutcome> {
        self.coordinator().delete_member_cascade(id)
    }

    /// Opt-in delete that also clears the course from member course sets.
    pub fn delete_course_cascade(&mut self, id: CourseId) -> RepoResult<CascadeOutcome> {
        self.coordinator().delete_course_cascade(id)
    }

    /// Creates (`id == 0`) or updates a member after checking its username.
    ///
    /// # Errors
    /// - `UsernameTaken` when another member uses the username; nothing is written.
    /// - `Repo` on storage failure.
    pub fn save_member(&mut self, member: Member) -> Result<MemberId, RosterServiceError> {
        if self.members.username_exists(&member.username, Some(member.id)) {
            warn!(
                "event=member_save module=service status=rejected reason=username_taken member_id={}",
                member.id
            );
            return Err(RosterServiceError::UsernameTaken(member.username));
        }

        if member.is_new() {
            return Ok(self.members.create_member(member)?);
        }

        let id = member.id;
        self.members.update_member(id, member)?;
        Ok(id)
    }

    /// Creates (`id == 0`) or updates a course.
    pub fn save_course(&mut self, course: Course) -> RepoResult<CourseId> {
        if course.is_new() {
            return self.courses.create_course(course);
        }

        let id = course.id;
        self.courses.update_course(id, course)?;
        Ok(id)
    }

    /// Members enrolled in `course_id`, skipping ids with no member record.
    pub fn course_participants(&self, course_id: CourseId) -> Vec<&Member> {
        self.courses
            .get_course(course_id)
            .map(|course| {
                course
                    .participants
                    .iter()
                    .filter_map(|member_id| self.members.get_member(*member_id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Courses `member_id` is enrolled in, skipping ids with no course record.
    pub fn member_courses(&self, member_id: MemberId) -> Vec<&Course> {
        self.members
            .get_member(member_id)
            .map(|member| {
                member
                    .courses
                    .iter()
                    .filter_map(|course_id| self.courses.get_course(*course_id))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn coordinator(&mut self) -> EnrollmentCoordinator<'_, S, S> {
        EnrollmentCoordinator::new(&mut self.members, &mut self.courses)
    }
}
