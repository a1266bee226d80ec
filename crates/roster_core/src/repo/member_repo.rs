//! Member store.
//!
//! # Responsibility
//! - CRUD over the persisted `members` collection.
//! - Username lookups callers use to keep usernames unique.
//!
//! # Invariants
//! - The store never rejects a duplicate username; callers check first.
//! - Deleting a member leaves course participant lists untouched.

use super::collection::{CollectionKeys, JsonCollection};
use super::{RepoResult, WriteOutcome};
use crate::model::member::Member;
use crate::model::{CourseId, MemberId};
use crate::storage::Storage;
use log::info;

/// Storage key holding the JSON array of members.
pub const MEMBERS_KEY: &str = "members";
/// Storage key holding the next member id to assign.
pub const MEMBERS_NEXT_ID_KEY: &str = "members.nextId";

const KEYS: CollectionKeys = CollectionKeys {
    items: MEMBERS_KEY,
    next_id: MEMBERS_NEXT_ID_KEY,
};

/// Owns the member working set and its persistence.
pub struct MemberStore<S: Storage> {
    members: JsonCollection<Member, S>,
}

impl<S: Storage> MemberStore<S> {
    /// Loads all members from `storage`.
    ///
    /// A missing `members` key loads as an empty roster.
    pub fn try_new(storage: S) -> RepoResult<Self> {
        Ok(Self {
            members: JsonCollection::load(storage, KEYS)?,
        })
    }

    pub fn list_members(&self) -> &[Member] {
        self.members.items()
    }

    pub fn get_member(&self, id: MemberId) -> Option<&Member> {
        self.members.get(id)
    }

    /// Saves `candidate` under a fresh id and returns that id.
    ///
    /// Any id already on `candidate` is ignored.
    pub fn create_member(&mut self, candidate: Member) -> RepoResult<MemberId> {
        let id = self.members.insert(candidate)?;
        info!("event=member_create module=repo status=ok member_id={id}");
        Ok(id)
    }

    /// Replaces member `id` with `updated`, keeping `id` as its identifier.
    pub fn update_member(&mut self, id: MemberId, updated: Member) -> RepoResult<WriteOutcome> {
        let outcome = self.members.replace(id, updated)?;
        info!(
            "event=member_update module=repo status=ok member_id={id} outcome={}",
            outcome.as_str()
        );
        Ok(outcome)
    }

    pub fn delete_member(&mut self, id: MemberId) -> RepoResult<WriteOutcome> {
        let outcome = self.members.remove(id)?;
        info!(
            "event=member_delete module=repo status=ok member_id={id} outcome={}",
            outcome.as_str()
        );
        Ok(outcome)
    }

    /// Returns whether a member other than `excluding_id` uses `username`.
    pub fn username_exists(&self, username: &str, excluding_id: Option<MemberId>) -> bool {
        self.members
            .items()
            .iter()
            .any(|member| member.username == username && Some(member.id) != excluding_id)
    }

    /// Adds `course_id` to member `member_id`'s course set.
    pub fn enroll_course(
        &mut self,
        member_id: MemberId,
        course_id: CourseId,
    ) -> RepoResult<WriteOutcome> {
        self.members.add_link(member_id, course_id)
    }

    /// Removes `course_id` from every member; returns how many changed.
    pub fn remove_course_references(&mut self, course_id: CourseId) -> RepoResult<usize> {
        self.members.remove_link_everywhere(course_id)
    }

    /// Whether a failed write left changes that storage has not seen.
    pub fn has_unflushed_changes(&self) -> bool {
        self.members.has_unflushed_changes()
    }
}
