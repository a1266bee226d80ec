//! Member record.

use super::ids::{lenient_id_set, lenient_text, CourseId, MemberId, UNSAVED_ID};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A person on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Assigned by `MemberStore`; `0` until first saved.
    pub id: MemberId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    /// Login handle, unique across members (exact, case-sensitive).
    #[serde(default, deserialize_with = "lenient_text")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    /// Avatar image URL, serialized as `avatarUrl`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub avatar_url: String,
    /// Courses this member is enrolled in. Order carries no meaning.
    #[serde(default, deserialize_with = "lenient_id_set")]
    pub courses: Vec<CourseId>,
    /// Fields this build does not model, written back as loaded.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Member {
    /// Creates an unsaved member with empty profile text and no courses.
    pub fn new(name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: UNSAVED_ID,
            name: name.into(),
            username: username.into(),
            description: String::new(),
            avatar_url: String::new(),
            courses: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Sets the free-text profile description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the avatar image URL.
    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = avatar_url.into();
        self
    }

    /// Returns whether this record has never been saved.
    pub fn is_new(&self) -> bool {
        self.id == UNSAVED_ID
    }

    /// Returns whether `course_id` is in this member's course set.
    pub fn is_enrolled_in(&self, course_id: CourseId) -> bool {
        self.courses.contains(&course_id)
    }
}

#[cfg(test)]
mod tests {
    use super::Member;

    #[test]
    fn new_member_is_unsaved_and_unenrolled() {
        let member = Member::new("Ana", "ana1");
        assert!(member.is_new());
        assert!(member.courses.is_empty());
        assert_eq!(member.username, "ana1");
    }

    #[test]
    fn null_courses_field_loads_as_empty_set() {
        let member: Member = serde_json::from_str(
            r#"{"id":4,"name":"Bo","username":"bo","description":"","avatarUrl":"","courses":null}"#,
        )
        .unwrap();
        assert_eq!(member.id, 4);
        assert!(member.courses.is_empty());
    }

    #[test]
    fn non_integer_course_reference_is_rejected() {
        let result = serde_json::from_str::<Member>(r#"{"id":4,"courses":["yoga"]}"#);
        assert!(result.is_err());
    }
}
