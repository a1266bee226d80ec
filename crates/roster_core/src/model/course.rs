//! Course record.

use super::ids::{lenient_id_set, lenient_text, CourseId, MemberId, UNSAVED_ID};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A scheduled course members can enroll in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Assigned by `CourseStore`; `0` until first saved.
    pub id: CourseId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    /// Calendar date as entered (`YYYY-MM-DD`); stored verbatim.
    #[serde(default, deserialize_with = "lenient_text")]
    pub start_date: String,
    /// Members enrolled in this course.
    #[serde(default, deserialize_with = "lenient_id_set")]
    pub participants: Vec<MemberId>,
    /// Fields this build does not model, written back as loaded.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Course {
    /// Creates an unsaved course with no participants.
    pub fn new(name: impl Into<String>, start_date: impl Into<String>) -> Self {
        Self {
            id: UNSAVED_ID,
            name: name.into(),
            description: String::new(),
            start_date: start_date.into(),
            participants: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Sets the free-text course description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns whether this record has never been saved.
    pub fn is_new(&self) -> bool {
        self.id == UNSAVED_ID
    }

    /// Returns whether `member_id` is in this course's participant set.
    pub fn has_participant(&self, member_id: MemberId) -> bool {
        self.participants.contains(&member_id)
    }
}

#[cfg(test)]
mod tests {
    use super::Course;

    #[test]
    fn wire_shape_uses_camel_case_names() {
        let mut course = Course::new("Yoga", "2024-01-10").with_description("mornings");
        course.id = 1;
        course.participants = vec![3];

        let json = serde_json::to_value(&course).unwrap();
        assert_eq!(json["startDate"], "2024-01-10");
        assert_eq!(json["participants"], serde_json::json!([3]));
        assert!(json.get("start_date").is_none());
    }

    #[test]
    fn participants_of_wrong_type_load_as_empty_set() {
        let course: Course =
            serde_json::from_str(r#"{"id":2,"name":"Spin","participants":"3,4"}"#).unwrap();
        assert!(course.participants.is_empty());
        assert_eq!(course.start_date, "");
    }
}
