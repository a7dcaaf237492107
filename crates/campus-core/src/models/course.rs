//! Course entity

use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// A course record.
///
/// `university_id` references a University by id but is opaque to the
/// course service: no referential-integrity check is performed at this
/// layer (cross-service consistency is out of scope).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_hours: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub academic_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerequisites: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuition_fee: Option<f64>,
    #[serde(default)]
    pub is_active: bool,
}

impl Entity for Course {
    const KIND: &'static str = "course";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn wire_format_is_camel_case() {
        let c = Course {
            id: Some(7),
            university_id: Some(1),
            course_code: Some("CS101".to_string()),
            title: "Intro to CS".to_string(),
            credit_hours: Some(3),
            is_active: true,
            ..Default::default()
        };

        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["universityId"], 1);
        assert_eq!(json["courseCode"], "CS101");
        assert_eq!(json["creditHours"], 3);
        assert_eq!(json["isActive"], true);
    }

    #[test]
    fn is_active_defaults_to_false() {
        let c: Course = serde_json::from_str(r#"{"title":"Algorithms"}"#).unwrap();
        assert!(!c.is_active);
        assert_eq!(c.university_id, None);
    }
}
