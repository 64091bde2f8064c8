//! Frontend Models
//!
//! Data structures matching backend entities, plus the draft shapes sent
//! on create/update (every field except the server-assigned id).

use serde::{Deserialize, Serialize};

use crate::calendar;

/// Learning areas shared by observations and daily entries
pub const LEARNING_AREAS: &[&str] = &[
    "Practical Life",
    "Sensorial",
    "Language",
    "Mathematics",
    "Art",
    "Science",
    "Social/Emotional",
];

pub const MATERIAL_CATEGORIES: &[&str] = &[
    "Practical Life",
    "Sensorial",
    "Language",
    "Mathematics",
    "Art",
    "Science",
];

/// Signed-in teacher (read-only on the client)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub username: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub classroom: Option<String>,
}

// ========================
// Students
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: u32,
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub parent_name: String,
    #[serde(default)]
    pub parent_email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentDraft {
    pub name: String,
    pub age: u32,
    pub interests: Vec<String>,
    pub allergies: Vec<String>,
    pub parent_name: String,
    pub parent_email: String,
}

impl Default for StudentDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: 3,
            interests: Vec::new(),
            allergies: Vec::new(),
            parent_name: String::new(),
            parent_email: String::new(),
        }
    }
}

// ========================
// Observations
// ========================

/// `student` is a display name, not a foreign key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub id: u32,
    pub student: String,
    pub date: String,
    pub area: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationDraft {
    pub student: String,
    pub date: String,
    pub area: String,
    pub skills: Vec<String>,
    pub notes: String,
}

impl Default for ObservationDraft {
    fn default() -> Self {
        Self {
            student: String::new(),
            date: calendar::today_iso(),
            area: LEARNING_AREAS[0].to_string(),
            skills: Vec::new(),
            notes: String::new(),
        }
    }
}

// ========================
// Schedule
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: u32,
    pub day: String,
    pub time: String,
    pub activity: String,
    /// Minutes
    pub duration: u32,
    /// Free text, e.g. "All" or "Group A"
    pub students: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDraft {
    pub day: String,
    pub time: String,
    pub activity: String,
    pub duration: u32,
    pub students: String,
}

impl Default for ScheduleDraft {
    fn default() -> Self {
        Self {
            day: calendar::SCHOOL_DAYS[0].to_string(),
            time: "9:00 AM".to_string(),
            activity: String::new(),
            duration: 30,
            students: "All".to_string(),
        }
    }
}

// ========================
// Materials
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: u32,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub age_range: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    /// Server-maintained usage counter
    #[serde(default)]
    pub times_used: u32,
}

/// Create body; the usage counter is never sent on create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDraft {
    pub name: String,
    pub category: String,
    pub age_range: String,
    pub description: String,
    pub in_stock: bool,
}

impl Default for MaterialDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: "Sensorial".to_string(),
            age_range: "3-6".to_string(),
            description: String::new(),
            in_stock: true,
        }
    }
}

/// Update body: the full field set minus id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialUpdate {
    #[serde(flatten)]
    pub draft: MaterialDraft,
    pub times_used: u32,
}

fn default_true() -> bool {
    true
}

// ========================
// Daily entries
// ========================

/// Progress level of a daily entry.
///
/// The backend keeps this as free text; levels outside the four the form
/// offers are carried through as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum SkillLevel {
    Introduced,
    #[default]
    Developing,
    Practicing,
    Mastered,
    Other(String),
}

impl SkillLevel {
    /// Levels offered by the entry form
    pub const KNOWN: &'static [&'static str] = &["Introduced", "Developing", "Practicing", "Mastered"];

    pub fn as_str(&self) -> &str {
        match self {
            SkillLevel::Introduced => "Introduced",
            SkillLevel::Developing => "Developing",
            SkillLevel::Practicing => "Practicing",
            SkillLevel::Mastered => "Mastered",
            SkillLevel::Other(raw) => raw,
        }
    }

    /// Badge class for list rendering
    pub fn badge_class(&self) -> &'static str {
        match self {
            SkillLevel::Introduced | SkillLevel::Other(_) => "badge badge-gray",
            SkillLevel::Developing => "badge badge-yellow",
            SkillLevel::Practicing => "badge badge-blue",
            SkillLevel::Mastered => "badge badge-green",
        }
    }
}

impl From<String> for SkillLevel {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Introduced" => SkillLevel::Introduced,
            "Developing" => SkillLevel::Developing,
            "Practicing" => SkillLevel::Practicing,
            "Mastered" => SkillLevel::Mastered,
            _ => SkillLevel::Other(raw),
        }
    }
}

impl From<&str> for SkillLevel {
    fn from(raw: &str) -> Self {
        SkillLevel::from(raw.to_string())
    }
}

impl From<SkillLevel> for String {
    fn from(level: SkillLevel) -> Self {
        match level {
            SkillLevel::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    pub id: u32,
    pub student: String,
    pub date: String,
    pub subject: String,
    #[serde(default)]
    pub activities: Vec<String>,
    pub skill_level: SkillLevel,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntryDraft {
    pub student: String,
    pub date: String,
    pub subject: String,
    pub activities: Vec<String>,
    pub skill_level: SkillLevel,
    pub notes: String,
}

impl Default for DailyEntryDraft {
    fn default() -> Self {
        Self {
            student: String::new(),
            date: calendar::today_iso(),
            subject: LEARNING_AREAS[0].to_string(),
            activities: Vec::new(),
            skill_level: SkillLevel::default(),
            notes: String::new(),
        }
    }
}

// ========================
// Auth & chat payloads
// ========================

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_missing_optional_fields() {
        let student: Student = serde_json::from_str(r#"{"id":1,"name":"Ana","age":4}"#).unwrap();
        assert!(student.interests.is_empty());
        assert_eq!(student.parent_email, "");
    }

    #[test]
    fn test_material_update_is_flat() {
        let body = MaterialUpdate { draft: MaterialDraft::default(), times_used: 7 };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["times_used"], 7);
        assert_eq!(json["category"], "Sensorial");
        assert!(json.get("draft").is_none());
    }

    #[test]
    fn test_material_draft_has_no_counter() {
        let json = serde_json::to_value(MaterialDraft::default()).unwrap();
        assert!(json.get("times_used").is_none());
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_skill_level_wire_format() {
        let entry: DailyEntry = serde_json::from_str(
            r#"{"id":3,"student":"Ben","date":"2024-03-05","subject":"Art","activities":["clay"],"skill_level":"Mastered","notes":""}"#,
        )
        .unwrap();
        assert_eq!(entry.skill_level, SkillLevel::Mastered);
        assert_eq!(
            serde_json::to_string(&SkillLevel::Practicing).unwrap(),
            "\"Practicing\""
        );
    }

    #[test]
    fn test_unrecognized_skill_level_kept_verbatim() {
        let entries: Vec<DailyEntry> = serde_json::from_str(
            r#"[
                {"id":1,"student":"Ana","date":"2024-03-04","subject":"Language","activities":["sandpaper letters"],"skill_level":"Developing","notes":""},
                {"id":2,"student":"Ben","date":"2024-03-05","subject":"Art","activities":["clay"],"skill_level":"Proficient","notes":""}
            ]"#,
        )
        .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].skill_level, SkillLevel::Developing);
        assert_eq!(entries[1].skill_level, SkillLevel::Other("Proficient".into()));
        assert_eq!(entries[1].skill_level.as_str(), "Proficient");
        assert_eq!(serde_json::to_value(&entries[1]).unwrap()["skill_level"], "Proficient");
    }

    #[test]
    fn test_token_type_defaults_to_bearer() {
        let token: TokenResponse = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(token.token_type, "bearer");
    }

    #[test]
    fn test_chat_role_lowercase() {
        let msg = ChatMessage { role: ChatRole::Assistant, content: "hi".into() };
        assert_eq!(serde_json::to_value(&msg).unwrap()["role"], "assistant");
    }
}
