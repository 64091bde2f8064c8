//! Resource Trait
//!
//! Contract shared by the five list resources (students, observations,
//! schedule, materials, daily entries): where they live on the server,
//! which cache key holds them, what a draft looks like and how the forms
//! validate and announce changes.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::CacheKey;
use crate::error::ApiError;
use crate::models::{
    DailyEntry, DailyEntryDraft, Material, MaterialDraft, MaterialUpdate, Observation,
    ObservationDraft, Schedule, ScheduleDraft, Student, StudentDraft,
};

pub trait Resource: DeserializeOwned + Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Body for create: every field minus id (and minus server counters)
    type Draft: Serialize + Clone + Default + PartialEq + Debug + Send + Sync + 'static;
    /// Body for update
    type Update: Serialize + Clone + PartialEq + Debug;

    /// Collection path, e.g. `/api/students`
    const PATH: &'static str;
    const KEY: CacheKey;
    /// Lowercase singular, used in error notices
    const NOUN: &'static str;
    const UPDATED_MESSAGE: &'static str;
    const DELETED_MESSAGE: &'static str;

    fn id(&self) -> u32;

    /// Form contents for editing this record
    fn to_draft(&self) -> Self::Draft;

    /// Update body built from the edited draft; `self` is the record being edited.
    fn update_body(&self, draft: Self::Draft) -> Self::Update;

    /// Required-field checks run before submit
    fn validate(draft: &Self::Draft) -> Result<(), ApiError>;

    fn created_message(draft: &Self::Draft) -> String;

    fn item_path(id: u32) -> String {
        format!("{}/{}", Self::PATH, id)
    }
}

fn require(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::Validation(format!("{} is required", field)))
    } else {
        Ok(())
    }
}

impl Resource for Student {
    type Draft = StudentDraft;
    type Update = StudentDraft;

    const PATH: &'static str = "/api/students";
    const KEY: CacheKey = CacheKey::Students;
    const NOUN: &'static str = "student";
    const UPDATED_MESSAGE: &'static str = "Student updated successfully!";
    const DELETED_MESSAGE: &'static str = "Student deleted";

    fn id(&self) -> u32 {
        self.id
    }

    fn to_draft(&self) -> StudentDraft {
        StudentDraft {
            name: self.name.clone(),
            age: self.age,
            interests: self.interests.clone(),
            allergies: self.allergies.clone(),
            parent_name: self.parent_name.clone(),
            parent_email: self.parent_email.clone(),
        }
    }

    fn update_body(&self, draft: StudentDraft) -> StudentDraft {
        draft
    }

    fn validate(draft: &StudentDraft) -> Result<(), ApiError> {
        require(&draft.name, "Name")
    }

    fn created_message(draft: &StudentDraft) -> String {
        format!("Added {} successfully!", draft.name)
    }
}

impl Resource for Observation {
    type Draft = ObservationDraft;
    type Update = ObservationDraft;

    const PATH: &'static str = "/api/observations";
    const KEY: CacheKey = CacheKey::Observations;
    const NOUN: &'static str = "observation";
    const UPDATED_MESSAGE: &'static str = "Observation updated!";
    const DELETED_MESSAGE: &'static str = "Observation deleted";

    fn id(&self) -> u32 {
        self.id
    }

    fn to_draft(&self) -> ObservationDraft {
        ObservationDraft {
            student: self.student.clone(),
            date: self.date.clone(),
            area: self.area.clone(),
            skills: self.skills.clone(),
            notes: self.notes.clone(),
        }
    }

    fn update_body(&self, draft: ObservationDraft) -> ObservationDraft {
        draft
    }

    fn validate(draft: &ObservationDraft) -> Result<(), ApiError> {
        require(&draft.student, "Student")?;
        require(&draft.notes, "Notes")
    }

    fn created_message(draft: &ObservationDraft) -> String {
        format!("Observation for {} saved!", draft.student)
    }
}

impl Resource for Schedule {
    type Draft = ScheduleDraft;
    type Update = ScheduleDraft;

    const PATH: &'static str = "/api/schedule";
    const KEY: CacheKey = CacheKey::Schedules;
    const NOUN: &'static str = "activity";
    const UPDATED_MESSAGE: &'static str = "Activity updated!";
    const DELETED_MESSAGE: &'static str = "Activity deleted";

    fn id(&self) -> u32 {
        self.id
    }

    fn to_draft(&self) -> ScheduleDraft {
        ScheduleDraft {
            day: self.day.clone(),
            time: self.time.clone(),
            activity: self.activity.clone(),
            duration: self.duration,
            students: self.students.clone(),
        }
    }

    fn update_body(&self, draft: ScheduleDraft) -> ScheduleDraft {
        draft
    }

    fn validate(draft: &ScheduleDraft) -> Result<(), ApiError> {
        require(&draft.activity, "Activity")
    }

    fn created_message(draft: &ScheduleDraft) -> String {
        format!("Added {} successfully!", draft.activity)
    }
}

impl Resource for Material {
    type Draft = MaterialDraft;
    type Update = MaterialUpdate;

    const PATH: &'static str = "/api/materials";
    const KEY: CacheKey = CacheKey::Materials;
    const NOUN: &'static str = "material";
    const UPDATED_MESSAGE: &'static str = "Material updated!";
    const DELETED_MESSAGE: &'static str = "Material deleted";

    fn id(&self) -> u32 {
        self.id
    }

    fn to_draft(&self) -> MaterialDraft {
        MaterialDraft {
            name: self.name.clone(),
            category: self.category.clone(),
            age_range: self.age_range.clone(),
            description: self.description.clone(),
            in_stock: self.in_stock,
        }
    }

    /// Carries the current usage counter so an edit never resets it.
    fn update_body(&self, draft: MaterialDraft) -> MaterialUpdate {
        MaterialUpdate { draft, times_used: self.times_used }
    }

    fn validate(draft: &MaterialDraft) -> Result<(), ApiError> {
        require(&draft.name, "Name")
    }

    fn created_message(draft: &MaterialDraft) -> String {
        format!("Added {} successfully!", draft.name)
    }
}

impl Resource for DailyEntry {
    type Draft = DailyEntryDraft;
    type Update = DailyEntryDraft;

    const PATH: &'static str = "/api/daily-entries";
    const KEY: CacheKey = CacheKey::DailyEntries;
    const NOUN: &'static str = "entry";
    const UPDATED_MESSAGE: &'static str = "Entry updated!";
    const DELETED_MESSAGE: &'static str = "Entry deleted";

    fn id(&self) -> u32 {
        self.id
    }

    fn to_draft(&self) -> DailyEntryDraft {
        DailyEntryDraft {
            student: self.student.clone(),
            date: self.date.clone(),
            subject: self.subject.clone(),
            activities: self.activities.clone(),
            skill_level: self.skill_level.clone(),
            notes: self.notes.clone(),
        }
    }

    fn update_body(&self, draft: DailyEntryDraft) -> DailyEntryDraft {
        draft
    }

    fn validate(draft: &DailyEntryDraft) -> Result<(), ApiError> {
        require(&draft.student, "Student")?;
        if draft.activities.is_empty() {
            return Err(ApiError::Validation("Add at least one activity".to_string()));
        }
        Ok(())
    }

    fn created_message(draft: &DailyEntryDraft) -> String {
        format!("Entry for {} saved!", draft.student)
    }
}
