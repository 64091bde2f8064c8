//! Resource Forms
//!
//! Create/edit form state shared by every list page, plus the write
//! operations that invalidate the resource's cache key on success.
//!
//! Phases: `Idle → Open(mode) → Submitting(mode) → Idle`, falling back to
//! `Open(mode)` with the draft intact when the request fails.

use log::{info, warn};

use crate::api::ApiClient;
use crate::cache::{CacheKey, QueryCache};
use crate::error::{ApiError, ApiResult};
use crate::models::Material;
use crate::resource::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Open(FormMode),
    Submitting(FormMode),
}

/// A validated write, ready to send
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<R: Resource> {
    Create(R::Draft),
    Update { id: u32, body: R::Update },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceForm<R: Resource> {
    phase: FormPhase,
    draft: R::Draft,
    editing: Option<R>,
}

impl<R: Resource> Default for ResourceForm<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> ResourceForm<R> {
    pub fn new() -> Self {
        Self { phase: FormPhase::Idle, draft: R::Draft::default(), editing: None }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.phase, FormPhase::Idle)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, FormPhase::Submitting(_))
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.phase, FormPhase::Open(FormMode::Edit(_)) | FormPhase::Submitting(FormMode::Edit(_)))
    }

    pub fn open_create(&mut self) {
        self.phase = FormPhase::Open(FormMode::Create);
        self.draft = R::Draft::default();
        self.editing = None;
    }

    pub fn open_edit(&mut self, record: &R) {
        self.phase = FormPhase::Open(FormMode::Edit(record.id()));
        self.draft = record.to_draft();
        self.editing = Some(record.clone());
    }

    pub fn cancel(&mut self) {
        *self = Self::new();
    }

    pub fn draft(&self) -> &R::Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut R::Draft {
        &mut self.draft
    }

    /// Validate and move to `Submitting`. A failed check leaves the form open.
    pub fn begin_submit(&mut self) -> Result<Submission<R>, ApiError> {
        let FormPhase::Open(mode) = self.phase else {
            return Err(ApiError::Validation("Form is not open".to_string()));
        };
        R::validate(&self.draft)?;

        let submission = match mode {
            FormMode::Create => Submission::Create(self.draft.clone()),
            FormMode::Edit(id) => {
                let record = self
                    .editing
                    .as_ref()
                    .ok_or_else(|| ApiError::Validation(format!("No {} selected", R::NOUN)))?;
                Submission::Update { id, body: record.update_body(self.draft.clone()) }
            }
        };
        self.phase = FormPhase::Submitting(mode);
        Ok(submission)
    }

    /// Close on success, reopen with the same draft on failure.
    pub fn finish(&mut self, succeeded: bool) {
        match self.phase {
            FormPhase::Submitting(_) if succeeded => self.cancel(),
            FormPhase::Submitting(mode) => self.phase = FormPhase::Open(mode),
            _ => {}
        }
    }

    pub async fn submit(&mut self, api: &ApiClient, cache: &QueryCache) -> ApiResult<String> {
        let submission = self.begin_submit()?;
        let result = execute::<R>(api, cache, submission).await;
        self.finish(result.is_ok());
        result
    }
}

// ========================
// Write Operations
// ========================

/// Send a submission; on success invalidate `R::KEY` and return the notice text.
pub async fn execute<R: Resource>(
    api: &ApiClient,
    cache: &QueryCache,
    submission: Submission<R>,
) -> ApiResult<String> {
    let message = match submission {
        Submission::Create(draft) => {
            let created = api.create::<R>(&draft).await?;
            info!("[FORM] Created {} {}", R::NOUN, created.id());
            R::created_message(&draft)
        }
        Submission::Update { id, body } => {
            api.update::<R>(id, &body).await?;
            info!("[FORM] Updated {} {}", R::NOUN, id);
            R::UPDATED_MESSAGE.to_string()
        }
    };
    cache.invalidate(R::KEY);
    Ok(message)
}

pub async fn delete_record<R: Resource>(api: &ApiClient, cache: &QueryCache, id: u32) -> ApiResult<String> {
    api.delete::<R>(id).await?;
    info!("[FORM] Deleted {} {}", R::NOUN, id);
    cache.invalidate(R::KEY);
    Ok(R::DELETED_MESSAGE.to_string())
}

pub async fn record_use(api: &ApiClient, cache: &QueryCache, material: &Material) -> ApiResult<String> {
    api.record_material_use(material.id).await?;
    cache.invalidate(CacheKey::Materials);
    let name = if material.name.is_empty() { "material" } else { material.name.as_str() };
    Ok(format!("Recorded use of {}", name))
}

/// Cached list of `R`
pub async fn load<R: Resource>(api: &ApiClient, cache: &QueryCache) -> ApiResult<Vec<R>> {
    cache.fetch(R::KEY, || api.list::<R>()).await
}

/// Error notice text for a failed write.
pub fn failure_message(action: &str, noun: &str, err: &ApiError) -> String {
    match err {
        ApiError::Validation(message) => message.clone(),
        other => {
            warn!("[FORM] Failed to {} {}: {}", action, noun, other);
            format!("Failed to {} {}", action, noun)
        }
    }
}

// ========================
// Tag Lists
// ========================

/// Append a trimmed tag. Empty input is ignored; duplicates are kept.
pub fn add_tag(list: &mut Vec<String>, input: &str) -> bool {
    let tag = input.trim();
    if tag.is_empty() {
        return false;
    }
    list.push(tag.to_string());
    true
}

/// Whole-number input as an unsigned field, clamped to `u32`'s range.
pub fn to_count(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

pub fn remove_tag(list: &mut Vec<String>, index: usize) {
    if index < list.len() {
        list.remove(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{client, MockTransport};
    use crate::api::Method;
    use crate::models::{Material, MaterialDraft, Observation, Student, StudentDraft};
    use serde_json::json;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    fn cache() -> QueryCache {
        QueryCache::new(Duration::from_secs(30), 1)
    }

    fn ana() -> serde_json::Value {
        json!({"id": 1, "name": "Ana", "age": 4, "interests": ["art"], "allergies": [], "parent_name": "", "parent_email": ""})
    }

    fn count_invalidations(cache: &QueryCache, key: CacheKey) -> Rc<Cell<u32>> {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        cache.subscribe(key, move |_| counter.set(counter.get() + 1));
        hits
    }

    #[tokio::test]
    async fn test_create_student_end_to_end() {
        let transport = MockTransport::new();
        transport.respond(Method::Post, "/api/students", 201, ana());
        transport.respond(Method::Get, "/api/students", 200, json!([ana()]));
        let (api, _) = client(&transport, Some("tok"));
        let cache = cache();
        cache.set(CacheKey::Students, Vec::<Student>::new());
        cache.set(CacheKey::Materials, Vec::<Material>::new());
        let student_hits = count_invalidations(&cache, CacheKey::Students);
        let material_hits = count_invalidations(&cache, CacheKey::Materials);

        let mut form = ResourceForm::<Student>::new();
        form.open_create();
        *form.draft_mut() = StudentDraft {
            name: "Ana".into(),
            age: 4,
            interests: vec!["art".into()],
            ..Default::default()
        };
        let notice = form.submit(&api, &cache).await.unwrap();

        assert_eq!(notice, "Added Ana successfully!");
        assert_eq!(transport.count(Method::Post, "/api/students"), 1);
        assert_eq!(
            transport.requests()[0].body,
            Some(json!({"name": "Ana", "age": 4, "interests": ["art"], "allergies": [], "parent_name": "", "parent_email": ""}))
        );
        assert_eq!(student_hits.get(), 1);
        assert_eq!(material_hits.get(), 0);
        assert!(cache.contains(CacheKey::Materials));
        assert_eq!(form.phase(), FormPhase::Idle);

        let students = load::<Student>(&api, &cache).await.unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(transport.count(Method::Get, "/api/students"), 1);
    }

    #[tokio::test]
    async fn test_invalid_draft_sends_nothing() {
        let transport = MockTransport::new();
        let (api, _) = client(&transport, Some("tok"));
        let cache = cache();

        let mut form = ResourceForm::<Observation>::new();
        form.open_create();
        form.draft_mut().student = "Ben".into();
        let result = form.submit(&api, &cache).await;

        assert_eq!(result, Err(ApiError::Validation("Notes is required".into())));
        assert_eq!(form.phase(), FormPhase::Open(FormMode::Create));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_failed_update_keeps_draft() {
        let transport = MockTransport::new();
        transport.respond(Method::Put, "/api/materials/4", 500, json!({"detail": "boom"}));
        let (api, _) = client(&transport, Some("tok"));
        let cache = cache();
        let hits = count_invalidations(&cache, CacheKey::Materials);

        let material = Material {
            id: 4,
            name: "Pink Tower".into(),
            category: "Sensorial".into(),
            age_range: "3-6".into(),
            description: String::new(),
            in_stock: true,
            times_used: 7,
        };
        let mut form = ResourceForm::<Material>::new();
        form.open_edit(&material);
        form.draft_mut().description = "Ten cubes".into();

        assert!(form.submit(&api, &cache).await.is_err());
        assert_eq!(form.phase(), FormPhase::Open(FormMode::Edit(4)));
        assert_eq!(form.draft().description, "Ten cubes");
        assert_eq!(hits.get(), 0);
        assert_eq!(transport.requests()[0].body.as_ref().unwrap()["times_used"], 7);
    }

    #[tokio::test]
    async fn test_update_message_and_reset() {
        let transport = MockTransport::new();
        transport.respond(Method::Put, "/api/students/1", 200, ana());
        let (api, _) = client(&transport, Some("tok"));
        let cache = cache();

        let student: Student = serde_json::from_value(ana()).unwrap();
        let mut form = ResourceForm::<Student>::new();
        form.open_edit(&student);
        assert!(form.is_editing());

        let notice = form.submit(&api, &cache).await.unwrap();
        assert_eq!(notice, "Student updated successfully!");
        assert!(!form.is_open());
        assert_eq!(form.draft(), &StudentDraft::default());
    }

    #[tokio::test]
    async fn test_delete_invalidates_once() {
        let transport = MockTransport::new();
        transport.respond(Method::Delete, "/api/students/1", 204, serde_json::Value::Null);
        let (api, _) = client(&transport, Some("tok"));
        let cache = cache();
        let hits = count_invalidations(&cache, CacheKey::Students);

        let notice = delete_record::<Student>(&api, &cache, 1).await.unwrap();
        assert_eq!(notice, "Student deleted");
        assert_eq!(hits.get(), 1);
    }

    #[tokio::test]
    async fn test_record_use_notice() {
        let transport = MockTransport::new();
        transport.respond(
            Method::Post,
            "/api/materials/2/use",
            200,
            json!({"id": 2, "name": "Sandpaper Letters", "category": "Language", "age_range": "3-6", "description": "", "in_stock": true, "times_used": 1}),
        );
        let (api, _) = client(&transport, Some("tok"));
        let cache = cache();
        let hits = count_invalidations(&cache, CacheKey::Materials);

        let material: Material = serde_json::from_value(json!({
            "id": 2, "name": "Sandpaper Letters", "category": "Language", "age_range": "3-6",
            "description": "", "in_stock": true, "times_used": 0
        }))
        .unwrap();
        let notice = record_use(&api, &cache, &material).await.unwrap();
        assert_eq!(notice, "Recorded use of Sandpaper Letters");
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_submit_requires_open_form() {
        let mut form = ResourceForm::<Material>::new();
        assert!(form.begin_submit().is_err());
        form.open_create();
        *form.draft_mut() = MaterialDraft { name: "Bells".into(), ..Default::default() };
        assert!(matches!(form.begin_submit(), Ok(Submission::Create(_))));
        assert!(form.is_submitting());
        // a second submit while one is in flight is refused
        assert!(form.begin_submit().is_err());
    }

    #[test]
    fn test_to_count_clamps() {
        assert_eq!(to_count(4), 4);
        assert_eq!(to_count(-3), 0);
        assert_eq!(to_count(i64::from(u32::MAX) + 1), u32::MAX);
        assert_eq!(to_count(i64::MAX), u32::MAX);
    }

    #[test]
    fn test_tag_list_editing() {
        let mut tags = Vec::new();
        assert!(add_tag(&mut tags, "  art "));
        assert!(!add_tag(&mut tags, "   "));
        assert!(add_tag(&mut tags, "art"));
        assert_eq!(tags, vec!["art".to_string(), "art".to_string()]);

        remove_tag(&mut tags, 0);
        remove_tag(&mut tags, 5);
        assert_eq!(tags, vec!["art".to_string()]);
    }

    #[test]
    fn test_failure_message() {
        let err = ApiError::Validation("Name is required".into());
        assert_eq!(failure_message("save", "student", &err), "Name is required");
        let err = ApiError::Status { status: 500, body: String::new() };
        assert_eq!(failure_message("delete", "material", &err), "Failed to delete material");
    }
}
