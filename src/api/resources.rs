//! Resource Endpoints
//!
//! Generic list/create/update/delete over every [`Resource`], plus the
//! material usage counter.

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::Material;
use crate::resource::Resource;

impl ApiClient {
    /// All records, in server order
    pub async fn list<R: Resource>(&self) -> ApiResult<Vec<R>> {
        self.get_json(R::PATH).await
    }

    pub async fn create<R: Resource>(&self, draft: &R::Draft) -> ApiResult<R> {
        self.post_json(R::PATH, draft).await
    }

    pub async fn update<R: Resource>(&self, id: u32, body: &R::Update) -> ApiResult<R> {
        self.put_json(&R::item_path(id), body).await
    }

    pub async fn delete<R: Resource>(&self, id: u32) -> ApiResult<()> {
        self.delete_path(&R::item_path(id)).await
    }

    /// Bump `times_used` on the server
    pub async fn record_material_use(&self, id: u32) -> ApiResult<Material> {
        self.post_empty(&format!("{}/use", Material::item_path(id))).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{client, MockTransport};
    use crate::api::Method;
    use crate::error::ApiError;
    use crate::models::{DailyEntry, Material, Schedule, ScheduleDraft, SkillLevel, Student};
    use serde_json::json;

    #[tokio::test]
    async fn test_list_keeps_server_order() {
        let transport = MockTransport::new();
        transport.respond(
            Method::Get,
            "/api/students",
            200,
            json!([
                {"id": 7, "name": "Zoe", "age": 5, "interests": [], "allergies": [], "parent_name": "", "parent_email": ""},
                {"id": 2, "name": "Ana", "age": 4, "interests": ["art"], "allergies": [], "parent_name": "", "parent_email": ""}
            ]),
        );
        let (api, _) = client(&transport, Some("tok"));

        let students = api.list::<Student>().await.unwrap();
        let ids: Vec<u32> = students.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![7, 2]);
    }

    #[tokio::test]
    async fn test_list_tolerates_free_text_skill_level() {
        let transport = MockTransport::new();
        transport.respond(
            Method::Get,
            "/api/daily-entries",
            200,
            json!([
                {"id": 1, "student": "Ana", "date": "2024-03-04", "subject": "Language", "activities": ["metal insets"], "skill_level": "Developing", "notes": ""},
                {"id": 2, "student": "Ben", "date": "2024-03-05", "subject": "Art", "activities": ["clay"], "skill_level": "Proficient", "notes": ""}
            ]),
        );
        let (api, _) = client(&transport, Some("tok"));

        let entries = api.list::<DailyEntry>().await.unwrap();
        assert_eq!(entries[0].skill_level, SkillLevel::Developing);
        assert_eq!(entries[1].skill_level.as_str(), "Proficient");
    }

    #[tokio::test]
    async fn test_update_targets_item_path() {
        let transport = MockTransport::new();
        transport.respond(
            Method::Put,
            "/api/schedule/3",
            200,
            json!({"id": 3, "day": "Tuesday", "time": "10:00 AM", "activity": "Circle", "duration": 20, "students": "All"}),
        );
        let (api, _) = client(&transport, Some("tok"));

        let draft = ScheduleDraft { activity: "Circle".into(), ..Default::default() };
        let updated = api.update::<Schedule>(3, &draft).await.unwrap();
        assert_eq!(updated.day, "Tuesday");
        assert_eq!(transport.requests()[0].body.as_ref().unwrap()["activity"], "Circle");
    }

    #[tokio::test]
    async fn test_delete_accepts_empty_body() {
        let transport = MockTransport::new();
        transport.respond(Method::Delete, "/api/materials/5", 204, serde_json::Value::Null);
        let (api, _) = client(&transport, Some("tok"));
        assert_eq!(api.delete::<Material>(5).await, Ok(()));
    }

    #[tokio::test]
    async fn test_record_use() {
        let transport = MockTransport::new();
        transport.respond(
            Method::Post,
            "/api/materials/5/use",
            200,
            json!({"id": 5, "name": "Pink Tower", "category": "Sensorial", "age_range": "3-6", "description": "", "in_stock": true, "times_used": 4}),
        );
        let (api, _) = client(&transport, Some("tok"));

        let material = api.record_material_use(5).await.unwrap();
        assert_eq!(material.times_used, 4);
        assert_eq!(transport.requests()[0].body, None);
    }

    #[tokio::test]
    async fn test_server_error_surfaces_status() {
        let transport = MockTransport::new();
        transport.respond(Method::Get, "/api/students", 500, json!({"detail": "boom"}));
        let (api, _) = client(&transport, Some("tok"));

        match api.list::<Student>().await {
            Err(ApiError::Status { status, .. }) => assert_eq!(status, 500),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let transport = MockTransport::new();
        transport.respond(Method::Get, "/api/students", 200, json!({"not": "a list"}));
        let (api, _) = client(&transport, Some("tok"));
        assert!(matches!(api.list::<Student>().await, Err(ApiError::Decode(_))));
    }
}
