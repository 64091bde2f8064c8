//! Settings Model
//!
//! The settings document is `section → key → value`, with no fixed schema.
//! [`SettingsEditor`] keeps the last fetched snapshot apart from the user's
//! pending edits and overlays them per key for display and save.

use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::api::ApiClient;
use crate::cache::{CacheKey, QueryCache};
use crate::error::ApiResult;

/// A scalar setting. Integers stay integers on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Number(Number),
    Text(String),
}

impl SettingValue {
    pub fn as_text(&self) -> String {
        self.to_string()
    }

    /// Truthiness: `false`, `0` and `""` are off.
    pub fn as_bool(&self) -> bool {
        match self {
            SettingValue::Bool(b) => *b,
            SettingValue::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
            SettingValue::Text(s) => !s.is_empty(),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SettingValue::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|v| v as i64)),
            SettingValue::Text(s) => s.trim().parse().ok(),
            SettingValue::Bool(_) => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(b) => write!(f, "{}", b),
            SettingValue::Number(n) => write!(f, "{}", n),
            SettingValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Number(Number::from(value))
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

pub type SettingsSection = BTreeMap<String, SettingValue>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsDocument(BTreeMap<String, SettingsSection>);

impl SettingsDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self, name: &str) -> Option<&SettingsSection> {
        self.0.get(name)
    }

    pub fn value(&self, section: &str, key: &str) -> Option<&SettingValue> {
        self.0.get(section)?.get(key)
    }

    pub fn set(&mut self, section: &str, key: &str, value: SettingValue) {
        self.0
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Wire envelope for `GET/PUT /api/settings`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsEnvelope {
    #[serde(default)]
    pub settings: SettingsDocument,
}

/// Tabs of the settings page and the section each one edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsTab {
    #[default]
    Profile,
    Classroom,
    Notifications,
    Privacy,
    Appearance,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 5] = [
        SettingsTab::Profile,
        SettingsTab::Classroom,
        SettingsTab::Notifications,
        SettingsTab::Privacy,
        SettingsTab::Appearance,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SettingsTab::Profile => "Profile",
            SettingsTab::Classroom => "Classroom",
            SettingsTab::Notifications => "Notifications",
            SettingsTab::Privacy => "Privacy",
            SettingsTab::Appearance => "Appearance",
        }
    }

    pub fn section(&self) -> &'static str {
        match self {
            SettingsTab::Profile => "profile",
            SettingsTab::Classroom => "classroom",
            SettingsTab::Notifications => "notifications",
            SettingsTab::Privacy => "privacy_security",
            SettingsTab::Appearance => "appearance",
        }
    }

    pub fn saved_message(&self) -> String {
        format!("{} settings saved!", self.label())
    }
}

/// Snapshot plus pending edits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsEditor {
    snapshot: SettingsDocument,
    pending: SettingsDocument,
}

impl SettingsEditor {
    pub fn new(snapshot: SettingsDocument) -> Self {
        Self { snapshot, pending: SettingsDocument::new() }
    }

    /// Replace the snapshot after a re-fetch. Pending edits survive.
    pub fn load(&mut self, snapshot: SettingsDocument) {
        self.snapshot = snapshot;
    }

    pub fn snapshot(&self) -> &SettingsDocument {
        &self.snapshot
    }

    pub fn pending(&self) -> &SettingsDocument {
        &self.pending
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn edit(&mut self, section: &str, key: &str, value: impl Into<SettingValue>) {
        self.pending.set(section, key, value.into());
    }

    pub fn discard(&mut self) {
        self.pending = SettingsDocument::new();
    }

    /// Displayed value: the pending edit if any, else the fetched one.
    pub fn value(&self, section: &str, key: &str) -> Option<SettingValue> {
        self.pending
            .value(section, key)
            .or_else(|| self.snapshot.value(section, key))
            .cloned()
    }

    /// Every section of snapshot ∪ pending, pending keys winning per key.
    pub fn merged(&self) -> SettingsDocument {
        let mut merged = self.snapshot.clone();
        for (section, values) in &self.pending.0 {
            let target = merged.0.entry(section.clone()).or_default();
            for (key, value) in values {
                target.insert(key.clone(), value.clone());
            }
        }
        merged
    }

    /// Adopt the document the server confirmed and drop pending edits.
    pub fn commit(&mut self, saved: SettingsDocument) {
        self.snapshot = saved;
        self.pending = SettingsDocument::new();
    }

    /// Send the merged document; pending edits are cleared only on success.
    pub async fn save(&mut self, api: &ApiClient, cache: &QueryCache) -> ApiResult<()> {
        let saved = persist(api, cache, &self.merged()).await?;
        self.commit(saved);
        Ok(())
    }
}

/// Cached fetch of the settings document
pub async fn load(api: &ApiClient, cache: &QueryCache) -> ApiResult<SettingsDocument> {
    cache.fetch(CacheKey::Settings, || api.get_settings()).await
}

/// PUT the whole document and invalidate the cached copy.
pub async fn persist(
    api: &ApiClient,
    cache: &QueryCache,
    document: &SettingsDocument,
) -> ApiResult<SettingsDocument> {
    let saved = api.put_settings(document).await?;
    debug!("[SETTINGS] Saved {} sections", saved.section_names().count());
    cache.invalidate(CacheKey::Settings);
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{client, MockTransport};
    use crate::api::Method;
    use serde_json::json;
    use std::time::Duration;

    fn snapshot() -> SettingsDocument {
        serde_json::from_value(json!({
            "profile": {"name": "Ms. Rivera", "phone": "555-0100"},
            "classroom": {"student_count": 18},
            "appearance": {"theme": "light", "compact_mode": false}
        }))
        .unwrap()
    }

    #[test]
    fn test_pending_wins_per_key() {
        let mut editor = SettingsEditor::new(snapshot());
        editor.edit("profile", "name", "Ms. R");

        let merged = editor.merged();
        assert_eq!(merged.value("profile", "name"), Some(&SettingValue::from("Ms. R")));
        // unedited key in an edited section keeps its fetched value
        assert_eq!(merged.value("profile", "phone"), Some(&SettingValue::from("555-0100")));
        assert_eq!(merged.value("classroom", "student_count"), Some(&SettingValue::from(18i64)));
    }

    #[test]
    fn test_unfetched_section_appears_after_merge() {
        let mut editor = SettingsEditor::new(snapshot());
        editor.edit("privacy_security", "session_timeout", 45i64);

        let merged = editor.merged();
        assert_eq!(
            merged.value("privacy_security", "session_timeout").and_then(SettingValue::as_i64),
            Some(45)
        );
        assert!(editor.snapshot().section("privacy_security").is_none());
    }

    #[test]
    fn test_missing_everywhere_is_absent() {
        let editor = SettingsEditor::new(snapshot());
        assert_eq!(editor.value("profile", "bio"), None);
        assert_eq!(editor.merged().value("notifications", "weekly_digest"), None);
    }

    #[test]
    fn test_value_matches_merged_view() {
        let mut editor = SettingsEditor::new(snapshot());
        editor.edit("appearance", "compact_mode", true);
        for (section, key) in [("appearance", "compact_mode"), ("appearance", "theme"), ("profile", "bio")] {
            assert_eq!(editor.value(section, key).as_ref(), editor.merged().value(section, key));
        }
    }

    #[test]
    fn test_edits_do_not_touch_snapshot() {
        let mut editor = SettingsEditor::new(snapshot());
        editor.edit("appearance", "theme", "dark");
        assert_eq!(editor.snapshot(), &snapshot());
        assert!(editor.has_pending());
    }

    #[test]
    fn test_reload_keeps_pending() {
        let mut editor = SettingsEditor::new(SettingsDocument::new());
        editor.edit("appearance", "theme", "dark");
        editor.load(snapshot());
        assert_eq!(editor.value("appearance", "theme"), Some(SettingValue::from("dark")));
        assert_eq!(editor.value("profile", "phone"), Some(SettingValue::from("555-0100")));
    }

    #[test]
    fn test_unknown_sections_round_trip() {
        let raw = json!({
            "profile": {"name": "A"},
            "custom_plugin": {"enabled": true, "ratio": 0.5, "label": "x"}
        });
        let doc: SettingsDocument = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&doc).unwrap(), raw);
    }

    #[test]
    fn test_value_coercions() {
        assert!(SettingValue::from(1i64).as_bool());
        assert!(!SettingValue::from(0i64).as_bool());
        assert!(!SettingValue::from("").as_bool());
        assert_eq!(SettingValue::from("30").as_i64(), Some(30));
        assert_eq!(SettingValue::from(18i64).as_text(), "18");
        assert_eq!(SettingValue::from(true).as_text(), "true");
    }

    #[test]
    fn test_tabs_map_to_sections() {
        assert_eq!(SettingsTab::Privacy.section(), "privacy_security");
        assert_eq!(SettingsTab::Appearance.saved_message(), "Appearance settings saved!");
    }

    #[tokio::test]
    async fn test_save_sends_full_merged_view_then_clears() {
        let transport = MockTransport::new();
        let mut expected = snapshot();
        expected.set("appearance", "theme", SettingValue::from("dark"));
        transport.respond(
            Method::Put,
            "/api/settings",
            200,
            json!({"settings": serde_json::to_value(&expected).unwrap()}),
        );
        let (api, _) = client(&transport, Some("tok"));
        let cache = QueryCache::new(Duration::from_secs(30), 1);
        cache.set(CacheKey::Settings, snapshot());

        let mut editor = SettingsEditor::new(snapshot());
        editor.edit("appearance", "theme", "dark");
        editor.save(&api, &cache).await.unwrap();

        let sent = transport.requests()[0].body.clone().unwrap();
        assert_eq!(sent, json!({"settings": serde_json::to_value(&expected).unwrap()}));
        assert!(!editor.has_pending());
        assert_eq!(editor.snapshot(), &expected);
        assert!(!cache.contains(CacheKey::Settings));
    }

    #[tokio::test]
    async fn test_failed_save_keeps_pending() {
        let transport = MockTransport::new();
        transport.respond(Method::Put, "/api/settings", 500, json!({"detail": "db down"}));
        let (api, _) = client(&transport, Some("tok"));
        let cache = QueryCache::new(Duration::from_secs(30), 1);
        cache.set(CacheKey::Settings, snapshot());

        let mut editor = SettingsEditor::new(snapshot());
        editor.edit("profile", "bio", "Loves gardening");
        assert!(editor.save(&api, &cache).await.is_err());

        assert_eq!(editor.value("profile", "bio"), Some(SettingValue::from("Loves gardening")));
        assert_eq!(editor.snapshot(), &snapshot());
        assert!(cache.contains(CacheKey::Settings));
        // writes are not retried
        assert_eq!(transport.count(Method::Put, "/api/settings"), 1);
    }
}
