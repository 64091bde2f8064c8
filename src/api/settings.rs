//! Settings Endpoints

use super::ApiClient;
use crate::error::ApiResult;
use crate::settings::{SettingsDocument, SettingsEnvelope};

const SETTINGS_PATH: &str = "/api/settings";

impl ApiClient {
    pub async fn get_settings(&self) -> ApiResult<SettingsDocument> {
        let envelope: SettingsEnvelope = self.get_json(SETTINGS_PATH).await?;
        Ok(envelope.settings)
    }

    /// Overwrites the whole document; returns what the server stored.
    pub async fn put_settings(&self, settings: &SettingsDocument) -> ApiResult<SettingsDocument> {
        let body = SettingsEnvelope { settings: settings.clone() };
        let envelope: SettingsEnvelope = self.put_json(SETTINGS_PATH, &body).await?;
        Ok(envelope.settings)
    }
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{client, MockTransport};
    use crate::api::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_empty_settings() {
        let transport = MockTransport::new();
        transport.respond(Method::Get, "/api/settings", 200, json!({"settings": {}}));
        let (api, _) = client(&transport, Some("tok"));
        assert!(api.get_settings().await.unwrap().is_empty());
    }
}
