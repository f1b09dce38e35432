//! Best-effort HTTP clients for the media and comms collaborators.
//!
//! Service URLs are passed in explicitly at construction; an unconfigured
//! URL turns the client into a logged no-op so that catalog requests never
//! fail because a collaborator is absent.

use std::time::Duration;

use serde_json::{json, Value};
use tracing::{error, warn};

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub media_base_url: Option<String>,
    pub comms_base_url: Option<String>,
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            media_base_url: None,
            comms_base_url: None,
            timeout: Duration::from_secs(5),
        }
    }
}

fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_default()
}

/// Client for the media service's video catalog.
#[derive(Clone)]
pub struct MediaClient {
    base_url: Option<String>,
    http: reqwest::Client,
}

impl MediaClient {
    #[must_use]
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            base_url: config.media_base_url.clone(),
            http: build_client(config.timeout),
        }
    }

    /// Fetch the media service's videos for an exercise. Failures degrade to
    /// an empty list.
    pub async fn exercise_videos(&self, exercise_id: u64) -> Value {
        let Some(base_url) = &self.base_url else {
            warn!("media service URL not configured");
            return json!([]);
        };

        let url = format!("{base_url}/media/videos/{exercise_id}");
        match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<Value>().await {
                    Ok(videos) => videos,
                    Err(e) => {
                        warn!(exercise_id, error = %e, "invalid response from media service");
                        json!([])
                    }
                }
            }
            Ok(response) => {
                warn!(
                    exercise_id,
                    status = %response.status(),
                    "failed to fetch videos from media service"
                );
                json!([])
            }
            Err(e) => {
                error!(exercise_id, error = %e, "media service request failed");
                json!([])
            }
        }
    }
}

/// Client for the comms service's notification endpoint.
#[derive(Clone)]
pub struct CommsClient {
    base_url: Option<String>,
    http: reqwest::Client,
}

impl CommsClient {
    #[must_use]
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            base_url: config.comms_base_url.clone(),
            http: build_client(config.timeout),
        }
    }

    /// Send an achievement notification on behalf of a user. Best effort:
    /// failures are logged, never propagated.
    pub async fn send_achievement_notification(
        &self,
        token: &str,
        user_id: u64,
        title: &str,
        message: &str,
    ) {
        let Some(base_url) = &self.base_url else {
            return;
        };

        let url = format!("{base_url}/api/comms/notification");
        let payload = json!({
            "user_id": user_id,
            "notification_type": "achievement",
            "title": title,
            "message": message,
        });

        match self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {}
            Ok(response) => {
                warn!(
                    user_id,
                    status = %response.status(),
                    "failed to send notification via comms service"
                );
            }
            Err(e) => {
                error!(user_id, error = %e, "comms service request failed");
            }
        }
    }
}
