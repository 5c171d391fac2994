// src/admin/push.rs

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::store::client::HTTP;

/// Outbound notification payload from the admin console.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Notification {
    pub title: String,
    pub body: String,
    /// Topic the subscribed clients listen on, e.g. "all" or "new-episodes".
    pub topic: String,
}

/// Client for the push-notification gateway. One POST per notification,
/// bearer-token auth, no retry: a failed send is reported and dropped.
#[derive(Debug, Clone)]
pub struct PushGateway {
    endpoint: String,
    token: String,
}

impl PushGateway {
    pub fn new(endpoint: &str, token: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            token: token.to_string(),
        }
    }

    pub async fn send(&self, notification: &Notification) -> Result<(), String> {
        if self.endpoint.is_empty() {
            return Err("push gateway is not configured".to_string());
        }
        let payload = json!({
            "message": {
                "topic": notification.topic,
                "notification": {
                    "title": notification.title,
                    "body": notification.body,
                },
            }
        });
        HTTP.post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_gateway_refuses_to_send() {
        let gateway = PushGateway::new("", "");
        let notification = Notification {
            title: "t".to_string(),
            body: "b".to_string(),
            topic: "all".to_string(),
        };
        assert!(gateway.send(&notification).await.is_err());
    }
}
