use std::time::Duration;

/// Send a Discord webhook notification.
///
/// A missing or empty URL disables notifications and is a silent no-op.
/// Delivery failures never reach the caller; they are logged and dropped.
pub async fn send_webhook(webhook_url: Option<String>, message: String) {
    let Some(url) = webhook_url.filter(|url| !url.is_empty()) else {
        return;
    };

    let payload = serde_json::json!({ "content": message });

    let client = reqwest::Client::new();
    let result = client
        .post(&url)
        .json(&payload)
        .timeout(Duration::from_secs(5))
        .send()
        .await;

    match result {
        Ok(response) if !response.status().is_success() => {
            tracing::warn!("Webhook returned status {}", response.status());
        }
        Ok(_) => {}
        Err(e) => {
            tracing::warn!("Failed to send webhook notification: {}", e);
        }
    }
}
