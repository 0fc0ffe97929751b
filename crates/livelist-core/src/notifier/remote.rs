//! Out-of-process notifier.
//!
//! Lets a process that writes to the shared database file (the CLI) ask a
//! running web server to pulse its observers.

use std::time::Duration;
use tracing::{debug, warn};

/// Default web server URL.
const DEFAULT_WEB_URL: &str = "http://127.0.0.1:8080";

/// Asks the web server to broadcast via HTTP.
#[derive(Clone)]
pub struct WebNotifier {
    client: reqwest::Client,
    base_url: String,
}

impl WebNotifier {
    /// Create a new notifier with default settings.
    ///
    /// Uses the `LIVELIST_WEB_URL` environment variable if set,
    /// otherwise defaults to `http://127.0.0.1:8080`.
    pub fn new() -> Self {
        let base_url =
            std::env::var("LIVELIST_WEB_URL").unwrap_or_else(|_| DEFAULT_WEB_URL.to_string());
        Self::with_url(&base_url)
    }

    /// Create a notifier with a custom base URL.
    pub fn with_url(base_url: &str) -> Self {
        debug!(base_url = %base_url, "WebNotifier initialized");
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(2))
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST to `/internal/notify` so the server broadcasts a pulse.
    ///
    /// Returns whether the server acknowledged the request.
    pub async fn notify_refresh(&self) -> bool {
        let url = format!("{}/internal/notify", self.base_url);
        debug!(url = %url, "Sending refresh notification");

        match self.client.post(&url).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Refresh notification sent successfully");
                true
            }
            Ok(response) => {
                warn!(
                    status_code = %response.status(),
                    "Refresh notification failed with status"
                );
                false
            }
            Err(e) => {
                // Expected when no server is running.
                debug!(
                    error = %e,
                    url = %url,
                    "Failed to send refresh notification (livelist serve may not be running)"
                );
                false
            }
        }
    }
}

impl Default for WebNotifier {
    fn default() -> Self {
        Self::new()
    }
}
