use std::time::Duration;

use reqwest::Client;

pub const USER_AGENT: &str = concat!("geo-weather/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by every outbound call.
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder().timeout(timeout).user_agent(USER_AGENT).build()
}

/// Keep error bodies short enough for a log line.
pub fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
