use std::sync::Arc;

use askama::Template;
use color_eyre::eyre::{self, WrapErr as _};
use secstr::SecUtf8;

use super::Notification;

/// Body of Discord's "execute webhook" call.
#[derive(Debug, serde::Serialize)]
struct ExecuteWebhook<'a> {
    content: &'a str,
}

#[derive(Debug, Template)]
#[template(source = "{{ sender }} – just starred ⭐️ {{ repository }}", ext = "txt")]
struct MessageTemplate<'a> {
    pub sender: &'a str,
    pub repository: &'a str,
}

impl<'a> MessageTemplate<'a> {
    fn new(notification: &'a Notification) -> Self {
        Self {
            sender: &notification.sender,
            repository: &notification.repository,
        }
    }
}

pub fn render(notification: &Notification) -> eyre::Result<String> {
    MessageTemplate::new(notification)
        .render()
        .wrap_err("Failed to render message template")
}

#[derive(Clone)]
pub struct Discord {
    http: Arc<awc::Client>,
    url: SecUtf8,
}

impl Discord {
    pub fn new(http: Arc<awc::Client>, url: SecUtf8) -> Self {
        Self { http, url }
    }

    pub async fn deliver(&self, notification: &Notification) -> eyre::Result<()> {
        let content = &render(notification)?;

        let mut resp = self
            .http
            .post(self.url.unsecure())
            .send_json(&ExecuteWebhook { content })
            .await
            .map_err(|err| eyre::eyre!("Failed to send request to Discord: {}", err))?;

        if !resp.status().is_success() {
            return Err(eyre::eyre!(
                "Discord returned error: {}\n{}",
                resp.status(),
                String::from_utf8_lossy(
                    resp.body()
                        .await
                        .wrap_err("Failed to fetch Discord response body")?
                        .as_ref()
                )
            ));
        }

        Ok(())
    }
}
