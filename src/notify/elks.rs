//! SMS delivery through the 46elks HTTP API

use async_trait::async_trait;

use super::{NotificationSender, NotifyError, Recipient};

pub const DEFAULT_API_URL: &str = "https://api.46elks.com/a1/sms";
pub const DEFAULT_SENDER: &str = "KamelNet";

/// Provider settings
#[derive(Debug, Clone)]
pub struct ElksConfig {
    pub api_url: String,
    pub username: String,
    pub password: String,
    /// Sender name shown on the recipient's phone
    pub from: String,
}

impl ElksConfig {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            username: username.into(),
            password: password.into(),
            from: DEFAULT_SENDER.to_string(),
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = from.into();
        self
    }
}

/// Sends SMS with one form-encoded POST per message
pub struct ElksSender {
    client: reqwest::Client,
    config: ElksConfig,
}

impl ElksSender {
    pub fn new(config: ElksConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl NotificationSender for ElksSender {
    async fn send(&self, recipient: &Recipient, message: &str) -> Result<(), NotifyError> {
        let form = [
            ("from", self.config.from.as_str()),
            ("to", recipient.as_str()),
            ("message", message),
        ];

        let response = self
            .client
            .post(&self.config.api_url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .form(&form)
            .send()
            .await
            .map_err(|e| NotifyError::Send(format!("Failed to send SMS: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| NotifyError::Send(format!("Failed to read SMS response: {}", e)))?;

        if !status.is_success() {
            return Err(NotifyError::Send(format!(
                "SMS API returned status {}: {}",
                status,
                body.trim()
            )));
        }

        tracing::debug!(recipient = %recipient, response = %body, "SMS sent");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sender_for(server: &MockServer) -> ElksSender {
        ElksSender::new(
            ElksConfig::new("user", "pass").with_api_url(format!("{}/a1/sms", server.uri())),
        )
    }

    #[tokio::test]
    async fn test_sends_form_with_basic_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/a1/sms"))
            .and(header("authorization", "Basic dXNlcjpwYXNz"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("from=KamelNet"))
            .and(body_string_contains("to=%2B4671234567"))
            .and(body_string_contains("message=Disk+full%0Adb1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status": "created"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let recipient = Recipient::from_path("/4671234567").unwrap();
        sender_for(&server)
            .send(&recipient, "Disk full\ndb1")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_custom_sender_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("from=Ops"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let sender = ElksSender::new(
            ElksConfig::new("user", "pass")
                .with_api_url(server.uri())
                .with_from("Ops"),
        );
        let recipient = Recipient::from_path("/4671234567").unwrap();
        assert!(sender.send(&recipient, "hi").await.is_ok());
    }

    #[tokio::test]
    async fn test_error_status_is_send_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .expect(1)
            .mount(&server)
            .await;

        let recipient = Recipient::from_path("/4671234567").unwrap();
        let err = sender_for(&server).send(&recipient, "hi").await.unwrap_err();
        assert!(matches!(err, NotifyError::Send(ref msg) if msg.contains("401")));
    }

    #[tokio::test]
    async fn test_unreachable_api_is_send_error() {
        let sender = ElksSender::new(
            ElksConfig::new("user", "pass").with_api_url("http://127.0.0.1:1/a1/sms"),
        );
        let recipient = Recipient::from_path("/4671234567").unwrap();
        let err = sender.send(&recipient, "hi").await.unwrap_err();
        assert!(matches!(err, NotifyError::Send(_)));
    }
}
