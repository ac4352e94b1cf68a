//! Mail Relay - Transactional Notification Endpoint
//!
//! Validates the send-email payload and relays it through the configured
//! mail provider. Statuses and bodies follow the public endpoint contract:
//! 400 for missing fields, 200 on delivery, 500 when the provider fails.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::error;

/// Default provider endpoint (Mailtrap sandbox HTTP API).
pub const DEFAULT_MAIL_ENDPOINT: &str = "https://sandbox.api.mailtrap.io/api/send";
/// Sender used when the environment does not override it.
pub const DEFAULT_MAIL_FROM: &str = "from@example.com";

#[derive(Debug, Error)]
pub enum MailError {
    /// One of to/subject/text is absent or empty.
    #[error("Missing required fields")]
    MissingFields,

    /// Provider credentials or endpoint are not usable.
    #[error("mail relay not configured: {0}")]
    Config(String),

    /// The provider rejected or never received the message.
    #[error("mail transport failed: {0}")]
    Transport(String),
}

/// Incoming endpoint payload.
///
/// Absent and null fields both decode as empty strings, so they fail
/// validation rather than the decode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub to: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subject: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl EmailRequest {
    /// All three fields must be present and non-empty.
    pub fn validate(&self) -> Result<(), MailError> {
        if self.to.is_empty() || self.subject.is_empty() || self.text.is_empty() {
            return Err(MailError::MissingFields);
        }
        Ok(())
    }
}

/// Fully-addressed message handed to the transport.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// Relay configuration. Credentials come from the process environment,
/// never from the request.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub endpoint: String,
    pub api_token: String,
    pub from: String,
}

impl MailerConfig {
    /// Read `MAILTRAP_TOKEN` (required) plus `MAILTRAP_ENDPOINT` and
    /// `MAIL_FROM` (defaulted) from the environment.
    pub fn from_env() -> Result<Self, MailError> {
        let api_token = std::env::var("MAILTRAP_TOKEN")
            .map_err(|_| MailError::Config("MAILTRAP_TOKEN is not set".to_string()))?;
        Ok(Self {
            endpoint: std::env::var("MAILTRAP_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_MAIL_ENDPOINT.to_string()),
            api_token,
            from: std::env::var("MAIL_FROM").unwrap_or_else(|_| DEFAULT_MAIL_FROM.to_string()),
        })
    }
}

/// Delivers outbound messages. Implementations own retry and timeout policy.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn deliver(&self, email: &OutboundEmail) -> Result<(), MailError>;
}

/// Transport that posts to the provider's HTTP send API.
pub struct HttpMailTransport {
    http: reqwest::Client,
    endpoint: String,
    api_token: String,
}

impl HttpMailTransport {
    pub fn new(config: &MailerConfig) -> Result<Self, MailError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("forgestore-core/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MailError::Config(format!("HTTP client error: {e}")))?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_token: config.api_token.clone(),
        })
    }
}

#[async_trait]
impl MailTransport for HttpMailTransport {
    async fn deliver(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let body = serde_json::json!({
            "from": { "email": email.from },
            "to": [{ "email": email.to }],
            "subject": email.subject,
            "text": email.text,
        });
        let response = self
            .http
            .post(&self.endpoint)
            .header("Api-Token", &self.api_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(MailError::Transport(format!(
                "provider returned HTTP {}",
                response.status()
            )));
        }
        Ok(())
    }
}

/// Outcome of the endpoint: HTTP status plus the JSON body's message.
///
/// Serializes to the body alone; the status rides on the transport line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayResponse {
    #[serde(skip)]
    pub status: u16,
    pub message: String,
}

impl RelayResponse {
    fn new(status: u16, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }
}

/// The send-email endpoint: validate, relay, map the outcome.
///
/// Transport failures are logged with detail and answered with the generic
/// body; the caller never sees provider internals.
pub async fn handle_send_email(
    request: EmailRequest,
    config: &MailerConfig,
    transport: &(impl MailTransport + ?Sized),
) -> RelayResponse {
    if request.validate().is_err() {
        return RelayResponse::new(400, "Missing required fields");
    }

    let email = OutboundEmail {
        from: config.from.clone(),
        to: request.to,
        subject: request.subject,
        text: request.text,
    };

    match transport.deliver(&email).await {
        Ok(()) => RelayResponse::new(200, "Email sent successfully"),
        Err(err) => {
            error!(error = %err, "error sending email");
            RelayResponse::new(500, "Error sending email")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_all_fields() {
        let full = EmailRequest {
            to: "a@b.com".to_string(),
            subject: "Order".to_string(),
            text: "Thanks".to_string(),
        };
        assert!(full.validate().is_ok());

        let missing_subject = EmailRequest {
            to: "a@b.com".to_string(),
            subject: String::new(),
            text: "Thanks".to_string(),
        };
        assert!(matches!(
            missing_subject.validate(),
            Err(MailError::MissingFields)
        ));
    }

    #[test]
    fn test_request_decodes_missing_fields_as_empty() {
        let request: EmailRequest = serde_json::from_str(r#"{"to": "a@b.com"}"#).unwrap();
        assert_eq!(request.to, "a@b.com");
        assert!(request.subject.is_empty());
        assert!(request.validate().is_err());

        // Explicit nulls reach validation too instead of failing the decode
        let request: EmailRequest =
            serde_json::from_str(r#"{"to": "a@b.com", "subject": null, "text": "Thanks"}"#)
                .unwrap();
        assert!(request.subject.is_empty());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_response_body_is_message_only() {
        let response = RelayResponse::new(400, "Missing required fields");
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"message":"Missing required fields"}"#
        );
    }
}
