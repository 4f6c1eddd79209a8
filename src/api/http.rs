//! Blocking HTTP transport for the Intercom REST API.

use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use tracing::debug;

use super::ConversationApi;
use crate::config::ExportConfig;
use crate::credential::Credential;
use crate::error::{ConvoportError, Result};

/// [`ConversationApi`] backed by `reqwest`'s blocking client.
///
/// Requests are sent one at a time with HTTP basic auth built from the
/// credential and `Accept: application/json`.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: Url,
}

impl HttpApi {
    pub fn new(config: &ExportConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("convoport/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url =
            Url::parse(&config.base_url).map_err(|_| ConvoportError::validation("base URL"))?;
        if base_url.cannot_be_a_base() {
            return Err(ConvoportError::validation("base URL"));
        }

        Ok(Self { client, base_url })
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ConvoportError::validation("base URL"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get(&self, credential: &Credential, url: Url, query: &[(&str, u32)]) -> Result<String> {
        let (user, password) = credential.basic_auth_parts();
        debug!(url = %url, "GET");

        let response = self
            .client
            .get(url.clone())
            .query(query)
            .basic_auth(user, password)
            .header(ACCEPT, "application/json")
            .send()?;

        let status = response.status();
        let body = response.text()?;

        // Error payloads are JSON with their own declared type and are left
        // to the shape check. Anything else is reported by status.
        if !status.is_success()
            && serde_json::from_str::<serde::de::IgnoredAny>(&body).is_err()
        {
            return Err(ConvoportError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(body)
    }
}

impl ConversationApi for HttpApi {
    fn name(&self) -> &'static str {
        "Intercom HTTP"
    }

    fn list_conversations(
        &self,
        credential: &Credential,
        page: u32,
        per_page: u32,
    ) -> Result<String> {
        let url = self.endpoint(&["conversations"])?;
        self.get(credential, url, &[("per_page", per_page), ("page", page)])
    }

    fn conversation(&self, credential: &Credential, id: &str) -> Result<String> {
        let url = self.endpoint(&["conversations", id])?;
        self.get(credential, url, &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base_url: &str) -> HttpApi {
        HttpApi::new(&ExportConfig::new().with_base_url(base_url)).unwrap()
    }

    #[test]
    fn test_endpoint_trailing_slash() {
        let url = api("http://localhost:9/").endpoint(&["conversations"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9/conversations");

        let url = api("http://localhost:9/v2/").endpoint(&["conversations"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9/v2/conversations");
    }

    #[test]
    fn test_endpoint_encodes_conversation_id() {
        let url = api("http://localhost:9")
            .endpoint(&["conversations", "1/../admins?x=1 #"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:9/conversations/1%2F..%2Fadmins%3Fx=1%20%23"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ExportConfig::new().with_base_url("not a url");
        let err = HttpApi::new(&config).unwrap_err();
        assert!(err.is_validation());

        let config = ExportConfig::new().with_base_url("mailto:someone@example.com");
        assert!(HttpApi::new(&config).unwrap_err().is_validation());
    }
}
