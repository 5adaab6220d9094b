//! HTTPS implementation of the alias API

use super::AliasApi;
use aliasdash_core::types::{AliasPage, ApiErrorBody, MailboxList, ToggleResponse};
use aliasdash_core::{
    AliasId, AliasOptions, AliasPatch, AliasRecord, DashError, Mailbox, NewCustomAlias, Result,
};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::json;

/// Header carrying the API key.
pub const AUTH_HEADER: &str = "Authentication";

/// Alias API client over HTTPS
#[derive(Debug, Clone)]
pub struct HttpAliasApi {
    client: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpAliasApi {
    /// Create a client for the backend rooted at `base_url`.
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        api_key: Option<String>,
    ) -> Result<Self> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| DashError::invalid(format!("Invalid API base URL {base_url:?}: {e}")))?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Backend root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of an API path such as `api/mailboxes`.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| DashError::internal(format!("Invalid endpoint {path:?}: {e}")))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.api_key {
            Some(key) => builder.header(AUTH_HEADER, key),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| DashError::network(e.to_string()))?;
        let status = response.status();
        tracing::debug!(url = %response.url(), %status, "alias API response");
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(error_from_body(status, &body))
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        self.send(builder)
            .await?
            .json::<T>()
            .await
            .map_err(|e| DashError::serialization(e.to_string()))
    }
}

/// Map a non-success response to an error, preferring the server's
/// `{"error": ...}` text over the status reason.
pub fn error_from_body(status: StatusCode, body: &str) -> DashError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });
    DashError::http(status.as_u16(), message)
}

#[async_trait]
impl AliasApi for HttpAliasApi {
    async fn list_mailboxes(&self) -> Result<Vec<Mailbox>> {
        let url = self.endpoint("api/mailboxes")?;
        let list: MailboxList = self.send_json(self.request(Method::GET, url)).await?;
        Ok(list.mailboxes)
    }

    async fn alias_options(&self) -> Result<AliasOptions> {
        let url = self.endpoint("api/v5/alias/options")?;
        self.send_json(self.request(Method::GET, url)).await
    }

    async fn list_aliases(&self, page: u32, query: Option<&str>) -> Result<Vec<AliasRecord>> {
        let mut url = self.endpoint("api/v2/aliases")?;
        url.query_pairs_mut()
            .append_pair("page_id", &page.to_string());
        let mut builder = self.request(Method::POST, url);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            builder = builder.json(&json!({ "query": query }));
        }
        let page: AliasPage = self.send_json(builder).await?;
        Ok(page.aliases)
    }

    async fn toggle_alias(&self, id: AliasId) -> Result<bool> {
        let url = self.endpoint(&format!("api/aliases/{id}/toggle"))?;
        let toggled: ToggleResponse = self.send_json(self.request(Method::POST, url)).await?;
        Ok(toggled.enabled)
    }

    async fn update_alias(&self, id: AliasId, patch: &AliasPatch) -> Result<()> {
        let url = self.endpoint(&format!("api/aliases/{id}"))?;
        self.send(self.request(Method::PUT, url).json(patch))
            .await
            .map(|_| ())
    }

    async fn delete_alias(&self, id: AliasId) -> Result<()> {
        let url = self.endpoint(&format!("api/aliases/{id}"))?;
        self.send(self.request(Method::DELETE, url))
            .await
            .map(|_| ())
    }

    async fn create_custom_alias(&self, request: &NewCustomAlias) -> Result<AliasRecord> {
        let url = self.endpoint("api/v3/alias/custom/new")?;
        self.send_json(self.request(Method::POST, url).json(request))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_keep_base_path() {
        let api = HttpAliasApi::new("https://example.com/sl", None).unwrap();
        assert_eq!(
            api.endpoint("/api/mailboxes").unwrap().as_str(),
            "https://example.com/sl/api/mailboxes"
        );
        assert_eq!(
            api.endpoint("api/aliases/7/toggle").unwrap().as_str(),
            "https://example.com/sl/api/aliases/7/toggle"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HttpAliasApi::new("not a url", None),
            Err(DashError::Invalid { .. })
        ));
    }

    #[test]
    fn test_error_body_is_preferred() {
        let err = error_from_body(StatusCode::BAD_REQUEST, r#"{"error":"prefix taken"}"#);
        assert_eq!(err, DashError::http(400, "prefix taken"));
    }

    #[test]
    fn test_error_falls_back_to_reason() {
        let err = error_from_body(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(err, DashError::http(500, "Internal Server Error"));
    }
}
