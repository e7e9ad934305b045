use crate::error::{AlertError, Result};
use crate::fetch::client::HttpClient;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};

/// An [`HttpClient`] wrapper that injects a credential as an HTTP header.
///
/// The header name and value are validated once at construction, so
/// `execute` never has to fail on a malformed key.
pub struct ApiKey<C> {
    inner: C,
    header_name: HeaderName,
    value: HeaderValue,
}

impl<C> ApiKey<C> {
    /// `Authorization: Bearer <token>`, as the timeline API expects.
    pub fn bearer(inner: C, token: &str) -> Result<Self> {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| AlertError::config(format!("bearer token is not a valid header: {e}")))?;
        value.set_sensitive(true);
        Ok(Self {
            inner,
            header_name: AUTHORIZATION,
            value,
        })
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for ApiKey<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut()
            .insert(self.header_name.clone(), self.value.clone());
        self.inner.execute(req).await
    }
}
