use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes a prepared request.
///
/// [`super::BasicClient`] talks to the network; wrappers such as
/// [`super::auth::ApiKey`] decorate the request and delegate.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
