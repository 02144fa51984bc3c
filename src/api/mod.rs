use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, ApiResult};
use crate::models::{NewTask, Task, TaskPatch};

/// Default base URL of the remote store.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

/// Resource path under the base URL.
pub const RESOURCE: &str = "todos";

/// The four calls the task list makes against its remote store.
///
/// The controller is generic over this trait so it can be driven by the
/// HTTP client in production and by scripted fakes in tests.
pub trait TodoApi: Send + Sync {
    /// `GET /todos`
    fn list(&self) -> impl Future<Output = ApiResult<Vec<Task>>> + Send;

    /// `POST /todos`, returning the created task with its assigned id.
    fn create(&self, task: &NewTask) -> impl Future<Output = ApiResult<Task>> + Send;

    /// `PUT /todos/{id}`, returning at least the fields the server confirmed.
    fn update(
        &self,
        id: &str,
        patch: &TaskPatch,
    ) -> impl Future<Output = ApiResult<TaskPatch>> + Send;

    /// `DELETE /todos/{id}`
    fn delete(&self, id: &str) -> impl Future<Output = ApiResult<()>> + Send;
}

/// Connection settings for [`HttpTodoApi`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// No timeout unless set.
    pub timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: None,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiConfig {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// [`TodoApi`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpTodoApi {
    client: Client,
    collection: Url,
}

impl HttpTodoApi {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let mut collection = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        collection
            .path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(config.base_url.clone()))?
            .pop_if_empty()
            .push(RESOURCE);

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(HttpTodoApi {
            client: builder.build()?,
            collection,
        })
    }

    /// URL of the `/todos` collection.
    pub fn collection_url(&self) -> &Url {
        &self.collection
    }

    /// `/todos/{id}`, with the id encoded as a single path segment.
    pub fn item_url(&self, id: &str) -> Url {
        let mut url = self.collection.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(%method, %url, "issuing request");
        self.client.request(method, url)
    }
}

/// Turn a non-2xx status into [`ApiError::Status`], passing 2xx responses through.
async fn check(resp: reqwest::Response) -> ApiResult<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> ApiResult<T> {
    let bytes = check(resp).await?.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

impl TodoApi for HttpTodoApi {
    async fn list(&self) -> ApiResult<Vec<Task>> {
        let resp = self
            .request(Method::GET, self.collection.clone())
            .send()
            .await?;
        decode(resp).await
    }

    async fn create(&self, task: &NewTask) -> ApiResult<Task> {
        let resp = self
            .request(Method::POST, self.collection.clone())
            .json(task)
            .send()
            .await?;
        decode(resp).await
    }

    async fn update(&self, id: &str, patch: &TaskPatch) -> ApiResult<TaskPatch> {
        let resp = self
            .request(Method::PUT, self.item_url(id))
            .json(patch)
            .send()
            .await?;
        decode(resp).await
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        let resp = self
            .request(Method::DELETE, self.item_url(id))
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }
}
