//! HTTP client implementation
//!
//! Wraps reqwest and implements the StorageClient trait from dcloud-core.
//! Every operation goes through [`CloudClient::execute`], which turns protocol
//! and transport failures into a failed `OperationResult`.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{RequestBuilder, Response, header};

use dcloud_core::{
    ClientConfig, ClientIdentity, DownloadedBlob, Error, FileRecord, IdentityProvider,
    OperationResult, RandomIdentity, Result, SaveSink, StorageClient, UploadAck, UploadPayload,
    format_size,
};

use crate::route::Route;

/// Client for the storage service's HTTP API
pub struct CloudClient {
    http: reqwest::Client,
    config: ClientConfig,
    identity: ClientIdentity,
    sink: Option<Arc<dyn SaveSink>>,
}

impl CloudClient {
    /// Create a client for `endpoint`, or the default endpoint when `None`
    pub fn new(endpoint: Option<&str>) -> Self {
        Self::builder()
            .config(ClientConfig::with_endpoint(endpoint))
            .build()
    }

    pub fn builder() -> CloudClientBuilder {
        CloudClientBuilder::default()
    }

    /// Base URL requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Send one request on `route` and normalize its outcome.
    ///
    /// `build` decorates the request (body, headers); `parse` turns a
    /// successful response into the operation's data.
    async fn execute<T, B, P, Fut>(
        &self,
        route: Route,
        query: &[(&str, &str)],
        build: B,
        parse: P,
    ) -> OperationResult<T>
    where
        B: FnOnce(RequestBuilder) -> RequestBuilder,
        P: FnOnce(Response) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let result = self.send(route, query, build, parse).await;

        match &result {
            Err(e) if e.is_protocol() => tracing::warn!(
                operation = route.label(),
                status = e.status(),
                error = %e,
                "Storage request rejected"
            ),
            Err(e) => tracing::error!(
                operation = route.label(),
                error = %e,
                "Storage request failed"
            ),
            Ok(_) => {}
        }

        result.into()
    }

    async fn send<T, B, P, Fut>(
        &self,
        route: Route,
        query: &[(&str, &str)],
        build: B,
        parse: P,
    ) -> Result<T>
    where
        B: FnOnce(RequestBuilder) -> RequestBuilder,
        P: FnOnce(Response) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let url = route.url(&self.config.endpoint, query)?;
        let response = build(self.http.request(route.method(), url))
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(route.status_error(status));
        }

        parse(response).await
    }
}

#[async_trait]
impl StorageClient for CloudClient {
    fn identity(&self) -> &ClientIdentity {
        &self.identity
    }

    async fn upload(
        &self,
        payload: UploadPayload,
        file_name: Option<&str>,
    ) -> OperationResult<UploadAck> {
        let file_name = payload.resolve_name(file_name);
        tracing::info!(
            file_name = %file_name,
            size = %format_size(payload.size()),
            "Uploading"
        );

        let query = [
            ("fileName", file_name.as_str()),
            ("userId", self.identity.as_str()),
        ];
        let result = self
            .execute(
                Route::Upload,
                &query,
                |request| {
                    request
                        .header(header::CONTENT_TYPE, "application/octet-stream")
                        .body(payload.into_bytes())
                },
                |response| async move {
                    let body = read_body(response).await?;
                    Ok::<_, Error>(serde_json::from_slice::<UploadAck>(&body)?)
                },
            )
            .await;

        if let Some(ack) = result.data() {
            tracing::info!(file_name = %file_name, message = %ack.message, "Upload succeeded");
        }
        result
    }

    async fn download(&self, file_name: &str, auto_save: bool) -> OperationResult<DownloadedBlob> {
        tracing::info!(file_name = %file_name, "Downloading");

        let query = [("fileName", file_name), ("userId", self.identity.as_str())];
        let result = self
            .execute(Route::Download, &query, |request| request, |response| async move {
                Ok::<_, Error>(DownloadedBlob::new(read_body(response).await?))
            })
            .await;

        if let Some(blob) = result.data() {
            tracing::info!(
                file_name = %file_name,
                size = %format_size(blob.size),
                "Download succeeded"
            );

            if auto_save {
                self.save(blob, file_name).await;
            }
        }
        result
    }

    async fn list_files(&self) -> OperationResult<Vec<FileRecord>> {
        let result = self
            .execute(Route::Files, &[], |request| request, |response| async move {
                let body = read_body(response).await?;
                Ok::<_, Error>(serde_json::from_slice::<Vec<FileRecord>>(&body)?)
            })
            .await;

        if let Some(files) = result.data() {
            tracing::info!(count = files.len(), "Listed files");
            for file in files {
                tracing::debug!(
                    file_name = %file.file_name,
                    size = %format_size(file.total_size),
                    chunks = file.chunks,
                    "Stored file"
                );
            }
        }
        result
    }

    async fn cluster_status(&self) -> OperationResult<String> {
        let result = self
            .execute(Route::Cluster, &[], |request| request, |response| async move {
                response.text().await.map_err(network_error)
            })
            .await;

        if let Some(status) = result.data() {
            tracing::info!(lines = status.lines().count(), "Cluster status retrieved");
            tracing::debug!("Cluster status:\n{status}");
        }
        result
    }
}

impl CloudClient {
    /// Hand a downloaded object to the sink; failures only affect logging
    async fn save(&self, blob: &DownloadedBlob, file_name: &str) {
        let Some(sink) = &self.sink else {
            tracing::debug!(file_name = %file_name, "Auto-save requested without a save sink");
            return;
        };

        if let Err(e) = sink.save(&blob.blob, file_name).await {
            tracing::warn!(file_name = %file_name, error = %e, "Auto-save failed");
        }
    }
}

impl std::fmt::Debug for CloudClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudClient")
            .field("endpoint", &self.config.endpoint)
            .field("identity", &self.identity)
            .field("save_sink", &self.sink.is_some())
            .finish()
    }
}

async fn read_body(response: Response) -> Result<Bytes> {
    response.bytes().await.map_err(network_error)
}

fn network_error(error: reqwest::Error) -> Error {
    Error::Network(error.to_string())
}

/// Builder for [`CloudClient`]
#[derive(Default)]
pub struct CloudClientBuilder {
    config: Option<ClientConfig>,
    identity: Option<Arc<dyn IdentityProvider>>,
    sink: Option<Arc<dyn SaveSink>>,
    http: Option<reqwest::Client>,
}

impl CloudClientBuilder {
    /// Use `endpoint` instead of the default service address
    pub fn endpoint(mut self, endpoint: &str) -> Self {
        self.config = Some(ClientConfig::with_endpoint(Some(endpoint)));
        self
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(ClientConfig::with_endpoint(Some(&config.endpoint)));
        self
    }

    pub fn identity_provider(mut self, provider: impl IdentityProvider + 'static) -> Self {
        self.identity = Some(Arc::new(provider));
        self
    }

    pub fn save_sink(mut self, sink: impl SaveSink + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    pub fn shared_save_sink(mut self, sink: Arc<dyn SaveSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Use a preconfigured reqwest client (proxies, timeouts, TLS)
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http = Some(client);
        self
    }

    pub fn build(self) -> CloudClient {
        let config = self.config.unwrap_or_default();
        if let Err(e) = config.validate() {
            tracing::warn!(error = %e, "Endpoint is not a usable URL; requests will fail");
        }

        let identity = match &self.identity {
            Some(provider) => provider.generate(),
            None => RandomIdentity.generate(),
        };

        tracing::info!(
            user_id = %identity,
            endpoint = %config.endpoint,
            "Cloud client initialized"
        );

        CloudClient {
            http: self.http.unwrap_or_default(),
            config,
            identity,
            sink: self.sink,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcloud_core::{DEFAULT_ENDPOINT, FixedIdentity};

    mockall::mock! {
        Sink {}

        #[async_trait]
        impl SaveSink for Sink {
            async fn save(&self, blob: &[u8], name: &str) -> Result<()>;
        }
    }

    fn test_client() -> CloudClient {
        CloudClient::builder()
            .endpoint("http://127.0.0.1:1")
            .identity_provider(FixedIdentity::new("user_test"))
            .build()
    }

    #[test]
    fn test_default_endpoint() {
        let client = CloudClient::new(None);
        assert_eq!(client.endpoint(), DEFAULT_ENDPOINT);
        assert!(client.identity().as_str().starts_with("user_"));
    }

    #[test]
    fn test_identity_is_stable() {
        let client = test_client();
        assert_eq!(client.identity().as_str(), "user_test");
        assert_eq!(client.identity(), client.identity());
    }

    #[test]
    fn test_builder_trims_endpoint() {
        let client = CloudClient::builder().endpoint("http://host:8080/").build();
        assert_eq!(client.endpoint(), "http://host:8080");
    }

    #[test]
    fn test_debug_hides_internals() {
        let debug = format!("{:?}", test_client());
        assert!(debug.contains("http://127.0.0.1:1"));
        assert!(debug.contains("save_sink: false"));
    }

    #[tokio::test]
    async fn test_save_calls_sink_with_requested_name() {
        let mut sink = MockSink::new();
        sink.expect_save()
            .withf(|blob, name| blob == b"abc" && name == "a.txt")
            .times(1)
            .returning(|_, _| Ok(()));

        let client = CloudClient::builder()
            .endpoint("http://127.0.0.1:1")
            .save_sink(sink)
            .build();

        let blob = DownloadedBlob::new(Bytes::from_static(b"abc"));
        client.save(&blob, "a.txt").await;
    }

    #[tokio::test]
    async fn test_save_failure_is_swallowed() {
        let mut sink = MockSink::new();
        sink.expect_save()
            .times(1)
            .returning(|_, _| Err(Error::Io(std::io::Error::other("disk full"))));

        let client = CloudClient::builder()
            .endpoint("http://127.0.0.1:1")
            .save_sink(sink)
            .build();

        let blob = DownloadedBlob::new(Bytes::from_static(b"abc"));
        client.save(&blob, "a.txt").await;
    }

    #[tokio::test]
    async fn test_shared_save_sink() {
        let mut sink = MockSink::new();
        sink.expect_save()
            .withf(|blob, name| blob == b"xyz" && name == "b.bin")
            .times(1)
            .returning(|_, _| Ok(()));
        let sink: Arc<dyn SaveSink> = Arc::new(sink);

        let client = CloudClient::builder()
            .endpoint("http://127.0.0.1:1")
            .shared_save_sink(sink.clone())
            .build();
        assert!(format!("{client:?}").contains("save_sink: true"));

        let blob = DownloadedBlob::new(Bytes::from_static(b"xyz"));
        client.save(&blob, "b.bin").await;
        assert_eq!(Arc::strong_count(&sink), 2);
    }

    #[tokio::test]
    async fn test_invalid_endpoint_is_normalized() {
        let client = CloudClient::builder().endpoint("not a url").build();
        let result = client.list_files().await;
        let message = result.error().unwrap();
        assert!(message.starts_with("Invalid endpoint 'not a url'"));
    }
}
