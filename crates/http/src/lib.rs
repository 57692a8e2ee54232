//! dcloud-http: HTTP facade for the dcloud storage service
//!
//! Implements `dcloud_core::StorageClient` over the service's REST API
//! (`/api/upload`, `/api/download`, `/api/files`, `/api/cluster`).
//!
//! ```no_run
//! use dcloud_http::{CloudClient, StorageClient, UploadPayload};
//!
//! # async fn demo() {
//! let client = CloudClient::new(Some("http://localhost:8080"));
//! let result = client.upload(UploadPayload::named("hello", "hello.txt"), None).await;
//! if let Some(error) = result.error() {
//!     eprintln!("upload failed: {error}");
//! }
//! # }
//! ```

mod client;
mod route;

pub use client::{CloudClient, CloudClientBuilder};
pub use dcloud_core::{
    ClientConfig, ClientIdentity, ClusterReport, DirectorySink, DownloadedBlob, Error,
    FileRecord, FixedIdentity, IdentityProvider, OperationResult, OsdStatus, RandomIdentity,
    SaveSink, StorageClient, UploadAck, UploadPayload, format_size,
};
