//! Capability traits
//!
//! `StorageClient` is the facade surface, independent of the HTTP stack.
//! `SaveSink` is the optional persistence capability used by auto-save downloads.

use async_trait::async_trait;

use crate::error::Result;
use crate::identity::ClientIdentity;
use crate::result::OperationResult;
use crate::types::{DownloadedBlob, FileRecord, UploadAck, UploadPayload};

/// Operations offered by the storage service.
///
/// Implementations never fail outside the returned [`OperationResult`].
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Identity scoping this client's uploads and downloads
    fn identity(&self) -> &ClientIdentity;

    /// Upload a payload, named by `file_name` or the payload's own name
    async fn upload(
        &self,
        payload: UploadPayload,
        file_name: Option<&str>,
    ) -> OperationResult<UploadAck>;

    /// Download an object; `auto_save` hands it to the configured sink
    async fn download(&self, file_name: &str, auto_save: bool) -> OperationResult<DownloadedBlob>;

    /// List every object stored in the cluster
    async fn list_files(&self) -> OperationResult<Vec<FileRecord>>;

    /// Raw cluster status report
    async fn cluster_status(&self) -> OperationResult<String>;
}

/// Destination for downloaded objects
#[async_trait]
pub trait SaveSink: Send + Sync {
    async fn save(&self, blob: &[u8], name: &str) -> Result<()>;
}
