//! Data types exchanged with the storage service
//!
//! Wire types use the service's camelCase field names.

use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Metadata for a stored object as reported by the file listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Object name
    pub file_name: String,

    /// Total size in bytes
    pub total_size: u64,

    /// Number of chunks the service split the object into
    pub chunks: u32,

    /// Identity that uploaded the object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

/// Acknowledgement body returned by a successful upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadAck {
    /// Service status word (e.g. "success")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Human-readable message
    #[serde(default)]
    pub message: String,

    /// Name the object was stored under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// Fields this client does not model
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Object content returned by a successful download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedBlob {
    pub blob: Bytes,
    pub size: u64,
}

impl DownloadedBlob {
    pub fn new(blob: Bytes) -> Self {
        let size = blob.len() as u64;
        Self { blob, size }
    }
}

/// Bytes to upload, with an optional intrinsic name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPayload {
    data: Bytes,
    name: Option<String>,
}

impl UploadPayload {
    /// Create an unnamed payload
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            name: None,
        }
    }

    /// Create a payload carrying its own name
    pub fn named(data: impl Into<Bytes>, name: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            name: Some(name.into()),
        }
    }

    /// Read a local file; its file name becomes the intrinsic name
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        Ok(Self {
            data: Bytes::from(data),
            name,
        })
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn into_bytes(self) -> Bytes {
        self.data
    }

    /// Resolve the name to upload under.
    ///
    /// An explicit non-empty name wins, then the intrinsic name, then
    /// `file_<unix millis>`.
    pub fn resolve_name(&self, explicit: Option<&str>) -> String {
        explicit
            .filter(|n| !n.is_empty())
            .or_else(|| self.name().filter(|n| !n.is_empty()))
            .map(str::to_string)
            .unwrap_or_else(placeholder_name)
    }
}

fn placeholder_name() -> String {
    format!("file_{}", jiff::Timestamp::now().as_millisecond())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_record_from_service_json() {
        let json = r#"{"fileName":"a.txt","ownerId":"user_1","totalSize":2048,"chunks":3}"#;
        let record: FileRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.file_name, "a.txt");
        assert_eq!(record.total_size, 2048);
        assert_eq!(record.chunks, 3);
        assert_eq!(record.owner_id.as_deref(), Some("user_1"));
    }

    #[test]
    fn test_file_record_without_owner() {
        let json = r#"{"fileName":"b.bin","totalSize":0,"chunks":1}"#;
        let record: FileRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.owner_id, None);
    }

    #[test]
    fn test_upload_ack_keeps_unknown_fields() {
        let json = r#"{"status":"success","message":"Fichier distribue","fileName":"a.txt","replicas":2}"#;
        let ack: UploadAck = serde_json::from_str(json).unwrap();
        assert_eq!(ack.status.as_deref(), Some("success"));
        assert_eq!(ack.message, "Fichier distribue");
        assert_eq!(ack.file_name.as_deref(), Some("a.txt"));
        assert_eq!(ack.extra.get("replicas"), Some(&serde_json::json!(2)));
    }

    #[test]
    fn test_resolve_name_prefers_explicit() {
        let payload = UploadPayload::named("hello", "a.txt");
        assert_eq!(payload.resolve_name(Some("b.txt")), "b.txt");
        assert_eq!(payload.resolve_name(None), "a.txt");
        assert_eq!(payload.resolve_name(Some("")), "a.txt");
    }

    #[test]
    fn test_resolve_name_placeholder() {
        let payload = UploadPayload::new(vec![1u8, 2, 3]);
        let name = payload.resolve_name(None);
        assert!(name.starts_with("file_"));
        assert!(name["file_".len()..].parse::<i64>().is_ok());
    }

    #[test]
    fn test_downloaded_blob_size() {
        let blob = DownloadedBlob::new(Bytes::from_static(b"abcd"));
        assert_eq!(blob.size, 4);
    }

    #[tokio::test]
    async fn test_payload_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        std::fs::write(&path, b"# notes").unwrap();

        let payload = UploadPayload::from_path(&path).await.unwrap();
        assert_eq!(payload.name(), Some("notes.md"));
        assert_eq!(payload.size(), 7);
    }

    #[tokio::test]
    async fn test_payload_from_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let result = UploadPayload::from_path(dir.path().join("missing")).await;
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }
}
