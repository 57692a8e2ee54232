//! dcloud-core: Core library for the dcloud storage client
//!
//! This crate provides the transport-independent parts of the client:
//! - Wire types (file records, upload acknowledgements, payloads)
//! - The uniform `OperationResult` shape and error taxonomy
//! - Identity generation and configuration
//! - The `StorageClient` and `SaveSink` capability traits
//! - Cluster report parsing and size formatting
//!
//! The HTTP implementation lives in `dcloud-http`.

pub mod cluster;
pub mod config;
pub mod error;
pub mod format;
pub mod identity;
pub mod result;
pub mod sink;
pub mod traits;
pub mod types;

pub use cluster::{ClusterReport, OsdEntry, OsdStatus};
pub use config::{ClientConfig, DEFAULT_ENDPOINT, parse_service_url};
pub use error::{Error, Result};
pub use format::format_size;
pub use identity::{ClientIdentity, FixedIdentity, IdentityProvider, RandomIdentity};
pub use result::OperationResult;
pub use sink::DirectorySink;
pub use traits::{SaveSink, StorageClient};
pub use types::{DownloadedBlob, FileRecord, UploadAck, UploadPayload};
