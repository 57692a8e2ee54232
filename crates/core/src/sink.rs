//! Filesystem save sink
//!
//! Writes downloaded objects into a directory without overwriting existing
//! files: `report.pdf` becomes `report_(1).pdf`, `report_(2).pdf`, ...

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::traits::SaveSink;

const FALLBACK_NAME: &str = "download";

/// Save sink backed by a local directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Sink writing into the user's downloads directory
    pub fn downloads() -> Result<Self> {
        let dir = dirs::download_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
            .ok_or_else(|| Error::Config("Cannot determine downloads directory".to_string()))?;
        Ok(Self::new(dir))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `blob` under a free variant of `name` and return the path used
    pub async fn save_to_dir(&self, blob: &[u8], name: &str) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let file_name = sanitize_name(name);
        let mut counter = 0u32;
        loop {
            let path = self.dir.join(candidate_name(&file_name, counter));
            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(mut file) => {
                    file.write_all(blob).await?;
                    file.flush().await?;
                    return Ok(path);
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => counter += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[async_trait]
impl SaveSink for DirectorySink {
    async fn save(&self, blob: &[u8], name: &str) -> Result<()> {
        let path = self.save_to_dir(blob, name).await?;
        tracing::info!(path = %path.display(), size = blob.len(), "Saved download");
        Ok(())
    }
}

/// Keep only the final path component so names cannot leave the directory
fn sanitize_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| FALLBACK_NAME.to_string())
}

fn candidate_name(name: &str, counter: u32) -> String {
    if counter == 0 {
        return name.to_string();
    }

    match name.rfind('.') {
        Some(dot) if dot > 0 => format!("{}_({counter}){}", &name[..dot], &name[dot..]),
        _ => format!("{name}_({counter})"),
    }
}
