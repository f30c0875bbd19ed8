//! Runtime environment helpers
//!
//! Builds the configured `PersonStore` at startup.

use std::sync::Arc;

use configs::{LineFormat, StorageBackend, StorageConfig};
use models::{DottedCodec, JsonLinesCodec};
use tracing::info;

use crate::storage::{LineFileStore, MemoryPersonStore, PersonStore};

/// Build the store selected by `cfg`; for the file backend the data directory is created first.
pub async fn build_store(cfg: &StorageConfig) -> anyhow::Result<Arc<dyn PersonStore>> {
    cfg.validate()?;
    let store: Arc<dyn PersonStore> = match cfg.backend {
        StorageBackend::Memory => {
            info!(backend = "memory", "person store ready");
            Arc::new(MemoryPersonStore::new())
        }
        StorageBackend::File => {
            common::env::ensure_data_dir(&cfg.path).await?;
            info!(backend = "file", path = %cfg.path.display(), format = ?cfg.format, "person store ready");
            match cfg.format {
                LineFormat::Dotted => Arc::new(LineFileStore::new(cfg.path.clone(), DottedCodec)),
                LineFormat::JsonLines => Arc::new(LineFileStore::new(cfg.path.clone(), JsonLinesCodec)),
            }
        }
    };
    Ok(store)
}
