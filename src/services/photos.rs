//! Photo upload storage
//!
//! Uploads arrive as base64 strings in the JSON request body. The store
//! decodes them and writes the bytes under a configured directory, returning
//! an opaque key the post row references.

use crate::error::{AppError, Result};
use base64::engine::general_purpose;
use base64::Engine;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct PhotoStore {
    dir: PathBuf,
}

impl PhotoStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Decode a base64 photo upload and persist it, returning the stored key.
    ///
    /// A `data:*;base64,` prefix is tolerated and stripped. Empty or
    /// undecodable payloads are rejected.
    pub async fn store_base64(&self, encoded: &str) -> Result<String> {
        let payload = strip_data_url_prefix(encoded);
        if payload.trim().is_empty() {
            return Err(AppError::BadRequest("photo payload is empty".to_string()));
        }

        let bytes = general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| AppError::BadRequest(format!("photo is not valid base64: {}", e)))?;

        if bytes.is_empty() {
            return Err(AppError::BadRequest("photo payload is empty".to_string()));
        }

        let key = format!("{}.bin", Uuid::new_v4());
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(&key), &bytes).await?;

        Ok(key)
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

fn strip_data_url_prefix(encoded: &str) -> &str {
    match encoded.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => encoded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_decoded_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        let store = PhotoStore::new(tmp.path());

        let encoded = general_purpose::STANDARD.encode(b"fake image bytes");
        let key = store.store_base64(&encoded).await.unwrap();

        let written = std::fs::read(store.path_for(&key)).unwrap();
        assert_eq!(written, b"fake image bytes");
    }

    #[tokio::test]
    async fn strips_data_url_prefix() {
        let tmp = tempfile::tempdir().unwrap();
        let store = PhotoStore::new(tmp.path());

        let encoded = format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(b"png bytes")
        );
        let key = store.store_base64(&encoded).await.unwrap();

        let written = std::fs::read(store.path_for(&key)).unwrap();
        assert_eq!(written, b"png bytes");
    }

    #[tokio::test]
    async fn rejects_invalid_base64() {
        let tmp = tempfile::tempdir().unwrap();
        let store = PhotoStore::new(tmp.path());

        let err = store.store_base64("not base64 at all!!!").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn rejects_empty_payload() {
        let tmp = tempfile::tempdir().unwrap();
        let store = PhotoStore::new(tmp.path());

        let err = store.store_base64("").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
