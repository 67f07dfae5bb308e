//! # od-storage-local
//!
//! Local filesystem implementation of `MediaStore` for ticket attachments.
//! Content-addressable: the SHA-256 of the bytes is the blob ref, so
//! re-uploading the same file deduplicates for free. Directory sharding
//! keeps any one directory from growing unbounded.

use async_trait::async_trait;
use od_core::error::{AppError, Result};
use od_core::models::BlobRef;
use od_core::traits::MediaStore;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use tokio::fs;

pub struct LocalMediaStore {
    /// Root directory for all uploads (e.g., "./data/attachments")
    root_path: PathBuf,
    /// Public URL prefix (e.g., "/static/attachments")
    url_prefix: String,
}

impl LocalMediaStore {
    pub fn new(root: PathBuf, url_prefix: String) -> Self {
        Self {
            root_path: root,
            url_prefix,
        }
    }

    /// Generates a sharded path: "ab/cd/abcdef...hash"
    fn sharded_path(&self, hash: &str) -> PathBuf {
        let mut path = self.root_path.clone();
        path.push(&hash[0..2]);
        path.push(&hash[2..4]);
        path.push(hash);
        path
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    /// Saves an upload under its SHA-256 hash.
    async fn save_upload(&self, data: Vec<u8>, content_type: &str) -> Result<BlobRef> {
        if data.is_empty() {
            return Err(AppError::Validation("empty upload".into()));
        }

        let mut hasher = Sha256::new();
        hasher.update(&data);
        let hash = hex::encode(hasher.finalize());

        let target = self.sharded_path(&hash);
        let parent = target
            .parent()
            .ok_or_else(|| AppError::Internal("attachment root has no parent".into()))?;
        fs::create_dir_all(parent).await?;

        if !target.exists() {
            fs::write(&target, &data).await?;
            log::debug!(
                "stored {} byte {} attachment as {}",
                data.len(),
                content_type,
                hash
            );
        }

        Ok(BlobRef(hash))
    }

    async fn blob_url(&self, blob: &BlobRef) -> String {
        let hash = &blob.0;
        // Refs are opaque to everyone but us and arrive unvalidated from
        // the URL path; a malformed one (too short, or byte indices that
        // split a multi-byte character) still gets a (dead) URL rather
        // than a panic.
        match (hash.get(0..2), hash.get(2..4)) {
            (Some(a), Some(b)) => format!("{}/{}/{}/{}", self.url_prefix, a, b, hash),
            _ => format!("{}/{}", self.url_prefix, hash),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_is_content_addressed_and_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path().to_path_buf(), "/static/attachments".into());

        let first = store
            .save_upload(b"screenshot bytes".to_vec(), "image/png")
            .await
            .unwrap();
        let second = store
            .save_upload(b"screenshot bytes".to_vec(), "image/png")
            .await
            .unwrap();
        assert_eq!(first, second);

        let url = store.blob_url(&first).await;
        assert!(url.starts_with("/static/attachments/"));
        assert!(url.ends_with(&first.0));
    }

    #[tokio::test]
    async fn malformed_refs_get_a_dead_url_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path().to_path_buf(), "/a".into());

        // Byte index 2 lands inside the three-byte '€'.
        assert_eq!(store.blob_url(&BlobRef("€a".into())).await, "/a/€a");
        // Too short to shard.
        assert_eq!(store.blob_url(&BlobRef("ab".into())).await, "/a/ab");
        assert_eq!(store.blob_url(&BlobRef(String::new())).await, "/a/");
        // Well-formed refs still shard.
        assert_eq!(store.blob_url(&BlobRef("abcdef".into())).await, "/a/ab/cd/abcdef");
    }

    #[tokio::test]
    async fn empty_upload_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path().to_path_buf(), "/a".into());
        assert!(store.save_upload(Vec::new(), "image/png").await.is_err());
    }
}
