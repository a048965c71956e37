//! Blob store contracts, adapters, and storage-key derivation.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use crate::time::unix_time_ms_now;

/// Object-safe boxed future used by [`BlobStore`] async methods.
pub type BlobStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service storing uploaded blobs into named public buckets.
///
/// The interface is write-once: keys are derived to be unique per upload,
/// existing objects are never overwritten, and nothing here deletes a blob.
/// Record deletion intentionally leaves stored blobs behind.
pub trait BlobStore {
    /// Stores `bytes` under `key` in `bucket` and returns the blob's public
    /// download URL.
    fn store_blob<'a>(
        &'a self,
        bucket: &'a str,
        key: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    ) -> BlobStoreFuture<'a, Result<String, String>>;
}

/// One file captured from a host file picker, fully buffered for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    /// File name as reported by the picker.
    pub name: String,
    /// MIME type reported by the host, empty when the host did not know one.
    pub content_type: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

impl PickedFile {
    /// Content type to store the payload under, with unknown types sent as a
    /// generic binary stream.
    pub fn content_type_or_default(&self) -> &str {
        if self.content_type.is_empty() {
            "application/octet-stream"
        } else {
            &self.content_type
        }
    }

    /// Size of the buffered payload in bytes.
    pub fn byte_len(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Builds the storage key for one uploaded file.
///
/// Keys are `{unix_ms}-{token}-{file name}` with the file name reduced to a
/// URL-safe character set, so two uploads of the same file in the same
/// millisecond still land on distinct keys.
pub fn storage_key(unix_ms: u64, token: &str, file_name: &str) -> String {
    format!("{unix_ms}-{token}-{}", sanitize_file_name(file_name))
}

/// Derives a fresh storage key for `file_name` from the current time and a
/// random token.
pub fn fresh_storage_key(file_name: &str) -> String {
    storage_key(unix_time_ms_now(), &random_token(), file_name)
}

fn sanitize_file_name(file_name: &str) -> String {
    let cleaned: String = file_name
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
                ch
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

fn random_token() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        format!("{:08x}", (js_sys::Math::random() * f64::from(u32::MAX)) as u32)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::hash::{BuildHasher, Hasher};

        let mut hasher = std::collections::hash_map::RandomState::new().build_hasher();
        hasher.write_u64(unix_time_ms_now());
        format!("{:08x}", hasher.finish() as u32)
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op blob store for unconfigured compositions and baseline tests.
pub struct NoopBlobStore;

impl BlobStore for NoopBlobStore {
    fn store_blob<'a>(
        &'a self,
        _bucket: &'a str,
        _key: &'a str,
        _content_type: &'a str,
        _bytes: &'a [u8],
    ) -> BlobStoreFuture<'a, Result<String, String>> {
        Box::pin(async { Err("blob store unavailable: store_blob".to_string()) })
    }
}

/// Blob payload captured by [`MemoryBlobStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    /// MIME type supplied at upload time.
    pub content_type: String,
    /// Raw payload bytes.
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
/// In-memory blob store used by runtime tests and the end-to-end harness.
///
/// Returns `memory://{bucket}/{key}` URLs and rejects duplicate keys the way
/// the hosted store rejects overwrites.
pub struct MemoryBlobStore {
    inner: Rc<RefCell<HashMap<String, StoredBlob>>>,
}

impl MemoryBlobStore {
    /// Reads back one stored blob for assertions.
    pub fn stored(&self, bucket: &str, key: &str) -> Option<StoredBlob> {
        self.inner.borrow().get(&format!("{bucket}/{key}")).cloned()
    }

    /// Number of blobs currently stored.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns whether the store holds no blobs.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    fn store_blob<'a>(
        &'a self,
        bucket: &'a str,
        key: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    ) -> BlobStoreFuture<'a, Result<String, String>> {
        Box::pin(async move {
            let path = format!("{bucket}/{key}");
            let mut blobs = self.inner.borrow_mut();
            if blobs.contains_key(&path) {
                return Err(format!("blob already exists: {path}"));
            }
            blobs.insert(
                path.clone(),
                StoredBlob {
                    content_type: content_type.to_string(),
                    bytes: bytes.to_vec(),
                },
            );
            Ok(format!("memory://{path}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn storage_key_combines_stamp_token_and_name() {
        assert_eq!(
            storage_key(1_700_000_000_000, "9f2ab0c4", "notes.apk"),
            "1700000000000-9f2ab0c4-notes.apk"
        );
    }

    #[test]
    fn storage_key_sanitizes_hostile_file_names() {
        assert_eq!(
            storage_key(1, "aa", "my app (final) v2.apk"),
            "1-aa-my_app__final__v2.apk"
        );
        assert_eq!(storage_key(1, "aa", "../../etc/passwd"), "1-aa-.._.._etc_passwd");
        assert_eq!(storage_key(1, "aa", "   "), "1-aa-file");
    }

    #[test]
    fn fresh_keys_for_the_same_name_differ() {
        let first = fresh_storage_key("notes.apk");
        let second = fresh_storage_key("notes.apk");
        assert!(first.ends_with("-notes.apk"));
        assert_ne!(first, second);
    }

    #[test]
    fn memory_store_round_trips_and_rejects_duplicates() {
        let store = MemoryBlobStore::default();
        let store_obj: &dyn BlobStore = &store;

        let url = block_on(store_obj.store_blob(
            "apk-files",
            "1-aa-notes.apk",
            "application/vnd.android.package-archive",
            b"payload",
        ))
        .expect("store");
        assert_eq!(url, "memory://apk-files/1-aa-notes.apk");
        assert_eq!(
            store.stored("apk-files", "1-aa-notes.apk"),
            Some(StoredBlob {
                content_type: "application/vnd.android.package-archive".to_string(),
                bytes: b"payload".to_vec(),
            })
        );

        let duplicate = block_on(store_obj.store_blob(
            "apk-files",
            "1-aa-notes.apk",
            "application/vnd.android.package-archive",
            b"other",
        ));
        assert_eq!(
            duplicate,
            Err("blob already exists: apk-files/1-aa-notes.apk".to_string())
        );
    }

    #[test]
    fn noop_store_rejects_uploads() {
        let store = NoopBlobStore;
        let result = block_on(store.store_blob("apk-files", "k", "text/plain", b"x"));
        assert!(result.is_err());
    }
}
