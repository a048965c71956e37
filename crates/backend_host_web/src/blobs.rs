//! Bucket upload adapter for package and icon blobs.

use backend_host::{BackendConfig, BlobStore, BlobStoreFuture};

use crate::http::{authorized_headers, send, RequestBody};

#[derive(Debug, Clone)]
/// Browser blob store uploading into the hosted backend's public buckets.
pub struct WebBlobStore {
    config: BackendConfig,
}

impl WebBlobStore {
    /// Adapter for one configured backend project.
    pub fn new(config: BackendConfig) -> Self {
        Self { config }
    }
}

impl BlobStore for WebBlobStore {
    fn store_blob<'a>(
        &'a self,
        bucket: &'a str,
        key: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    ) -> BlobStoreFuture<'a, Result<String, String>> {
        Box::pin(async move {
            let mut headers = authorized_headers(&self.config);
            headers.push(("Content-Type".to_string(), content_type.to_string()));
            headers.push(("cache-control".to_string(), "max-age=3600".to_string()));
            headers.push(("x-upsert".to_string(), "false".to_string()));

            let response = send(
                "POST",
                &self.config.object_url(bucket, key),
                &headers,
                Some(RequestBody::Bytes(bytes)),
            )
            .await?;
            response.into_body("blob upload")?;
            Ok(self.config.public_object_url(bucket, key))
        })
    }
}
