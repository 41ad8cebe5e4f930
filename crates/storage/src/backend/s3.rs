//! S3 (and S3-compatible, e.g. R2) backend.
//!
//! Create-if-absent uses a conditional `PutObject` with `If-None-Match: *`;
//! the service answers 412 when the key already exists.

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use super::{ObjectStore, StoredObject};
use crate::error::StoreError;

const STATUS_PRECONDITION_FAILED: u16 = 412;
const STATUS_CONFLICT: u16 = 409;

pub struct S3ObjectStore {
    client: Client,
    bucket: String,
    prefix: String,
}

impl S3ObjectStore {
    pub fn new(client: Client, bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into().trim_matches('/').to_string();
        Self {
            client,
            bucket: bucket.into(),
            prefix,
        }
    }

    /// Build a client from the standard AWS environment (region, credentials,
    /// optional `AWS_ENDPOINT_URL` for S3-compatible services).
    pub async fn from_env(bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        let sdk_config = aws_config::load_from_env().await;
        Self::new(Client::new(&sdk_config), bucket, prefix)
    }

    fn full_key(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}/{key}", self.prefix)
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn name(&self) -> &'static str {
        "s3"
    }

    async fn put_if_absent(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError> {
        let result = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(self.full_key(key))
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .if_none_match("*")
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) => {
                let status = err.raw_response().map(|r| r.status().as_u16());
                if matches!(status, Some(STATUS_PRECONDITION_FAILED | STATUS_CONFLICT)) {
                    Err(StoreError::AlreadyExists(key.to_string()))
                } else {
                    Err(StoreError::Unavailable(format!(
                        "PutObject {key}: {}",
                        DisplayErrorContext(&err)
                    )))
                }
            }
        }
    }

    async fn get(&self, key: &str) -> Result<Option<StoredObject>, StoreError> {
        let result = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(self.full_key(key))
            .send()
            .await;

        let output = match result {
            Ok(output) => output,
            Err(err) => {
                if err.as_service_error().is_some_and(|e| e.is_no_such_key()) {
                    return Ok(None);
                }
                return Err(StoreError::Unavailable(format!(
                    "GetObject {key}: {}",
                    DisplayErrorContext(&err)
                )));
            }
        };

        let content_type = output.content_type().map(str::to_string);
        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| StoreError::Unavailable(format!("GetObject {key} body: {e}")))?
            .into_bytes()
            .to_vec();

        Ok(Some(StoredObject {
            bytes,
            content_type,
        }))
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(self.full_key(key))
            .send()
            .await
            .map_err(|err| {
                let context = DisplayErrorContext(&err);
                StoreError::Unavailable(format!("DeleteObject {key}: {context}"))
            })?;
        Ok(())
    }
}
