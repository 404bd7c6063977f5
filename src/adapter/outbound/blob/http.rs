//! HTTP blob API client.
//!
//! Implements [`BlobStore`] against a remote blob service:
//!
//! - `GET {api}?prefix=..&cursor=..` lists blobs, following the cursor
//! - `PUT {api}/{key}` writes a blob
//! - `POST {api}/delete` removes blobs
//! - a plain `GET` of a listed blob's URL downloads its content
//!
//! Every API call carries the bearer token and the API version header.
//! There are no retries and no timeouts beyond the client defaults.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{Result, StoreError};
use crate::infrastructure::config::blob::{BlobConfig, BLOB_TOKEN_ENV};
use crate::port::{BlobDescriptor, BlobEntry, BlobStore, PutOptions};

/// API version header name.
const API_VERSION_HEADER: &str = "x-api-version";

/// Content type header understood by the blob API on writes.
const CONTENT_TYPE_HEADER: &str = "x-content-type";

/// Access level header.
const ACCESS_HEADER: &str = "x-access";

/// Keeps keys exactly as given instead of appending a random suffix.
const RANDOM_SUFFIX_HEADER: &str = "x-add-random-suffix";

/// Allows a write to replace an existing key.
const ALLOW_OVERWRITE_HEADER: &str = "x-allow-overwrite";

/// Blob API client.
#[derive(Debug)]
pub struct HttpBlobStore {
    /// HTTP client for API requests.
    client: Client,
    /// Base URL of the API.
    api_url: Url,
    /// Value of the API version header.
    api_version: String,
    /// Read/write token; `None` means unconfigured.
    token: Option<String>,
}

impl HttpBlobStore {
    /// Create a client from blob configuration.
    ///
    /// A missing token is accepted here and reported by each call instead.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_url` is not a valid URL.
    pub fn new(config: &BlobConfig) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            api_url: Url::parse(&config.api_url)?,
            api_version: config.api_version.clone(),
            token: config.token.clone(),
        })
    }

    fn token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                StoreError::Unconfigured {
                    credential: BLOB_TOKEN_ENV,
                }
                .into()
            })
    }

    /// API URL with `path` appended as percent-encoded segments.
    fn endpoint(&self, path: &str) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| StoreError::Unavailable(format!("{} cannot be a base URL", self.api_url)))?
            .pop_if_empty()
            .extend(path.split('/'));
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder, token: &str) -> RequestBuilder {
        request
            .bearer_auth(token)
            .header(API_VERSION_HEADER, &self.api_version)
    }
}

/// Send a request, mapping transport failures and error statuses.
async fn send(request: RequestBuilder, context: &str) -> Result<Response> {
    let response = request
        .send()
        .await
        .map_err(|e| StoreError::Unavailable(format!("{context}: {e}")))?;
    check_status(response, context)
}

fn check_status(response: Response, context: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(StoreError::Status {
            status: status.as_u16(),
            context: context.to_string(),
        }
        .into())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    blobs: Vec<ListedBlob>,
    #[serde(default)]
    cursor: Option<String>,
    #[serde(default)]
    has_more: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListedBlob {
    pathname: String,
    url: String,
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    uploaded_at: Option<DateTime<Utc>>,
}

impl From<ListedBlob> for BlobEntry {
    fn from(blob: ListedBlob) -> Self {
        Self {
            key: blob.pathname,
            url: blob.url,
            size: blob.size,
            uploaded_at: blob.uploaded_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PutResponse {
    pathname: String,
    url: String,
    #[serde(default)]
    content_type: Option<String>,
}

#[derive(Debug, Serialize)]
struct DeleteRequest<'a> {
    urls: [&'a str; 1],
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn list(&self, prefix: &str) -> Result<Vec<BlobEntry>> {
        let token = self.token()?;
        let mut entries = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut query = vec![("prefix", prefix.to_string())];
            if let Some(c) = cursor.take() {
                query.push(("cursor", c));
            }

            let request = self.authorized(self.client.get(self.api_url.clone()), token);
            let page: ListResponse = send(request.query(&query), "list")
                .await?
                .json()
                .await
                .map_err(|e| StoreError::Unavailable(format!("invalid list response: {e}")))?;

            entries.extend(page.blobs.into_iter().map(BlobEntry::from));

            match page.cursor {
                Some(next) if page.has_more => cursor = Some(next),
                _ => break,
            }
        }

        debug!(prefix = %prefix, count = entries.len(), "Listed blobs");
        Ok(entries)
    }

    async fn fetch(&self, entry: &BlobEntry) -> Result<Option<Vec<u8>>> {
        let response = self
            .client
            .get(&entry.url)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(format!("fetch {}: {e}", entry.key)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let bytes = check_status(response, &entry.key)?
            .bytes()
            .await
            .map_err(|e| StoreError::Unavailable(format!("read {}: {e}", entry.key)))?;
        Ok(Some(bytes.to_vec()))
    }

    async fn put(&self, key: &str, body: Vec<u8>, options: &PutOptions) -> Result<BlobDescriptor> {
        let token = self.token()?;
        let size = body.len();
        let request = self
            .authorized(self.client.put(self.endpoint(key)?), token)
            .header(CONTENT_TYPE_HEADER, &options.content_type)
            .header(ACCESS_HEADER, options.access.as_str())
            .header(RANDOM_SUFFIX_HEADER, "0")
            .header(ALLOW_OVERWRITE_HEADER, "1")
            .body(body);

        let stored: PutResponse = send(request, key)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Unavailable(format!("invalid put response: {e}")))?;

        debug!(key = %stored.pathname, bytes = size, "Stored blob");
        Ok(BlobDescriptor {
            key: stored.pathname,
            url: stored.url,
            content_type: stored.content_type,
        })
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let token = self.token()?;
        let request = self
            .authorized(self.client.post(self.endpoint("delete")?), token)
            .json(&DeleteRequest { urls: [key] });

        send(request, key).await?;
        debug!(key = %key, "Deleted blob");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn config(token: Option<&str>) -> BlobConfig {
        BlobConfig {
            token: token.map(str::to_string),
            ..BlobConfig::default()
        }
    }

    #[test]
    fn list_response_deserialization() {
        let json = r#"{
            "blobs": [
                {
                    "url": "https://abc.public.blob.vercel-storage.com/projects/p1.json",
                    "downloadUrl": "https://abc.public.blob.vercel-storage.com/projects/p1.json?download=1",
                    "pathname": "projects/p1.json",
                    "size": 312,
                    "uploadedAt": "2024-03-01T12:00:00.000Z"
                }
            ],
            "cursor": "next-page",
            "hasMore": true
        }"#;

        let response: ListResponse = serde_json::from_str(json).unwrap();
        assert!(response.has_more);
        assert_eq!(response.cursor.as_deref(), Some("next-page"));

        let entry = BlobEntry::from(response.blobs.into_iter().next().unwrap());
        assert_eq!(entry.key, "projects/p1.json");
        assert_eq!(entry.size, Some(312));
        assert!(entry.uploaded_at.is_some());
    }

    #[test]
    fn list_response_tolerates_missing_paging_fields() {
        let response: ListResponse = serde_json::from_str(r#"{"blobs": []}"#).unwrap();
        assert!(response.blobs.is_empty());
        assert!(!response.has_more);
        assert!(response.cursor.is_none());
    }

    #[test]
    fn put_response_deserialization() {
        let json = r#"{
            "url": "https://abc.public.blob.vercel-storage.com/projects/p1.json",
            "pathname": "projects/p1.json",
            "contentType": "application/json",
            "contentDisposition": "inline; filename=\"p1.json\""
        }"#;
        let response: PutResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.pathname, "projects/p1.json");
        assert_eq!(response.content_type.as_deref(), Some("application/json"));
    }

    #[test]
    fn delete_request_serialization() {
        let json = serde_json::to_value(DeleteRequest {
            urls: ["projects/p1.json"],
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "urls": ["projects/p1.json"] }));
    }

    #[test]
    fn endpoint_appends_key_segments() {
        let store = HttpBlobStore::new(&config(Some("t"))).unwrap();
        let url = store.endpoint("projects/my project.json").unwrap();
        assert_eq!(
            url.as_str(),
            "https://blob.vercel-storage.com/projects/my%20project.json"
        );
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let store = HttpBlobStore::new(&BlobConfig {
            api_url: "http://localhost:3000/blob/".to_string(),
            ..config(Some("t"))
        })
        .unwrap();
        let url = store.endpoint("delete").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/blob/delete");
    }

    #[test]
    fn invalid_api_url_is_rejected() {
        let result = HttpBlobStore::new(&BlobConfig {
            api_url: "not a url".to_string(),
            ..config(None)
        });
        assert!(matches!(result, Err(Error::Url(_))));
    }

    #[tokio::test]
    async fn missing_token_fails_before_any_request() {
        let store = HttpBlobStore::new(&config(None)).unwrap();

        let listed = store.list("projects/").await;
        assert!(matches!(
            listed,
            Err(Error::Store(StoreError::Unconfigured {
                credential: BLOB_TOKEN_ENV
            }))
        ));

        let put = store
            .put("projects/p1.json", b"{}".to_vec(), &PutOptions::json())
            .await;
        assert!(matches!(put, Err(Error::Store(StoreError::Unconfigured { .. }))));

        let deleted = store.delete("projects/p1.json").await;
        assert!(matches!(
            deleted,
            Err(Error::Store(StoreError::Unconfigured { .. }))
        ));
    }

    #[test]
    fn client_name() {
        let store = HttpBlobStore::new(&config(None)).unwrap();
        assert_eq!(store.name(), "http");
    }
}
