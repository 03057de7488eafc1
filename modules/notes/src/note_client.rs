//! Typed HTTP client for the notes store API.

use notes_types::{ItemEnvelope, Note, NoteKey, ServerNote};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Anything that keeps a store round trip from producing the expected data
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub struct NoteClient {
    base_url: String,
    client: reqwest::Client,
}

impl NoteClient {
    /// Client for the store at `base_url` whose requests give up after `timeout`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Append a note to the store. The reply shape belongs to the store and is
    /// returned untyped.
    pub async fn create(&self, note: &Note) -> Result<serde_json::Value, TransportError> {
        let resp = self
            .client
            .post(format!("{}/notes", self.base_url))
            .json(note)
            .send()
            .await?;

        read_json(resp).await
    }

    /// Fetch the whole collection, in store order
    pub async fn list_all(&self) -> Result<Vec<ServerNote>, TransportError> {
        let resp = self
            .client
            .get(format!("{}/notes", self.base_url))
            .send()
            .await?;

        read_json(resp).await
    }

    /// Fetch one note by key; `None` when the store has no such note
    pub async fn get(&self, key: &NoteKey) -> Result<Option<ServerNote>, TransportError> {
        let resp = self
            .client
            .get(format!("{}/notes/item", self.base_url))
            .query(key)
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let envelope: ItemEnvelope = read_json(resp).await?;
        Ok(Some(envelope.item))
    }

    /// Delete one note by key; `false` when the store has no such note
    pub async fn delete(&self, key: &NoteKey) -> Result<bool, TransportError> {
        let resp = self
            .client
            .delete(format!("{}/notes/item", self.base_url))
            .query(key)
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(true)
    }
}

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, TransportError> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        return Err(TransportError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(serde_json::from_str(&body)?)
}
