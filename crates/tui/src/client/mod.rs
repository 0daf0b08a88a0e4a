use std::time::Duration;

use api_types::{category::Category, item::Item, location::Location, room::Room};
use reqwest::{RequestBuilder, Response, Url, multipart};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::{AppError, Result};

/// JSON object sent on create/update. Only the keys present are written.
pub type Payload = Map<String, Value>;

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// A backend collection addressable as `<PATH>` and `<PATH><id>/`.
pub trait Resource: DeserializeOwned + Send + 'static {
    const PATH: &'static str;
    /// Lowercase noun used in user-facing messages.
    const NOUN: &'static str;

    fn id(&self) -> u64;
}

impl Resource for Room {
    const PATH: &'static str = "rooms/";
    const NOUN: &'static str = "room";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Resource for Location {
    const PATH: &'static str = "locations/";
    const NOUN: &'static str = "location";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Resource for Item {
    const PATH: &'static str = "items/";
    const NOUN: &'static str = "item";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Resource for Category {
    const PATH: &'static str = "categories/";
    const NOUN: &'static str = "category";

    fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("not authenticated")]
    Unauthorized,
    #[error("not allowed")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Server(String),
    #[error("server unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

const VOICE_PATH: &str = "voice-add-item/";

/// Thin HTTP wrapper over the inventory REST service. No retries, no caching.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        // `Url::join` drops the last segment unless the base ends with '/'.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url =
            Url::parse(&normalized).map_err(|err| AppError::BaseUrl(err.to_string()))?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, http })
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid endpoint {path}: {err}")))
    }

    fn member<R: Resource>(&self, id: u64) -> ClientResult<Url> {
        self.endpoint(&format!("{}{id}/", R::PATH))
    }

    pub async fn list<R: Resource>(&self) -> ClientResult<Vec<R>> {
        let url = self.endpoint(R::PATH)?;
        tracing::debug!(%url, "list {}", R::NOUN);
        fetch(self.http.get(url)).await
    }

    pub async fn get<R: Resource>(&self, id: u64) -> ClientResult<R> {
        let url = self.member::<R>(id)?;
        tracing::debug!(%url, "get {}", R::NOUN);
        fetch(self.http.get(url)).await
    }

    pub async fn create<R: Resource>(&self, payload: &Payload) -> ClientResult<R> {
        let url = self.endpoint(R::PATH)?;
        tracing::debug!(%url, "create {}", R::NOUN);
        fetch(self.http.post(url).json(payload)).await
    }

    /// Full replace (`PUT`). Screens only ever merge, so this is exercised by
    /// tests alone.
    #[cfg_attr(not(test), allow(dead_code))]
    pub async fn update<R: Resource>(&self, id: u64, payload: &Payload) -> ClientResult<R> {
        let url = self.member::<R>(id)?;
        tracing::debug!(%url, "replace {}", R::NOUN);
        fetch(self.http.put(url).json(payload)).await
    }

    /// Partial merge (`PATCH`).
    pub async fn patch<R: Resource>(&self, id: u64, payload: &Payload) -> ClientResult<R> {
        let url = self.member::<R>(id)?;
        tracing::debug!(%url, "patch {}", R::NOUN);
        fetch(self.http.patch(url).json(payload)).await
    }

    pub async fn delete<R: Resource>(&self, id: u64) -> ClientResult<()> {
        let url = self.member::<R>(id)?;
        tracing::debug!(%url, "delete {}", R::NOUN);
        let res = self.http.delete(url).send().await?;
        if res.status().is_success() {
            return Ok(());
        }
        Err(error_from_response(res).await)
    }

    /// Uploads a recording as multipart field `audio`; the backend answers
    /// with the items it created from the transcription.
    pub async fn voice_add_item(&self, audio: Vec<u8>, file_name: String) -> ClientResult<Vec<Item>> {
        let url = self.endpoint(VOICE_PATH)?;
        tracing::debug!(%url, bytes = audio.len(), "voice add");
        let mime = audio_mime(&file_name);
        let mut part = multipart::Part::bytes(audio).file_name(file_name);
        if let Some(mime) = mime {
            part = part.mime_str(mime)?;
        }
        let form = multipart::Form::new().part("audio", part);
        fetch(self.http.post(url).multipart(form)).await
    }
}

/// Content type for a recording, by extension. Unknown extensions go untagged.
fn audio_mime(file_name: &str) -> Option<&'static str> {
    let (_, ext) = file_name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "wav" => Some("audio/wav"),
        "mp3" => Some("audio/mpeg"),
        "ogg" | "oga" | "opus" => Some("audio/ogg"),
        "webm" => Some("audio/webm"),
        "m4a" | "mp4" => Some("audio/mp4"),
        "flac" => Some("audio/flac"),
        _ => None,
    }
}

async fn fetch<T: DeserializeOwned>(request: RequestBuilder) -> ClientResult<T> {
    let res = request.send().await?;
    if !res.status().is_success() {
        return Err(error_from_response(res).await);
    }
    let body = res.bytes().await?;
    // The server answered; a body we cannot read is its fault, not the network's.
    serde_json::from_slice(&body).map_err(|err| {
        tracing::warn!(%err, "undecodable response body");
        ClientError::Server(format!("unexpected response from server: {err}"))
    })
}

async fn error_from_response(res: Response) -> ClientError {
    let status = res.status();
    let message = res
        .json::<Value>()
        .await
        .ok()
        .as_ref()
        .and_then(summarize_error_body)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });

    tracing::warn!(%status, %message, "request rejected");
    match status.as_u16() {
        400 | 422 => ClientError::Validation(message),
        401 => ClientError::Unauthorized,
        403 => ClientError::Forbidden,
        404 => ClientError::NotFound,
        409 => ClientError::Conflict(message),
        _ => ClientError::Server(message),
    }
}

/// Condenses an error body into one line, keeping as much server text as
/// possible. Field maps (`{"name": ["required"]}`) become `name: required`.
pub fn summarize_error_body(body: &Value) -> Option<String> {
    match body {
        Value::Object(map) => {
            for key in ["error", "detail"] {
                if let Some(Value::String(message)) = map.get(key) {
                    return Some(message.clone());
                }
            }
            let parts = map
                .iter()
                .map(|(field, value)| format!("{field}: {}", flatten_messages(value)))
                .collect::<Vec<_>>();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        Value::Array(_) | Value::String(_) => Some(flatten_messages(body)),
        _ => None,
    }
}

fn flatten_messages(value: &Value) -> String {
    match value {
        Value::String(message) => message.clone(),
        Value::Array(values) => values
            .iter()
            .map(flatten_messages)
            .collect::<Vec<_>>()
            .join(" "),
        other => other.to_string(),
    }
}
