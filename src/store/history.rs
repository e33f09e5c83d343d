use serde::{Deserialize, Serialize};

use super::{KeyValueStore, load_json_or_default, now_millis, save_json};

use crate::curl::{KeyValue, ParsedCommand};
use crate::error::Result;
use crate::request::{RequestBody, RequestBodyType};
use crate::url::parser::parse_query_string;

pub const HISTORY_KEY: &str = "lbs-test-history";

/// The request part of a history entry, without id and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRequest {
    pub name: String,
    pub method: String,
    pub url: String,
    #[serde(default)]
    pub headers: Vec<KeyValue>,
    #[serde(default)]
    pub params: Vec<KeyValue>,
    #[serde(default)]
    pub body_type: RequestBodyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_data: Option<Vec<KeyValue>>,
}

impl From<&ParsedCommand> for HistoryRequest {
    fn from(parsed: &ParsedCommand) -> Self {
        let body = RequestBody::infer(parsed.data.as_deref(), parsed.content_type());
        let (body_type, json_body, form_data) = match (body.body_type, body.content) {
            (RequestBodyType::None, _) | (_, None) => (RequestBodyType::None, None, None),
            (RequestBodyType::Json, content) => (RequestBodyType::Json, content, None),
            (RequestBodyType::XWwwFormUrlencoded | RequestBodyType::FormData, Some(content)) => (
                RequestBodyType::FormData,
                None,
                Some(parse_query_string(&content)),
            ),
            (other, content) => (other, content, None),
        };
        Self {
            name: format!("{} {}", parsed.method, parsed.url),
            method: parsed.method.clone(),
            url: parsed.url.clone(),
            headers: parsed.headers.clone(),
            params: parsed.params.clone(),
            body_type,
            json_body,
            form_data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestHistory {
    pub id: String,
    #[serde(flatten)]
    pub request: HistoryRequest,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Sent requests, newest first.
#[derive(Debug)]
pub struct HistoryStore<S> {
    store: S,
    history: Vec<RequestHistory>,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Loads the saved history. Data that can't be read is dropped.
    pub fn open(store: S) -> Self {
        let history = load_json_or_default(&store, HISTORY_KEY);
        Self { store, history }
    }

    /// Writes the current history. On failure the history is reset to
    /// `previous`, so memory never runs ahead of the store.
    fn commit(&mut self, previous: Vec<RequestHistory>) -> Result<()> {
        let saved = save_json(&mut self.store, HISTORY_KEY, &self.history);
        if saved.is_err() {
            self.history = previous;
        }
        saved
    }

    pub fn all(&self) -> &[RequestHistory] {
        &self.history
    }

    pub fn get(&self, id: &str) -> Option<&RequestHistory> {
        self.history.iter().find(|h| h.id == id)
    }

    /// Records `request` at the front and returns its id.
    pub fn add(&mut self, request: HistoryRequest) -> Result<String> {
        let now = now_millis();
        let entry = RequestHistory {
            id: format!("history_{}", uuid::Uuid::now_v7().simple()),
            request,
            created_at: now,
            updated_at: now,
        };
        let id = entry.id.clone();
        let previous = self.history.clone();
        self.history.insert(0, entry);
        self.commit(previous)?;
        Ok(id)
    }

    /// Applies `patch` to the entry with `id`. Returns `false` if there is
    /// no such entry.
    pub fn update<F>(&mut self, id: &str, patch: F) -> Result<bool>
    where
        F: FnOnce(&mut HistoryRequest),
    {
        let previous = self.history.clone();
        let Some(entry) = self.history.iter_mut().find(|h| h.id == id) else {
            return Ok(false);
        };
        patch(&mut entry.request);
        entry.updated_at = now_millis().max(entry.updated_at);
        self.commit(previous)?;
        Ok(true)
    }

    pub fn delete(&mut self, id: &str) -> Result<()> {
        let previous = self.history.clone();
        self.history.retain(|h| h.id != id);
        self.commit(previous)
    }

    pub fn clear(&mut self) -> Result<()> {
        let previous = std::mem::take(&mut self.history);
        self.commit(previous)
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
