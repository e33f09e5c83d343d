use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{KeyValueStore, load_json_or_default, now_millis, save_json};

use crate::curl::ParsedCommand;
use crate::error::Result;
use crate::request::{RequestBody, RequestBodyType};

pub const COLLECTIONS_KEY: &str = "lbs-test-collections";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    #[default]
    Collection,
    Folder,
    Request,
}

/// A node of the collection tree: a collection, a folder, or a saved
/// request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionItem {
    pub key: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: CollectionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CollectionItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_type: Option<RequestBodyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl CollectionItem {
    /// A new node with a generated key.
    pub fn new(kind: CollectionKind, title: impl Into<String>) -> Self {
        let now = now_millis();
        Self {
            key: uuid::Uuid::now_v7().to_string(),
            title: title.into(),
            kind,
            created_at: Some(now),
            updated_at: Some(now),
            ..Self::default()
        }
    }

    /// A request node holding `parsed`. Repeated header or parameter names
    /// keep their last value.
    pub fn from_parsed(title: impl Into<String>, parsed: &ParsedCommand) -> Self {
        let body_type =
            RequestBody::infer(parsed.data.as_deref(), parsed.content_type()).body_type;
        Self {
            method: Some(parsed.method.clone()),
            url: Some(parsed.url.clone()),
            headers: parsed
                .headers
                .iter()
                .map(|h| (h.key.clone(), h.value.clone()))
                .collect(),
            params: parsed
                .params
                .iter()
                .map(|p| (p.key.clone(), p.value.clone()))
                .collect(),
            body: parsed.data.clone(),
            body_type: Some(body_type),
            ..Self::new(CollectionKind::Request, title)
        }
    }

    pub fn is_request(&self) -> bool {
        self.kind == CollectionKind::Request
    }
}

fn find_mut<'a>(items: &'a mut [CollectionItem], key: &str) -> Option<&'a mut CollectionItem> {
    for item in items {
        if item.key == key {
            return Some(item);
        }
        if let Some(found) = find_mut(&mut item.children, key) {
            return Some(found);
        }
    }
    None
}

fn find<'a>(items: &'a [CollectionItem], key: &str) -> Option<&'a CollectionItem> {
    items.iter().find_map(|item| {
        if item.key == key {
            Some(item)
        } else {
            find(&item.children, key)
        }
    })
}

fn remove(items: &mut Vec<CollectionItem>, key: &str) -> bool {
    if let Some(pos) = items.iter().position(|item| item.key == key) {
        items.remove(pos);
        return true;
    }
    items.iter_mut().any(|item| remove(&mut item.children, key))
}

/// The collection tree. Lookups by key search depth first and act on the
/// first match.
#[derive(Debug)]
pub struct CollectionStore<S> {
    store: S,
    collections: Vec<CollectionItem>,
}

impl<S: KeyValueStore> CollectionStore<S> {
    pub fn open(store: S) -> Self {
        let collections = load_json_or_default(&store, COLLECTIONS_KEY);
        Self { store, collections }
    }

    /// Writes the current tree, putting `previous` back if the write fails.
    fn commit(&mut self, previous: Vec<CollectionItem>) -> Result<()> {
        let saved = save_json(&mut self.store, COLLECTIONS_KEY, &self.collections);
        if saved.is_err() {
            self.collections = previous;
        }
        saved
    }

    pub fn collections(&self) -> &[CollectionItem] {
        &self.collections
    }

    pub fn get(&self, key: &str) -> Option<&CollectionItem> {
        find(&self.collections, key)
    }

    pub fn add_collection(&mut self, collection: CollectionItem) -> Result<()> {
        let previous = self.collections.clone();
        self.collections.push(collection);
        self.commit(previous)
    }

    /// Patches a top-level collection only.
    pub fn update_collection<F>(&mut self, key: &str, patch: F) -> Result<bool>
    where
        F: FnOnce(&mut CollectionItem),
    {
        let previous = self.collections.clone();
        let Some(collection) = self.collections.iter_mut().find(|c| c.key == key) else {
            return Ok(false);
        };
        patch(collection);
        self.commit(previous)?;
        Ok(true)
    }

    pub fn delete_collection(&mut self, key: &str) -> Result<bool> {
        let previous = self.collections.clone();
        self.collections.retain(|c| c.key != key);
        if self.collections.len() == previous.len() {
            return Ok(false);
        }
        self.commit(previous)?;
        Ok(true)
    }

    /// Appends `node` to the children of `parent_key`, at any depth.
    pub fn add_node(&mut self, parent_key: &str, node: CollectionItem) -> Result<bool> {
        let previous = self.collections.clone();
        let Some(parent) = find_mut(&mut self.collections, parent_key) else {
            tracing::debug!(parent_key, "no parent for new node");
            return Ok(false);
        };
        parent.children.push(node);
        self.commit(previous)?;
        Ok(true)
    }

    /// Patches the node with `key`, at any depth, and bumps its
    /// `updated_at`.
    pub fn update_node<F>(&mut self, key: &str, patch: F) -> Result<bool>
    where
        F: FnOnce(&mut CollectionItem),
    {
        let previous = self.collections.clone();
        let Some(node) = find_mut(&mut self.collections, key) else {
            return Ok(false);
        };
        patch(node);
        node.updated_at = Some(now_millis());
        self.commit(previous)?;
        Ok(true)
    }

    pub fn delete_node(&mut self, key: &str) -> Result<bool> {
        let previous = self.collections.clone();
        if !remove(&mut self.collections, key) {
            return Ok(false);
        }
        self.commit(previous)?;
        Ok(true)
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
