//! Named snapshots of the document, persisted as one JSON list.

use common::model::email::ValidationError;
use common::model::template::SavedTemplate;
use log::{debug, error};
use thiserror::Error;
use uuid::Uuid;
use web_time::{SystemTime, UNIX_EPOCH};

use crate::error::EditorError;

/// Key the template list is stored under.
pub const STORAGE_KEY: &str = "sirz_saved_templates";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("{0}")]
    Backend(String),
}

/// Durable string slot holding the serialized template list.
pub trait TemplateStore {
    /// `Ok(None)` when nothing has been stored yet.
    fn read(&self) -> Result<Option<String>, StoreError>;
    fn write(&mut self, value: &str) -> Result<(), StoreError>;
}

/// In-memory store, used natively and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            writes: 0,
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// How many times the list has been rewritten.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl TemplateStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.value.clone())
    }

    fn write(&mut self, value: &str) -> Result<(), StoreError> {
        self.value = Some(value.to_owned());
        self.writes += 1;
        Ok(())
    }
}

pub struct TemplateLibrary<S> {
    store: S,
    templates: Vec<SavedTemplate>,
}

impl<S: TemplateStore> TemplateLibrary<S> {
    /// Loads the saved list once. A missing, unreadable or malformed entry
    /// yields an empty library.
    pub fn open(store: S) -> Self {
        let templates = match store.read() {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                error!("Failed to parse saved templates: {e}");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                error!("Failed to read saved templates: {e}");
                Vec::new()
            }
        };
        Self { store, templates }
    }

    /// Newest first.
    pub fn templates(&self) -> &[SavedTemplate] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Option<&SavedTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Saves a copy of `content` under `name`.
    pub fn add(&mut self, name: &str, content: impl Into<String>) -> Result<&SavedTemplate, EditorError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let template = SavedTemplate {
            id: Uuid::new_v4().to_string(),
            name: name.to_owned(),
            content: content.into(),
            created_at: now_millis(),
        };
        debug!("saving template {} as {:?}", template.id, template.name);
        self.templates.insert(0, template);
        if let Err(e) = self.persist() {
            self.templates.remove(0);
            return Err(e);
        }
        Ok(&self.templates[0])
    }

    /// Removes the template with `id` once `confirm` agrees. Returns true when
    /// something was removed.
    pub fn delete(&mut self, id: &str, confirm: impl FnOnce() -> bool) -> Result<bool, EditorError> {
        let Some(index) = self.templates.iter().position(|t| t.id == id) else {
            return Ok(false);
        };
        if !confirm() {
            return Ok(false);
        }
        let removed = self.templates.remove(index);
        if let Err(e) = self.persist() {
            self.templates.insert(index, removed);
            return Err(e);
        }
        Ok(true)
    }

    fn persist(&mut self) -> Result<(), EditorError> {
        let raw = serde_json::to_string(&self.templates)?;
        self.store.write(&raw)?;
        Ok(())
    }
}

/// Name prompt shown before saving.
#[derive(Debug, Default)]
pub struct SaveDialog {
    open: bool,
    pub name: String,
}

impl SaveDialog {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
        self.name.clear();
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Returns the trimmed name and closes. A blank name leaves the dialog
    /// open.
    pub fn submit(&mut self) -> Option<String> {
        let name = self.name.trim();
        if !self.open || name.is_empty() {
            return None;
        }
        let name = name.to_owned();
        self.close();
        Some(name)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
