//! `localStorage` slot holding the saved-template list.

use editor::{StoreError, TemplateStore, STORAGE_KEY};

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStore;

/// `localStorage` can be null or throw on access (disabled storage, sandboxed
/// frames); both surface as `Unavailable`.
fn local_storage() -> Result<web_sys::Storage, StoreError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(StoreError::Unavailable)
}

impl TemplateStore for LocalStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        local_storage()?
            .get_item(STORAGE_KEY)
            .map_err(|e| StoreError::Backend(format!("{:?}", e)))
    }

    fn write(&mut self, value: &str) -> Result<(), StoreError> {
        local_storage()?
            .set_item(STORAGE_KEY, value)
            .map_err(|e| StoreError::Backend(format!("{:?}", e)))
    }
}
