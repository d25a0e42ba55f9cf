use serde::{Deserialize, Serialize};

/// A named snapshot of an email template kept in the saved-template library.
///
/// The content is a copy of the canonical HTML at the moment of saving; it is
/// never mutated afterwards. The JSON shape (`id`, `name`, `content`,
/// `createdAt` in milliseconds) is what ends up under the storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTemplate {
    pub id: String,
    pub name: String,
    pub content: String,
    pub created_at: u64,
}
