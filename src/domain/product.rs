use serde::{Deserialize, Serialize};

/// A catalog entry. Serializes to the outgoing wire shape
/// `{"id", "name", "description"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Payload for creating a new product. `description` arrives as `desc` on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
}

/// Partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }

    /// Builds the full product from a freshly generated id and the create payload.
    pub fn from_create(id: String, payload: ProductCreate) -> Self {
        Self {
            id,
            name: payload.name,
            description: payload.description,
        }
    }

    /// Merges a patch into this product, leaving `id` alone.
    ///
    /// # Fields Updated
    /// - `name`: only when the patch carries one
    /// - `description`: only when the patch carries one
    pub fn apply_patch(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}
