use serde::{Deserialize, Serialize};

use superstore_core::{DomainError, RecordId};

/// A product record as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: RecordId,
    pub name: String,
    pub price: f64,
}

impl Product {
    /// True when this record has never been created on the backend.
    pub fn is_unsaved(&self) -> bool {
        self.id.is_unsaved()
    }
}

/// Create payload: the backend assigns the id, so the body omits it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
}

/// Form-edit buffer for a product.
///
/// An empty draft (`id == 0`) is the add-product form; a draft seeded from
/// an existing record is the edit form. Validation happens on submit only,
/// so a failed save leaves the typed-in fields intact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub id: RecordId,
    pub name: String,
    pub price: f64,
}

impl ProductDraft {
    /// Start an edit draft from an existing record.
    pub fn from_record(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
        }
    }

    /// Validate the draft into a submittable record.
    pub fn validate(&self) -> Result<Product, DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if !self.price.is_finite() {
            return Err(DomainError::validation("price must be a number"));
        }
        if self.price < 0.0 {
            return Err(DomainError::validation("price cannot be negative"));
        }
        Ok(Product {
            id: self.id,
            name: self.name.trim().to_string(),
            price: self.price,
        })
    }
}

impl From<&Product> for NewProduct {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price,
        }
    }
}
