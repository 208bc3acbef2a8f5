//! Product resource endpoints.

use superstore_core::RecordId;
use superstore_records::{NewProduct, Product};

use crate::error::ApiError;
use crate::http::RestClient;

impl RestClient {
    /// `GET /products`. The caller replaces its list wholesale with the
    /// result.
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get_json("/products").await
    }

    /// Create or update, dispatched on the id: an unsaved record is posted
    /// (body without id, the backend assigns one), anything else is a `PUT`
    /// to its own resource.
    pub async fn save_product(&self, product: &Product) -> Result<Product, ApiError> {
        if product.is_unsaved() {
            self.post_json("/products", &NewProduct::from(product)).await
        } else {
            self.put_json(&format!("/products/{}", product.id), product)
                .await
        }
    }

    /// `DELETE /products/{id}`.
    pub async fn delete_product(&self, id: RecordId) -> Result<(), ApiError> {
        self.delete(&format!("/products/{id}")).await
    }
}
