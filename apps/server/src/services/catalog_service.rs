//! Catalog service: read-only product listing.

use std::sync::Arc;

use tracing::debug;

use crate::dto::ProductResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Catalog read operations.
pub struct CatalogService {
    state: Arc<AppState>,
}

impl CatalogService {
    /// Creates a new catalog service.
    pub fn new(state: Arc<AppState>) -> Self {
        CatalogService { state }
    }

    /// Lists the whole product catalog.
    pub async fn get_all_products(&self) -> Result<Vec<ProductResponse>, ApiError> {
        debug!("get_all_products");

        let products = self.state.db().products().list().await?;
        Ok(products.iter().map(ProductResponse::from_product).collect())
    }
}
