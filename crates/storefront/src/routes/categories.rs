//! Category catalog handler.

use axum::{Json, extract::State};
use tracing::instrument;

use sweet_creations_core::StoreCategory;

use crate::error::Result;
use crate::state::AppState;

/// List categories in catalog order.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<StoreCategory>>> {
    Ok(Json(state.catalog().list_categories().await?))
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::{app, get, send};

    #[tokio::test]
    async fn test_lists_categories() {
        let (status, _, body) = send(&app(), get("/api/categories", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], "1");
        assert_eq!(body[1]["name"], "Panadero");
        assert_eq!(body.as_array().map(Vec::len), Some(3));
    }
}
