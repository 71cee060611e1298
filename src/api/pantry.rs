//! Pantry Endpoints
//!
//! Ingredient and cooked-dish CRUD plus the alert feed.

use gloo_net::http::Method;

use super::{encode, get_json, send_empty, send_json, send_json_unit};
use crate::error::ApiError;
use crate::edit_session::{SaveMethod, SavePayload, SaveRequest};
use crate::models::{AlertsSnapshot, BulkDeleteRequest, BulkDeleteResponse};

pub const INGREDIENT_URL: &str = "/api/pantry/ingredient";
pub const COOKED_URL: &str = "/api/pantry/cooked";

/// `/api/pantry/ingredient/<name>`
pub fn ingredient_url(name: &str) -> String {
    format!("{INGREDIENT_URL}/{}", encode(name))
}

/// `/api/pantry/cooked/<name>`
pub fn cooked_url(name: &str) -> String {
    format!("{COOKED_URL}/{}", encode(name))
}

/// Send a validated row save: POST for new rows, PUT keyed by the original name.
pub async fn save_row(request: &SaveRequest) -> Result<(), ApiError> {
    let method = match request.method {
        SaveMethod::Create => Method::POST,
        SaveMethod::Update { .. } => Method::PUT,
    };
    let url = request.url();
    match &request.payload {
        SavePayload::Ingredient(ingredient) => send_json_unit(method, &url, ingredient).await,
        SavePayload::Cooked(item) => send_json_unit(method, &url, item).await,
    }
}

/// DELETE a row by its item URL (see `RowKind::item_url`).
pub async fn delete_row(url: &str) -> Result<(), ApiError> {
    send_empty(Method::DELETE, url).await
}

pub async fn bulk_delete_ingredients(names: &[String]) -> Result<BulkDeleteResponse, ApiError> {
    send_json(
        Method::POST,
        "/api/pantry/ingredients/bulk-delete",
        &BulkDeleteRequest { names },
    )
    .await
}

/// Current alert backlog (low stock, near expiry).
pub async fn fetch_pantry_alerts() -> Result<AlertsSnapshot, ApiError> {
    get_json("/api/pantry/alerts").await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_urls_encode_names() {
        assert_eq!(ingredient_url("Smântână 20%"), "/api/pantry/ingredient/Sm%C3%A2nt%C3%A2n%C4%83%2020%25");
        assert_eq!(cooked_url("Soup/Stew"), "/api/pantry/cooked/Soup%2FStew");
    }
}
