use axum::Json;
use serde_json::{json, Value};

use crate::theme::{all_themes, DEFAULT_THEME_ID};

/// GET /api/v1/themes
/// Lists every theme with both palettes, so clients can preview either mode.
pub async fn handle_list_themes() -> Json<Value> {
    Json(json!({
        "default": DEFAULT_THEME_ID,
        "themes": all_themes(),
    }))
}
