use axum::Json;

use murmur_store::legacy;

use crate::error::ApiError;

/// Retired demo endpoints. Both fail with 410 and a pointer to the
/// current API.
pub async fn list_numbers() -> Result<Json<Vec<i64>>, ApiError> {
    Ok(Json(legacy::list_numbers()?))
}

pub async fn add_number() -> Result<Json<()>, ApiError> {
    legacy::add_number()?;
    Ok(Json(()))
}
