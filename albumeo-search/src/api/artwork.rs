//! Cover art lookup endpoint

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::artwork::ArtworkUrls;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ArtworkParams {
    /// Ask the Cover Art Archive whether artwork actually exists
    #[serde(default)]
    pub verify: bool,
}

#[derive(Debug, Serialize)]
pub struct ArtworkResponse {
    pub release_id: String,
    #[serde(flatten)]
    pub urls: ArtworkUrls,
    /// Only present when `verify=true`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,
}

/// GET /api/artwork/:release_id?verify=BOOL
pub async fn get_artwork(
    State(state): State<AppState>,
    Path(release_id): Path<String>,
    params: Result<Query<ArtworkParams>, QueryRejection>,
) -> ApiResult<Json<ArtworkResponse>> {
    let Query(params) = params?;
    if !is_valid_release_id(&release_id) {
        return Err(ApiError::BadRequest(format!(
            "Invalid release id: {}",
            release_id
        )));
    }

    let exists = if params.verify {
        Some(state.artwork.cover_art_exists(&release_id).await)
    } else {
        None
    };

    Ok(Json(ArtworkResponse {
        urls: state.artwork.artwork_for(std::slice::from_ref(&release_id)),
        release_id,
        exists,
    }))
}

/// Release ids are MBIDs: hex digits and hyphens
fn is_valid_release_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_hexdigit() || c == '-')
}
