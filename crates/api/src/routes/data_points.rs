//! Data-Point Routes

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

use crate::AppState;
use storage::{DataPoint, DataPointRequest, RowDecode, StorageError};

/// Repository failures map to a 500 with the error text in the body
pub struct ApiError(StorageError);

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": self.0.to_string()})),
        )
            .into_response()
    }
}

/// Response for data-point creation
#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub data_point_id: String,
}

/// Query parameters for the list endpoint
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Absent device_id matches zero rows rather than being rejected
    #[serde(default)]
    pub device_id: String,
}

/// Response for the list endpoint
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub data_points: Vec<DataPoint>,
    pub corrupt_count: usize,
}

/// Submit one data point
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DataPointRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = state.repository.save(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateResponse { data_point_id: id }),
    ))
}

/// List all data points for a device
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQuery>,
) -> Result<Json<ListResponse>, ApiError> {
    let rows = state.repository.find_by_device(&params.device_id).await?;

    let mut data_points = Vec::with_capacity(rows.len());
    let mut corrupt_count = 0;
    for row in rows {
        match row {
            RowDecode::Intact(point) => data_points.push(point),
            RowDecode::Corrupt { id, device_id } => {
                warn!(%id, %device_id, "excluding data point with corrupt stored payload");
                corrupt_count += 1;
            }
        }
    }

    Ok(Json(ListResponse {
        data_points,
        corrupt_count,
    }))
}
