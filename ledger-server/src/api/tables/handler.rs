//! Dining Table API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;

/// GET /api/tables - 获取桌台标签
pub async fn list(State(state): State<ServerState>) -> Json<Vec<String>> {
    Json(state.config.table_labels.clone())
}
