//! 表文件下载
//!
//! | 路径 | 说明 |
//! |------|------|
//! | /download/menu | 菜单表 |
//! | /download/bills | 账单表 |
//!
//! 也接受配置的文件名 (如 `/download/bills.csv`)，其余名称一律 403。

use axum::{
    Router,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
};

use crate::core::ServerState;
use crate::store::{TableSpec, TableStore};
use crate::utils::{AppError, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new().route("/download/{name}", get(download))
}

/// 按名称解析可下载的表
fn resolve(state: &ServerState, name: &str) -> Option<TableSpec> {
    [state.menu.table(), state.ledger.table()]
        .into_iter()
        .find(|table| table.name == name || table.file_name == name)
        .cloned()
}

/// GET /download/{name} - 下载原始表文件
pub async fn download(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let table = resolve(&state, &name).ok_or_else(|| {
        tracing::warn!(name = %name, "Rejected download of unknown table");
        AppError::forbidden("Forbidden").with_detail("name", name.as_str())
    })?;

    let bytes = state
        .store
        .export(&table)
        .map_err(|e| AppError::storage(e.to_string()))?;

    tracing::info!(table = table.name, bytes = bytes.len(), "Table downloaded");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", table.file_name),
            ),
        ],
        bytes,
    ))
}
