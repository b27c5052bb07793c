//! Menu API Handlers

use axum::{Json, extract::State};
use shared::models::{MenuCatalog, MenuEntry, MenuItemCreate};

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/menu - 获取完整菜单 (分类 → 菜品列表)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<MenuCatalog>> {
    let catalog = state.menu.get()?;
    Ok(Json(catalog))
}

/// POST /api/menu - 新增菜品
///
/// 菜名为空返回 400；价格非数字按解析策略处理。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuEntry>> {
    let entry = state
        .menu
        .add_item(&payload.category, &payload.name, payload.price.as_ref())?;
    Ok(Json(entry))
}
