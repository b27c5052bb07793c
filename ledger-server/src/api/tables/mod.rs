//! Dining Table API 模块
//!
//! 桌台只是前端展示用的标签列表，账本不校验 table 字段。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/tables", get(handler::list))
}
