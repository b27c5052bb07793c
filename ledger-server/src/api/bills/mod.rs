//! Bill API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/bills", get(handler::list_today).post(handler::create))
        .route("/api/next_bill_no", get(handler::next_bill_no))
}
