//! Bill API Handlers

use axum::{Json, extract::State};
use shared::models::{Bill, BillCreate, NextBillNo};

use crate::core::ServerState;
use crate::ledger::BillDraft;
use crate::utils::AppResult;

/// GET /api/bills - 今天的账单 (本地时间 00:00 ~ 23:59:59)
pub async fn list_today(State(state): State<ServerState>) -> AppResult<Json<Vec<Bill>>> {
    let bills = state.ledger.list_today()?;
    Ok(Json(bills))
}

/// POST /api/bills - 入账
///
/// 未提供 billNo / dateTime 时自动补全；items 不是列表返回 400。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BillCreate>,
) -> AppResult<Json<Bill>> {
    let draft = BillDraft::try_from(payload)?;
    let bill = state.ledger.record_bill(draft)?;
    Ok(Json(bill))
}

/// GET /api/next_bill_no - 下一个账单号
pub async fn next_bill_no(State(state): State<ServerState>) -> AppResult<Json<NextBillNo>> {
    let next = state.ledger.next_bill_number()?;
    Ok(Json(NextBillNo { next }))
}
