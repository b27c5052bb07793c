//! 前端页面
//!
//! 工作目录下的 `index.html` 作为 Jinja 模板渲染，上下文:
//!
//! | 变量 | 类型 | 说明 |
//! |------|------|------|
//! | tables | list[str] | 桌台标签 |
//!
//! 文件不存在时返回提示页。

use axum::{Router, extract::State, response::Html, routing::get};
use minijinja::{AutoEscape, Environment, context};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

const MISSING_INDEX_PAGE: &str =
    "<h2>Missing index.html</h2><p>Please place your HTML file in the work directory.</p>";

pub fn router() -> Router<ServerState> {
    Router::new().route("/", get(index))
}

/// 渲染页面模板
fn render_page(source: &str, tables: &[String]) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env.render_str(source, context! { tables => tables })
}

/// GET / - 前端页面
pub async fn index(State(state): State<ServerState>) -> AppResult<Html<String>> {
    let source = match tokio::fs::read_to_string(state.config.index_path()).await {
        Ok(source) => source,
        Err(e) => {
            tracing::debug!(error = %e, "index.html not readable, serving placeholder");
            return Ok(Html(MISSING_INDEX_PAGE.to_string()));
        }
    };

    render_page(&source, &state.config.table_labels)
        .map(Html)
        .map_err(|e| AppError::internal(format!("Failed to render index.html: {e}")))
}
