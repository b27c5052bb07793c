//! Server Implementation
//!
//! HTTP 服务器启动和管理

use anyhow::Context;
use tokio::net::TcpListener;

use crate::core::{Config, ServerState};
use crate::routes::build_app;

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// 使用已初始化的状态创建服务器
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    /// 监听地址 (bind_addr:http_port)
    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.bind_addr, self.config.http_port)
    }

    /// 启动 HTTP 服务，Ctrl-C 时优雅退出
    pub async fn run(&self) -> anyhow::Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config)
                .context("Failed to initialize server state")?,
        };

        let addr = self.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!("Ledger server listening on http://{}", addr);

        let app = build_app().with_state(state);

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .context("HTTP server error")?;

        tracing::info!("Server stopped");
        Ok(())
    }
}
