use ledger_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 日志)
    setup_environment()?;

    // 打印横幅
    print_banner();

    // 2. 加载配置
    let config = Config::from_env();
    tracing::info!(
        work_dir = %config.work_dir,
        addr = %format!("{}:{}", config.bind_addr, config.http_port),
        environment = %config.environment,
        "Ledger server starting..."
    );

    // 3. 初始化服务器状态 (确保表文件存在)
    let state = ServerState::initialize(&config)?;

    // 4. 启动 HTTP 服务器
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {:#}", e);
        return Err(e);
    }

    Ok(())
}
