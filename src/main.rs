//! Parlo - 语音合成网关
//!
//! - Domain: speech/, user/
//! - Application: commands, queries, ports
//! - Infrastructure: http, memory, adapters

use std::sync::Arc;

use parlo::config::{load_config, print_config};
use parlo::infrastructure::adapters::{EdgeTtsClient, EdgeTtsClientConfig, WavTranscoder};
// use parlo::infrastructure::adapters::FakeSpeechEngine;
use parlo::infrastructure::http::{AppState, HttpServer, ServerConfig};
use parlo::infrastructure::memory::InMemoryUserStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},parlo={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Parlo - 语音合成网关");
    print_config(&config);

    // 临时音频文件目录
    let temp_dir = config.storage.resolved_temp_dir();
    tokio::fs::create_dir_all(&temp_dir).await?;

    // 创建 Edge TTS 引擎
    let engine_config = EdgeTtsClientConfig {
        voices_url: config.engine.voices_url.clone(),
        synthesis_url: config.engine.synthesis_url.clone(),
    };
    let engine = Arc::new(EdgeTtsClient::new(engine_config)?);

    // // 创建 Fake 引擎（测试用，始终返回固定音频）
    // let engine = Arc::new(FakeSpeechEngine::new(b"fake-mp3".to_vec()));

    // 创建 WAV 转码器
    let transcoder = Arc::new(WavTranscoder::new());

    // 创建用户存储（演示数据）
    let user_store = Arc::new(InMemoryUserStore::with_seed_data());

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(
        &config.server.host,
        config.server.port,
        config.server.cors_origins.clone(),
    );
    let state = AppState::new(engine, transcoder, user_store, temp_dir);

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
