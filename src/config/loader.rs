//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `PARLO_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `PARLO_SERVER__HOST=127.0.0.1`
/// - `PARLO_SERVER__PORT=8080`
/// - `PARLO_ENGINE__VOICES_URL=https://...`
/// - `PARLO_STORAGE__TEMP_DIR=/data/tmp`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default(
            "server.cors_origins",
            vec!["http://localhost:3000", "http://web-app:3000"],
        )?
        .set_default(
            "engine.voices_url",
            "https://speech.platform.bing.com/consumer/speech/synthesize/readaloud/voices/list",
        )?
        .set_default(
            "engine.synthesis_url",
            "wss://speech.platform.bing.com/consumer/speech/synthesize/readaloud/edge/v1",
        )?
        .set_default("log.level", "info")?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        // 搜索默认配置文件
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 前缀: PARLO_
    // 层级分隔符: __ (双下划线)
    // 例如: PARLO_ENGINE__VOICES_URL=https://...
    builder = builder.add_source(
        Environment::with_prefix("PARLO")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    // 验证端口范围
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    // 验证引擎 URL
    if config.engine.voices_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Engine voices URL cannot be empty".to_string(),
        ));
    }

    if config.engine.synthesis_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Engine synthesis URL cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("CORS Origins: {:?}", config.server.cors_origins);
    tracing::info!("Engine Voices URL: {}", config.engine.voices_url);
    tracing::info!("Engine Synthesis URL: {}", config.engine.synthesis_url);
    tracing::info!("Temp Directory: {:?}", config.storage.resolved_temp_dir());
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
