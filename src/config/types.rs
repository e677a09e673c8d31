//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 合成引擎配置
    #[serde(default)]
    pub engine: EngineConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            engine: EngineConfig::default(),
            storage: StorageConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 允许跨域的来源列表
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://web-app:3000".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 合成引擎配置（Edge 朗读服务）
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// 音色目录查询 URL
    #[serde(default = "default_voices_url")]
    pub voices_url: String,

    /// 合成通道 WebSocket URL
    #[serde(default = "default_synthesis_url")]
    pub synthesis_url: String,
}

fn default_voices_url() -> String {
    "https://speech.platform.bing.com/consumer/speech/synthesize/readaloud/voices/list"
        .to_string()
}

fn default_synthesis_url() -> String {
    "wss://speech.platform.bing.com/consumer/speech/synthesize/readaloud/edge/v1".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            voices_url: default_voices_url(),
            synthesis_url: default_synthesis_url(),
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    /// 临时音频文件目录
    /// 如果未设置，则使用系统临时目录
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// 获取实际使用的临时目录
    pub fn resolved_temp_dir(&self) -> PathBuf {
        self.temp_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert!(config.engine.voices_url.contains("voices/list"));
        assert!(config.engine.synthesis_url.starts_with("wss://"));
        assert_eq!(config.server.cors_origins.len(), 2);
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_resolved_temp_dir_falls_back_to_system() {
        let config = StorageConfig::default();
        assert_eq!(config.resolved_temp_dir(), std::env::temp_dir());
    }

    #[test]
    fn test_resolved_temp_dir_uses_configured_path() {
        let config = StorageConfig {
            temp_dir: Some(PathBuf::from("/data/tmp")),
        };
        assert_eq!(config.resolved_temp_dir(), PathBuf::from("/data/tmp"));
    }
}
