use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - server: 监听地址、端口、worker 数量
/// - logging: 本地日志输出
/// - shortener: 短链生成与统计展示
/// - log_sink: 远程日志上报端点
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub shortener: ShortenerConfig,
    #[serde(default)]
    pub log_sink: LogSinkConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：ML，分隔符：__
    /// 示例：ML__SERVER__PORT=9999
    pub fn load_from(path: &str) -> Result<Self> {
        use config::{Config, Environment, File};

        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("ML")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize::<StaticConfig>()?)
    }

    /// Same as [`StaticConfig::load_from`], falling back to defaults on error.
    pub fn load(path: &str) -> Self {
        match Self::load_from(path) {
            Ok(config) => {
                if Path::new(path).exists() {
                    eprintln!("[INFO] Configuration loaded from: {}", path);
                }
                config
            }
            Err(e) => {
                eprintln!("[ERROR] Failed to load config: {}", e);
                Self::default()
            }
        }
    }

    /// 生成示例 TOML 配置（全部默认值）
    pub fn generate_sample_config() -> Result<String> {
        Ok(toml::to_string_pretty(&Self::default())?)
    }

    /// 将示例配置写入文件，必要时创建父目录
    pub fn write_sample_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let content = Self::generate_sample_config()?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

/// 短链配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortenerConfig {
    /// Public origin used to build short links in statistics.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_validity_minutes")]
    pub default_validity_minutes: i64,
    #[serde(default = "default_code_length")]
    pub code_length: usize,
    #[serde(default = "default_max_batch_rows")]
    pub max_batch_rows: usize,
    /// Random codes tried per length before the length grows by one.
    #[serde(default = "default_max_generate_attempts")]
    pub max_generate_attempts: usize,
}

/// 远程日志上报配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSinkConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_log_endpoint")]
    pub endpoint: String,
    /// Bearer token for the `Authorization` header. A bare token gets the
    /// `Bearer ` prefix; a value that already carries it is sent as is.
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default = "default_log_timeout_secs")]
    pub timeout_secs: u64,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_validity_minutes() -> i64 {
    30
}

fn default_code_length() -> usize {
    5
}

fn default_max_batch_rows() -> usize {
    5
}

fn default_max_generate_attempts() -> usize {
    8
}

fn default_log_endpoint() -> String {
    "http://20.244.56.144/evaluation-service/logs".to_string()
}

fn default_log_timeout_secs() -> u64 {
    3
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_validity_minutes: default_validity_minutes(),
            code_length: default_code_length(),
            max_batch_rows: default_max_batch_rows(),
            max_generate_attempts: default_max_generate_attempts(),
        }
    }
}

impl Default for LogSinkConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_log_endpoint(),
            auth_token: None,
            timeout_secs: default_log_timeout_secs(),
        }
    }
}
