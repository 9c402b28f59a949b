use std::fmt;

#[derive(Debug, Clone)]
pub enum MinilinkerError {
    Config(String),
    FileOperation(String),
    Serialization(String),
    LogDelivery(String),
}

impl MinilinkerError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            MinilinkerError::Config(_) => "E001",
            MinilinkerError::FileOperation(_) => "E002",
            MinilinkerError::Serialization(_) => "E003",
            MinilinkerError::LogDelivery(_) => "E004",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            MinilinkerError::Config(_) => "Configuration Error",
            MinilinkerError::FileOperation(_) => "File Operation Error",
            MinilinkerError::Serialization(_) => "Serialization Error",
            MinilinkerError::LogDelivery(_) => "Log Delivery Failure",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            MinilinkerError::Config(msg) => msg,
            MinilinkerError::FileOperation(msg) => msg,
            MinilinkerError::Serialization(msg) => msg,
            MinilinkerError::LogDelivery(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于终端）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for MinilinkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for MinilinkerError {}

// 便捷的构造函数
impl MinilinkerError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        MinilinkerError::Config(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        MinilinkerError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        MinilinkerError::Serialization(msg.into())
    }

    pub fn log_delivery<T: Into<String>>(msg: T) -> Self {
        MinilinkerError::LogDelivery(msg.into())
    }
}

impl From<std::io::Error> for MinilinkerError {
    fn from(err: std::io::Error) -> Self {
        MinilinkerError::FileOperation(err.to_string())
    }
}

impl From<config::ConfigError> for MinilinkerError {
    fn from(err: config::ConfigError) -> Self {
        MinilinkerError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for MinilinkerError {
    fn from(err: toml::ser::Error) -> Self {
        MinilinkerError::Serialization(err.to_string())
    }
}

impl From<ureq::Error> for MinilinkerError {
    fn from(err: ureq::Error) -> Self {
        MinilinkerError::LogDelivery(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MinilinkerError>;
