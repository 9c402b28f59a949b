//! API 类型定义

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::services::{StatsEntry, ValidationError};
use crate::storage::CandidateInput;

/// API 错误码
///
/// 按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 3000-3099: 链接错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    BatchSizeTooLarge = 1010,
    BatchEmpty = 1014,

    LinkValidationFailed = 3008,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(code: ErrorCode, data: T) -> Self {
        Self {
            code: code as i32,
            data,
        }
    }

    pub fn success(data: T) -> Self {
        Self::new(ErrorCode::Success, data)
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct MessageData {
    pub message: String,
}

/// 提交请求：1..=max_batch_rows 行
#[derive(Deserialize, Clone, Debug)]
pub struct ShortenRequest {
    #[serde(default)]
    pub rows: Vec<CandidateInput>,
}

#[derive(Serialize, Clone, Debug)]
pub struct ValidationFailure {
    pub errors: Vec<ValidationError>,
}

pub type StatsResponse = ApiResponse<Vec<StatsEntry>>;

#[derive(Serialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: u64,
    pub records: HealthRecordCounts,
    pub log_sink: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct HealthRecordCounts {
    pub total: usize,
    pub active: usize,
}

/// Settings the HTTP layer reads per request.
#[derive(Clone, Debug)]
pub struct ApiSettings {
    pub base_url: String,
    pub max_batch_rows: usize,
    pub log_sink: String,
}

impl ApiSettings {
    pub fn from_config(config: &crate::config::StaticConfig) -> Self {
        Self {
            base_url: config.shortener.base_url.clone(),
            max_batch_rows: config.shortener.max_batch_rows.max(1),
            log_sink: if config.log_sink.enabled {
                "remote".to_string()
            } else {
                "local".to_string()
            },
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self::from_config(&crate::config::StaticConfig::default())
    }
}
