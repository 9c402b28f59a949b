use actix_web::{HttpResponse, Responder, web};
use tracing::trace;

use crate::api::types::{ApiResponse, ApiSettings, HealthRecordCounts, HealthResponse};
use crate::storage::SharedRegistry;

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

impl AppStartTime {
    pub fn now() -> Self {
        Self {
            start_datetime: chrono::Utc::now(),
        }
    }
}

pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        registry: web::Data<SharedRegistry>,
        settings: web::Data<ApiSettings>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        trace!("Received health check request");
        let now = chrono::Utc::now();

        let records = {
            let registry = registry.read();
            HealthRecordCounts {
                total: registry.len(),
                active: registry.active_count(now),
            }
        };

        let uptime = (now - app_start_time.start_datetime).num_seconds().max(0) as u64;

        HttpResponse::Ok().json(ApiResponse::success(HealthResponse {
            status: "healthy".to_string(),
            timestamp: now.to_rfc3339(),
            uptime,
            records,
            log_sink: settings.log_sink.clone(),
        }))
    }
}

pub fn health_routes() -> actix_web::Scope {
    web::scope("/health")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
}
