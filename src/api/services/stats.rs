use actix_web::{HttpResponse, Responder, web};
use tracing::trace;

use crate::api::types::{ApiResponse, ApiSettings};
use crate::services::collect_stats;
use crate::storage::SharedRegistry;

pub struct StatsService;

impl StatsService {
    /// 所有短链（含已过期），按创建顺序
    pub async fn list(
        registry: web::Data<SharedRegistry>,
        settings: web::Data<ApiSettings>,
    ) -> impl Responder {
        let now = chrono::Utc::now();
        let entries = collect_stats(&registry.read(), &settings.base_url, now);
        trace!("Stats API: returning {} entries", entries.len());

        HttpResponse::Ok()
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(ApiResponse::success(entries))
    }
}
