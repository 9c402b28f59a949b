//! 短链提交接口

use actix_web::{HttpResponse, Responder, web};
use tracing::{info, trace, warn};

use crate::api::types::{
    ApiResponse, ApiSettings, ErrorCode, MessageData, ShortenRequest, ValidationFailure,
};
use crate::services::{ShortenFlow, StatsEntry};
use crate::storage::SharedRegistry;

pub struct ShortenService;

impl ShortenService {
    pub async fn submit(
        body: web::Json<ShortenRequest>,
        registry: web::Data<SharedRegistry>,
        flow: web::Data<ShortenFlow>,
        settings: web::Data<ApiSettings>,
    ) -> impl Responder {
        let rows = body.into_inner().rows;
        trace!("Shorten API: received {} row(s)", rows.len());

        if rows.is_empty() {
            return HttpResponse::BadRequest().json(ApiResponse::new(
                ErrorCode::BatchEmpty,
                MessageData {
                    message: "At least one URL is required".to_string(),
                },
            ));
        }

        if rows.len() > settings.max_batch_rows {
            warn!(
                "Shorten API: rejected batch of {} rows (max {})",
                rows.len(),
                settings.max_batch_rows
            );
            return HttpResponse::BadRequest().json(ApiResponse::new(
                ErrorCode::BatchSizeTooLarge,
                MessageData {
                    message: format!(
                        "At most {} URLs can be shortened at once",
                        settings.max_batch_rows
                    ),
                },
            ));
        }

        // validate + append under one write lock so the batch stays atomic
        let result = {
            let mut registry = registry.write();
            flow.submit(&rows, &mut registry)
        };

        match result {
            Ok(records) => {
                let now = chrono::Utc::now();
                info!("Shorten API: created {} link(s)", records.len());
                let data: Vec<StatsEntry> = records
                    .iter()
                    .map(|record| StatsEntry::from_record(record, &settings.base_url, now))
                    .collect();
                HttpResponse::Created().json(ApiResponse::success(data))
            }
            Err(errors) => {
                info!("Shorten API: rejected batch with {} error(s)", errors.len());
                HttpResponse::BadRequest().json(ApiResponse::new(
                    ErrorCode::LinkValidationFailed,
                    ValidationFailure { errors },
                ))
            }
        }
    }
}
