//! HTTP surface
//!
//! - `POST /api/shorten`: submit a batch of URLs
//! - `GET /api/stats`: every record with expiry information
//! - `GET /health`: liveness and record counts
//! - `GET /{shortcode}`: 307 to the original URL, or 404

use std::sync::Arc;

use actix_web::{HttpResponse, error, web};

pub mod services;
pub mod types;

use crate::services::{LogSink, RedirectResolver, ShortenFlow, ShortenSettings};
use crate::storage::SharedRegistry;
use services::{AppStartTime, api_routes, health_routes, redirect_routes};
use types::{ApiResponse, ApiSettings, ErrorCode, MessageData};

/// Everything the handlers need, cheap to clone into each worker.
#[derive(Clone)]
pub struct AppState {
    pub registry: SharedRegistry,
    pub shorten: web::Data<ShortenFlow>,
    pub resolver: web::Data<RedirectResolver>,
    pub settings: ApiSettings,
    pub started: AppStartTime,
}

impl AppState {
    pub fn new(
        registry: SharedRegistry,
        shorten_settings: ShortenSettings,
        settings: ApiSettings,
        sink: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            registry,
            shorten: web::Data::new(ShortenFlow::new(shorten_settings, Arc::clone(&sink))),
            resolver: web::Data::new(RedirectResolver::new(sink)),
            settings,
            started: AppStartTime::now(),
        }
    }
}

/// Register shared data and all routes. The redirect catch-all goes last.
pub fn configure(cfg: &mut web::ServiceConfig, state: &AppState) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ApiResponse::new(
            ErrorCode::BadRequest,
            MessageData {
                message: err.to_string(),
            },
        ));
        error::InternalError::from_response(err, response).into()
    });

    cfg.app_data(web::Data::new(state.registry.clone()))
        .app_data(state.shorten.clone())
        .app_data(state.resolver.clone())
        .app_data(web::Data::new(state.settings.clone()))
        .app_data(web::Data::new(state.started.clone()))
        .app_data(json_config)
        .service(api_routes())
        .service(health_routes())
        .service(redirect_routes());
}
