use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderValue, LOCATION};
use actix_web::{HttpResponse, Responder, web};
use tracing::{trace, warn};

use crate::services::{RedirectOutcome, RedirectResolver};
use crate::storage::SharedRegistry;
use crate::utils::is_valid_short_code;

pub struct RedirectService;

impl RedirectService {
    pub async fn handle_redirect(
        path: web::Path<String>,
        registry: web::Data<SharedRegistry>,
        resolver: web::Data<RedirectResolver>,
    ) -> impl Responder {
        let shortcode = path.into_inner();

        if !is_valid_short_code(&shortcode) {
            // 非法短码，直接 404，不查表
            trace!("Invalid short code rejected: {}", &shortcode);
            return Self::not_found_response();
        }

        let outcome = resolver.resolve(&shortcode, &registry.read(), chrono::Utc::now());
        match outcome {
            RedirectOutcome::Forward(target) => match HeaderValue::from_str(&target) {
                Ok(location) => HttpResponse::build(StatusCode::TEMPORARY_REDIRECT)
                    .insert_header((LOCATION, location))
                    .finish(),
                Err(_) => {
                    warn!("Stored target for {} is not a valid Location header", &shortcode);
                    Self::not_found_response()
                }
            },
            RedirectOutcome::NotFound => Self::not_found_response(),
        }
    }

    #[inline]
    fn not_found_response() -> HttpResponse {
        HttpResponse::build(StatusCode::NOT_FOUND)
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .insert_header(("Cache-Control", "no-store"))
            .body("Invalid or expired link")
    }
}

/// Redirect 路由配置，必须最后注册
pub fn redirect_routes() -> actix_web::Scope {
    web::scope("")
        .route("/{shortcode}", web::get().to(RedirectService::handle_redirect))
        .route("/{shortcode}", web::head().to(RedirectService::handle_redirect))
}
