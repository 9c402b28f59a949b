pub mod health;
pub mod redirect;
pub mod shorten;
pub mod stats;

pub use health::{AppStartTime, HealthService, health_routes};
pub use redirect::{RedirectService, redirect_routes};
pub use shorten::ShortenService;
pub use stats::StatsService;

/// `/api` 路由
pub fn api_routes() -> actix_web::Scope {
    use actix_web::web;

    web::scope("/api")
        .route("/shorten", web::post().to(ShortenService::submit))
        .route("/stats", web::get().to(StatsService::list))
}
