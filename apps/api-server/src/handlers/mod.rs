//! HTTP handlers and route configuration.

pub mod health;
pub mod posts;

#[cfg(test)]
mod tests;

use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::doc::ApiDoc;
use crate::middleware::error::AppError;

/// Path prefix shared by every endpoint.
pub const API_PREFIX: &str = "/api/v1";

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    );

    // Docs first: the API scope would otherwise claim these paths.
    cfg.service(
        SwaggerUi::new(format!("{API_PREFIX}/docs/{{_:.*}}"))
            .url(format!("{API_PREFIX}/schema/openapi.json"), ApiDoc::openapi()),
    );

    cfg.service(
        web::scope(API_PREFIX)
            .route("/health", web::get().to(health::health_check))
            .route("/posts", web::get().to(posts::list_posts))
            .route("/posts/", web::get().to(posts::list_posts))
            .route("/posts/{slug}", web::get().to(posts::get_post))
            .route("/posts/{slug}/", web::get().to(posts::get_post)),
    );
}
