use actix_web::{HttpRequest, error, web};

use crate::{
    api::user_status,
    config::Config,
    error::AppError,
    utils::field_validation::ValidationErrors,
};

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.service(web::scope(&config.api_prefix).configure(user_status_routes));
}

// Body and query extraction failures are reported like any other validation error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err: error::JsonPayloadError, _req: &HttpRequest| {
            AppError::Validation(ValidationErrors::single("body", err.to_string())).into()
        })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: error::QueryPayloadError, _req: &HttpRequest| {
        AppError::Validation(ValidationErrors::single("query", err.to_string())).into()
    })
}

pub fn user_status_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user-status")
            .app_data(json_config())
            .app_data(query_config())
            // /user-status
            .service(
                web::resource("")
                    .route(web::get().to(user_status::list_user_status))
                    .route(web::post().to(user_status::create_user_status))
                    .route(web::put().to(user_status::missing_identifier))
                    .route(web::delete().to(user_status::missing_identifier)),
            )
            // /user-status/{url_prefix} for GET, /user-status/{domain_rhonda_id} otherwise
            .service(
                web::resource("/{segment}")
                    .route(web::get().to(user_status::get_user_status_by_prefix))
                    .route(web::put().to(user_status::update_user_status))
                    .route(web::delete().to(user_status::delete_user_status)),
            )
            // /user-status/{url_prefix}/{domain_rhonda_id}
            .service(
                web::resource("/{url_prefix}/{domain_rhonda_id}")
                    .route(web::get().to(user_status::get_user_status)),
            ),
    );
}
