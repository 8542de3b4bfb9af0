use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Utc;
use serde_json::{Value, json};
use tracing::info;

use crate::error::AppError;
use crate::model::user_status::{NewUserStatus, UserStatus, UserStatusChanges};
use crate::repository::UserStatusRepository;
use crate::utils::field_validation::{validate_create, validate_update};
use crate::utils::pagination::{ListQuery, MATCH_ALL, PageRequest, Paginated, UserStatusPage};

pub const USER_ID_PREFIX: &str = "user-id";
pub const HR_PREFIX: &str = "user-status-hr";

/// GET sub-mode, picked from the `url_prefix` route segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetMode {
    /// Single record by `domain_rhonda_id`.
    UserId,
    /// Listing joined with employee/manager names, filterable.
    Hr,
    /// Plain listing.
    List,
}

impl GetMode {
    pub fn from_prefix(prefix: &str) -> Self {
        match prefix {
            USER_ID_PREFIX => GetMode::UserId,
            HR_PREFIX => GetMode::Hr,
            _ => GetMode::List,
        }
    }
}

fn log_request(req: &HttpRequest) {
    info!(
        api = "user_status",
        method = %req.method(),
        url = %req.uri(),
        timestamp = %Utc::now(),
        "Request received"
    );
}

async fn list(
    repo: &dyn UserStatusRepository,
    mode: GetMode,
    query: &ListQuery,
) -> Result<HttpResponse, AppError> {
    let page = PageRequest::from_query(query)?;
    // Total rows in the table, even when HR filters narrow the results.
    let count = repo.count().await?;

    if mode == GetMode::Hr {
        let status = query.status.as_deref().unwrap_or(MATCH_ALL);
        let environment = query.environment.as_deref().unwrap_or(MATCH_ALL);
        let results = repo.list_all_with_manager(status, environment, page).await?;
        return Ok(HttpResponse::Ok().json(Paginated::new(count, page, results)));
    }

    let results = repo.list_all(page).await?;
    Ok(HttpResponse::Ok().json(Paginated::new(count, page, results)))
}

async fn fetch_one(
    repo: &dyn UserStatusRepository,
    domain_rhonda_id: &str,
) -> Result<HttpResponse, AppError> {
    match repo.get_by_domain_id(domain_rhonda_id).await? {
        Some(record) => Ok(HttpResponse::Ok().json(record)),
        None => Err(AppError::not_found(domain_rhonda_id)),
    }
}

/// List user status records
#[utoipa::path(
    get,
    path = "/user-status",
    params(ListQuery),
    responses(
        (status = 200, description = "Paginated user status list", body = UserStatusPage),
        (status = 400, description = "Invalid paging parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "UserStatus"
)]
pub async fn list_user_status(
    req: HttpRequest,
    repo: web::Data<dyn UserStatusRepository>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    log_request(&req);
    list(repo.get_ref(), GetMode::List, &query).await
}

/// List user status records in the mode named by `url_prefix`
///
/// `user-status-hr` joins employee and manager names and honours the
/// `status`/`environment` filters; any other prefix is a plain listing.
#[utoipa::path(
    get,
    path = "/user-status/{url_prefix}",
    params(
        ("url_prefix", Path, description = "Listing mode, e.g. `user-status-hr`"),
        ListQuery
    ),
    responses(
        (status = 200, description = "Paginated list (HR mode returns UserStatusHrPage)", body = UserStatusPage),
        (status = 404, description = "`user-id` mode without an identifier", body = Object, example = json!({
            "message": "domain_rhonda_id is required in URL"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "UserStatus"
)]
pub async fn get_user_status_by_prefix(
    req: HttpRequest,
    repo: web::Data<dyn UserStatusRepository>,
    path: web::Path<String>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    log_request(&req);
    let url_prefix = path.into_inner();

    match GetMode::from_prefix(&url_prefix) {
        GetMode::UserId => Err(AppError::missing_identifier()),
        mode => list(repo.get_ref(), mode, &query).await,
    }
}

/// Get one user status record (`user-id` mode), or list in any other mode
#[utoipa::path(
    get,
    path = "/user-status/{url_prefix}/{domain_rhonda_id}",
    params(
        ("url_prefix", Path, description = "`user-id` for a single record"),
        ("domain_rhonda_id", Path, description = "Employee identifier"),
        ListQuery
    ),
    responses(
        (status = 200, description = "User status found", body = UserStatus),
        (status = 404, description = "User status not found", body = Object, example = json!({
            "message": "abc123 does not exist!"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "UserStatus"
)]
pub async fn get_user_status(
    req: HttpRequest,
    repo: web::Data<dyn UserStatusRepository>,
    path: web::Path<(String, String)>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    log_request(&req);
    let (url_prefix, domain_rhonda_id) = path.into_inner();

    match GetMode::from_prefix(&url_prefix) {
        GetMode::UserId => fetch_one(repo.get_ref(), &domain_rhonda_id).await,
        mode => list(repo.get_ref(), mode, &query).await,
    }
}

/// Create user status
#[utoipa::path(
    post,
    path = "/user-status",
    request_body = NewUserStatus,
    responses(
        (status = 201, description = "User status created", body = Object, example = json!({
            "message": "abc123 has been inserted successfully!"
        })),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "message": "Validation failed",
            "errors": {"status": ["required field"]}
        })),
        (status = 409, description = "Identifier already exists", body = Object, example = json!({
            "message": "abc123 already exist!"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "UserStatus"
)]
pub async fn create_user_status(
    req: HttpRequest,
    repo: web::Data<dyn UserStatusRepository>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    log_request(&req);
    let record = validate_create(&body)?;

    match repo.create(&record).await? {
        Some(domain_rhonda_id) => {
            info!(domain_rhonda_id = %domain_rhonda_id, "User status inserted");
            Ok(HttpResponse::Created().json(json!({
                "message": format!("{domain_rhonda_id} has been inserted successfully!")
            })))
        }
        None => Err(AppError::conflict(&record.domain_rhonda_id)),
    }
}

/// Update user status
///
/// Only the fields present in the body are written; `null` clears a nullable
/// field. An empty body still checks that the record exists.
#[utoipa::path(
    put,
    path = "/user-status/{domain_rhonda_id}",
    params(
        ("domain_rhonda_id", Path, description = "Employee identifier")
    ),
    request_body = UserStatusChanges,
    responses(
        (status = 200, description = "User status updated", body = UserStatus),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "User status not found", body = Object, example = json!({
            "message": "abc123 does not exist!"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "UserStatus"
)]
pub async fn update_user_status(
    req: HttpRequest,
    repo: web::Data<dyn UserStatusRepository>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    log_request(&req);
    let domain_rhonda_id = path.into_inner();
    let changes = validate_update(&body)?;

    match repo.update(&changes, &domain_rhonda_id).await? {
        Some(record) => {
            info!(domain_rhonda_id = %domain_rhonda_id, "User status updated");
            Ok(HttpResponse::Ok().json(record))
        }
        None => Err(AppError::not_found(&domain_rhonda_id)),
    }
}

/// Delete user status
#[utoipa::path(
    delete,
    path = "/user-status/{domain_rhonda_id}",
    params(
        ("domain_rhonda_id", Path, description = "Employee identifier")
    ),
    responses(
        (status = 204, description = "User status deleted"),
        (status = 404, description = "User status not found", body = Object, example = json!({
            "message": "abc123 does not exist!"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "UserStatus"
)]
pub async fn delete_user_status(
    req: HttpRequest,
    repo: web::Data<dyn UserStatusRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log_request(&req);
    let domain_rhonda_id = path.into_inner();

    match repo.delete(&domain_rhonda_id).await? {
        Some(deleted) => {
            info!(domain_rhonda_id = %deleted, "{deleted} has been deleted successfully!");
            Ok(HttpResponse::NoContent().finish())
        }
        None => Err(AppError::not_found(&domain_rhonda_id)),
    }
}

/// PUT/DELETE on the collection: the identifier is missing from the URL.
pub async fn missing_identifier(req: HttpRequest) -> Result<HttpResponse, AppError> {
    log_request(&req);
    Err(AppError::missing_identifier())
}
