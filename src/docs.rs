use crate::model::user_status::{NewUserStatus, UserStatus, UserStatusChanges, UserStatusWithManager};
use crate::utils::pagination::{ListQuery, PageCursor, UserStatusHrPage, UserStatusPage};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Status API",
        version = "1.0.0",
        description = r#"
## User Status Service

Keeps one employment status record per employee, keyed by the business
identifier `domain_rhonda_id`.

### 🔹 Operations
- **Create** a record (`POST /user-status`), rejected with 409 if the identifier exists
- **Read** one record (`GET /user-status/user-id/{domain_rhonda_id}`)
- **List** records with `page`/`page_size` cursors (`GET /user-status`)
- **HR listing** with employee and manager names, filterable by `status` and
  `environment` (`GET /user-status/user-status-hr`)
- **Update** any subset of fields (`PUT /user-status/{domain_rhonda_id}`)
- **Delete** a record (`DELETE /user-status/{domain_rhonda_id}`)

### 📦 Response Format
- JSON bodies; errors always carry `message`
- Missing dates render as `1900-01-01` / `1900-01-01T00:00:00`

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::user_status::list_user_status,
        crate::api::user_status::get_user_status_by_prefix,
        crate::api::user_status::get_user_status,
        crate::api::user_status::create_user_status,
        crate::api::user_status::update_user_status,
        crate::api::user_status::delete_user_status
    ),
    components(
        schemas(
            UserStatus,
            UserStatusWithManager,
            NewUserStatus,
            UserStatusChanges,
            ListQuery,
            PageCursor,
            UserStatusPage,
            UserStatusHrPage
        )
    ),
    tags(
        (name = "UserStatus", description = "Employee status management APIs"),
    )
)]
pub struct ApiDoc;
