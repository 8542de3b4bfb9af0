//! Data access for the `user_status` table.
//!
//! Every method is a single round trip on a pooled connection. "Not found" and
//! "already exists" are not errors here: they come back as `None` and the
//! handler decides what they mean.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::model::user_status::{NewUserStatus, UserStatus, UserStatusChanges, UserStatusWithManager};
use crate::utils::db_utils::{SqlUpdate, build_update_sql};
use crate::utils::pagination::PageRequest;

const GET_ALL_USER_STATUS: &str = r#"
    SELECT *
    FROM user_status
    ORDER BY user_status_id
    LIMIT $1 OFFSET $2
"#;

const GET_ALL_USER_STATUS_WITH_MANAGER: &str = r#"
    SELECT
        us.user_status_id,
        us.domain_rhonda_id,
        CONCAT_WS(' ', u.first_name, u.last_name) AS employee,
        CONCAT_WS(' ', m.first_name, m.last_name) AS manager,
        us.status,
        us.employee_environment,
        us.department,
        us.work_type,
        us.work_location,
        us.gender,
        us.birth_date,
        us.start_date,
        us.end_date
    FROM user_status us
    LEFT JOIN public.user u ON us.domain_rhonda_id = u.domain_rhonda_id
    LEFT JOIN public.user m ON us.manager_id = m.domain_rhonda_id
    WHERE us.status LIKE $1 AND us.employee_environment LIKE $2
    ORDER BY us.user_status_id
    LIMIT $3 OFFSET $4
"#;

const GET_USER_STATUS_BY_DOMAIN_RHONDA_ID: &str = r#"
    SELECT *
    FROM user_status
    WHERE domain_rhonda_id = $1
    LIMIT 1
"#;

const COUNT_USER_STATUS_ROWS: &str = "SELECT COUNT(*) FROM user_status";

const INSERT_USER_STATUS: &str = r#"
    INSERT INTO user_status
    (domain_rhonda_id, status, employee_environment, department, work_type,
     manager_id, work_location, gender, birth_date, start_date, end_date)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
    ON CONFLICT (domain_rhonda_id) DO NOTHING
    RETURNING domain_rhonda_id
"#;

const DELETE_USER_STATUS: &str = r#"
    DELETE FROM user_status
    WHERE domain_rhonda_id = $1
    RETURNING domain_rhonda_id
"#;

#[async_trait]
pub trait UserStatusRepository: Send + Sync {
    /// One page of records in store order.
    async fn list_all(&self, page: PageRequest) -> Result<Vec<UserStatus>, sqlx::Error>;

    /// One page of records joined with employee and manager names, filtered
    /// with `LIKE` patterns on status and environment.
    async fn list_all_with_manager(
        &self,
        status: &str,
        environment: &str,
        page: PageRequest,
    ) -> Result<Vec<UserStatusWithManager>, sqlx::Error>;

    async fn get_by_domain_id(&self, domain_rhonda_id: &str) -> Result<Option<UserStatus>, sqlx::Error>;

    /// Returns the new identifier, or `None` if it already existed.
    async fn create(&self, record: &NewUserStatus) -> Result<Option<String>, sqlx::Error>;

    /// Returns the updated row, or `None` for an unknown identifier.
    async fn update(
        &self,
        changes: &UserStatusChanges,
        domain_rhonda_id: &str,
    ) -> Result<Option<UserStatus>, sqlx::Error>;

    /// Returns the deleted identifier, or `None` for an unknown identifier.
    async fn delete(&self, domain_rhonda_id: &str) -> Result<Option<String>, sqlx::Error>;

    async fn count(&self) -> Result<i64, sqlx::Error>;
}

pub struct PostgresUserStatusRepository {
    pool: PgPool,
}

impl PostgresUserStatusRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStatusRepository for PostgresUserStatusRepository {
    async fn list_all(&self, page: PageRequest) -> Result<Vec<UserStatus>, sqlx::Error> {
        debug!(page_size = page.page_size, offset = page.offset(), "Fetching user_status page");

        sqlx::query_as::<_, UserStatus>(GET_ALL_USER_STATUS)
            .bind(page.page_size)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
    }

    async fn list_all_with_manager(
        &self,
        status: &str,
        environment: &str,
        page: PageRequest,
    ) -> Result<Vec<UserStatusWithManager>, sqlx::Error> {
        debug!(
            status,
            environment,
            page_size = page.page_size,
            offset = page.offset(),
            "Fetching user_status page with manager"
        );

        sqlx::query_as::<_, UserStatusWithManager>(GET_ALL_USER_STATUS_WITH_MANAGER)
            .bind(status)
            .bind(environment)
            .bind(page.page_size)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
    }

    async fn get_by_domain_id(&self, domain_rhonda_id: &str) -> Result<Option<UserStatus>, sqlx::Error> {
        sqlx::query_as::<_, UserStatus>(GET_USER_STATUS_BY_DOMAIN_RHONDA_ID)
            .bind(domain_rhonda_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn create(&self, record: &NewUserStatus) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(INSERT_USER_STATUS)
            .bind(&record.domain_rhonda_id)
            .bind(record.status.as_ref())
            .bind(record.employee_environment.as_ref())
            .bind(record.department.as_deref())
            .bind(record.work_type.as_ref())
            .bind(record.manager_id.as_deref())
            .bind(record.work_location.as_ref().map(AsRef::<str>::as_ref))
            .bind(record.gender.as_ref().map(AsRef::<str>::as_ref))
            .bind(record.birth_date)
            .bind(record.start_date)
            .bind(record.end_date)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update(
        &self,
        changes: &UserStatusChanges,
        domain_rhonda_id: &str,
    ) -> Result<Option<UserStatus>, sqlx::Error> {
        let mut query = build_update_sql(
            "user_status",
            SqlUpdate::from(changes),
            "domain_rhonda_id",
            domain_rhonda_id,
        );
        debug!(sql = %query.sql(), domain_rhonda_id, "Updating user_status");

        query
            .build_query_as::<UserStatus>()
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete(&self, domain_rhonda_id: &str) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(DELETE_USER_STATUS)
            .bind(domain_rhonda_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(COUNT_USER_STATUS_ROWS)
            .fetch_one(&self.pool)
            .await
    }
}
