use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use sqlx::FromRow;
use strum_macros::{AsRefStr, Display, EnumString, EnumVariantNames};
use utoipa::ToSchema;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Rendered in place of a missing date. Clients depend on it, so it is never `null`.
pub const SENTINEL_DATE: &str = "1900-01-01";
pub const SENTINEL_DATETIME: &str = "1900-01-01T00:00:00";

/// Input literal that stands for "no value" on `work_location` and `gender`.
pub const NULL_LITERAL: &str = "NULL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumString, EnumVariantNames)]
pub enum Status {
    Active,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumString, EnumVariantNames)]
pub enum EmployeeEnvironment {
    Internal,
    External,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumString, EnumVariantNames)]
pub enum WorkType {
    Permanent,
    Temporary,
    Contract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumString, EnumVariantNames)]
pub enum WorkLocation {
    Canada,
    #[strum(serialize = "USA")]
    Usa,
    #[strum(serialize = "EU")]
    Eu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumString, EnumVariantNames)]
pub enum Gender {
    Male,
    Female,
    Intersex,
}

/// One row of `user_status`.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[schema(example = json!({
    "user_status_id": 1,
    "domain_rhonda_id": "abc123",
    "status": "Active",
    "employee_environment": "Internal",
    "department": "Finance",
    "work_type": "Permanent",
    "manager_id": "mgr001",
    "work_location": "Canada",
    "gender": null,
    "birth_date": "1990-04-12",
    "start_date": "2021-06-01",
    "end_date": "1900-01-01",
    "created_at": "2021-06-01T09:30:00",
    "updated_at": "2021-06-01T09:30:00"
}))]
pub struct UserStatus {
    pub user_status_id: i64,
    pub domain_rhonda_id: String,
    pub status: String,
    pub employee_environment: String,
    pub department: Option<String>,
    pub work_type: String,
    pub manager_id: Option<String>,
    pub work_location: Option<String>,
    pub gender: Option<String>,
    #[serde(serialize_with = "date_or_sentinel")]
    #[schema(value_type = String, format = "date", example = "1990-04-12")]
    pub birth_date: Option<NaiveDate>,
    #[serde(serialize_with = "date_or_sentinel")]
    #[schema(value_type = String, format = "date", example = "2021-06-01")]
    pub start_date: Option<NaiveDate>,
    #[serde(serialize_with = "date_or_sentinel")]
    #[schema(value_type = String, format = "date", example = "1900-01-01")]
    pub end_date: Option<NaiveDate>,
    #[serde(serialize_with = "datetime_or_sentinel")]
    #[schema(value_type = String, example = "2021-06-01T09:30:00")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(serialize_with = "datetime_or_sentinel")]
    #[schema(value_type = String, example = "2021-06-01T09:30:00")]
    pub updated_at: Option<NaiveDateTime>,
}

/// HR listing row: the record joined with employee and manager display names.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct UserStatusWithManager {
    pub user_status_id: i64,
    pub domain_rhonda_id: String,
    #[schema(example = "Jane Doe")]
    pub employee: String,
    #[schema(example = "John Smith")]
    pub manager: String,
    pub status: String,
    pub employee_environment: String,
    pub department: Option<String>,
    pub work_type: String,
    pub work_location: Option<String>,
    pub gender: Option<String>,
    #[serde(serialize_with = "date_or_sentinel")]
    #[schema(value_type = String, format = "date")]
    pub birth_date: Option<NaiveDate>,
    #[serde(serialize_with = "date_or_sentinel")]
    #[schema(value_type = String, format = "date")]
    pub start_date: Option<NaiveDate>,
    #[serde(serialize_with = "date_or_sentinel")]
    #[schema(value_type = String, format = "date")]
    pub end_date: Option<NaiveDate>,
}

/// A validated create payload.
#[derive(Debug, Clone, PartialEq, ToSchema)]
#[schema(example = json!({
    "domain_rhonda_id": "abc123",
    "status": "Active",
    "employee_environment": "Internal",
    "work_type": "Permanent",
    "department": "Finance",
    "manager_id": "mgr001",
    "work_location": "Canada",
    "gender": "NULL",
    "birth_date": "1990-04-12",
    "start_date": "2021-06-01",
    "end_date": null
}))]
pub struct NewUserStatus {
    pub domain_rhonda_id: String,
    #[schema(value_type = String, example = "Active")]
    pub status: Status,
    #[schema(value_type = String, example = "Internal")]
    pub employee_environment: EmployeeEnvironment,
    pub department: Option<String>,
    #[schema(value_type = String, example = "Permanent")]
    pub work_type: WorkType,
    pub manager_id: Option<String>,
    #[schema(value_type = Option<String>, example = "Canada")]
    pub work_location: Option<WorkLocation>,
    #[schema(value_type = Option<String>, example = "NULL")]
    pub gender: Option<Gender>,
    #[schema(value_type = Option<String>, format = "date")]
    pub birth_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = "date")]
    pub start_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = "date")]
    pub end_date: Option<NaiveDate>,
}

/// A validated partial update.
///
/// The outer `Option` is "field present in the body", the inner one (for
/// nullable columns) is the value to store, `None` clearing the column.
#[derive(Debug, Clone, Default, PartialEq, ToSchema)]
#[schema(example = json!({
    "status": "Terminated",
    "end_date": "2024-02-29",
    "manager_id": null
}))]
pub struct UserStatusChanges {
    #[schema(value_type = Option<String>)]
    pub status: Option<Status>,
    #[schema(value_type = Option<String>)]
    pub employee_environment: Option<EmployeeEnvironment>,
    #[schema(value_type = Option<String>)]
    pub department: Option<Option<String>>,
    #[schema(value_type = Option<String>)]
    pub work_type: Option<WorkType>,
    #[schema(value_type = Option<String>)]
    pub manager_id: Option<Option<String>>,
    #[schema(value_type = Option<String>)]
    pub work_location: Option<Option<WorkLocation>>,
    #[schema(value_type = Option<String>)]
    pub gender: Option<Option<Gender>>,
    #[schema(value_type = Option<String>, format = "date")]
    pub birth_date: Option<Option<NaiveDate>>,
    #[schema(value_type = Option<String>, format = "date")]
    pub start_date: Option<Option<NaiveDate>>,
    #[schema(value_type = Option<String>, format = "date")]
    pub end_date: Option<Option<NaiveDate>>,
}

#[cfg(test)]
impl UserStatusChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn date_or_sentinel<S: Serializer>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(date) => serializer.collect_str(&date.format(DATE_FORMAT)),
        None => serializer.serialize_str(SENTINEL_DATE),
    }
}

fn datetime_or_sentinel<S: Serializer>(
    value: &Option<NaiveDateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(datetime) => serializer.collect_str(&datetime.format(DATETIME_FORMAT)),
        None => serializer.serialize_str(SENTINEL_DATETIME),
    }
}
