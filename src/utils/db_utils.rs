use chrono::NaiveDate;
use sqlx::{Postgres, QueryBuilder};

use crate::model::user_status::UserStatusChanges;

/// ===============================
/// SQL bindable value enum
/// ===============================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Text(Option<String>),
    Date(Option<NaiveDate>),
}

/// ===============================
/// SQL update container
/// ===============================
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SqlUpdate {
    /// Column name and new value, in column order.
    pub assignments: Vec<(&'static str, SqlValue)>,
}

impl SqlUpdate {
    fn set(&mut self, column: &'static str, value: SqlValue) {
        self.assignments.push((column, value));
    }

    fn set_text<T: AsRef<str>>(&mut self, column: &'static str, value: Option<Option<T>>) {
        if let Some(value) = value {
            self.set(column, SqlValue::Text(value.map(|v| v.as_ref().to_string())));
        }
    }

    fn set_date(&mut self, column: &'static str, value: Option<Option<NaiveDate>>) {
        if let Some(value) = value {
            self.set(column, SqlValue::Date(value));
        }
    }
}

impl From<&UserStatusChanges> for SqlUpdate {
    fn from(changes: &UserStatusChanges) -> Self {
        let mut update = SqlUpdate::default();
        update.set_text("status", changes.status.map(Some));
        update.set_text("employee_environment", changes.employee_environment.map(Some));
        update.set_text("department", changes.department.clone());
        update.set_text("work_type", changes.work_type.map(Some));
        update.set_text("manager_id", changes.manager_id.clone());
        update.set_text("work_location", changes.work_location);
        update.set_text("gender", changes.gender);
        update.set_date("birth_date", changes.birth_date);
        update.set_date("start_date", changes.start_date);
        update.set_date("end_date", changes.end_date);
        update
    }
}

/// ===============================
/// Build dynamic UPDATE SQL
/// ===============================
///
/// Only whitelisted column names from [`SqlUpdate`] reach the statement text;
/// every value is bound. `updated_at` is always bumped, so an empty update still
/// touches the row and reports whether it exists.
pub fn build_update_sql(
    table: &str,
    update: SqlUpdate,
    id_column: &str,
    id_value: &str,
) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!("UPDATE {table} SET updated_at = NOW()"));

    for (column, value) in update.assignments {
        query.push(", ").push(column).push(" = ");
        match value {
            SqlValue::Text(v) => query.push_bind(v),
            SqlValue::Date(v) => query.push_bind(v),
        };
    }

    query
        .push(" WHERE ")
        .push(id_column)
        .push(" = ")
        .push_bind(id_value.to_string())
        .push(" RETURNING *");

    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::user_status::{Status, WorkLocation};
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_changes_only_touch_updated_at() {
        let update = SqlUpdate::from(&UserStatusChanges::default());
        let query = build_update_sql("user_status", update, "domain_rhonda_id", "abc123");

        assert_eq!(
            query.sql(),
            "UPDATE user_status SET updated_at = NOW() WHERE domain_rhonda_id = $1 RETURNING *"
        );
    }

    #[test]
    fn present_fields_become_assignments() {
        let changes = UserStatusChanges {
            status: Some(Status::Terminated),
            department: Some(None),
            work_location: Some(Some(WorkLocation::Eu)),
            end_date: Some(NaiveDate::from_ymd_opt(2024, 2, 29)),
            ..Default::default()
        };

        let update = SqlUpdate::from(&changes);
        assert_eq!(
            update.assignments,
            vec![
                ("status", SqlValue::Text(Some("Terminated".into()))),
                ("department", SqlValue::Text(None)),
                ("work_location", SqlValue::Text(Some("EU".into()))),
                ("end_date", SqlValue::Date(NaiveDate::from_ymd_opt(2024, 2, 29))),
            ]
        );

        let query = build_update_sql("user_status", update, "domain_rhonda_id", "abc123");
        assert_eq!(
            query.sql(),
            "UPDATE user_status SET updated_at = NOW(), status = $1, department = $2, \
             work_location = $3, end_date = $4 WHERE domain_rhonda_id = $5 RETURNING *"
        );
    }
}
