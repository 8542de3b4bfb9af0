//! In-memory repository for handler tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};

use crate::model::user_status::{NewUserStatus, UserStatus, UserStatusChanges, UserStatusWithManager};
use crate::repository::UserStatusRepository;
use crate::utils::pagination::PageRequest;

#[derive(Clone, Default)]
pub struct MockUserStatusRepository {
    rows: Arc<Mutex<Vec<UserStatus>>>,
    /// domain_rhonda_id -> display name, standing in for the `user` table.
    names: Arc<Mutex<Vec<(String, String)>>>,
    failing: Arc<Mutex<bool>>,
}

impl MockUserStatusRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_name(&self, domain_rhonda_id: &str, name: &str) {
        self.names
            .lock()
            .unwrap()
            .push((domain_rhonda_id.to_string(), name.to_string()));
    }

    /// Every subsequent call fails as if the store were unreachable.
    pub fn fail_all(&self) {
        *self.failing.lock().unwrap() = true;
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if *self.failing.lock().unwrap() {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }

    fn name_of(&self, domain_rhonda_id: Option<&str>) -> String {
        domain_rhonda_id
            .and_then(|id| {
                self.names
                    .lock()
                    .unwrap()
                    .iter()
                    .find(|(key, _)| key == id)
                    .map(|(_, name)| name.clone())
            })
            .unwrap_or_default()
    }

    fn page<T: Clone>(rows: &[T], page: PageRequest) -> Vec<T> {
        rows.iter()
            .skip(page.offset() as usize)
            .take(page.page_size as usize)
            .cloned()
            .collect()
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// SQL `LIKE` with `%` and `_`.
fn like(pattern: &str, value: &str) -> bool {
    fn matches(p: &[char], v: &[char]) -> bool {
        match p.split_first() {
            None => v.is_empty(),
            Some(('%', rest)) => (0..=v.len()).any(|i| matches(rest, &v[i..])),
            Some(('_', rest)) => !v.is_empty() && matches(rest, &v[1..]),
            Some((c, rest)) => v.first() == Some(c) && matches(rest, &v[1..]),
        }
    }
    let p: Vec<char> = pattern.chars().collect();
    let v: Vec<char> = value.chars().collect();
    matches(&p, &v)
}

#[async_trait]
impl UserStatusRepository for MockUserStatusRepository {
    async fn list_all(&self, page: PageRequest) -> Result<Vec<UserStatus>, sqlx::Error> {
        self.check()?;
        Ok(Self::page(&self.rows.lock().unwrap(), page))
    }

    async fn list_all_with_manager(
        &self,
        status: &str,
        environment: &str,
        page: PageRequest,
    ) -> Result<Vec<UserStatusWithManager>, sqlx::Error> {
        self.check()?;
        let joined: Vec<UserStatusWithManager> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| like(status, &r.status) && like(environment, &r.employee_environment))
            .map(|r| UserStatusWithManager {
                user_status_id: r.user_status_id,
                domain_rhonda_id: r.domain_rhonda_id.clone(),
                employee: self.name_of(Some(&r.domain_rhonda_id)),
                manager: self.name_of(r.manager_id.as_deref()),
                status: r.status.clone(),
                employee_environment: r.employee_environment.clone(),
                department: r.department.clone(),
                work_type: r.work_type.clone(),
                work_location: r.work_location.clone(),
                gender: r.gender.clone(),
                birth_date: r.birth_date,
                start_date: r.start_date,
                end_date: r.end_date,
            })
            .collect();
        Ok(Self::page(&joined, page))
    }

    async fn get_by_domain_id(&self, domain_rhonda_id: &str) -> Result<Option<UserStatus>, sqlx::Error> {
        self.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.domain_rhonda_id == domain_rhonda_id)
            .cloned())
    }

    async fn create(&self, record: &NewUserStatus) -> Result<Option<String>, sqlx::Error> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|r| r.domain_rhonda_id == record.domain_rhonda_id) {
            return Ok(None);
        }
        let created = now();
        let user_status_id = rows.iter().map(|r| r.user_status_id).max().unwrap_or(0) + 1;
        rows.push(UserStatus {
            user_status_id,
            domain_rhonda_id: record.domain_rhonda_id.clone(),
            status: record.status.to_string(),
            employee_environment: record.employee_environment.to_string(),
            department: record.department.clone(),
            work_type: record.work_type.to_string(),
            manager_id: record.manager_id.clone(),
            work_location: record.work_location.map(|v| v.to_string()),
            gender: record.gender.map(|v| v.to_string()),
            birth_date: record.birth_date,
            start_date: record.start_date,
            end_date: record.end_date,
            created_at: Some(created),
            updated_at: Some(created),
        });
        Ok(Some(record.domain_rhonda_id.clone()))
    }

    async fn update(
        &self,
        changes: &UserStatusChanges,
        domain_rhonda_id: &str,
    ) -> Result<Option<UserStatus>, sqlx::Error> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|r| r.domain_rhonda_id == domain_rhonda_id) else {
            return Ok(None);
        };
        if let Some(v) = changes.status {
            row.status = v.to_string();
        }
        if let Some(v) = changes.employee_environment {
            row.employee_environment = v.to_string();
        }
        if let Some(v) = &changes.department {
            row.department = v.clone();
        }
        if let Some(v) = changes.work_type {
            row.work_type = v.to_string();
        }
        if let Some(v) = &changes.manager_id {
            row.manager_id = v.clone();
        }
        if let Some(v) = changes.work_location {
            row.work_location = v.map(|l| l.to_string());
        }
        if let Some(v) = changes.gender {
            row.gender = v.map(|g| g.to_string());
        }
        if let Some(v) = changes.birth_date {
            row.birth_date = v;
        }
        if let Some(v) = changes.start_date {
            row.start_date = v;
        }
        if let Some(v) = changes.end_date {
            row.end_date = v;
        }
        row.updated_at = Some(now());
        Ok(Some(row.clone()))
    }

    async fn delete(&self, domain_rhonda_id: &str) -> Result<Option<String>, sqlx::Error> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.domain_rhonda_id != domain_rhonda_id);
        Ok((rows.len() != before).then(|| domain_rhonda_id.to_string()))
    }

    async fn count(&self) -> Result<i64, sqlx::Error> {
        self.check()?;
        Ok(self.rows.lock().unwrap().len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::like;
    use rstest::rstest;

    #[rstest]
    #[case("%", "Active", true)]
    #[case("%", "", true)]
    #[case("Active", "Active", true)]
    #[case("Active", "Terminated", false)]
    #[case("Act%", "Active", true)]
    #[case("%nal", "Internal", true)]
    #[case("_ther", "Other", true)]
    #[case("_ther", "Others", false)]
    fn like_patterns(#[case] pattern: &str, #[case] value: &str, #[case] expected: bool) {
        assert_eq!(like(pattern, value), expected);
    }
}
