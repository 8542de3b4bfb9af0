use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use strum::VariantNames;

use crate::model::user_status::{
    DATE_FORMAT, EmployeeEnvironment, Gender, NULL_LITERAL, NewUserStatus, Status,
    UserStatusChanges, WorkLocation, WorkType,
};

/// ===============================
/// Rule table
/// ===============================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    /// A `YYYY-MM-DD` string.
    Date,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub non_empty: bool,
    pub nullable: bool,
    pub allowed: Option<&'static [&'static str]>,
    /// The literal `"NULL"` is accepted and stored as an absent value.
    pub accepts_null_literal: bool,
}

impl FieldRule {
    const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            non_empty: false,
            nullable: false,
            allowed: None,
            accepts_null_literal: false,
        }
    }

    pub const fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub const fn date(name: &'static str) -> Self {
        Self::new(name, FieldKind::Date).nullable()
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub const fn allowed(mut self, values: &'static [&'static str]) -> Self {
        self.allowed = Some(values);
        self
    }

    pub const fn null_literal(mut self) -> Self {
        self.accepts_null_literal = true;
        self
    }
}

const DOMAIN_RHONDA_ID: FieldRule = FieldRule::string("domain_rhonda_id").non_empty();
const STATUS: FieldRule = FieldRule::string("status").non_empty().allowed(Status::VARIANTS);
const EMPLOYEE_ENVIRONMENT: FieldRule = FieldRule::string("employee_environment")
    .non_empty()
    .allowed(EmployeeEnvironment::VARIANTS);
const DEPARTMENT: FieldRule = FieldRule::string("department").nullable();
const WORK_TYPE: FieldRule = FieldRule::string("work_type").non_empty().allowed(WorkType::VARIANTS);
const MANAGER_ID: FieldRule = FieldRule::string("manager_id").nullable();
const WORK_LOCATION: FieldRule = FieldRule::string("work_location")
    .nullable()
    .allowed(WorkLocation::VARIANTS)
    .null_literal();
const GENDER: FieldRule = FieldRule::string("gender")
    .nullable()
    .allowed(Gender::VARIANTS)
    .null_literal();
const BIRTH_DATE: FieldRule = FieldRule::date("birth_date");
const START_DATE: FieldRule = FieldRule::date("start_date");
const END_DATE: FieldRule = FieldRule::date("end_date");

/// POST: the identifier and the three classifying enums are mandatory.
pub static CREATE_SCHEMA: &[FieldRule] = &[
    DOMAIN_RHONDA_ID.required(),
    STATUS.required(),
    EMPLOYEE_ENVIRONMENT.required(),
    DEPARTMENT,
    WORK_TYPE.required(),
    MANAGER_ID,
    WORK_LOCATION,
    GENDER,
    BIRTH_DATE,
    START_DATE,
    END_DATE,
];

/// PUT: same constraints, nothing required. `domain_rhonda_id` is immutable and
/// therefore an unknown field here.
pub static UPDATE_SCHEMA: &[FieldRule] = &[
    STATUS,
    EMPLOYEE_ENVIRONMENT,
    DEPARTMENT,
    WORK_TYPE,
    MANAGER_ID,
    WORK_LOCATION,
    GENDER,
    BIRTH_DATE,
    START_DATE,
    END_DATE,
];

/// ===============================
/// Errors
/// ===============================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// ===============================
/// Validated values
/// ===============================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Null,
    Text(String),
    Date(NaiveDate),
}

/// Fields that passed a schema, keyed by name. Absent fields are not present.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ValidatedFields(BTreeMap<&'static str, FieldValue>);

impl ValidatedFields {
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    fn text(&mut self, name: &'static str) -> Option<Option<String>> {
        match self.0.remove(name)? {
            FieldValue::Text(s) => Some(Some(s)),
            FieldValue::Null | FieldValue::Date(_) => Some(None),
        }
    }

    fn date(&mut self, name: &'static str) -> Option<Option<NaiveDate>> {
        match self.0.remove(name)? {
            FieldValue::Date(d) => Some(Some(d)),
            FieldValue::Null | FieldValue::Text(_) => Some(None),
        }
    }

    fn parsed<T: FromStr>(
        &mut self,
        name: &'static str,
    ) -> Result<Option<Option<T>>, ValidationErrors> {
        match self.text(name) {
            Some(Some(raw)) => raw
                .parse()
                .map(|v| Some(Some(v)))
                .map_err(|_| ValidationErrors::single(name, format!("unallowed value {raw}"))),
            Some(None) => Ok(Some(None)),
            None => Ok(None),
        }
    }
}

fn required<T>(value: Option<Option<T>>, name: &str) -> Result<T, ValidationErrors> {
    value
        .flatten()
        .ok_or_else(|| ValidationErrors::single(name, "required field"))
}

/// Checks `body` against `schema`. Either every field passes or nothing does.
pub fn validate(body: &Value, schema: &[FieldRule]) -> Result<ValidatedFields, ValidationErrors> {
    let Some(obj) = body.as_object() else {
        return Err(ValidationErrors::single("body", "must be of dict type"));
    };

    let mut errors = ValidationErrors::default();
    let mut fields = ValidatedFields::default();

    for key in obj.keys() {
        if !schema.iter().any(|rule| rule.name == key) {
            errors.add(key, "unknown field");
        }
    }

    for rule in schema {
        let Some(value) = obj.get(rule.name) else {
            if rule.required {
                errors.add(rule.name, "required field");
            }
            continue;
        };

        match check_field(rule, value) {
            Ok(field) => {
                fields.0.insert(rule.name, field);
            }
            Err(message) => errors.add(rule.name, message),
        }
    }

    if errors.is_empty() {
        Ok(fields)
    } else {
        Err(errors)
    }
}

fn check_field(rule: &FieldRule, value: &Value) -> Result<FieldValue, String> {
    let raw = match value {
        Value::Null if rule.nullable => return Ok(FieldValue::Null),
        Value::Null => return Err("null value not allowed".to_string()),
        Value::String(s) => s.as_str(),
        _ => {
            return Err(match rule.kind {
                FieldKind::String => "must be of string type".to_string(),
                FieldKind::Date => "must be of datetime type".to_string(),
            });
        }
    };

    if raw.is_empty() && rule.non_empty {
        return Err("empty values not allowed".to_string());
    }

    match rule.kind {
        FieldKind::Date => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(FieldValue::Date)
            .map_err(|_| "must be of datetime type".to_string()),
        FieldKind::String => {
            if rule.accepts_null_literal && raw == NULL_LITERAL {
                return Ok(FieldValue::Null);
            }
            match rule.allowed {
                Some(allowed) if !allowed.contains(&raw) => Err(format!("unallowed value {raw}")),
                _ => Ok(FieldValue::Text(raw.to_string())),
            }
        }
    }
}

/// ===============================
/// Typed payloads
/// ===============================
pub fn validate_create(body: &Value) -> Result<NewUserStatus, ValidationErrors> {
    let mut fields = validate(body, CREATE_SCHEMA)?;

    Ok(NewUserStatus {
        domain_rhonda_id: required(fields.text("domain_rhonda_id"), "domain_rhonda_id")?,
        status: required(fields.parsed("status")?, "status")?,
        employee_environment: required(fields.parsed("employee_environment")?, "employee_environment")?,
        department: fields.text("department").flatten(),
        work_type: required(fields.parsed("work_type")?, "work_type")?,
        manager_id: fields.text("manager_id").flatten(),
        work_location: fields.parsed("work_location")?.flatten(),
        gender: fields.parsed("gender")?.flatten(),
        birth_date: fields.date("birth_date").flatten(),
        start_date: fields.date("start_date").flatten(),
        end_date: fields.date("end_date").flatten(),
    })
}

pub fn validate_update(body: &Value) -> Result<UserStatusChanges, ValidationErrors> {
    let mut fields = validate(body, UPDATE_SCHEMA)?;

    // non-nullable columns never come back as Some(None) from the schema
    Ok(UserStatusChanges {
        status: fields.parsed("status")?.flatten(),
        employee_environment: fields.parsed("employee_environment")?.flatten(),
        department: fields.text("department"),
        work_type: fields.parsed("work_type")?.flatten(),
        manager_id: fields.text("manager_id"),
        work_location: fields.parsed("work_location")?,
        gender: fields.parsed("gender")?,
        birth_date: fields.date("birth_date"),
        start_date: fields.date("start_date"),
        end_date: fields.date("end_date"),
    })
}
