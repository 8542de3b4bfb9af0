pub mod db_utils;
pub mod field_validation;
pub mod pagination;
