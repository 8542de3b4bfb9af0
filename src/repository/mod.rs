pub mod user_status_repository;

#[cfg(test)]
pub mod mock;

pub use user_status_repository::{PostgresUserStatusRepository, UserStatusRepository};
