//! Storage ports for visits and users.
//!
//! Handlers and the photo flow only ever see these traits; `PgStore` backs
//! them with Postgres through the r2d2 pool and `MemoryStore` keeps everything
//! in a mutex-guarded map for tests and `--memory` runs.
//!
//! Every listing is ordered by `id` ascending. Ids come from a monotonic
//! sequence, so that order is insertion order and "first"/"last" are well
//! defined.

use crate::models::{NewVisit, User, VisitChanges, VisitedLocation};

pub mod memory;
pub mod postgres;

pub use self::memory::MemoryStore;
pub use self::postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to get connection from pool: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("database error: {0}")]
    Database(#[from] ::postgres::Error),
    #[error("in-memory store lock poisoned")]
    Poisoned,
}

pub trait VisitStore: Send + Sync {
    fn list_all(&self) -> Result<Vec<VisitedLocation>, StoreError>;

    fn find(&self, id: i32) -> Result<Option<VisitedLocation>, StoreError>;

    fn list_by_user(&self, user_id: i32) -> Result<Vec<VisitedLocation>, StoreError>;

    /// The user's first `limit` visits, oldest first.
    fn head_for_user(&self, user_id: i32, limit: i64) -> Result<Vec<VisitedLocation>, StoreError>;

    /// The user's last `limit` visits, still oldest first.
    fn tail_for_user(&self, user_id: i32, limit: i64) -> Result<Vec<VisitedLocation>, StoreError>;

    fn list_by_location(&self, location_id: i32) -> Result<Vec<VisitedLocation>, StoreError>;

    fn insert(&self, visit: &NewVisit) -> Result<VisitedLocation, StoreError>;

    /// Applies all present fields of `changes` at once. Returns the row as it
    /// is afterwards, or `None` when no row has that id.
    fn update(
        &self,
        id: i32,
        changes: &VisitChanges,
    ) -> Result<Option<VisitedLocation>, StoreError>;

    fn delete_all(&self) -> Result<u64, StoreError>;

    fn delete(&self, id: i32) -> Result<u64, StoreError>;
}

pub trait UserStore: Send + Sync {
    fn get_user(&self, id: i32) -> Result<Option<User>, StoreError>;

    fn update_user(&self, user: &User) -> Result<u64, StoreError>;

    fn insert_user(&self, name: &str, email: &str) -> Result<User, StoreError>;
}
