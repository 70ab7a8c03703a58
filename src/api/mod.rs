//! HTTP surface.
//!
//! ```text
//! GET    /API/VisitedLocations                 all visits
//! GET    /API/VisitedLocations/{id}
//! GET    /API/VisitedLocations/User/{userId}
//! GET    /API/VisitedLocations/Last/{userId}[/{n}]
//! GET    /API/VisitedLocations/First/{userId}[/{n}]
//! GET    /API/VisitedLocations/Location/{locationId}
//! POST   /API/VisitedLocations?userId=&locationId=[&points=]
//! PUT    /API/VisitedLocations/{id}[?locationId=&userId=&points=]
//! PUT    /API/VisitedLocations/{id}/Location?locationId=
//! PUT    /API/VisitedLocations/{id}/User?userId=
//! PUT    /API/VisitedLocations/{id}/Points?points=
//! DELETE /API/VisitedLocations[/{id}]
//! GET    /API/Users/{id}
//! PUT    /API/Users/{id}/Picture               raw image bytes as body
//! ```
//!
//! Record endpoints always answer with a JSON array, so "not found" is `[]`.

use std::sync::Arc;

use actix_web::web;

use crate::store::{MemoryStore, PgStore, StoreError, UserStore, VisitStore};
use crate::visits::VisitService;
use crate::PgPool;

mod error;
pub mod users;
pub mod visits;

pub use self::error::ApiError;

/// Everything a handler needs, shared across workers through `web::Data`.
pub struct AppState {
    pub visits: VisitService,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(visits: Arc<dyn VisitStore>, users: Arc<dyn UserStore>) -> AppState {
        AppState {
            visits: VisitService::new(visits),
            users,
        }
    }

    pub fn postgres(pool: PgPool) -> AppState {
        let store = Arc::new(PgStore::new(pool));
        AppState::new(store.clone(), store)
    }

    pub fn in_memory() -> AppState {
        let store = Arc::new(MemoryStore::new());
        AppState::new(store.clone(), store)
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    )
    .service(visits::scope())
    .service(users::scope());
}

/// Runs a store call on actix's blocking thread pool.
pub(crate) async fn blocking<F, T>(call: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    Ok(web::block(call).await??)
}
