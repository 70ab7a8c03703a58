//! Query service over visit records.
//!
//! Each operation maps one filter intent onto a single `VisitStore` call. Not
//! found is never an error here: lookups come back as `None` or an empty list.

use std::sync::Arc;

use crate::models::{NewVisit, VisitChanges, VisitedLocation};
use crate::store::{StoreError, VisitStore};

#[derive(Clone)]
pub struct VisitService {
    store: Arc<dyn VisitStore>,
}

impl VisitService {
    pub fn new(store: Arc<dyn VisitStore>) -> VisitService {
        VisitService { store }
    }

    pub fn list_all(&self) -> Result<Vec<VisitedLocation>, StoreError> {
        self.store.list_all()
    }

    pub fn get_by_id(&self, id: i32) -> Result<Option<VisitedLocation>, StoreError> {
        self.store.find(id)
    }

    pub fn list_by_user(&self, user_id: i32) -> Result<Vec<VisitedLocation>, StoreError> {
        self.store.list_by_user(user_id)
    }

    pub fn last_for_user(&self, user_id: i32) -> Result<Option<VisitedLocation>, StoreError> {
        Ok(self.store.tail_for_user(user_id, 1)?.pop())
    }

    /// The last `n` visits of `list_by_user`, in the same order. Asking for
    /// more than exist returns all of them; a negative `n` returns none.
    pub fn last_n_for_user(&self, user_id: i32, n: i64) -> Result<Vec<VisitedLocation>, StoreError> {
        self.store.tail_for_user(user_id, n.max(0))
    }

    pub fn first_for_user(&self, user_id: i32) -> Result<Option<VisitedLocation>, StoreError> {
        Ok(self.store.head_for_user(user_id, 1)?.into_iter().next())
    }

    pub fn first_n_for_user(&self, user_id: i32, n: i64) -> Result<Vec<VisitedLocation>, StoreError> {
        self.store.head_for_user(user_id, n.max(0))
    }

    pub fn list_by_location(&self, location_id: i32) -> Result<Vec<VisitedLocation>, StoreError> {
        self.store.list_by_location(location_id)
    }

    pub fn create(&self, visit: NewVisit) -> Result<VisitedLocation, StoreError> {
        let created = self.store.insert(&visit)?;
        debug!(
            "created visit {} (user {}, location {}, {} points)",
            created.id, created.user_id, created.location_id, created.points
        );
        Ok(created)
    }

    pub fn update(
        &self,
        id: i32,
        changes: VisitChanges,
    ) -> Result<Option<VisitedLocation>, StoreError> {
        if changes.is_empty() {
            return self.get_by_id(id);
        }
        self.store.update(id, &changes)
    }

    pub fn update_location(
        &self,
        id: i32,
        location_id: i32,
    ) -> Result<Option<VisitedLocation>, StoreError> {
        self.update(
            id,
            VisitChanges {
                location_id: Some(location_id),
                ..VisitChanges::default()
            },
        )
    }

    pub fn update_user(&self, id: i32, user_id: i32) -> Result<Option<VisitedLocation>, StoreError> {
        self.update(
            id,
            VisitChanges {
                user_id: Some(user_id),
                ..VisitChanges::default()
            },
        )
    }

    pub fn update_points(&self, id: i32, points: i32) -> Result<Option<VisitedLocation>, StoreError> {
        self.update(
            id,
            VisitChanges {
                points: Some(points),
                ..VisitChanges::default()
            },
        )
    }

    pub fn delete_all(&self) -> Result<(), StoreError> {
        let removed = self.store.delete_all()?;
        info!("deleted all {} visits", removed);
        Ok(())
    }

    /// Deletes the visit and then looks it up again. After a successful
    /// delete the lookup is always `None`.
    pub fn delete_by_id(&self, id: i32) -> Result<Option<VisitedLocation>, StoreError> {
        let removed = self.store.delete(id)?;
        debug!("deleted visit {} ({} rows)", id, removed);
        self.get_by_id(id)
    }
}
