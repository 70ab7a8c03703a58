use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::models::{NewVisit, User, VisitChanges, VisitedLocation};
use crate::store::{StoreError, UserStore, VisitStore};

#[derive(Default)]
struct Tables {
    last_visit_id: i32,
    last_user_id: i32,
    visits: BTreeMap<i32, VisitedLocation>,
    users: BTreeMap<i32, User>,
}

/// In-process store with the same ordering guarantees as Postgres: ids are
/// handed out from a counter that never goes backwards, even after deletes.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables.lock().map_err(|_| StoreError::Poisoned)
    }

    fn select<P>(&self, predicate: P) -> Result<Vec<VisitedLocation>, StoreError>
    where
        P: Fn(&VisitedLocation) -> bool,
    {
        let tables = self.lock()?;
        Ok(tables
            .visits
            .values()
            .filter(|visit| predicate(*visit))
            .cloned()
            .collect())
    }
}

fn clamp_limit(limit: i64) -> usize {
    usize::try_from(limit).unwrap_or(0)
}

impl VisitStore for MemoryStore {
    fn list_all(&self) -> Result<Vec<VisitedLocation>, StoreError> {
        self.select(|_| true)
    }

    fn find(&self, id: i32) -> Result<Option<VisitedLocation>, StoreError> {
        Ok(self.lock()?.visits.get(&id).cloned())
    }

    fn list_by_user(&self, user_id: i32) -> Result<Vec<VisitedLocation>, StoreError> {
        self.select(|visit| visit.user_id == user_id)
    }

    fn head_for_user(&self, user_id: i32, limit: i64) -> Result<Vec<VisitedLocation>, StoreError> {
        let mut visits = self.list_by_user(user_id)?;
        visits.truncate(clamp_limit(limit));
        Ok(visits)
    }

    fn tail_for_user(&self, user_id: i32, limit: i64) -> Result<Vec<VisitedLocation>, StoreError> {
        let mut visits = self.list_by_user(user_id)?;
        let skip = visits.len().saturating_sub(clamp_limit(limit));
        Ok(visits.split_off(skip))
    }

    fn list_by_location(&self, location_id: i32) -> Result<Vec<VisitedLocation>, StoreError> {
        self.select(|visit| visit.location_id == location_id)
    }

    fn insert(&self, visit: &NewVisit) -> Result<VisitedLocation, StoreError> {
        let mut tables = self.lock()?;
        tables.last_visit_id += 1;
        let stored = VisitedLocation {
            id: tables.last_visit_id,
            user_id: visit.user_id,
            location_id: visit.location_id,
            points: visit.points,
        };
        tables.visits.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn update(
        &self,
        id: i32,
        changes: &VisitChanges,
    ) -> Result<Option<VisitedLocation>, StoreError> {
        let mut tables = self.lock()?;
        Ok(tables.visits.get_mut(&id).map(|visit| {
            changes.apply(visit);
            visit.clone()
        }))
    }

    fn delete_all(&self) -> Result<u64, StoreError> {
        let mut tables = self.lock()?;
        let removed = tables.visits.len() as u64;
        tables.visits.clear();
        Ok(removed)
    }

    fn delete(&self, id: i32) -> Result<u64, StoreError> {
        let mut tables = self.lock()?;
        Ok(tables.visits.remove(&id).map_or(0, |_| 1))
    }
}

impl UserStore for MemoryStore {
    fn get_user(&self, id: i32) -> Result<Option<User>, StoreError> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    fn update_user(&self, user: &User) -> Result<u64, StoreError> {
        let mut tables = self.lock()?;
        match tables.users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn insert_user(&self, name: &str, email: &str) -> Result<User, StoreError> {
        let mut tables = self.lock()?;
        tables.last_user_id += 1;
        let user = User {
            id: tables.last_user_id,
            name: name.to_string(),
            email: email.to_string(),
            picture: None,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }
}
