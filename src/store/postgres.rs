use postgres::types::ToSql;
use postgres::Row;

use crate::models::{NewVisit, User, VisitChanges, VisitedLocation};
use crate::store::{StoreError, UserStore, VisitStore};
use crate::PgPool;

const VISIT_COLUMNS: &str = "Id, UserId, LocationId, Points";
const USER_COLUMNS: &str = "Id, Name, Email, Picture";

/// Postgres-backed store. Each call checks a connection out of the pool and
/// hands it back when the call returns.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> PgStore {
        PgStore { pool }
    }

    fn query_visits(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<VisitedLocation>, StoreError> {
        let mut db = self.pool.get()?;
        let rows = db.query(sql, params)?;
        rows.iter().map(visit_from_row).collect()
    }

    fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> Result<u64, StoreError> {
        let mut db = self.pool.get()?;
        Ok(db.execute(sql, params)?)
    }
}

fn visit_from_row(row: &Row) -> Result<VisitedLocation, StoreError> {
    Ok(VisitedLocation {
        id: row.try_get(0)?,
        user_id: row.try_get(1)?,
        location_id: row.try_get(2)?,
        points: row.try_get(3)?,
    })
}

fn user_from_row(row: &Row) -> Result<User, StoreError> {
    Ok(User {
        id: row.try_get(0)?,
        name: row.try_get(1)?,
        email: row.try_get(2)?,
        picture: row.try_get(3)?,
    })
}

impl VisitStore for PgStore {
    fn list_all(&self) -> Result<Vec<VisitedLocation>, StoreError> {
        let sql = format!("SELECT {} FROM VisitedLocations ORDER BY Id", VISIT_COLUMNS);
        self.query_visits(&sql, &[])
    }

    fn find(&self, id: i32) -> Result<Option<VisitedLocation>, StoreError> {
        let sql = format!("SELECT {} FROM VisitedLocations WHERE Id = $1", VISIT_COLUMNS);
        Ok(self.query_visits(&sql, &[&id])?.into_iter().next())
    }

    fn list_by_user(&self, user_id: i32) -> Result<Vec<VisitedLocation>, StoreError> {
        let sql = format!(
            "SELECT {} FROM VisitedLocations WHERE UserId = $1 ORDER BY Id",
            VISIT_COLUMNS
        );
        self.query_visits(&sql, &[&user_id])
    }

    fn head_for_user(&self, user_id: i32, limit: i64) -> Result<Vec<VisitedLocation>, StoreError> {
        let sql = format!(
            "SELECT {} FROM VisitedLocations WHERE UserId = $1 ORDER BY Id ASC LIMIT $2",
            VISIT_COLUMNS
        );
        self.query_visits(&sql, &[&user_id, &limit])
    }

    fn tail_for_user(&self, user_id: i32, limit: i64) -> Result<Vec<VisitedLocation>, StoreError> {
        let sql = format!(
            "SELECT {cols} FROM (
                SELECT {cols} FROM VisitedLocations WHERE UserId = $1 ORDER BY Id DESC LIMIT $2
             ) AS tail
             ORDER BY Id ASC",
            cols = VISIT_COLUMNS
        );
        self.query_visits(&sql, &[&user_id, &limit])
    }

    fn list_by_location(&self, location_id: i32) -> Result<Vec<VisitedLocation>, StoreError> {
        let sql = format!(
            "SELECT {} FROM VisitedLocations WHERE LocationId = $1 ORDER BY Id",
            VISIT_COLUMNS
        );
        self.query_visits(&sql, &[&location_id])
    }

    fn insert(&self, visit: &NewVisit) -> Result<VisitedLocation, StoreError> {
        let mut db = self.pool.get()?;
        let sql = format!(
            "INSERT INTO VisitedLocations (UserId, LocationId, Points) VALUES ($1, $2, $3) RETURNING {}",
            VISIT_COLUMNS
        );
        let row = db.query_one(
            sql.as_str(),
            &[&visit.user_id, &visit.location_id, &visit.points],
        )?;
        visit_from_row(&row)
    }

    fn update(
        &self,
        id: i32,
        changes: &VisitChanges,
    ) -> Result<Option<VisitedLocation>, StoreError> {
        // One statement, so a visit is never left half-updated.
        let sql = format!(
            "UPDATE VisitedLocations SET
                LocationId = COALESCE($2, LocationId),
                UserId = COALESCE($3, UserId),
                Points = COALESCE($4, Points)
             WHERE Id = $1
             RETURNING {}",
            VISIT_COLUMNS
        );
        let updated = self.query_visits(
            &sql,
            &[&id, &changes.location_id, &changes.user_id, &changes.points],
        )?;
        Ok(updated.into_iter().next())
    }

    fn delete_all(&self) -> Result<u64, StoreError> {
        self.execute("DELETE FROM VisitedLocations", &[])
    }

    fn delete(&self, id: i32) -> Result<u64, StoreError> {
        self.execute("DELETE FROM VisitedLocations WHERE Id = $1", &[&id])
    }
}

impl UserStore for PgStore {
    fn get_user(&self, id: i32) -> Result<Option<User>, StoreError> {
        let mut db = self.pool.get()?;
        let sql = format!("SELECT {} FROM Users WHERE Id = $1", USER_COLUMNS);
        match db.query_opt(sql.as_str(), &[&id])? {
            Some(row) => Ok(Some(user_from_row(&row)?)),
            None => Ok(None),
        }
    }

    fn update_user(&self, user: &User) -> Result<u64, StoreError> {
        self.execute(
            "UPDATE Users SET Name = $2, Email = $3, Picture = $4 WHERE Id = $1",
            &[&user.id, &user.name, &user.email, &user.picture],
        )
    }

    fn insert_user(&self, name: &str, email: &str) -> Result<User, StoreError> {
        let mut db = self.pool.get()?;
        let sql = format!(
            "INSERT INTO Users (Name, Email) VALUES ($1, $2) RETURNING {}",
            USER_COLUMNS
        );
        let row = db.query_one(sql.as_str(), &[&name, &email])?;
        user_from_row(&row)
    }
}
