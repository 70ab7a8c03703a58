use postgres::Client;

const CREATE_TABLES: &str = "
    CREATE TABLE IF NOT EXISTS Users (
        Id SERIAL PRIMARY KEY,
        Name TEXT NOT NULL,
        Email TEXT NOT NULL,
        Picture BYTEA
    );
    CREATE TABLE IF NOT EXISTS VisitedLocations (
        Id SERIAL PRIMARY KEY,
        UserId INTEGER NOT NULL,
        LocationId INTEGER NOT NULL,
        Points INTEGER NOT NULL DEFAULT 0
    );
    CREATE INDEX IF NOT EXISTS VisitedLocations_UserId ON VisitedLocations (UserId, Id);
    CREATE INDEX IF NOT EXISTS VisitedLocations_LocationId ON VisitedLocations (LocationId, Id);
";

const DROP_TABLES: &str = "
    DROP TABLE IF EXISTS VisitedLocations;
    DROP TABLE IF EXISTS Users;
";

pub fn create_db(db: &mut Client) -> Result<(), postgres::Error> {
    db.batch_execute(CREATE_TABLES)
}

pub fn empty_db(db: &mut Client) -> Result<(), postgres::Error> {
    db.batch_execute(DROP_TABLES)
}
