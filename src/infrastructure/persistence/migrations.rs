use rusqlite::Connection;

/// Initialize the database schema, creating tables if they don't exist.
///
/// # Errors
/// Returns `rusqlite::Error` if any SQL statement fails.
pub fn initialize_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS reports (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            location_key  TEXT    NOT NULL,
            location      TEXT    NOT NULL,
            reported_at   TEXT    NOT NULL
        );

        CREATE TABLE IF NOT EXISTS report_symptoms (
            report_id   INTEGER NOT NULL REFERENCES reports(id) ON DELETE CASCADE,
            symptom     TEXT    NOT NULL,
            PRIMARY KEY (report_id, symptom)
        );

        CREATE TABLE IF NOT EXISTS alerts (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at  TEXT    NOT NULL,
            type        TEXT    NOT NULL,
            kind        TEXT    NOT NULL,
            severity    TEXT    NOT NULL,
            area        TEXT    NOT NULL,
            message     TEXT    NOT NULL,
            source      TEXT    NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_reports_reported_at ON reports(reported_at);
        CREATE INDEX IF NOT EXISTS idx_reports_location ON reports(location_key, reported_at);
        CREATE INDEX IF NOT EXISTS idx_alerts_created_at ON alerts(created_at);",
    )?;
    Ok(())
}
