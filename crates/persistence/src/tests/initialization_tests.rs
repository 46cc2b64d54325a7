// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::SqlitePersistence;
use crate::error::PersistenceError;

#[test]
fn test_persistence_initialization() {
    let result: Result<SqlitePersistence, PersistenceError> = SqlitePersistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_key_enforcement_is_enabled() {
    let mut persistence: SqlitePersistence = SqlitePersistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: SqlitePersistence = SqlitePersistence::new_in_memory().unwrap();
    let mut db2: SqlitePersistence = SqlitePersistence::new_in_memory().unwrap();

    db1.create_user("alice", "secret").unwrap();

    assert!(db1.get_user_by_name("alice").unwrap().is_some());
    assert!(db2.get_user_by_name("alice").unwrap().is_none());
}

#[test]
fn test_migrations_create_every_table() {
    let mut persistence: SqlitePersistence = SqlitePersistence::new_in_memory().unwrap();

    let tables: Vec<String> = persistence.list_tables().unwrap();

    assert_eq!(
        tables,
        vec![
            "appointments",
            "contacts",
            "countries",
            "customers",
            "first_level_divisions",
            "sessions",
            "users",
        ]
    );
}

#[test]
fn test_appointment_columns_match_schema() {
    let mut persistence: SqlitePersistence = SqlitePersistence::new_in_memory().unwrap();

    let columns: Vec<String> = persistence.list_columns("appointments").unwrap();

    assert_eq!(
        columns,
        vec![
            "appointment_id",
            "title",
            "description",
            "location",
            "appointment_type",
            "start_utc",
            "end_utc",
            "customer_id",
            "user_id",
            "contact_id",
        ]
    );
}

#[test]
fn test_file_database_persists_across_reopen() {
    let path: std::path::PathBuf = std::env::temp_dir().join(format!(
        "client_schedule_reopen_{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence: SqlitePersistence = SqlitePersistence::new_with_file(&path).unwrap();
        persistence.create_user("carol", "pw").unwrap();
    }

    let mut reopened: SqlitePersistence = SqlitePersistence::new_with_file(&path).unwrap();
    assert!(reopened.get_user_by_name("carol").unwrap().is_some());

    drop(reopened);
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(path.with_extension("db-wal"));
    let _ = std::fs::remove_file(path.with_extension("db-shm"));
}
