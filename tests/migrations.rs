#[cfg(test)]
mod tests {
    use hikelog::db::db::Db;
    use hikelog::db::migrations::{get_db_version, needs_migration, MigrationManager};
    use hikelog::libs::observation::Observation;
    use rusqlite::Connection;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct MigrationTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestContext for MigrationTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("hikelog.db");
            MigrationTestContext { _temp_dir: temp_dir, db_path }
        }
    }

    /// A journal written before schema versioning: no cascade rule, day-first dates.
    fn write_legacy_journal(path: &Path) {
        let conn = Connection::open(path).unwrap();
        conn.execute_batch(
            "CREATE TABLE hikes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT, location TEXT, date TEXT, parking_available TEXT, length REAL,
                difficulty TEXT, description TEXT, estimated_duration TEXT, max_group_size INTEGER
            );
            CREATE TABLE Observations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                hike_id INTEGER,
                observation TEXT,
                time TEXT,
                comment TEXT
            );
            INSERT INTO hikes (id, name, location, date, length, difficulty)
                VALUES (1, 'Old Ridge', 'Peak District', '15/01/2024', 7.0, 'Hard');
            INSERT INTO hikes (id, name, location, date, length, difficulty)
                VALUES (2, 'Winter Loop', 'Dartmoor', '01/12/2024', 5.0, 'Easy');
            INSERT INTO Observations (hike_id, observation, time, comment) VALUES (1, 'Frost', '15/01/2024 09:30', NULL);
            INSERT INTO Observations (hike_id, observation, time, comment) VALUES (1, 'Ravens', '2024-01-15 11:00', 'pair');
            INSERT INTO Observations (hike_id, observation, time, comment) VALUES (99, 'Orphan', '02/02/2023 10:00', NULL);",
        )
        .unwrap();
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_fresh_database_is_current(ctx: &mut MigrationTestContext) {
        let db = Db::open(&ctx.db_path).unwrap();
        let conn = db.conn().unwrap();

        assert_eq!(get_db_version(conn).unwrap(), MigrationManager::new().latest_version());
        assert_eq!(get_db_version(conn).unwrap(), 3);
        assert!(!needs_migration(conn).unwrap());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_untouched_file_needs_migration(ctx: &mut MigrationTestContext) {
        let conn = Db::open_without_migrations(&ctx.db_path).unwrap();
        assert_eq!(get_db_version(&conn).unwrap(), 0);
        assert!(needs_migration(&conn).unwrap());
        assert!(MigrationManager::new().get_migration_history(&conn).unwrap().is_empty());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_idempotency(ctx: &mut MigrationTestContext) {
        let mut conn = Db::open_without_migrations(&ctx.db_path).unwrap();
        let manager = MigrationManager::new();

        manager.run_migrations(&mut conn).unwrap();
        let version_after_first = get_db_version(&conn).unwrap();
        manager.run_migrations(&mut conn).unwrap();

        assert_eq!(get_db_version(&conn).unwrap(), version_after_first);
        assert_eq!(manager.get_migration_history(&conn).unwrap().len(), 3);
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_history(ctx: &mut MigrationTestContext) {
        let db = Db::open(&ctx.db_path).unwrap();
        let manager = MigrationManager::new();
        let history = manager.get_migration_history(db.conn().unwrap()).unwrap();

        let names: Vec<_> = history.iter().map(|(version, name, _)| (*version, name.as_str())).collect();
        assert_eq!(
            names,
            vec![(1, "create_hikes_and_observations"), (2, "observations_cascade"), (3, "canonical_timestamps")]
        );
        assert!(manager.is_migration_applied(db.conn().unwrap(), 2).unwrap());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_legacy_journal_is_upgraded(ctx: &mut MigrationTestContext) {
        write_legacy_journal(&ctx.db_path);

        let mut db = Db::open(&ctx.db_path).unwrap();

        let cascade: i64 = db
            .conn()
            .unwrap()
            .query_row(
                "SELECT COUNT(*) FROM pragma_foreign_key_list('observations') WHERE on_delete = 'CASCADE'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(cascade, 1);

        let orphans: i64 = db
            .conn()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM observations WHERE hike_id = 99", [], |row| row.get(0))
            .unwrap();
        assert_eq!(orphans, 0);

        let old_ridge = db.hikes().unwrap().get(1).unwrap();
        assert_eq!(old_ridge.date, "2024-01-15");

        let observations = db.observations().unwrap().fetch_for_hike(1).unwrap();
        let times: Vec<_> = observations.iter().map(|o| o.time.as_str()).collect();
        assert_eq!(times, vec!["2024-01-15 11:00", "2024-01-15 09:30"]);

        // Calendar order now that dates are canonical.
        let names: Vec<_> = db.hikes().unwrap().list().unwrap().into_iter().map(|h| h.name).collect();
        assert_eq!(names, vec!["Winter Loop", "Old Ridge"]);

        db.hikes().unwrap().delete(1).unwrap();
        assert!(db.observations().unwrap().fetch_for_hike(1).unwrap().is_empty());
    }

    fn table_exists(conn: &Connection, name: &str) -> bool {
        conn.query_row("SELECT COUNT(*) FROM sqlite_master WHERE name = ?1", [name], |row| row.get::<_, i64>(0))
            .unwrap()
            > 0
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_pending_migrations(ctx: &mut MigrationTestContext) {
        let manager = MigrationManager::new();
        {
            let conn = Db::open_without_migrations(&ctx.db_path).unwrap();
            let pending = manager.pending_migrations(&conn).unwrap();
            let versions: Vec<_> = pending.iter().map(|(version, _)| *version).collect();
            assert_eq!(versions, vec![1, 2, 3]);
        }

        let db = Db::open(&ctx.db_path).unwrap();
        assert!(manager.pending_migrations(db.conn().unwrap()).unwrap().is_empty());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_failed_migration_leaves_file_untouched(ctx: &mut MigrationTestContext) {
        {
            let conn = Connection::open(&ctx.db_path).unwrap();
            conn.execute_batch(
                "CREATE TABLE hikes (id INTEGER PRIMARY KEY, name TEXT, location TEXT, date TEXT, length REAL);
                CREATE TABLE observations (id INTEGER PRIMARY KEY, hike_id INTEGER, observation TEXT, time TEXT);
                INSERT INTO hikes (id, name, date, length) VALUES (1, 'Broken', '03/04/2022', 2.0);
                INSERT INTO observations (hike_id, observation, time) VALUES (1, 'Curlew', '03/04/2022 10:00');",
            )
            .unwrap();
        }

        // The copy step needs a comment column that this file never had.
        assert!(Db::open(&ctx.db_path).is_err());

        let conn = Db::open_without_migrations(&ctx.db_path).unwrap();
        assert_eq!(get_db_version(&conn).unwrap(), 0);
        assert!(!table_exists(&conn, "migrations"));
        assert!(!table_exists(&conn, "observations_new"));
        assert!(!table_exists(&conn, "idx_hikes_date"));

        let (count, time): (i64, String) = conn
            .query_row("SELECT COUNT(*), MAX(time) FROM observations", [], |row| Ok((row.get(0)?, row.get(1)?)))
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(time, "03/04/2022 10:00");
        let date: String = conn.query_row("SELECT date FROM hikes WHERE id = 1", [], |row| row.get(0)).unwrap();
        assert_eq!(date, "03/04/2022");
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_observation_without_hike_is_removed(ctx: &mut MigrationTestContext) {
        write_legacy_journal(&ctx.db_path);
        {
            let conn = Connection::open(&ctx.db_path).unwrap();
            conn.execute("INSERT INTO Observations (hike_id, observation, time) VALUES (NULL, 'Stray', '2024-01-15 12:00')", [])
                .unwrap();
        }

        let db = Db::open(&ctx.db_path).unwrap();
        let (total, stray): (i64, i64) = db
            .conn()
            .unwrap()
            .query_row(
                "SELECT COUNT(*), SUM(observation = 'Stray') FROM observations",
                [],
                |row| Ok((row.get(0)?, row.get::<_, Option<i64>>(1)?.unwrap_or(0))),
            )
            .unwrap();
        assert_eq!(total, 2);
        assert_eq!(stray, 0);
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_orphan_ids_are_not_reused(ctx: &mut MigrationTestContext) {
        // Ids 1 and 2 belong to hike 1; id 3 is the orphan removed on upgrade.
        write_legacy_journal(&ctx.db_path);

        let db = Db::open(&ctx.db_path).unwrap();
        let max_id: i64 = db.conn().unwrap().query_row("SELECT MAX(id) FROM observations", [], |row| row.get(0)).unwrap();
        assert_eq!(max_id, 2);

        let time = chrono::NaiveDate::from_ymd_opt(2024, 1, 16).unwrap().and_hms_opt(8, 0, 0).unwrap();
        let id = db.observations().unwrap().insert(&Observation::new(1, "Snow bunting", time, None)).unwrap();
        assert_eq!(id, 4);
    }
}
