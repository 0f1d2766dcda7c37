#[cfg(test)]
mod tests {
    use hikelog::libs::config::{Config, CONFIG_FILE_NAME, DEFAULT_USER_NAME};
    use hikelog::libs::data_storage::DataStorage;
    use hikelog::libs::search::HikeSort;
    use std::fs;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            ConfigTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_file_gives_defaults(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(ctx.temp_dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.user_name, DEFAULT_USER_NAME);
        assert_eq!(config.sort_order, HikeSort::DateDesc);
        assert!(config.database_path.is_none());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_back(ctx: &mut ConfigTestContext) {
        let path = ctx.temp_dir.path().join(CONFIG_FILE_NAME);
        let config = Config {
            user_name: "Alex".to_string(),
            sort_order: HikeSort::LengthDesc,
            database_path: Some(ctx.temp_dir.path().join("journal.db")),
        };
        config.save_to(&path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"sort_order\": \"length_desc\""));
        assert_eq!(Config::read_from(&path).unwrap(), config);
        assert_eq!(config.database_file().unwrap(), ctx.temp_dir.path().join("journal.db"));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_file_fills_defaults(ctx: &mut ConfigTestContext) {
        let path = ctx.temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{ "user_name": "Sam" }"#).unwrap();

        let config = Config::read_from(&path).unwrap();
        assert_eq!(config.user_name, "Sam");
        assert_eq!(config.sort_order, HikeSort::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_data_storage_creates_directory(ctx: &mut ConfigTestContext) {
        let base = ctx.temp_dir.path().join("nested");
        let path = DataStorage::with_base(&base).get_path("hikelog.db").unwrap();
        assert!(path.parent().unwrap().is_dir());
        assert!(path.ends_with("hikelog.db"));
    }
}
