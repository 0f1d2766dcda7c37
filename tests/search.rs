#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use hikelog::db::db::Db;
    use hikelog::libs::error::HikeError;
    use hikelog::libs::hike::{Difficulty, Hike};
    use hikelog::libs::search::SearchCriteria;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct SearchTestContext {
        _temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for SearchTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let mut db = Db::open(temp_dir.path().join("hikelog.db")).unwrap();
            {
                let mut hikes = db.hikes().unwrap();
                for (name, location, day, length, difficulty) in [
                    ("Ridge Walk", "Brecon Beacons", 3, 6.0, Difficulty::Moderate),
                    ("Sharp RIDGE scramble", "Snowdonia", 10, 4.5, Difficulty::VeryHard),
                    ("Valley Stroll", "Snowdonia", 10, 2.0, Difficulty::Easy),
                    ("Summit 100%_club", "Peak District", 21, 9.0, Difficulty::Hard),
                ] {
                    let date = NaiveDate::from_ymd_opt(2024, 7, day).unwrap();
                    hikes.insert(&Hike::new(name, location, date, length, difficulty)).unwrap();
                }
            }
            SearchTestContext { _temp_dir: temp_dir, db }
        }
    }

    fn names(hikes: Vec<Hike>) -> Vec<String> {
        let mut names: Vec<String> = hikes.into_iter().map(|h| h.name).collect();
        names.sort();
        names
    }

    #[test_context(SearchTestContext)]
    #[test]
    fn test_name_search_is_case_insensitive(ctx: &mut SearchTestContext) {
        let found = ctx.db.hikes().unwrap().search_by_name("Ridge").unwrap();
        assert_eq!(names(found), vec!["Ridge Walk", "Sharp RIDGE scramble"]);
        assert!(ctx.db.hikes().unwrap().search_by_name("glacier").unwrap().is_empty());
    }

    #[test_context(SearchTestContext)]
    #[test]
    fn test_wildcards_match_literally(ctx: &mut SearchTestContext) {
        let found = ctx.db.hikes().unwrap().search_by_name("100%_").unwrap();
        assert_eq!(names(found), vec!["Summit 100%_club"]);
        assert!(ctx.db.hikes().unwrap().search_by_name("%").unwrap().len() == 1);
    }

    #[test_context(SearchTestContext)]
    #[test]
    fn test_advanced_search_combines_with_and(ctx: &mut SearchTestContext) {
        let criteria = SearchCriteria::new().location("snowdonia").min_length(3.0);
        let found = ctx.db.hikes().unwrap().advanced_search(&criteria).unwrap();
        assert_eq!(names(found), vec!["Sharp RIDGE scramble"]);

        let criteria = SearchCriteria::new().name("ridge").max_length(5.0);
        let found = ctx.db.hikes().unwrap().advanced_search(&criteria).unwrap();
        assert_eq!(names(found), vec!["Sharp RIDGE scramble"]);
    }

    #[test_context(SearchTestContext)]
    #[test]
    fn test_length_bounds_are_inclusive(ctx: &mut SearchTestContext) {
        let criteria = SearchCriteria::new().min_length(4.5).max_length(6.0);
        let found = ctx.db.hikes().unwrap().advanced_search(&criteria).unwrap();
        assert_eq!(names(found), vec!["Ridge Walk", "Sharp RIDGE scramble"]);
    }

    #[test_context(SearchTestContext)]
    #[test]
    fn test_exact_date(ctx: &mut SearchTestContext) {
        let criteria = SearchCriteria::new().date(NaiveDate::from_ymd_opt(2024, 7, 10).unwrap());
        let found = ctx.db.hikes().unwrap().advanced_search(&criteria).unwrap();
        assert_eq!(names(found), vec!["Sharp RIDGE scramble", "Valley Stroll"]);
    }

    #[test_context(SearchTestContext)]
    #[test]
    fn test_inverted_range_is_rejected(ctx: &mut SearchTestContext) {
        let criteria = SearchCriteria::new().min_length(5.0).max_length(2.0);
        let err = ctx.db.hikes().unwrap().advanced_search(&criteria).unwrap_err();
        assert!(matches!(err, HikeError::InvalidRange { min, max } if min == 5.0 && max == 2.0));
    }

    #[test_context(SearchTestContext)]
    #[test]
    fn test_empty_criteria_match_everything(ctx: &mut SearchTestContext) {
        let found = ctx.db.hikes().unwrap().advanced_search(&SearchCriteria::new()).unwrap();
        assert_eq!(found.len(), 4);

        let blank = SearchCriteria::new().name("   ").location("");
        assert_eq!(ctx.db.hikes().unwrap().advanced_search(&blank).unwrap().len(), 4);
    }
}
