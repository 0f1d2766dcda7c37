#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use hikelog::libs::error::HikeError;
    use hikelog::libs::formatter::*;

    #[test]
    fn test_input_dates_accept_both_shapes() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(parse_input_date("09/03/2024").unwrap(), expected);
        assert_eq!(parse_input_date(" 2024-03-09 ").unwrap(), expected);
        assert!(matches!(parse_input_date("31/02/2024"), Err(HikeError::ValidationFailed(_))));
        assert!(matches!(parse_input_date("tomorrow"), Err(HikeError::ValidationFailed(_))));
    }

    #[test]
    fn test_stored_dates_round_trip_to_display() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        assert_eq!(to_storage_date(date), "2024-12-01");
        assert_eq!(format_display_date("2024-12-01"), "01/12/2024");
        assert_eq!(format_display_date("01/12/2024"), "01/12/2024");
        assert_eq!(format_display_date("someday"), "someday");
        assert_eq!(parse_stored_date(""), None);
    }

    #[test]
    fn test_observation_times() {
        let time = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap().and_hms_opt(14, 5, 0).unwrap();
        assert_eq!(to_storage_time(time), "2024-05-06 14:05");
        assert_eq!(parse_stored_time("06/05/2024 14:05"), Some(time));
        assert_eq!(parse_stored_time("2024-05-06T14:05"), Some(time));
        assert_eq!(parse_input_time("2024-05-06 14:05").unwrap(), time);
        assert!(parse_input_time("2pm").is_err());
        assert_eq!(format_display_time("2024-05-06 14:05"), "06/05/2024 14:05");
    }

    #[test]
    fn test_distance_and_group_size() {
        assert_eq!(format_distance(8.0), "8.0 km");
        assert_eq!(format_distance(12.345), "12.3 km");
        assert_eq!(format_group_size(0), "-");
        assert_eq!(format_group_size(12), "12");
    }

    #[test]
    fn test_canonical_forms_keep_unreadable_text() {
        assert_eq!(canonical_date("01/12/2024"), "2024-12-01");
        assert_eq!(canonical_date(""), "");
        assert_eq!(canonical_date("next summer"), "next summer");
        assert_eq!(canonical_time("06/05/2024 14:05"), "2024-05-06 14:05");
        assert_eq!(canonical_time("2024-05-06T14:05"), "2024-05-06 14:05");
        assert_eq!(canonical_time("dawn"), "dawn");
    }
}
