use chrono::NaiveDate;
use xcalc_calendar::{Doy, daily_sequence, expand_indices, window_offsets};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn window_around_each_occurrence_of_a_doy() {
    let dates = daily_sequence(ymd(2001, 1, 1), 365 * 3);
    let target = Doy::from_month_day(7, 1).unwrap();
    let base: Vec<usize> = dates
        .iter()
        .enumerate()
        .filter(|(_, d)| Doy::from_date(**d) == target)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(base.len(), 3);

    let window = expand_indices(&base, &window_offsets(5), dates.len());
    assert_eq!(window.len(), 15);
    for idx in window {
        let md = (dates[idx].format("%m-%d")).to_string();
        assert!(
            ["06-29", "06-30", "07-01", "07-02", "07-03"].contains(&md.as_str()),
            "unexpected day {md}"
        );
    }
}

#[test]
fn window_clipped_at_series_start() {
    let dates = daily_sequence(ymd(2001, 1, 1), 365);
    let window = expand_indices(&[0], &window_offsets(5), dates.len());
    assert_eq!(window, vec![0, 1, 2]);
}
