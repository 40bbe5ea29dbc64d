use chrono::NaiveDate;
use js_sys::Date;

/// Today's date on the browser's local clock
pub fn today() -> NaiveDate {
    let now = Date::new_0();
    let year = now.get_full_year() as i32;
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();

    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Milliseconds since the epoch, the clock the toast queue runs on
pub fn now_ms() -> f64 {
    Date::now()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_today_matches_browser_clock() {
        let now = Date::new_0();
        let today = today();
        assert_eq!(today.year(), now.get_full_year() as i32);
        assert_eq!(today.day(), now.get_date());
    }

    #[wasm_bindgen_test]
    fn test_now_ms_is_monotonic_enough() {
        let first = now_ms();
        assert!(now_ms() >= first);
    }
}
