use chrono::{Datelike, NaiveDate};
use shared::{build_month_grid, MonthCursor, MonthGrid};
use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Clone, PartialEq)]
pub struct CalendarState {
    pub grid: MonthGrid,
    /// e.g. "June 2024"
    pub title: String,
    pub today: NaiveDate,
}

pub struct UseCalendarResult {
    pub state: CalendarState,
    pub actions: UseCalendarActions,
}

#[derive(Clone, PartialEq)]
pub struct UseCalendarActions {
    pub prev_month: Callback<MouseEvent>,
    pub next_month: Callback<MouseEvent>,
    pub go_to_today: Callback<MouseEvent>,
}

/// Months between `from` and the month containing `date`
fn months_until(from: MonthCursor, date: NaiveDate) -> i32 {
    (date.year() - from.year()) * 12 + date.month() as i32 - from.month() as i32
}

/// Grid and navigation for the month shown by the bookings page.
///
/// The month itself lives in the page state; navigation is reported through
/// `on_navigate` as a month offset.
#[hook]
pub fn use_calendar(month: MonthCursor, today: NaiveDate, on_navigate: Callback<i32>) -> UseCalendarResult {
    let grid = use_memo(month, |month| build_month_grid(*month));

    let prev_month = {
        let on_navigate = on_navigate.clone();
        Callback::from(move |_: MouseEvent| on_navigate.emit(-1))
    };

    let next_month = {
        let on_navigate = on_navigate.clone();
        Callback::from(move |_: MouseEvent| on_navigate.emit(1))
    };

    let go_to_today = Callback::from(move |_: MouseEvent| {
        let offset = months_until(month, today);
        if offset != 0 {
            on_navigate.emit(offset);
        }
    });

    UseCalendarResult {
        state: CalendarState {
            grid: (*grid).clone(),
            title: month.to_string(),
            today,
        },
        actions: UseCalendarActions {
            prev_month,
            next_month,
            go_to_today,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_months_until() {
        let june = MonthCursor::new(2024, 6).unwrap();
        assert_eq!(months_until(june, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()), 0);
        assert_eq!(months_until(june, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()), 7);
        assert_eq!(months_until(june, NaiveDate::from_ymd_opt(2023, 12, 5).unwrap()), -6);
    }
}
