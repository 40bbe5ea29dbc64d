use chrono::{Datelike, NaiveDate};
use shared::{BookingDayIndex, CalendarCell};
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::hooks::use_calendar::{CalendarState, UseCalendarActions};

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Properties, PartialEq)]
pub struct BookingCalendarProps {
    pub calendar: CalendarState,
    pub actions: UseCalendarActions,
    pub index: BookingDayIndex,
    pub selected: Option<NaiveDate>,
    pub on_select: Callback<NaiveDate>,
}

#[function_component(BookingCalendar)]
pub fn booking_calendar(props: &BookingCalendarProps) -> Html {
    let cells = props.calendar.grid.cells.iter().map(|cell| match cell {
        CalendarCell::Day(date) => {
            let date = *date;
            let count = props.index.on(date).len();

            let mut classes = classes!("calendar-day");
            if date == props.calendar.today {
                classes.push("today");
            }
            if props.selected == Some(date) {
                classes.push("selected");
            }
            if count > 0 {
                classes.push("has-bookings");
            }

            let onclick = {
                let on_select = props.on_select.clone();
                Callback::from(move |_: MouseEvent| on_select.emit(date))
            };

            html! {
                <div class={classes} {onclick}>
                    <div class="day-number">{date.day()}</div>
                    {if count > 0 {
                        html! {
                            <div class="booking-dot" title={format!("{} booking(s)", count)}>
                                {count}
                            </div>
                        }
                    } else {
                        html! {}
                    }}
                </div>
            }
        }
        _ => html! { <div class="calendar-day empty"></div> },
    });

    html! {
        <div class="calendar">
            <div class="calendar-header">
                <button class="nav-button" onclick={props.actions.prev_month.clone()}>{"‹"}</button>
                <h2 class="calendar-title">{&props.calendar.title}</h2>
                <button class="nav-button" onclick={props.actions.next_month.clone()}>{"›"}</button>
                <button class="btn btn-secondary today-button" onclick={props.actions.go_to_today.clone()}>
                    {"Today"}
                </button>
            </div>
            <div class="calendar-weekdays">
                {for WEEKDAY_LABELS.iter().map(|label| html! { <div class="weekday">{*label}</div> })}
            </div>
            <div class="calendar-grid">
                {for cells}
            </div>
        </div>
    }
}
