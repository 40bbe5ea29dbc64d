//! Associates loaded bookings with calendar days.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::Booking;

/// Bookings on `date`, earliest first. Bookings sharing a start time keep
/// their input order.
pub fn bookings_on(bookings: &[Booking], date: NaiveDate) -> Vec<Booking> {
    let mut day: Vec<Booking> = bookings
        .iter()
        .filter(|booking| booking.date == date)
        .cloned()
        .collect();
    day.sort_by_key(|booking| booking.time);
    day
}

/// Whether any booking falls on `date`
pub fn has_bookings_on(bookings: &[Booking], date: NaiveDate) -> bool {
    bookings.iter().any(|booking| booking.date == date)
}

/// Bookings of a visible month grouped by day, each day sorted by time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingDayIndex {
    days: BTreeMap<NaiveDate, Vec<Booking>>,
}

impl BookingDayIndex {
    pub fn build(bookings: &[Booking]) -> Self {
        let mut days: BTreeMap<NaiveDate, Vec<Booking>> = BTreeMap::new();
        for booking in bookings {
            days.entry(booking.date).or_default().push(booking.clone());
        }
        for day in days.values_mut() {
            day.sort_by_key(|booking| booking.time);
        }
        Self { days }
    }

    pub fn on(&self, date: NaiveDate) -> &[Booking] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    /// Days with at least one booking, in calendar order
    pub fn busy_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{format::parse_time, BookingStatus};

    fn booking(id: u64, date: &str, time: &str) -> Booking {
        Booking {
            id,
            service_id: 1,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            time: parse_time(time).unwrap(),
            client_name: format!("Client {}", id),
            client_contact: "client@example.com".to_string(),
            status: BookingStatus::Scheduled,
        }
    }

    fn ids(bookings: &[Booking]) -> Vec<u64> {
        bookings.iter().map(|b| b.id).collect()
    }

    fn sample() -> Vec<Booking> {
        vec![
            booking(1, "2024-06-10", "14:30"),
            booking(2, "2024-06-11", "08:00"),
            booking(3, "2024-06-10", "09:00"),
            booking(4, "2024-06-10", "10:00"),
            booking(5, "2024-06-10", "09:00"),
            booking(6, "2024-07-10", "07:00"),
        ]
    }

    #[test]
    fn test_bookings_on_filters_and_sorts_by_time() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let day = bookings_on(&sample(), date);

        assert_eq!(ids(&day), vec![3, 5, 4, 1]);
        assert!(day.iter().all(|b| b.date == date));
        assert!(day.windows(2).all(|pair| pair[0].time <= pair[1].time));
    }

    #[test]
    fn test_chronological_order_matches_padded_string_order() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let day = bookings_on(&sample(), date);
        let rendered: Vec<String> = day.iter().map(|b| crate::format::format_time(b.time)).collect();

        let mut lexicographic = rendered.clone();
        lexicographic.sort();
        assert_eq!(rendered, lexicographic);
    }

    #[test]
    fn test_empty_day() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
        assert!(bookings_on(&sample(), date).is_empty());
        assert!(!has_bookings_on(&sample(), date));
        assert!(has_bookings_on(&sample(), NaiveDate::from_ymd_opt(2024, 6, 11).unwrap()));
    }

    #[test]
    fn test_index_agrees_with_linear_lookup() {
        let bookings = sample();
        let index = BookingDayIndex::build(&bookings);

        for date in NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().iter_days().take(61) {
            assert_eq!(index.on(date), bookings_on(&bookings, date).as_slice());
            assert_eq!(index.has(date), has_bookings_on(&bookings, date));
        }
        assert_eq!(index.len(), bookings.len());
        assert_eq!(index.busy_days().count(), 3);
    }

    #[test]
    fn test_empty_index() {
        let index = BookingDayIndex::build(&[]);
        assert!(index.is_empty());
        assert_eq!(index.on(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()), &[] as &[Booking]);
    }
}
