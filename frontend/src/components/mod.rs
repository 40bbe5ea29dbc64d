pub mod booking_modal;
pub mod bookings_page;
pub mod calendar;
pub mod confirm_dialog;
pub mod day_panel;
pub mod error_banner;
pub mod header;
pub mod modal;
pub mod profile_page;
pub mod service_modal;
pub mod services_page;
pub mod toast;
