pub mod use_api;
pub mod use_bookings;
pub mod use_calendar;
pub mod use_profile;
pub mod use_services;
pub mod use_toasts;
