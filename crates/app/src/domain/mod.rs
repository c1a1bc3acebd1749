//! Urban Harvest Domain Concerns

pub mod bookings;
pub mod catalog;
pub mod reviews;
pub mod subscriptions;
pub mod users;
pub mod weather;
