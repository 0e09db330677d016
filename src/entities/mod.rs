pub mod booking;
pub mod flight;
