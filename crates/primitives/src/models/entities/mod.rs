pub mod booking;
pub mod enum_types;

pub use booking::Booking;
pub use enum_types::*;
