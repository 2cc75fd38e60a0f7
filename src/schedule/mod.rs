//! Pure scheduling rules for the studio: time ranges, chair availability,
//! studio-wide aggregation, booking validation and day-grid layout.
//!
//! Nothing here touches the database; callers pass in a snapshot of the
//! day's appointments and get a fresh answer back.

pub mod availability;
pub mod booking;
pub mod error;
pub mod layout;
pub mod model;
pub mod range;
pub mod studio;

pub use error::ScheduleError;
pub use model::{Appointment, Artist, Chair, Color};
pub use range::TimeRange;
