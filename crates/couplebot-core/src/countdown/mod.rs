//! Countdown domain module.
//!
//! Each user keeps their own list of upcoming dates (anniversaries, trips)
//! and can check how many days are left.

mod model;
mod repository;

pub use model::{
    parse_countdown_date, Countdown, CountdownError, CountdownStatus, DATE_FORMAT, DEFAULT_TITLE,
};
pub use repository::CountdownRepository;
