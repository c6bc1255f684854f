//! Common domain types, the fractional-day clock, structural errors, and
//! the stable serialization records.

pub mod error;
pub mod serialization;
pub mod time;
pub mod types;

pub use error::BookError;
pub use time::{
    day_from_datetime, day_to_datetime, days_to_maturity, years_to_maturity, Day, DAYS_PER_YEAR,
};
pub use types::{Greeks, OptionDirection};
