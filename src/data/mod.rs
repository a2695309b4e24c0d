//! Data loading and cleaning for the daily ridership dataset.

mod loader;
mod table;

pub use loader::{load_table, DATE_COLUMN, DATE_FORMAT};
pub use table::{month_end, month_name, weekday_name, DayRecord, RidershipTable, ServiceType};
