pub mod reminders;
pub mod resources;
pub mod schedule;

pub use reminders::{today_summary, DailyReminderEnricher, ReminderEnricher};
pub use resources::{CatalogResourceEnricher, ResourceEnricher};
pub use schedule::{ScheduleEnricher, SlotScheduleEnricher};
