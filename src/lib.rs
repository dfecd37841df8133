pub mod config;
pub mod directory;
pub mod limits;
pub mod model;
pub mod notify;
pub mod observability;
pub mod scheduler;
pub mod store;

pub use config::SchedulerConfig;
pub use model::{
    Appointment, AppointmentPatch, AppointmentStatus, BookingRequest, DailyLoad, Owner, TimeRange,
    TimeSlot,
};
pub use notify::{CacheKey, InvalidationHub};
pub use scheduler::{ScheduleError, Scheduler};
pub use store::{AppointmentStore, StoreError};
