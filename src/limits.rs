//! Hard input bounds. Requests past these are rejected, never clamped.

/// Longest accepted appointment title.
pub const MAX_TITLE_LEN: usize = 256;

/// Longest accepted appointment description.
pub const MAX_DESCRIPTION_LEN: usize = 4096;

/// Longest single appointment, in minutes (one full day).
pub const MAX_APPOINTMENT_MINUTES: i64 = 24 * 60;

/// Widest load-report window, in days (inclusive of both endpoints).
pub const MAX_LOAD_RANGE_DAYS: i64 = 366;

/// Latest hour a business day may close at.
pub const MAX_CLOSING_HOUR: u32 = 24;

/// Longest slot the grid may be configured with, in minutes.
pub const MAX_SLOT_MINUTES: u32 = 24 * 60;
