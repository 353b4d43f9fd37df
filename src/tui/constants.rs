//! Shared TUI constants.

/// Rows jumped by PageUp/PageDown.
pub const PAGE_SIZE: usize = 10;

/// Minimum terminal size the dashboard can render in.
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 16;

/// Tick rate for the event loop, in milliseconds.
pub const TICK_MS: u64 = 100;

/// Status messages expire after this many ticks.
pub const STATUS_TTL_TICKS: u64 = 50;
