// Defaults shared by the engine and its drivers

/// Memory cells given to a new engine when the user does not choose
pub const DEFAULT_STACK_SIZE: usize = 32;

/// Pause between steps of the timed auto-run
pub const DEFAULT_STEP_DELAY_MS: u64 = 500;

/// Engine states kept for stepping backward in the TUI
pub const DEFAULT_HISTORY_CAPACITY: usize = 10_000;

/// Size of a freshly created program
pub const DEFAULT_NEW_WIDTH: usize = 2;
pub const DEFAULT_NEW_HEIGHT: usize = 2;
