//! Exit code constants for the CLI application.

/// Success exit code (standard Unix convention).
pub const SUCCESS: i32 = 0;

/// General error exit code: bad arguments, engine rejections, I/O failures.
pub const ERROR: i32 = 2;

/// Input closed in the middle of an interactive round.
pub const INTERRUPTED: i32 = 130;
