//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination, including help display
pub const OK: i32 = 0;

/// Command line usage error
pub const USAGE: i32 = 64;

/// Configuration error
pub const CONFIG: i32 = 78;
