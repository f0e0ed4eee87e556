//! Process exit codes (BSD sysexits.h compatible where one applies)

/// User-facing failure (bad input, unreachable database, ...)
pub const FAILURE: i32 = 1;

/// Internal software error
pub const SOFTWARE: i32 = 70;

/// Input/output error
pub const IOERR: i32 = 74;
