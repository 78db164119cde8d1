/// Standard Unix exit codes for the tagmarks CLI application.
///
/// These codes follow the BSD sysexits convention.
///
/// Successful termination
pub const SUCCESS: i32 = 0;

/// Command line usage error - invalid arguments, missing required parameters, etc.
pub const USAGE: i32 = 64;

/// Submitted data was rejected by validation
pub const DATAERR: i32 = 65;

/// The requested record does not exist
pub const NOINPUT: i32 = 66;

/// The current user may not act on the requested record
pub const NOPERM: i32 = 77;
