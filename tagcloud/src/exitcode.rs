/// Standard Unix exit codes for the tagcloud CLI.
///
/// These codes follow the BSD convention where possible.
///
/// Successful termination
pub const SUCCESS: i32 = 0;

/// Command line usage error - invalid arguments, unreadable config, missing input
pub const USAGE: i32 = 64;

/// Input data error - malformed tag data or a tag link that cannot be resolved
pub const DATAERR: i32 = 65;
