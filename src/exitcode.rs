//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination
pub const OK: i32 = 0;

/// Requested node not present in the hierarchy
pub const NOTFOUND: i32 = 2;

/// Command line usage error
pub const USAGE: i32 = 64;

/// Data format error (malformed table, duplicate root, missing parent)
pub const DATAERR: i32 = 65;

/// Cannot open input
pub const NOINPUT: i32 = 66;

/// Configuration error
pub const CONFIG: i32 = 78;
