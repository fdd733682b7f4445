//! Result type aliases for the user directory.

use crate::UserDirError;

/// A specialized `Result` type for user directory operations.
pub type UserDirResult<T> = Result<T, UserDirError>;
