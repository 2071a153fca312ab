//! Definition of the crate's error and result.

use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// The library's error enum
#[derive(Debug, Error)]
pub enum BlockJoinError {
    /// Invalid argument was passed by the user, or the query was configured
    /// with collaborators that cannot be used together.
    #[error("An invalid argument was passed: '{0}'")]
    InvalidArgument(String),
    /// An IO error, typically from serializing an explanation.
    #[error("An IO error occurred: '{0}'")]
    IoError(#[from] io::Error),
    /// A thread holding the locked panicked and poisoned the lock.
    #[error("A thread holding the lock panicked and poisoned the lock")]
    Poisoned,
    /// An Error happened in one of the thread.
    #[error("An error occurred in a thread: '{0}'")]
    ErrorInThread(String),
    /// System error. (e.g.: We failed spawning a new thread)
    #[error("System error.'{0}'")]
    SystemError(String),
    /// An internal error occurred. This is are internal states that should not be reached.
    #[error("Internal error: '{0}'")]
    InternalError(String),
}

impl<Guard> From<PoisonError<Guard>> for BlockJoinError {
    fn from(_: PoisonError<Guard>) -> BlockJoinError {
        BlockJoinError::Poisoned
    }
}

impl From<serde_json::Error> for BlockJoinError {
    fn from(error: serde_json::Error) -> BlockJoinError {
        let io_err = io::Error::from(error);
        BlockJoinError::IoError(io_err)
    }
}

impl From<rayon::ThreadPoolBuildError> for BlockJoinError {
    fn from(error: rayon::ThreadPoolBuildError) -> BlockJoinError {
        BlockJoinError::SystemError(error.to_string())
    }
}
