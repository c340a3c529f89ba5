use std::{
    sync::{Arc, PoisonError},
    time::Duration,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShotError {
    #[error("{0}")]
    Error(String),
    #[error("Invalid screen number: {requested}. Available screen numbers: {available:?}")]
    InvalidScreenIndex {
        requested: usize,
        available: Vec<usize>,
    },
    #[error("PlatformQueryError {0}")]
    PlatformQuery(String),
    #[error("InvalidRegion {width}x{height}")]
    InvalidRegion { width: i64, height: i64 },
    #[error("CaptureError {0}")]
    Capture(String),
    #[error("InvalidOptions {0}")]
    InvalidOptions(String),
    #[error("CaptureTimeout no frame within {0:?}")]
    CaptureTimeout(Duration),
    #[error("Capture loop stopped before producing a frame")]
    LoopStopped,
    #[error("Capture loop stopped after a failed capture: {0}")]
    LoopFailed(Arc<ShotError>),
    #[error("StdSyncPoisonError {0}")]
    StdSyncPoisonError(String),

    #[error(transparent)]
    StdIOError(#[from] std::io::Error),

    #[cfg(target_os = "windows")]
    #[error(transparent)]
    Utf16Error(#[from] widestring::error::Utf16Error),
}

impl ShotError {
    pub fn new<S: ToString>(err: S) -> Self {
        ShotError::Error(err.to_string())
    }

    pub(crate) fn invalid_region<W: Into<i64>, H: Into<i64>>(width: W, height: H) -> Self {
        ShotError::InvalidRegion {
            width: width.into(),
            height: height.into(),
        }
    }

    /// Errors the caller can recover from by re-enumerating or retrying.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ShotError::InvalidScreenIndex { .. }
                | ShotError::PlatformQuery(_)
                | ShotError::Capture(_)
                | ShotError::CaptureTimeout(_)
                | ShotError::StdIOError(_)
        )
    }
}

pub type ShotResult<T> = Result<T, ShotError>;

impl<T> From<PoisonError<T>> for ShotError {
    fn from(value: PoisonError<T>) -> Self {
        ShotError::StdSyncPoisonError(value.to_string())
    }
}
