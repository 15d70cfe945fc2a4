//! Process exit codes.
//!
//! | Code | Meaning                                       |
//! |------|-----------------------------------------------|
//! | 0    | not expired / example config written          |
//! | 1    | operational error (stat failed, client setup) |
//! | 2    | invalid flag combination                      |
//! | 3    | expired, kept                                 |
//! | 4    | expired, deleted                              |
//! | 5    | expired, deletion failed                      |
//! | 10   | config load failure                           |

use std::process::ExitCode;

use image_manager_core::ImageManagerError;
use image_manager_core::domain::EvaluationOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    NotExpired,
    OperationalError,
    Usage,
    ExpiredKept,
    ExpiredDeleted,
    ExpiredDeleteFailed,
    ConfigError,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success | ExitStatus::NotExpired => 0,
            ExitStatus::OperationalError => 1,
            ExitStatus::Usage => 2,
            ExitStatus::ExpiredKept => 3,
            ExitStatus::ExpiredDeleted => 4,
            ExitStatus::ExpiredDeleteFailed => 5,
            ExitStatus::ConfigError => 10,
        }
    }

    pub fn from_outcome(outcome: &EvaluationOutcome) -> Self {
        match outcome {
            EvaluationOutcome::NotExpired => ExitStatus::NotExpired,
            EvaluationOutcome::ExpiredKept => ExitStatus::ExpiredKept,
            EvaluationOutcome::ExpiredDeleted => ExitStatus::ExpiredDeleted,
            EvaluationOutcome::ExpiredDeleteFailed(_) => ExitStatus::ExpiredDeleteFailed,
        }
    }

    pub fn from_error(error: &ImageManagerError) -> Self {
        match error {
            ImageManagerError::Config(_) => ExitStatus::ConfigError,
            ImageManagerError::Connection(_) | ImageManagerError::Stat(_) => {
                ExitStatus::OperationalError
            }
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}
