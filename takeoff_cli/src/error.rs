//! CLI exit codes.
//!
//! - 0: Success (JSON on stdout)
//! - 1: The input was rejected (missing/invalid field, bad flag, bad body)
//! - 2: The engine or the environment failed (computation, file, internal)

use std::process::ExitCode;

use takeoff_core::api::ApiResponse;
use takeoff_core::CalcError;

/// Exit codes for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CliExitCode {
    Success = 0,
    /// Caller error, fix the input and retry
    Rejected = 1,
    /// Estimation or I/O failure
    Failed = 2,
}

impl From<CliExitCode> for ExitCode {
    fn from(code: CliExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

impl From<&CalcError> for CliExitCode {
    fn from(err: &CalcError) -> Self {
        if err.is_validation() {
            CliExitCode::Rejected
        } else {
            CliExitCode::Failed
        }
    }
}

impl From<&ApiResponse> for CliExitCode {
    fn from(response: &ApiResponse) -> Self {
        match response.status {
            200..=299 => CliExitCode::Success,
            400..=499 => CliExitCode::Rejected,
            _ => CliExitCode::Failed,
        }
    }
}
