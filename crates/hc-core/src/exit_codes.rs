//! Exit codes for the hc-core CLI.
//!
//! Exit code ranges:
//! - 0: report written (or command completed)
//! - 10-19: user/environment errors (recoverable by user action)
//! - 20-29: render and storage failures

use hc_report::ReportStage;

/// Exit codes for hc-core operations.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Clean = 0,

    // ========================================================================
    // User / Environment Errors (10-19)
    // ========================================================================
    /// Invalid arguments or configuration
    ArgsError = 10,

    /// Namespace missing or the namespace lookup failed
    ScopeNotFound = 15,

    // ========================================================================
    // Pipeline Errors (20-29)
    // ========================================================================
    /// Template import or page rendering failed
    RenderError = 20,

    /// The finished report could not be written
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_error(self) -> bool {
        (self as i32) >= 10
    }

    /// Check if this exit code is a user/environment error (codes 10-19).
    pub fn is_user_error(self) -> bool {
        (10..20).contains(&(self as i32))
    }

    /// Exit code for a run that failed at `stage`.
    pub fn for_stage(stage: ReportStage) -> Self {
        match stage {
            ReportStage::Config => ExitCode::ArgsError,
            ReportStage::Validate => ExitCode::ScopeNotFound,
            ReportStage::Render => ExitCode::RenderError,
            ReportStage::Store => ExitCode::IoError,
        }
    }

    /// Get the error code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::ScopeNotFound => "ERR_SCOPE",
            ExitCode::RenderError => "ERR_RENDER",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}
