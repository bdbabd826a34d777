/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::{Pid, Size};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors, detected before any simulated time passes
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Invalid time quantum: {0} (must be at least 1 tick)")]
    #[diagnostic(
        code(config::invalid_quantum),
        help("Round-robin needs a positive slice length.")
    )]
    InvalidQuantum(u64),

    #[error("Invalid total memory: {0} units (must be at least 1)")]
    #[diagnostic(
        code(config::invalid_memory_size),
        help("The simulated memory region needs at least one unit.")
    )]
    InvalidMemorySize(Size),

    #[error("Process batch is empty")]
    #[diagnostic(
        code(config::empty_batch),
        help("Supply at least one process descriptor.")
    )]
    EmptyBatch,

    #[error("Invalid pid 0 at batch position {position}")]
    #[diagnostic(code(config::invalid_pid), help("Process IDs start at 1."))]
    InvalidPid { position: usize },

    #[error("Duplicate pid {0} in process batch")]
    #[diagnostic(
        code(config::duplicate_pid),
        help("Every process in a batch needs a unique pid.")
    )]
    DuplicatePid(Pid),

    #[error("Process {0} has a zero burst time")]
    #[diagnostic(
        code(config::invalid_burst),
        help("Burst time is the CPU work a process needs and must be positive.")
    )]
    InvalidBurst(Pid),

    #[error("Process {0} requests zero memory units")]
    #[diagnostic(
        code(config::invalid_memory_request),
        help("Every process must occupy at least one memory unit.")
    )]
    InvalidMemoryRequest(Pid),
}

/// Unified simulator error type with miette diagnostics
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SimError {
    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Process {pid} can never be placed: requires {required} units, memory has {total}")]
    #[diagnostic(
        code(sim::unsatisfiable_placement),
        help("Increase total memory or shrink the process; it would wait for admission forever.")
    )]
    Placement { pid: Pid, required: Size, total: Size },

    #[error("Invalid workload: {0}")]
    #[diagnostic(
        code(sim::invalid_workload),
        help("Check the workload document against the expected format.")
    )]
    Workload(String),
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::Workload(err.to_string())
    }
}

impl From<std::io::Error> for SimError {
    fn from(err: std::io::Error) -> Self {
        SimError::Workload(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_wraps_transparently() {
        let err: SimError = ConfigError::DuplicatePid(3).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Duplicate pid 3 in process batch"
        );
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("config::duplicate_pid".to_string())
        );
    }

    #[test]
    fn test_error_serialization() {
        let err = SimError::Placement {
            pid: 4,
            required: 11,
            total: 10,
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["error_type"], "placement");
        assert_eq!(json["details"]["required"], 11);

        let back: SimError = serde_json::from_value(json).unwrap();
        assert_eq!(back, err);
    }
}
