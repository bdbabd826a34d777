/*!
 * Batch Validation
 * Reject configurations and process batches that cannot produce a report
 */

use super::types::ProcessSpec;
use crate::core::errors::{ConfigError, SimError};
use crate::core::types::{SimResult, Size};
use ahash::AHashSet;

/// Validate every descriptor in the batch against a memory region of `total_memory` units.
///
/// Structural problems (zero or duplicate pids, zero burst, zero memory) are
/// reported first; a request larger than the whole region is a placement error
/// for that process.
pub fn validate_batch(specs: &[ProcessSpec], total_memory: Size) -> SimResult<()> {
    if specs.is_empty() {
        return Err(ConfigError::EmptyBatch.into());
    }

    let mut seen = AHashSet::with_capacity(specs.len());
    for (position, spec) in specs.iter().enumerate() {
        if spec.pid == 0 {
            return Err(ConfigError::InvalidPid { position }.into());
        }
        if !seen.insert(spec.pid) {
            return Err(ConfigError::DuplicatePid(spec.pid).into());
        }
        if spec.burst_time == 0 {
            return Err(ConfigError::InvalidBurst(spec.pid).into());
        }
        if spec.memory_required == 0 {
            return Err(ConfigError::InvalidMemoryRequest(spec.pid).into());
        }
    }

    if let Some(spec) = specs.iter().find(|s| s.memory_required > total_memory) {
        return Err(SimError::Placement {
            pid: spec.pid,
            required: spec.memory_required,
            total: total_memory,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(pid: u32, burst: u64, mem: usize) -> ProcessSpec {
        ProcessSpec::new(pid, 0, burst, mem)
    }

    #[test]
    fn test_valid_batch() {
        assert!(validate_batch(&[spec(1, 5, 3), spec(2, 1, 10)], 10).is_ok());
    }

    #[test]
    fn test_empty_batch() {
        assert_eq!(
            validate_batch(&[], 10),
            Err(SimError::Config(ConfigError::EmptyBatch))
        );
    }

    #[test]
    fn test_structural_errors() {
        assert_eq!(
            validate_batch(&[spec(1, 1, 1), spec(0, 1, 1)], 10),
            Err(ConfigError::InvalidPid { position: 1 }.into())
        );
        assert_eq!(
            validate_batch(&[spec(2, 1, 1), spec(2, 3, 1)], 10),
            Err(ConfigError::DuplicatePid(2).into())
        );
        assert_eq!(
            validate_batch(&[spec(1, 0, 1)], 10),
            Err(ConfigError::InvalidBurst(1).into())
        );
        assert_eq!(
            validate_batch(&[spec(1, 1, 0)], 10),
            Err(ConfigError::InvalidMemoryRequest(1).into())
        );
    }

    #[test]
    fn test_structural_errors_reported_before_placement() {
        assert_eq!(
            validate_batch(&[spec(1, 1, 50), spec(1, 1, 1)], 10),
            Err(ConfigError::DuplicatePid(1).into())
        );
    }

    #[test]
    fn test_unsatisfiable_request_names_the_process() {
        assert_eq!(
            validate_batch(&[spec(1, 1, 10), spec(2, 1, 11)], 10),
            Err(SimError::Placement {
                pid: 2,
                required: 11,
                total: 10
            })
        );
    }
}
