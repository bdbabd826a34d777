/*!
 * Simulation Facade
 * Batch in, report out: validation plus scheduler and memory wiring
 */

use crate::core::errors::ConfigError;
use crate::core::types::{SimResult, Size};
use crate::memory::MemoryManager;
use crate::process::{validate_batch, ProcessSpec};
use crate::scheduler::{Scheduler, SimulationReport, TimeQuantum};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument};

/// Run configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    pub total_memory: Size,
    pub time_quantum: TimeQuantum,
}

impl SimConfig {
    pub fn new(total_memory: Size, time_quantum: u64) -> SimResult<Self> {
        let config = Self {
            total_memory,
            time_quantum: TimeQuantum::new(time_quantum)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.total_memory == 0 {
            return Err(ConfigError::InvalidMemorySize(self.total_memory).into());
        }
        Ok(())
    }
}

/// Serialized workload: configuration scalars plus the process batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    pub total_memory: Size,
    pub time_quantum: u64,
    pub processes: Vec<ProcessSpec>,
}

impl Workload {
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> SimResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn config(&self) -> SimResult<SimConfig> {
        SimConfig::new(self.total_memory, self.time_quantum)
    }

    pub fn run(&self) -> SimResult<SimulationReport> {
        simulate(&self.config()?, &self.processes)
    }
}

/// Validate the batch, then run it to completion.
///
/// Configuration and placement errors are returned before the clock moves; no
/// partial report is ever produced.
#[instrument(skip_all, fields(processes = specs.len(), total_memory = config.total_memory))]
pub fn simulate(config: &SimConfig, specs: &[ProcessSpec]) -> SimResult<SimulationReport> {
    config.validate()?;
    validate_batch(specs, config.total_memory)?;

    let mut memory = MemoryManager::new(config.total_memory)?;
    let report = Scheduler::new(config.time_quantum, specs).run(&mut memory)?;

    info!(
        completed = report.completed.len(),
        peak_utilization = report.peak_memory_utilization,
        "Batch finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::SimError;

    #[test]
    fn test_config_rejects_zero_values() {
        assert_eq!(
            SimConfig::new(10, 0),
            Err(ConfigError::InvalidQuantum(0).into())
        );
        assert_eq!(
            SimConfig::new(0, 2),
            Err(ConfigError::InvalidMemorySize(0).into())
        );
    }

    #[test]
    fn test_workload_from_json() {
        let workload = Workload::from_json_str(
            r#"{
                "total_memory": 10,
                "time_quantum": 2,
                "processes": [
                    {"pid": 1, "arrival_time": 0, "burst_time": 5, "memory_required": 3}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(workload.processes, vec![ProcessSpec::new(1, 0, 5, 3)]);
        let report = workload.run().unwrap();
        assert_eq!(report.completion_order(), vec![1]);
    }

    #[test]
    fn test_workload_rejects_negative_values() {
        let result = Workload::from_json_str(
            r#"{"total_memory": 10, "time_quantum": 2,
                "processes": [{"pid": 1, "arrival_time": -1, "burst_time": 5, "memory_required": 3}]}"#,
        );
        assert!(matches!(result, Err(SimError::Workload(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Workload::from_path("/nonexistent/workload.json"),
            Err(SimError::Workload(_))
        ));
    }
}
