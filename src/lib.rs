/*!
 * RR-MemSim Library
 * Round-robin CPU scheduling coupled with first-fit contiguous memory allocation
 */

pub mod core;
pub mod memory;
pub mod monitoring;
pub mod process;
pub mod scheduler;
pub mod simulation;

// Re-exports
pub use crate::core::errors::{ConfigError, SimError};
pub use crate::core::types::{Address, Pid, SimResult, Size, Tick};
pub use memory::{Allocator, MemoryInfo, MemoryManager, MemoryStats};
pub use monitoring::init_tracing;
pub use process::{Process, ProcessSpec, ProcessState};
pub use scheduler::{CompletedProcess, SchedEvent, Scheduler, SimulationReport, TimeQuantum};
pub use simulation::{simulate, SimConfig, Workload};
