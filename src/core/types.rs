/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type
pub type Pid = u32;

/// Simulation clock value (discrete ticks since the run started)
pub type Tick = u64;

/// Offset of a memory unit within the simulated region
pub type Address = usize;

/// Size type for memory operations, measured in units
pub type Size = usize;

/// Common result type for simulator operations
pub type SimResult<T> = Result<T, super::errors::SimError>;
