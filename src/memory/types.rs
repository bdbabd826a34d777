/*!
 * Memory Types
 * Common types for the simulated memory region
 */

use crate::core::types::{Address, Pid, Size};
use serde::{Deserialize, Serialize};

/// Contiguous run of units with a single owner (or none)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryBlock {
    pub address: Address,
    pub size: Size,
    pub owner_pid: Option<Pid>,
}

impl MemoryBlock {
    pub fn is_allocated(&self) -> bool {
        self.owner_pid.is_some()
    }

    /// One past the last unit of the block
    pub fn end(&self) -> Address {
        self.address + self.size
    }
}

/// Memory statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total_memory: Size,
    pub used_memory: Size,
    pub available_memory: Size,
    pub usage_percentage: f64,
    pub allocated_blocks: usize,
    pub free_blocks: usize,
    pub largest_free_block: Size,
}

impl MemoryStats {
    pub fn memory_pressure(&self) -> MemoryPressure {
        MemoryPressure::from_percentage(self.usage_percentage)
    }

    /// Free space exists, but it is split across more than one hole
    pub fn is_fragmented(&self) -> bool {
        self.free_blocks > 1
    }
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl MemoryPressure {
    pub fn from_percentage(usage_percentage: f64) -> Self {
        if usage_percentage >= 95.0 {
            MemoryPressure::Critical
        } else if usage_percentage >= 80.0 {
            MemoryPressure::High
        } else if usage_percentage >= 60.0 {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

impl std::fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}
