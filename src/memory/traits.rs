/*!
 * Memory Traits
 * Memory management abstractions consumed by the scheduler
 */

use super::types::*;
use crate::core::types::{Address, Pid, Size};

/// Contiguous allocator interface
pub trait Allocator {
    /// Reserve `size` contiguous units for `pid`.
    ///
    /// Returns the start of the window, or `None` when no window fits right now.
    /// A `None` leaves the region untouched.
    fn allocate(&mut self, pid: Pid, size: Size) -> Option<Address>;

    /// Release every unit owned by `pid`, returning how many were freed
    fn deallocate(&mut self, pid: Pid) -> Size;
}

/// Memory statistics provider
pub trait MemoryInfo {
    /// Get overall memory statistics
    fn stats(&self) -> MemoryStats;

    /// Get memory info as (total, used, available)
    fn info(&self) -> (Size, Size, Size);

    /// Get memory held by a specific process
    fn process_memory(&self, pid: Pid) -> Size;

    /// Percentage of units in use right now
    fn utilization(&self) -> f64 {
        let (total, used, _) = self.info();
        if total == 0 {
            0.0
        } else {
            used as f64 * 100.0 / total as f64
        }
    }

    /// Get memory pressure level
    fn pressure(&self) -> MemoryPressure {
        MemoryPressure::from_percentage(self.utilization())
    }
}

/// Memory backend trait combining both interfaces
pub trait MemoryBackend: Allocator + MemoryInfo {}

/// Implement MemoryBackend for types that implement all required traits
impl<T> MemoryBackend for T where T: Allocator + MemoryInfo {}
