/*!
 * Memory Management
 * Fixed-size region of discrete units with first-fit contiguous allocation
 */

use super::traits::{Allocator, MemoryInfo};
use super::types::{MemoryBlock, MemoryPressure, MemoryStats};
use crate::core::errors::ConfigError;
use crate::core::types::{Address, Pid, SimResult, Size};
use tracing::{debug, info, warn};

/// Unit-granular memory region.
///
/// Each unit is either free (`None`) or tagged with the pid occupying it.
/// The region is never resized after construction.
#[derive(Debug, Clone)]
pub struct MemoryManager {
    units: Vec<Option<Pid>>,
    used: Size,
}

impl MemoryManager {
    pub fn new(total_memory: Size) -> SimResult<Self> {
        if total_memory == 0 {
            return Err(ConfigError::InvalidMemorySize(total_memory).into());
        }
        info!(total_memory, "Memory manager initialized");
        Ok(Self {
            units: vec![None; total_memory],
            used: 0,
        })
    }

    pub fn total_memory(&self) -> Size {
        self.units.len()
    }

    /// Owner of a single unit, `None` if free or out of range
    pub fn owner_at(&self, address: Address) -> Option<Pid> {
        self.units.get(address).copied().flatten()
    }

    /// Lowest offset whose `size`-unit window is entirely free
    fn find_first_fit(&self, size: Size) -> Option<Address> {
        let last_start = self.units.len().checked_sub(size)?;
        let mut offset = 0;
        while offset <= last_start {
            let window = &self.units[offset..offset + size];
            match window.iter().rposition(Option::is_some) {
                // Any window starting at or before the occupied unit overlaps it
                Some(occupied) => offset += occupied + 1,
                None => return Some(offset),
            }
        }
        None
    }

    /// Contiguous runs of equal ownership, in address order
    pub fn blocks(&self) -> Vec<MemoryBlock> {
        let mut blocks: Vec<MemoryBlock> = Vec::new();
        for (address, owner) in self.units.iter().enumerate() {
            match blocks.last_mut() {
                Some(block) if block.owner_pid == *owner => block.size += 1,
                _ => blocks.push(MemoryBlock {
                    address,
                    size: 1,
                    owner_pid: *owner,
                }),
            }
        }
        blocks
    }

    /// Block held by `pid`, if it holds exactly one contiguous window
    pub fn block_of(&self, pid: Pid) -> Option<MemoryBlock> {
        let mut owned = self
            .blocks()
            .into_iter()
            .filter(|b| b.owner_pid == Some(pid));
        let block = owned.next()?;
        owned.next().is_none().then_some(block)
    }
}

impl Allocator for MemoryManager {
    fn allocate(&mut self, pid: Pid, size: Size) -> Option<Address> {
        if size == 0 {
            return None;
        }
        debug_assert_eq!(
            self.process_memory(pid),
            0,
            "pid {pid} already holds memory"
        );

        let Some(address) = self.find_first_fit(size) else {
            debug!(
                pid,
                size,
                used = self.used,
                total = self.units.len(),
                "No contiguous window available"
            );
            return None;
        };

        self.units[address..address + size].fill(Some(pid));
        self.used += size;

        let pressure = self.pressure();
        if matches!(pressure, MemoryPressure::High | MemoryPressure::Critical) {
            warn!(
                pid,
                used = self.used,
                total = self.units.len(),
                %pressure,
                "Memory pressure after allocation"
            );
        }
        debug!(pid, address, size, "Allocated contiguous window");
        Some(address)
    }

    fn deallocate(&mut self, pid: Pid) -> Size {
        let mut freed = 0;
        for unit in self.units.iter_mut().filter(|u| **u == Some(pid)) {
            *unit = None;
            freed += 1;
        }
        self.used -= freed;
        if freed > 0 {
            debug!(pid, freed, "Released memory");
        }
        freed
    }
}

impl MemoryInfo for MemoryManager {
    fn stats(&self) -> MemoryStats {
        let blocks = self.blocks();
        let allocated_blocks = blocks.iter().filter(|b| b.is_allocated()).count();
        let free = blocks.iter().filter(|b| !b.is_allocated());

        MemoryStats {
            total_memory: self.units.len(),
            used_memory: self.used,
            available_memory: self.units.len() - self.used,
            usage_percentage: self.utilization(),
            allocated_blocks,
            free_blocks: blocks.len() - allocated_blocks,
            largest_free_block: free.map(|b| b.size).max().unwrap_or(0),
        }
    }

    fn info(&self) -> (Size, Size, Size) {
        (self.units.len(), self.used, self.units.len() - self.used)
    }

    fn process_memory(&self, pid: Pid) -> Size {
        self.units.iter().filter(|u| **u == Some(pid)).count()
    }
}
