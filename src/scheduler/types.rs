/*!
 * Scheduler Types
 * Domain types for round-robin scheduling
 */

use crate::core::errors::ConfigError;
use crate::core::types::{Address, Pid, Tick};
use serde::{Deserialize, Deserializer, Serialize};

/// Time quantum configuration
///
/// Maximum number of ticks a process runs per dispatch before it is sent back
/// to the tail of the ready queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TimeQuantum {
    ticks: Tick,
}

impl TimeQuantum {
    /// Create new time quantum
    pub fn new(ticks: Tick) -> Result<Self, ConfigError> {
        if ticks == 0 {
            return Err(ConfigError::InvalidQuantum(ticks));
        }
        Ok(Self { ticks })
    }

    #[inline(always)]
    pub const fn as_ticks(&self) -> Tick {
        self.ticks
    }
}

impl<'de> Deserialize<'de> for TimeQuantum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ticks = Tick::deserialize(deserializer)?;
        Self::new(ticks).map_err(serde::de::Error::custom)
    }
}

/// Scheduling decision observed during a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SchedEvent {
    /// Memory window granted and process appended to the ready queue
    Admitted { time: Tick, pid: Pid, address: Address },
    /// Process took the CPU at `time` for `slice` ticks
    Dispatched { time: Tick, pid: Pid, slice: Tick },
    /// Quantum expired with work left; process re-queued at the tail
    Preempted { time: Tick, pid: Pid, remaining: Tick },
    /// Remaining time reached zero and memory was released
    Completed { time: Tick, pid: Pid },
    /// Nothing runnable; the clock advanced by one tick
    Idle { time: Tick },
}

impl SchedEvent {
    pub fn time(&self) -> Tick {
        match *self {
            SchedEvent::Admitted { time, .. }
            | SchedEvent::Dispatched { time, .. }
            | SchedEvent::Preempted { time, .. }
            | SchedEvent::Completed { time, .. }
            | SchedEvent::Idle { time } => time,
        }
    }

    pub fn pid(&self) -> Option<Pid> {
        match *self {
            SchedEvent::Admitted { pid, .. }
            | SchedEvent::Dispatched { pid, .. }
            | SchedEvent::Preempted { pid, .. }
            | SchedEvent::Completed { pid, .. } => Some(pid),
            SchedEvent::Idle { .. } => None,
        }
    }
}
