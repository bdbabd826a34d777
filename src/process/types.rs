/*!
 * Process Types
 * Process descriptors and the simulation-time process record
 */

use crate::core::types::{Pid, Size, Tick};
use serde::{Deserialize, Serialize};

/// Process lifecycle within a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Arrival time has not been reached yet
    NotArrived,
    /// Arrived, but no contiguous window was free at the last admission pass
    AwaitingMemory,
    /// Holds memory and sits in the ready queue
    Ready,
    /// Dequeued and consuming its slice
    Running,
    /// Remaining time reached zero; memory has been released
    Completed,
}

/// Process descriptor supplied by the caller before a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub pid: Pid,
    pub arrival_time: Tick,
    pub burst_time: Tick,
    pub memory_required: Size,
}

impl ProcessSpec {
    pub fn new(pid: Pid, arrival_time: Tick, burst_time: Tick, memory_required: Size) -> Self {
        Self {
            pid,
            arrival_time,
            burst_time,
            memory_required,
        }
    }
}

/// Process record owned by the scheduler for the duration of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub pid: Pid,
    pub arrival_time: Tick,
    pub burst_time: Tick,
    pub memory_required: Size,
    pub remaining_time: Tick,
    pub start_time: Option<Tick>,
    pub completion_time: Option<Tick>,
    pub state: ProcessState,
}

impl From<ProcessSpec> for Process {
    fn from(spec: ProcessSpec) -> Self {
        Self {
            pid: spec.pid,
            arrival_time: spec.arrival_time,
            burst_time: spec.burst_time,
            memory_required: spec.memory_required,
            remaining_time: spec.burst_time,
            start_time: None,
            completion_time: None,
            state: ProcessState::NotArrived,
        }
    }
}

impl Process {
    /// Descriptor this record was created from
    pub fn spec(&self) -> ProcessSpec {
        ProcessSpec::new(self.pid, self.arrival_time, self.burst_time, self.memory_required)
    }

    pub fn is_completed(&self) -> bool {
        self.state == ProcessState::Completed
    }

    /// Completion time minus arrival time, once completed
    pub fn turnaround_time(&self) -> Option<Tick> {
        self.completion_time.map(|c| c - self.arrival_time)
    }

    /// Turnaround time minus burst time, once completed
    pub fn waiting_time(&self) -> Option<Tick> {
        self.turnaround_time().map(|t| t - self.burst_time)
    }

    /// Record the first dispatch. Later dispatches leave `start_time` untouched.
    pub(crate) fn mark_dispatched(&mut self, now: Tick) {
        debug_assert!(!self.is_completed(), "process {} dispatched after completion", self.pid);
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
        self.state = ProcessState::Running;
    }

    /// Consume up to `quantum` ticks of CPU and return the slice actually used
    pub(crate) fn run_slice(&mut self, quantum: Tick) -> Tick {
        let slice = self.remaining_time.min(quantum);
        self.remaining_time -= slice;
        slice
    }

    pub(crate) fn mark_completed(&mut self, now: Tick) {
        debug_assert_eq!(self.remaining_time, 0);
        debug_assert!(self.completion_time.is_none(), "process {} completed twice", self.pid);
        self.completion_time = Some(now);
        self.state = ProcessState::Completed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_from_spec() {
        let p = Process::from(ProcessSpec::new(7, 3, 9, 4));
        assert_eq!(p.remaining_time, 9);
        assert_eq!(p.start_time, None);
        assert_eq!(p.completion_time, None);
        assert_eq!(p.state, ProcessState::NotArrived);
        assert_eq!(p.spec(), ProcessSpec::new(7, 3, 9, 4));
    }

    #[test]
    fn test_slices_never_overrun_remaining() {
        let mut p = Process::from(ProcessSpec::new(1, 0, 5, 1));
        assert_eq!(p.run_slice(2), 2);
        assert_eq!(p.run_slice(2), 2);
        assert_eq!(p.run_slice(2), 1);
        assert_eq!(p.remaining_time, 0);
    }

    #[test]
    fn test_start_time_set_once() {
        let mut p = Process::from(ProcessSpec::new(1, 0, 5, 1));
        p.mark_dispatched(2);
        p.mark_dispatched(6);
        assert_eq!(p.start_time, Some(2));
    }

    #[test]
    fn test_derived_times() {
        let mut p = Process::from(ProcessSpec::new(1, 2, 4, 1));
        assert_eq!(p.turnaround_time(), None);
        p.mark_dispatched(3);
        p.run_slice(4);
        p.mark_completed(9);
        assert_eq!(p.turnaround_time(), Some(7));
        assert_eq!(p.waiting_time(), Some(3));
        assert!(p.is_completed());
    }
}
