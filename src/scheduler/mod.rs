/*!
 * Round-Robin Scheduler
 * Discrete-time stepper coupling CPU time-slicing with memory admission
 */

use crate::core::types::{Pid, Tick};
use crate::process::{Process, ProcessSpec};
use ahash::AHashMap;
use std::collections::VecDeque;
use tracing::info;

mod operations;
mod stats;
pub mod types;

pub use stats::{CompletedProcess, SimulationReport, UtilizationTracker};
pub use types::{SchedEvent, TimeQuantum};

/// Index into the scheduler's process arena
type ProcessIdx = usize;

/// Round-robin scheduler.
///
/// Owns every process record for the run. Queues hold arena indices, and the
/// memory backend only ever sees pids.
#[derive(Debug, Clone)]
pub struct Scheduler {
    quantum: TimeQuantum,
    time: Tick,

    // Arena in original batch order
    processes: Vec<Process>,

    // Not yet admitted, ascending arrival time (stable w.r.t. batch order)
    pending: Vec<ProcessIdx>,

    ready_queue: VecDeque<ProcessIdx>,

    // Completion order
    completed: Vec<ProcessIdx>,

    waiting_times: AHashMap<Pid, Tick>,
    turnaround_times: AHashMap<Pid, Tick>,

    utilization: UtilizationTracker,
    idle_ticks: Tick,
    dispatches: u64,
    timeline: Vec<SchedEvent>,
}

impl Scheduler {
    /// Create a scheduler for a batch. Nothing is admitted until the first step.
    pub fn new(quantum: TimeQuantum, specs: &[ProcessSpec]) -> Self {
        let processes: Vec<Process> = specs.iter().copied().map(Process::from).collect();

        let mut pending: Vec<ProcessIdx> = (0..processes.len()).collect();
        pending.sort_by_key(|&idx| processes[idx].arrival_time);

        info!(
            processes = processes.len(),
            quantum = quantum.as_ticks(),
            "Round-robin scheduler initialized"
        );

        Self {
            quantum,
            time: 0,
            pending,
            ready_queue: VecDeque::with_capacity(processes.len()),
            completed: Vec::with_capacity(processes.len()),
            waiting_times: AHashMap::with_capacity(processes.len()),
            turnaround_times: AHashMap::with_capacity(processes.len()),
            processes,
            utilization: UtilizationTracker::default(),
            idle_ticks: 0,
            dispatches: 0,
            timeline: Vec::new(),
        }
    }

    /// Current simulation clock
    pub fn now(&self) -> Tick {
        self.time
    }

    pub fn quantum(&self) -> TimeQuantum {
        self.quantum
    }

    /// No process is waiting for admission or CPU
    pub fn is_finished(&self) -> bool {
        self.pending.is_empty() && self.ready_queue.is_empty()
    }

    /// Process record by pid
    pub fn process(&self, pid: Pid) -> Option<&Process> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    /// All process records in original batch order
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Pids in ready-queue order, head first
    pub fn ready_pids(&self) -> Vec<Pid> {
        self.ready_queue
            .iter()
            .map(|&idx| self.processes[idx].pid)
            .collect()
    }

    /// Pids still waiting for arrival or memory, in admission-attempt order
    pub fn pending_pids(&self) -> Vec<Pid> {
        self.pending
            .iter()
            .map(|&idx| self.processes[idx].pid)
            .collect()
    }

    /// Completed processes in completion order
    pub fn completed(&self) -> impl Iterator<Item = &Process> + '_ {
        self.completed.iter().map(|&idx| &self.processes[idx])
    }

    pub fn waiting_time(&self, pid: Pid) -> Option<Tick> {
        self.waiting_times.get(&pid).copied()
    }

    pub fn turnaround_time(&self, pid: Pid) -> Option<Tick> {
        self.turnaround_times.get(&pid).copied()
    }

    /// Every event recorded so far
    pub fn timeline(&self) -> &[SchedEvent] {
        &self.timeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryInfo, MemoryManager};

    fn quantum(ticks: Tick) -> TimeQuantum {
        TimeQuantum::new(ticks).unwrap()
    }

    #[test]
    fn test_pending_sorted_stably_by_arrival() {
        let specs = [
            ProcessSpec::new(1, 4, 1, 1),
            ProcessSpec::new(2, 0, 1, 1),
            ProcessSpec::new(3, 4, 1, 1),
            ProcessSpec::new(4, 0, 1, 1),
        ];
        let scheduler = Scheduler::new(quantum(2), &specs);
        assert_eq!(scheduler.pending_pids(), vec![2, 4, 1, 3]);
        assert!(scheduler.ready_pids().is_empty());
        assert!(!scheduler.is_finished());
    }

    #[test]
    fn test_first_step_admits_and_dispatches() {
        let specs = [ProcessSpec::new(1, 0, 5, 3), ProcessSpec::new(2, 0, 2, 3)];
        let mut scheduler = Scheduler::new(quantum(2), &specs);
        let mut memory = MemoryManager::new(10).unwrap();

        let events = scheduler.step(&mut memory);
        assert_eq!(
            events,
            vec![
                SchedEvent::Admitted { time: 0, pid: 1, address: 0 },
                SchedEvent::Admitted { time: 0, pid: 2, address: 3 },
                SchedEvent::Dispatched { time: 0, pid: 1, slice: 2 },
                SchedEvent::Preempted { time: 2, pid: 1, remaining: 3 },
            ]
        );
        assert_eq!(scheduler.now(), 2);
        assert_eq!(scheduler.ready_pids(), vec![2, 1]);
        assert_eq!(memory.utilization(), 60.0);
    }

    #[test]
    fn test_idle_until_arrival() {
        let specs = [ProcessSpec::new(1, 3, 1, 1)];
        let mut scheduler = Scheduler::new(quantum(2), &specs);
        let mut memory = MemoryManager::new(4).unwrap();

        for expected in 0..3 {
            assert_eq!(
                scheduler.step(&mut memory),
                vec![SchedEvent::Idle { time: expected }]
            );
        }
        assert_eq!(scheduler.now(), 3);

        scheduler.step(&mut memory);
        assert!(scheduler.is_finished());
        assert_eq!(scheduler.process(1).unwrap().start_time, Some(3));
    }

    #[test]
    fn test_step_after_finish_is_noop() {
        let specs = [ProcessSpec::new(1, 0, 1, 1)];
        let mut scheduler = Scheduler::new(quantum(1), &specs);
        let mut memory = MemoryManager::new(1).unwrap();
        scheduler.step(&mut memory);
        assert!(scheduler.is_finished());
        assert!(scheduler.step(&mut memory).is_empty());
        assert_eq!(scheduler.now(), 1);
    }
}
