/*!
 * Scheduler Statistics
 * Per-process timing, utilization sampling, and the final report
 */

use super::types::SchedEvent;
use super::Scheduler;
use crate::core::types::{Pid, Size, Tick};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Time-weighted memory utilization samples
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UtilizationTracker {
    peak: f64,
    weighted_sum: f64,
    ticks: Tick,
}

impl UtilizationTracker {
    /// Record that `percentage` of memory was held for `ticks` ticks
    pub fn record(&mut self, percentage: f64, ticks: Tick) {
        if ticks == 0 {
            return;
        }
        self.peak = self.peak.max(percentage);
        self.weighted_sum += percentage * ticks as f64;
        self.ticks += ticks;
    }

    pub fn peak(&self) -> f64 {
        self.peak
    }

    /// Mean utilization over all recorded ticks
    pub fn average(&self) -> f64 {
        if self.ticks == 0 {
            0.0
        } else {
            self.weighted_sum / self.ticks as f64
        }
    }
}

/// Timing summary for one completed process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedProcess {
    pub pid: Pid,
    pub arrival_time: Tick,
    pub burst_time: Tick,
    pub memory_required: Size,
    pub start_time: Tick,
    pub completion_time: Tick,
    pub waiting_time: Tick,
    pub turnaround_time: Tick,
}

/// Result of a full simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Completion order
    pub completed: Vec<CompletedProcess>,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    /// Utilization after the run. All memory has been released by then, so this is 0.
    pub memory_utilization: f64,
    pub peak_memory_utilization: f64,
    /// Time-weighted over the whole run, idle ticks included
    pub average_memory_utilization: f64,
    pub total_time: Tick,
    pub idle_ticks: Tick,
    pub dispatches: u64,
    pub timeline: Vec<SchedEvent>,
}

impl SimulationReport {
    pub fn process(&self, pid: Pid) -> Option<&CompletedProcess> {
        self.completed.iter().find(|p| p.pid == pid)
    }

    /// Pids in completion order
    pub fn completion_order(&self) -> Vec<Pid> {
        self.completed.iter().map(|p| p.pid).collect()
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Execution Results:")?;
        for p in &self.completed {
            writeln!(
                f,
                "Process {}: Start Time = {}, Completion Time = {}, Burst = {}, Memory = {}",
                p.pid, p.start_time, p.completion_time, p.burst_time, p.memory_required
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Average Waiting Time: {:.2} units", self.average_waiting_time)?;
        writeln!(
            f,
            "Average Turnaround Time: {:.2} units",
            self.average_turnaround_time
        )?;
        writeln!(f, "Final Memory Utilization: {:.2}%", self.memory_utilization)?;
        writeln!(
            f,
            "Peak Memory Utilization: {:.2}%",
            self.peak_memory_utilization
        )?;
        write!(
            f,
            "Average Memory Utilization: {:.2}% over {} ticks ({} idle)",
            self.average_memory_utilization, self.total_time, self.idle_ticks
        )
    }
}

fn mean(values: impl ExactSizeIterator<Item = Tick>) -> f64 {
    let count = values.len();
    if count == 0 {
        return 0.0;
    }
    values.sum::<Tick>() as f64 / count as f64
}

impl Scheduler {
    /// Aggregate per-process statistics once the batch has finished
    pub(super) fn into_report(self, final_utilization: f64) -> SimulationReport {
        debug_assert!(self.is_finished());

        let completed: Vec<CompletedProcess> = self
            .completed()
            .filter_map(|p| {
                Some(CompletedProcess {
                    pid: p.pid,
                    arrival_time: p.arrival_time,
                    burst_time: p.burst_time,
                    memory_required: p.memory_required,
                    start_time: p.start_time?,
                    completion_time: p.completion_time?,
                    waiting_time: self.waiting_time(p.pid)?,
                    turnaround_time: self.turnaround_time(p.pid)?,
                })
            })
            .collect();
        debug_assert_eq!(completed.len(), self.processes.len());

        SimulationReport {
            average_waiting_time: mean(self.waiting_times.values().copied()),
            average_turnaround_time: mean(self.turnaround_times.values().copied()),
            memory_utilization: final_utilization,
            peak_memory_utilization: self.utilization.peak(),
            average_memory_utilization: self.utilization.average(),
            total_time: self.time,
            idle_ticks: self.idle_ticks,
            dispatches: self.dispatches,
            timeline: self.timeline,
            completed,
        }
    }
}
