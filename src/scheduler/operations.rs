/*!
 * Scheduler Core Operations
 * Admission, dispatch, and idle stepping
 */

use super::types::SchedEvent;
use super::{ProcessIdx, Scheduler, SimulationReport};
use crate::core::types::{SimResult, Tick};
use crate::memory::{Allocator, MemoryBackend};
use crate::process::{validate_batch, Process, ProcessSpec, ProcessState};
use tracing::{debug, info, instrument, trace};

impl Scheduler {
    /// Run one iteration: admission pass, then a single dispatch or idle tick.
    ///
    /// Returns the events produced by this iteration, in order.
    pub fn step<M: MemoryBackend>(&mut self, memory: &mut M) -> Vec<SchedEvent> {
        let mut events = Vec::new();
        if self.is_finished() {
            return events;
        }

        self.admit(memory, &mut events);

        // Memory held during the interval this iteration covers
        let held = memory.utilization();

        let advanced = match self.ready_queue.pop_front() {
            Some(idx) => self.dispatch(idx, memory, &mut events),
            None => self.idle(&mut events),
        };

        self.utilization.record(held, advanced);
        self.timeline.extend_from_slice(&events);
        events
    }

    /// Drive the batch to completion and aggregate the report.
    ///
    /// Fails up front if the batch is malformed or some process can never fit in
    /// `memory`, since such a process would otherwise be retried forever.
    #[instrument(skip_all, fields(processes = self.processes.len(), quantum = self.quantum.as_ticks()))]
    pub fn run<M: MemoryBackend>(mut self, memory: &mut M) -> SimResult<SimulationReport> {
        let (total, _, _) = memory.info();
        let specs: Vec<ProcessSpec> = self.processes.iter().map(Process::spec).collect();
        validate_batch(&specs, total)?;

        info!(total_memory = total, "Simulation started");
        while !self.is_finished() {
            self.step(memory);
        }

        let report = self.into_report(memory.utilization());
        info!(
            total_time = report.total_time,
            dispatches = report.dispatches,
            idle_ticks = report.idle_ticks,
            avg_waiting = report.average_waiting_time,
            avg_turnaround = report.average_turnaround_time,
            "Simulation complete"
        );
        Ok(report)
    }

    /// Try to place every arrived pending process, in arrival order.
    ///
    /// A failed placement leaves the process pending without blocking later
    /// candidates in the same pass.
    fn admit<A: Allocator>(&mut self, memory: &mut A, events: &mut Vec<SchedEvent>) {
        let now = self.time;
        let processes = &mut self.processes;
        let ready_queue = &mut self.ready_queue;

        self.pending.retain(|&idx| {
            let process = &mut processes[idx];
            if process.arrival_time > now {
                return true;
            }

            match memory.allocate(process.pid, process.memory_required) {
                Some(address) => {
                    process.state = ProcessState::Ready;
                    ready_queue.push_back(idx);
                    debug!(pid = process.pid, address, time = now, "Process admitted");
                    events.push(SchedEvent::Admitted {
                        time: now,
                        pid: process.pid,
                        address,
                    });
                    false
                }
                None => {
                    if process.state != ProcessState::AwaitingMemory {
                        debug!(
                            pid = process.pid,
                            required = process.memory_required,
                            time = now,
                            "Admission deferred, no contiguous window"
                        );
                    }
                    process.state = ProcessState::AwaitingMemory;
                    true
                }
            }
        });
    }

    /// Give the CPU to the process at `idx` for one slice. Returns ticks consumed.
    fn dispatch<A: Allocator>(
        &mut self,
        idx: ProcessIdx,
        memory: &mut A,
        events: &mut Vec<SchedEvent>,
    ) -> Tick {
        let started_at = self.time;
        let process = &mut self.processes[idx];
        let pid = process.pid;

        process.mark_dispatched(started_at);
        let slice = process.run_slice(self.quantum.as_ticks());
        self.time += slice;
        self.dispatches += 1;

        events.push(SchedEvent::Dispatched {
            time: started_at,
            pid,
            slice,
        });

        if process.remaining_time == 0 {
            process.mark_completed(self.time);
            let freed = memory.deallocate(pid);
            debug_assert_eq!(freed, process.memory_required, "pid {pid} held a partial window");

            let turnaround = self.time - process.arrival_time;
            let waiting = turnaround - process.burst_time;
            self.turnaround_times.insert(pid, turnaround);
            self.waiting_times.insert(pid, waiting);
            self.completed.push(idx);

            debug!(pid, time = self.time, turnaround, waiting, "Process completed");
            events.push(SchedEvent::Completed {
                time: self.time,
                pid,
            });
        } else {
            process.state = ProcessState::Ready;
            let remaining = process.remaining_time;
            self.ready_queue.push_back(idx);

            debug!(pid, time = self.time, remaining, "Process preempted");
            events.push(SchedEvent::Preempted {
                time: self.time,
                pid,
                remaining,
            });
        }

        slice
    }

    /// Nothing is ready but work remains: advance the clock by one tick
    fn idle(&mut self, events: &mut Vec<SchedEvent>) -> Tick {
        trace!(time = self.time, pending = self.pending.len(), "CPU idle");
        events.push(SchedEvent::Idle { time: self.time });
        self.time += 1;
        self.idle_ticks += 1;
        1
    }
}
