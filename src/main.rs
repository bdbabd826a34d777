/*!
 * RR-MemSim - Main Entry Point
 *
 * Thin driver around the simulation core:
 * - Load a JSON workload file, or prompt for one interactively
 * - Run the round-robin + first-fit simulation
 * - Render the report as text or JSON
 */

use miette::IntoDiagnostic;
use std::io::{self, BufRead, Write};
use tracing::info;

use rr_memsim::{init_tracing, ProcessSpec, SimError, SimResult, Workload};

const USAGE: &str = "usage: rr-memsim [WORKLOAD.json] [--json]";

fn main() -> miette::Result<()> {
    init_tracing();

    let mut json_output = false;
    let mut workload_path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json_output = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            path if workload_path.is_none() => workload_path = Some(path.to_string()),
            other => {
                return Err(
                    SimError::Workload(format!("unexpected argument '{other}'\n{USAGE}")).into(),
                )
            }
        }
    }

    let workload = match workload_path {
        Some(path) => {
            info!(path = %path, "Loading workload");
            Workload::from_path(&path)?
        }
        None => prompt_workload(&mut io::stdin().lock(), &mut io::stdout())?,
    };

    let report = workload.run()?;

    if json_output {
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;
        println!("{json}");
    } else {
        println!();
        println!("{report}");
    }

    Ok(())
}

/// Interactive workload entry: process count, per-process values, then memory and quantum
fn prompt_workload<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> SimResult<Workload> {
    writeln!(output, "\n--- Process Scheduling Simulator ---")?;
    writeln!(
        output,
        "Simulating Round Robin Scheduling with First-Fit Memory Allocation\n"
    )?;

    let count = prompt_number(input, output, "Enter total number of processes: ")?;
    let count = u32::try_from(count)
        .map_err(|_| SimError::Workload(format!("process count {count} exceeds the pid range")))?;
    let mut processes = Vec::with_capacity(count.min(1024) as usize);
    for pid in 1..=count {
        let arrival_time =
            prompt_number(input, output, &format!("Enter arrival time for Process {pid}: "))?;
        let burst_time =
            prompt_number(input, output, &format!("Enter burst time for Process {pid}: "))?;
        let memory_required = prompt_number(
            input,
            output,
            &format!("Enter memory required by Process {pid}: "),
        )?;
        processes.push(ProcessSpec::new(
            pid,
            arrival_time,
            burst_time,
            memory_required as usize,
        ));
    }

    let total_memory = prompt_number(input, output, "Enter total memory size: ")?;
    let time_quantum = prompt_number(input, output, "Enter time quantum for Round Robin: ")?;

    Ok(Workload {
        total_memory: total_memory as usize,
        time_quantum,
        processes,
    })
}

fn prompt_number<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> SimResult<u64> {
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(SimError::Workload("unexpected end of input".to_string()));
    }
    line.trim()
        .parse()
        .map_err(|_| SimError::Workload(format!("expected a non-negative integer, got '{}'", line.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_workload_assigns_sequential_pids() {
        let mut input = Cursor::new("2\n0\n4\n6\n1\n3\n2\n10\n2\n");
        let mut output = Vec::new();

        let workload = prompt_workload(&mut input, &mut output).unwrap();
        assert_eq!(workload.total_memory, 10);
        assert_eq!(workload.time_quantum, 2);
        assert_eq!(
            workload.processes,
            vec![ProcessSpec::new(1, 0, 4, 6), ProcessSpec::new(2, 1, 3, 2)]
        );

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("Enter memory required by Process 2: "));
    }

    #[test]
    fn test_prompt_rejects_garbage() {
        let mut input = Cursor::new("two\n");
        let mut output = Vec::new();
        assert!(matches!(
            prompt_workload(&mut input, &mut output),
            Err(SimError::Workload(_))
        ));
    }

    #[test]
    fn test_prompt_rejects_count_beyond_pid_range() {
        let mut input = Cursor::new(format!("{}\n", u64::from(u32::MAX) + 1));
        let mut output = Vec::new();
        assert!(matches!(
            prompt_workload(&mut input, &mut output),
            Err(SimError::Workload(msg)) if msg.contains("exceeds the pid range")
        ));
    }

    #[test]
    fn test_prompt_rejects_truncated_input() {
        let mut input = Cursor::new("1\n0\n");
        let mut output = Vec::new();
        assert!(prompt_workload(&mut input, &mut output).is_err());
    }
}
