/*!
 * Command Dispatch
 * Maps a command name and positional string arguments onto an engine run
 *
 * Argument errors are raised before any simulation state is created.
 * Out-of-range values are clamped and listed in the report header.
 */

use crate::core::args::ArgReader;
use crate::core::config::{OutputFormat, SimConfig};
use crate::core::errors::{SimError, SimResult};
use crate::core::limits::{
    DEFAULT_DURATION, DEFAULT_FRAMES, DEFAULT_PAGING_PROCESSES, DEFAULT_PHILOSOPHERS,
    DEFAULT_PROCESS_COUNT, DEFAULT_QUANTUM, MAX_DURATION, MAX_FRAMES, MAX_PAGING_PROCESSES,
    MAX_PHILOSOPHERS, MAX_PROCESS_COUNT, MIN_DURATION, MIN_PHILOSOPHERS, TOTAL_REFERENCES,
};
use crate::core::report::{Report, RunHeader};
use crate::core::time::{CancelToken, SimClock};
use crate::core::types::Adjustment;
use crate::memory::{PagingReport, PagingSimulation, PolicyKind};
use crate::monitoring::RunSpan;
use crate::process::{priority_workload, round_robin_workload, ScheduleReport, Scheduler};
use crate::sync::{DiningConfig, DiningReport, DiningSimulation, LiveView};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// Simulation commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    RoundRobin,
    Priority,
    Paging,
    Philosophers,
}

impl Command {
    pub const ALL: [Command; 4] = [
        Command::RoundRobin,
        Command::Priority,
        Command::Paging,
        Command::Philosophers,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Command::RoundRobin => "roundrobin",
            Command::Priority => "priority",
            Command::Paging => "paging",
            Command::Philosophers => "philosophers",
        }
    }

    pub fn usage(&self) -> &'static str {
        match self {
            Command::RoundRobin => "roundrobin [numProcesses] [timeQuantum]",
            Command::Priority => "priority [numProcesses]",
            Command::Paging => "paging [FIFO|LRU] [numProcesses] [numFrames]",
            Command::Philosophers => "philosophers [numPhilosophers] [durationSeconds]",
        }
    }
}

impl FromStr for Command {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SimError::UnknownCommand(s.to_string()))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a run needs besides its arguments
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub config: SimConfig,
    pub cancel: CancelToken,
}

impl Context {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            cancel: CancelToken::new(),
        }
    }

    fn clock(&self) -> SimClock {
        SimClock::new(self.config.time_unit, self.cancel.clone())
    }
}

/// Run a command, print its report to `out` and return the summary line
///
/// Live progress and the philosophers table are written to `out` as well.
/// `out` is shared with the philosopher threads, so it must not be a handle
/// whose lock is already held by the calling thread.
pub fn execute(
    command: &str,
    args: &[String],
    ctx: &Context,
    out: &mut (dyn Write + Send),
) -> SimResult<String> {
    match command.parse::<Command>()? {
        Command::RoundRobin => emit(run_round_robin(args, ctx, out)?, ctx, out),
        Command::Priority => emit(run_priority(args, ctx, out)?, ctx, out),
        Command::Paging => emit(run_paging(args, ctx, out)?, ctx, out),
        Command::Philosophers => emit(run_philosophers(args, ctx, out)?, ctx, out),
    }
}

fn emit<R: Report>(report: R, ctx: &Context, out: &mut dyn Write) -> SimResult<String> {
    match ctx.config.output {
        OutputFormat::Text => writeln!(out, "\n{}", report)?,
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| SimError::Internal(format!("report serialization failed: {}", e)))?;
            writeln!(out, "{}", json)?;
        }
    }
    out.flush()?;
    Ok(report.summary())
}

/// Progress output goes to `out` only when live output is enabled
fn live<'a>(ctx: &Context, out: &'a mut dyn Write, sink: &'a mut io::Sink) -> &'a mut dyn Write {
    if ctx.config.live_output {
        out
    } else {
        sink
    }
}

fn finish<T>(run: &RunSpan, result: SimResult<T>) -> SimResult<T> {
    match &result {
        Ok(_) => run.record_result(true),
        Err(e) => run.record_error(&e.to_string()),
    }
    result
}

/// `roundrobin [numProcesses] [timeQuantum]`
pub fn run_round_robin(args: &[String], ctx: &Context, out: &mut dyn Write) -> SimResult<ScheduleReport> {
    let mut reader = ArgReader::new(args);
    let count = reader.strict_int(0, "number of processes", DEFAULT_PROCESS_COUNT as i64)?;
    let quantum = reader.strict_int(1, "time quantum", DEFAULT_QUANTUM as i64)?;
    let count = reader.within("number of processes", count, 1, MAX_PROCESS_COUNT as i64) as u32;
    let quantum = reader.at_least("time quantum", quantum, 1) as u64;

    let run = RunSpan::new(Command::RoundRobin.name());
    let _entered = run.enter();

    let processes = round_robin_workload(count, &mut ctx.config.rng());
    let scheduler = Scheduler::round_robin(quantum, ctx.clock());
    let mut sink = io::sink();
    let report = finish(&run, scheduler.run(processes, live(ctx, out, &mut sink)))?;

    let header = RunHeader::new("Round Robin Scheduling")
        .with_run_id(run.run_id())
        .param("Processes", count)
        .param("Time quantum", format!("{}s", quantum))
        .with_adjustments(reader.finish());
    Ok(report.with_header(header))
}

/// `priority [numProcesses]`
pub fn run_priority(args: &[String], ctx: &Context, out: &mut dyn Write) -> SimResult<ScheduleReport> {
    let mut reader = ArgReader::new(args);
    let count = reader.strict_int(0, "number of processes", DEFAULT_PROCESS_COUNT as i64)?;
    let count = reader.within("number of processes", count, 1, MAX_PROCESS_COUNT as i64) as u32;

    let run = RunSpan::new(Command::Priority.name());
    let _entered = run.enter();

    let processes = priority_workload(count, &mut ctx.config.rng());
    let scheduler = Scheduler::priority(ctx.clock());
    let mut sink = io::sink();
    let report = finish(&run, scheduler.run(processes, live(ctx, out, &mut sink)))?;

    let header = RunHeader::new("Priority Scheduling")
        .with_run_id(run.run_id())
        .param("Processes", count)
        .with_adjustments(reader.finish());
    Ok(report.with_header(header))
}

/// `paging [FIFO|LRU] [numProcesses] [numFrames]`
pub fn run_paging(args: &[String], ctx: &Context, out: &mut dyn Write) -> SimResult<PagingReport> {
    let mut reader = ArgReader::new(args);
    let policy = match reader.raw(0) {
        None => PolicyKind::default(),
        Some(raw) => PolicyKind::parse(raw).unwrap_or_else(|| {
            reader.note(Adjustment::new("replacement policy", raw, PolicyKind::default()));
            PolicyKind::default()
        }),
    };
    let processes = reader.lenient_int(1, "number of processes", DEFAULT_PAGING_PROCESSES as i64);
    let processes =
        reader.within("number of processes", processes, 1, MAX_PAGING_PROCESSES as i64) as usize;
    let frames = reader.lenient_int(2, "number of frames", DEFAULT_FRAMES as i64);
    let frames = reader.within("number of frames", frames, 1, MAX_FRAMES as i64) as usize;

    let run = RunSpan::new(Command::Paging.name());
    let _entered = run.enter();

    let mut rng = ctx.config.rng();
    let mut simulation = PagingSimulation::synthesize(policy, processes, frames, ctx.clock(), &mut rng);
    let references = simulation.random_references(TOTAL_REFERENCES, &mut rng);
    let mut sink = io::sink();
    let report = finish(&run, simulation.run(&references, live(ctx, out, &mut sink)))?;

    let header = RunHeader::new("Memory Paging")
        .with_run_id(run.run_id())
        .param("Algorithm", policy)
        .param("Processes", processes)
        .param("Memory", format!("{} frames", frames))
        .param("References", TOTAL_REFERENCES)
        .with_adjustments(reader.finish());
    Ok(report.with_header(header))
}

/// `philosophers [numPhilosophers] [durationSeconds]`
pub fn run_philosophers(
    args: &[String],
    ctx: &Context,
    out: &mut (dyn Write + Send),
) -> SimResult<DiningReport> {
    let mut reader = ArgReader::new(args);
    let seats = reader.lenient_int(0, "number of philosophers", DEFAULT_PHILOSOPHERS as i64);
    let seats = reader.within(
        "number of philosophers",
        seats,
        MIN_PHILOSOPHERS as i64,
        MAX_PHILOSOPHERS as i64,
    ) as usize;
    let duration = reader.lenient_int(1, "duration", DEFAULT_DURATION as i64);
    let duration = reader.within("duration", duration, MIN_DURATION as i64, MAX_DURATION as i64) as u64;

    let run = RunSpan::new(Command::Philosophers.name());
    let _entered = run.enter();

    let view = if ctx.config.live_output {
        LiveView::Console {
            sink: Box::new(&mut *out),
            clear_screen: true,
        }
    } else {
        LiveView::Headless
    };
    let simulation = DiningSimulation::new(DiningConfig::new(seats, duration), &ctx.config, ctx.cancel.clone());
    let report = finish(&run, simulation.run(view))?;

    let header = RunHeader::new("Dining Philosophers")
        .with_run_id(run.run_id())
        .param("Philosophers", seats)
        .param("Duration", format!("{}s", duration))
        .with_adjustments(reader.finish());
    Ok(report.with_header(header))
}
