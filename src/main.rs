/*!
 * OS Simulation Engine - Main Entry Point
 *
 * `ossim <command> [args...]` runs one simulation and prints its report.
 * Ctrl-C stops the run at its next loop boundary; the partial report is
 * still printed.
 */

use std::io;
use tracing::{error, info, warn};

use os_sim_engine::{execute, init_tracing, Command, Context, SimConfig, SimError};

#[tokio::main]
async fn main() -> miette::Result<()> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let Some(command) = args.next() else {
        print_usage();
        return Ok(());
    };
    let args: Vec<String> = args.collect();

    let ctx = Context::new(SimConfig::from_env());
    info!(command = %command, args = ?args, time_unit = ?ctx.config.time_unit, "Starting simulation");

    let cancel = ctx.cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping simulation");
            cancel.cancel();
        }
    });

    let outcome = tokio::task::spawn_blocking(move || {
        // Unlocked handle: philosopher threads render through it while this thread waits
        execute(&command, &args, &ctx, &mut io::stdout())
    })
    .await
    .map_err(|e| SimError::Internal(format!("simulation task failed: {}", e)))?;

    match outcome {
        Ok(summary) => {
            println!("{}", summary);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Simulation failed");
            if matches!(e, SimError::UnknownCommand(_)) {
                print_usage();
            }
            Err(e.into())
        }
    }
}

fn print_usage() {
    println!("Usage: ossim <command> [args...]");
    println!("Commands:");
    for command in Command::ALL {
        println!("  {}", command.usage());
    }
}
