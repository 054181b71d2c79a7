//! tale: a heartbeat-driven text adventure
//!
//! Main entry point for the game.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tale_cli::input::help_text;
use tale_cli::{Input, InputError, Printer, TickBudget, load_options, parse_input};
use tale_core::Engine;
use tale_core::player::EntityId;

/// Heartbeat-driven text adventure
#[derive(Parser, Debug)]
#[command(name = "tale")]
#[command(author, version, about = "tale - a text adventure on a heartbeat", long_about = None)]
struct Args {
    /// Player name
    #[arg(short = 'u', long = "name")]
    name: Option<String>,

    /// Config file (defaults to <config dir>/tale/talerc)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Fast interval in milliseconds
    #[arg(long = "fast")]
    fast: Option<u64>,

    /// Command check interval in milliseconds
    #[arg(long = "command")]
    command: Option<u64>,

    /// Normal interval in milliseconds
    #[arg(long = "normal")]
    normal: Option<u64>,

    /// Slow interval in milliseconds
    #[arg(long = "slow")]
    slow: Option<u64>,

    /// Slowest interval in milliseconds
    #[arg(long = "slowest")]
    slowest: Option<u64>,

    /// Stop after this many heartbeat ticks
    #[arg(short = 't', long = "ticks")]
    ticks: Option<u64>,

    /// Print the effective options as JSON and exit
    #[arg(long = "print-config")]
    print_config: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    no_color: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut options = match load_options(args.config.as_deref()) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("tale: {}", e);
            return ExitCode::from(2);
        }
    };

    // Command-line flags override the config file
    if let Some(name) = args.name {
        options.name = name;
    }
    let hb = &mut options.heartbeat;
    for (flag, slot) in [
        (args.fast, &mut hb.fast),
        (args.command, &mut hb.command_check),
        (args.normal, &mut hb.normal),
        (args.slow, &mut hb.slow),
        (args.slowest, &mut hb.slowest),
    ] {
        if let Some(ms) = flag {
            *slot = ms;
        }
    }
    if args.no_color {
        options.color = false;
    }

    if args.print_config {
        return match serde_json::to_string_pretty(&options) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("tale: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let printer = Printer::new(options.color);
    let mut engine = Engine::new(&options);
    if let Err(e) = engine.start() {
        flush(&mut engine, &printer);
        eprintln!("tale: {}", e);
        return ExitCode::from(2);
    }
    flush(&mut engine, &printer);
    println!("Type 'help' for a list of commands.");

    run(&mut engine, &printer, args.ticks).await;
    flush(&mut engine, &printer);
    ExitCode::SUCCESS
}

/// Drive the heartbeat and read player input until the game ends
async fn run(engine: &mut Engine, printer: &Printer, ticks: Option<u64>) {
    let mut ticker = tokio::time::interval(engine.heartbeat().config().period());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut budget = TickBudget::new(ticks);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if budget.exhausted() {
                    info!(ticked = budget.used(), "tick limit reached");
                    break;
                }
                if let Err(e) = engine.pulse() {
                    warn!(error = %e, "heartbeat ended");
                    break;
                }
                budget.spend();
                flush(engine, printer);

                if engine.player().is_dead() {
                    println!("Game over.");
                    break;
                }
            }
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => {
                    if !handle_line(engine, printer, &line) {
                        break;
                    }
                }
                Ok(None) => stdin_open = false,
                Err(e) => {
                    warn!(error = %e, "stdin closed");
                    stdin_open = false;
                }
            },
        }
    }

    engine.stop();
}

/// Handle one line of input. Returns false when the player quits.
fn handle_line(engine: &mut Engine, printer: &Printer, line: &str) -> bool {
    let input = match parse_input(line, engine.commands()) {
        Ok(input) => input,
        Err(InputError::Empty) => return true,
        Err(e) => {
            println!("{}", e);
            return true;
        }
    };

    match input {
        Input::Slot(slot) => {
            if let Err(e) = engine.enqueue(slot) {
                println!("{}", e);
            }
        }
        Input::Attack => {
            engine.attack(EntityId::TRAINING_DUMMY);
        }
        Input::Move(code) => {
            // Failures are reported through the message log
            let _ = engine.move_code(code);
        }
        Input::Status => println!("{}", engine.player().summary()),
        Input::Dump => match serde_json::to_string_pretty(engine.player()) {
            Ok(json) => println!("{}", json),
            Err(e) => println!("{}", e),
        },
        Input::Help => println!("{}", help_text(engine.commands())),
        Input::Quit => return false,
    }

    flush(engine, printer);
    true
}

fn flush(engine: &mut Engine, printer: &Printer) {
    let labels = engine.drain_labels();
    if !labels.is_empty() {
        println!("{}", printer.labels(&labels));
    }
    for line in engine.drain_messages() {
        println!("{}", printer.line(&line));
    }
}
