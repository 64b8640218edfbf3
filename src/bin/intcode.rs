// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Run Intcode programs, either alone, as a ring of amplifiers, or as a puzzle solution

use std::error::Error;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use itertools::Itertools;

use intcode::host::{RingConfig, max_signal};
use intcode::prelude::*;
use intcode::puzzles::{PuzzleError, registry};

const VERSION: &str = concat!(env!("CARGO_CRATE_NAME"), '-', env!("CARGO_PKG_VERSION"));

#[derive(Parser)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = VERSION)]
#[command(about = "Intcode runner", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a program to completion, printing its outputs
    Run {
        #[arg(help = "The program to run")]
        program: PathBuf,
        #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
        #[arg(help = "Comma-separated values to provide as input")]
        input: Vec<i64>,
        #[arg(short, long)]
        #[arg(help = "Print each executed instruction to stderr")]
        trace: bool,
    },
    /// Find the phase setting sequence that maximizes a ring of amplifiers' output
    Amplify {
        #[arg(help = "The amplifier controller software")]
        program: PathBuf,
        #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
        #[arg(help = "Phase settings to permute [default: 0-4, or 5-9 with --feedback]")]
        phases: Vec<i64>,
        #[arg(short, long)]
        #[arg(help = "Use the feedback loop phase settings")]
        feedback: bool,
        #[arg(long, default_value_t = 5000)]
        #[arg(help = "Milliseconds an amplifier may wait for input before giving up")]
        timeout_ms: u64,
        #[arg(long, default_value_t = 1)]
        #[arg(help = "Values that may be in flight between two amplifiers")]
        capacity: usize,
    },
    /// Solve an Advent of Code puzzle
    Solve {
        #[arg(short, long, default_value_t = 2019)]
        year: u16,
        #[arg(short, long)]
        day: u8,
        #[arg(short, long)]
        #[arg(help = "The part to solve [default: both]")]
        part: Option<u8>,
        #[arg(help = "The puzzle input")]
        input: PathBuf,
    },
}

fn load(path: &Path) -> Result<Interpreter, Box<dyn Error>> {
    Ok(read_to_string(path)?.trim().parse()?)
}

fn run(program: &Path, input: Vec<i64>, trace: bool) -> Result<(), Box<dyn Error>> {
    let mut interp = load(program)?;
    if trace {
        interp.start_trace();
    }
    let result = interp.run_through_inputs(input);
    if let Some(trace) = interp.end_trace() {
        for instr in trace.0 {
            eprintln!("{instr}");
        }
    }
    let (outputs, state) = result?;
    println!("{}", outputs.iter().join(","));
    if state == State::Awaiting {
        log::warn!("program is still waiting for input");
    }
    Ok(())
}

fn amplify(
    program: &Path,
    phases: Vec<i64>,
    feedback: bool,
    config: &RingConfig,
) -> Result<(), Box<dyn Error>> {
    let interp = load(program)?;
    let phases = match (phases.is_empty(), feedback) {
        (false, _) => phases,
        (true, false) => (0..5).collect(),
        (true, true) => (5..10).collect(),
    };
    let (signal, order) = max_signal(&interp, phases, config)?;
    println!("{signal} (phases {})", order.iter().join(","));
    Ok(())
}

fn solve(year: u16, day: u8, part: Option<u8>, input: &Path) -> Result<(), Box<dyn Error>> {
    let solvers = registry();
    let solver = solvers
        .get(&(year, day))
        .ok_or_else(|| format!("no solver for {year} day {day}"))?;
    let input = read_to_string(input)?;
    log::info!("solving {year} day {day}: {}", solver.title());
    for part in part.map_or_else(|| vec![1, 2], |p| vec![p]) {
        match solver.solve(input.trim(), part) {
            Ok(answer) if answer.contains('\n') => println!("part {part}:\n{answer}"),
            Ok(answer) => println!("part {part}: {answer}"),
            Err(e @ PuzzleError::BadPart(_)) => return Err(e.into()),
            Err(e) => eprintln!("part {part} failed: {e}"),
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match Args::parse().command {
        Command::Run {
            program,
            input,
            trace,
        } => run(&program, input, trace),
        Command::Amplify {
            program,
            phases,
            feedback,
            timeout_ms,
            capacity,
        } => {
            let config = RingConfig {
                capacity,
                timeout: Duration::from_millis(timeout_ms),
            };
            amplify(&program, phases, feedback, &config)
        }
        Command::Solve {
            year,
            day,
            part,
            input,
        } => solve(year, day, part, &input),
    }
}
