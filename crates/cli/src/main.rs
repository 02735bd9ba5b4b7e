//! Y86-64 pipelined simulator CLI.
//!
//! This binary provides a single entry point for running object files. It performs:
//! 1. **Run:** Load a `.yo` file, run the pipeline to termination, print the final state and
//!    statistics. `--verify` also runs the sequential reference executor and compares.
//! 2. **Disassemble:** Decode a `.yo` file's memory image instruction by instruction.

use std::path::Path;
use std::{fs, process};

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use y86sim_core::config::Config;
use y86sim_core::isa::decode::decode_at;
use y86sim_core::isa::disasm::disassemble;
use y86sim_core::sim::loader;
use y86sim_core::sim::reference::SequentialCpu;
use y86sim_core::stats::STATS_SECTIONS;
use y86sim_core::{Memory, RunOutcome, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "y86sim",
    author,
    version,
    about = "Cycle-accurate Y86-64 five-stage pipeline simulator",
    long_about = "Run a Y86-64 object file (.yo) on the pipelined simulator.\n\nExamples:\n  y86sim run -f prog.yo\n  y86sim run -f prog.yo --trace --max-cycles 200\n  y86sim run -f prog.yo --config sim.json --verify\n  y86sim disasm -f prog.yo"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run an object file to completion.
    Run {
        /// Object file to load (must end in .yo).
        #[arg(short, long)]
        file: String,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<String>,

        /// Override the cycle limit.
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Log pipeline activity and every latch each cycle.
        #[arg(long)]
        trace: bool,

        /// Compare the final state against the sequential reference executor.
        #[arg(long)]
        verify: bool,

        /// Statistics sections to print (summary, hazards, instruction_mix, branch).
        #[arg(long, value_delimiter = ',')]
        stats: Vec<String>,
    },

    /// Disassemble the instructions in an object file.
    Disasm {
        /// Object file to decode (must end in .yo).
        #[arg(short, long)]
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let trace = matches!(cli.command, Commands::Run { trace: true, .. });
    init_logging(trace);

    match cli.command {
        Commands::Run {
            file,
            config,
            max_cycles,
            trace,
            verify,
            stats,
        } => cmd_run(&file, config.as_deref(), max_cycles, trace, verify, &stats),
        Commands::Disasm { file } => cmd_disasm(&file),
    }
}

/// Installs a `tracing` subscriber filtered by `RUST_LOG` (default `warn`).
fn init_logging(trace: bool) {
    let filter = if trace {
        EnvFilter::new("trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// Reads the JSON config (or defaults) and applies flag overrides.
fn load_config(path: Option<&str>, max_cycles: Option<u64>, trace: bool) -> Config {
    let mut config = match path {
        Some(p) => {
            let text = fs::read_to_string(p)
                .unwrap_or_else(|e| fatal(&format!("Could not read config '{p}': {e}")));
            Config::from_json(&text)
                .unwrap_or_else(|e| fatal(&format!("Invalid config '{p}': {e}")))
        }
        None => Config::default(),
    };
    if let Some(n) = max_cycles {
        config.general.max_cycles = n;
    }
    if trace {
        config.general.trace_instructions = true;
    }
    config
}

/// Runs the pipeline on `file` and reports the outcome.
///
/// Exit codes: 0 on termination, 1 on load/config errors, 2 on a `--verify` mismatch,
/// 3 when the cycle limit is reached.
fn cmd_run(
    file: &str,
    config_path: Option<&str>,
    max_cycles: Option<u64>,
    trace: bool,
    verify: bool,
    sections: &[String],
) {
    let config = load_config(config_path, max_cycles, trace);
    if let Some(bad) = sections
        .iter()
        .find(|s| !STATS_SECTIONS.contains(&s.as_str()))
    {
        eprintln!("Error: unknown stats section '{bad}' (expected one of {STATS_SECTIONS:?})");
        process::exit(1);
    }

    let mut sim = Simulator::new(&config);
    let loaded = sim.load_object_file(file).unwrap_or_else(|e| fatal(&e));
    info!(
        file,
        bytes = loaded,
        max_cycles = config.general.max_cycles,
        start_pc = config.general.start_pc,
        "object file loaded"
    );

    println!("[*] Running {file}");
    let outcome = sim.run();
    print!("{}", sim.report());
    sim.cpu.stats.print_sections(sections);

    if verify {
        let mut reference = SequentialCpu::from_memory(
            sim.loaded_image().clone(),
            config.general.start_pc,
        );
        let ref_stat = reference.run(config.general.max_cycles);
        let same_state = reference.arch_state() == sim.cpu.arch_state();
        let same_stat = match outcome {
            RunOutcome::Terminated(stat) => ref_stat == Some(stat),
            RunOutcome::CycleLimit => false,
        };
        if same_state && same_stat {
            println!("[*] Verify: pipeline matches the sequential reference");
        } else {
            error!(
                pipeline = ?outcome,
                reference = ?ref_stat,
                reference_steps = reference.steps,
                same_state,
                "pipeline does not match the sequential reference"
            );
            eprintln!("[!] Verify: MISMATCH");
            process::exit(2);
        }
    }

    // The simulator has already logged the limit.
    if outcome == RunOutcome::CycleLimit {
        process::exit(3);
    }
}

/// Prints every instruction in each data record of the loaded image, in file order.
fn cmd_disasm(file: &str) {
    let path = Path::new(file);
    if let Err(e) = loader::check_file_name(path) {
        fatal(&e);
    }
    let text = fs::read_to_string(path).unwrap_or_else(|e| fatal(&e));

    let mut mem = Memory::new(Config::default().memory.size_bytes);
    let records = loader::parse_object(&text, mem.capacity()).unwrap_or_else(|e| fatal(&e));
    for record in &records {
        if let Err(e) = mem.load(record.addr, &record.bytes) {
            fatal(&e);
        }
    }

    for record in &records {
        let end = record.addr + record.bytes.len() as u64;
        let mut pc = record.addr;
        while pc < end {
            let inst = decode_at(&mem, pc);
            println!("0x{pc:03x}: {}", disassemble(&inst));
            pc = inst.valp.max(pc + 1);
        }
    }
}

/// Reports a fatal error and exits with status 1.
fn fatal(err: &dyn std::fmt::Display) -> ! {
    eprintln!("\n[!] FATAL: {err}");
    process::exit(1);
}
