use clap::Parser;
use std::error::Error;
use std::io::{self, Read};
use std::path::PathBuf;
use tape_machine::{
    analyze, parse, parse_tape, programs, Instruction, MachineConfig, ProgramLoader, Snapshot,
    Symbol, TapeMachine, TransitionTable, DEFAULT_BLANK_SYMBOL, MAX_EXECUTION_STEPS, PROGRAMS,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Runs a single-tape Turing machine described by five-tuple instructions.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  tm-cli --example flip-run -d
  tm-cli -i 'q1 1 0 R q2, q2 0 1 R q1, q2 b b H halt' -t '1 0 1 b'
  cat increment.tm | tm-cli -t '1 0 1 1' -s right")]
struct Cli {
    /// Instruction file (.tm) to execute
    #[clap(short, long, conflicts_with_all = ["instructions", "example"])]
    program: Option<PathBuf>,

    /// Instructions given inline, separated by spaces, commas or pipes
    #[clap(short, long, conflicts_with = "example")]
    instructions: Option<String>,

    /// Run one of the built-in sample programs
    #[clap(short, long)]
    example: Option<String>,

    /// List the built-in sample programs and exit
    #[clap(long)]
    list: bool,

    /// Initial tape, symbols separated by spaces, commas or pipes
    #[clap(short, long)]
    tape: Option<String>,

    /// Start state, defaults to the state of the first instruction
    #[clap(short, long)]
    state: Option<String>,

    /// Symbol read from cells that were never written
    #[clap(short, long, default_value = DEFAULT_BLANK_SYMBOL)]
    blank: String,

    /// Give up after this many steps
    #[clap(short, long, default_value_t = MAX_EXECUTION_STEPS)]
    max_steps: usize,

    /// Print each step of the execution
    #[clap(short = 'd', long)]
    debug: bool,

    /// Print each step as a JSON line
    #[clap(long)]
    json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Everything a run needs once the command line has been resolved.
struct Setup {
    instructions: Vec<Instruction>,
    tape: Vec<Symbol>,
    state: String,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.list {
        for program in PROGRAMS {
            println!("{:<18} {}", program.name, program.description);
        }
        return;
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let setup = load_setup(cli)?;
    let table = TransitionTable::new(setup.instructions);

    for warning in analyze(&table, &setup.state, &setup.tape) {
        warn!("{}", warning);
    }

    let config = MachineConfig {
        blank: cli.blank.clone(),
        max_steps: cli.max_steps,
    };
    let mut machine = TapeMachine::with_config(&table, setup.tape, setup.state, config);
    info!(rules = table.len(), state = machine.state(), "starting machine");

    print_snapshot(cli, &machine.snapshot());
    let outcome = machine.run_with(cli.max_steps, |snapshot| print_snapshot(cli, snapshot));

    if let Some(text) = render_final_tape(cli, &machine.snapshot()) {
        println!("{}", text);
    }

    outcome.into_result(machine.step_count())?;
    info!(steps = machine.step_count(), "machine halted");

    Ok(())
}

fn print_snapshot(cli: &Cli, snapshot: &Snapshot<'_>) {
    if let Some(line) = render_snapshot(cli, snapshot) {
        println!("{}", line);
    }
}

/// Renders one snapshot according to `--json` and `--debug`, or nothing in plain mode.
fn render_snapshot(cli: &Cli, snapshot: &Snapshot<'_>) -> Option<String> {
    if cli.json {
        serde_json::to_string(snapshot)
            .map_err(|e| warn!("failed to serialize snapshot: {}", e))
            .ok()
    } else if cli.debug {
        Some(snapshot.to_string())
    } else {
        None
    }
}

/// Renders the closing tape line. With `--json` the stream already ends with the final
/// snapshot, so nothing is added.
fn render_final_tape(cli: &Cli, snapshot: &Snapshot<'_>) -> Option<String> {
    if cli.json {
        None
    } else if cli.debug {
        Some(format!("\nFinal tape:\n{}", snapshot.tape_text()))
    } else {
        Some(snapshot.tape_text())
    }
}

/// Resolves instructions, tape and start state from a sample program, a file, inline text or
/// stdin, in that order. Explicit `--tape` and `--state` always win.
fn load_setup(cli: &Cli) -> Result<Setup, Box<dyn Error>> {
    let (instructions, sample_tape, sample_state) = if let Some(name) = &cli.example {
        let info = programs::find(name).ok_or_else(|| format!("Unknown example: {}", name))?;
        (
            info.instructions()?,
            Some(info.tape()?),
            Some(info.initial_state.to_string()),
        )
    } else if let Some(path) = &cli.program {
        (ProgramLoader::load_instructions(path)?, None, None)
    } else if let Some(text) = &cli.instructions {
        (parse(text)?, None, None)
    } else if atty::isnt(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        (ProgramLoader::load_instructions_from_string(&buffer)?, None, None)
    } else {
        return Err("No instructions given, use --program, --instructions or --example".into());
    };

    let tape = match &cli.tape {
        Some(text) => parse_tape(text)?,
        None => sample_tape.unwrap_or_default(),
    };

    let state = cli
        .state
        .clone()
        .or(sample_state)
        .or_else(|| instructions.first().map(|i| i.current_state.clone()))
        .ok_or("No start state given")?;

    Ok(Setup {
        instructions,
        tape,
        state,
    })
}
