use clap::Parser;
use std::error::Error;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::{fs, process};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;
use tursim::{
    ProgramManager, Report, SimulationConfig, Simulator, SpecificationLoader,
    MAX_EXECUTION_STEPS,
};

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
#[clap(after_help = "EXAMPLES:
  tursim --spec machine.json --input tape.in
  echo aabb | tursim --program anbn
  tursim --program binary-increment --tape 1011 --debug")]
struct Cli {
    /// The JSON specification file to execute
    #[clap(short, long, conflicts_with = "program")]
    spec: Option<PathBuf>,

    /// Run one of the built-in programs instead of a specification file
    #[clap(long)]
    program: Option<String>,

    /// File holding the input tape. Read from stdin when omitted and piped
    #[clap(short, long)]
    input: Option<PathBuf>,

    /// The input tape given inline
    #[clap(short, long, conflicts_with = "input")]
    tape: Option<String>,

    /// Where the trimmed final tape is written
    #[clap(short, long, default_value = "tape.txt")]
    output: PathBuf,

    /// Steps attempted before the machine is rejected
    #[clap(long, default_value_t = MAX_EXECUTION_STEPS)]
    max_steps: usize,

    /// Print each step of the execution
    #[clap(short = 'd', long)]
    debug: bool,

    /// Print the whole report as JSON
    #[clap(long)]
    json: bool,

    /// List the built-in programs and exit
    #[clap(long)]
    list: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[clap(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        error!(error = %e, "simulation failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    if cli.list {
        for name in ProgramManager::list_program_names() {
            let info = ProgramManager::get_program_info(name)?;
            println!(
                "{} (initial state {}, {} states, {} transitions)",
                info.name, info.initial_state, info.state_count, info.transition_count
            );
        }
        return Ok(());
    }

    let specification = load_specification(cli)?;
    let input = load_input(cli)?;
    debug!(bytes = input.len(), "loaded input");

    let simulator = Simulator::new(SimulationConfig {
        max_steps: cli.max_steps,
        trace: cli.debug,
    });
    let report = simulator.simulate(&specification, &input);

    if let Some(tape) = &report.tape {
        fs::write(&cli.output, tape).map_err(|e| {
            format!("Failed to write tape to {}: {}", cli.output.display(), e)
        })?;
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &cli.output);
    }

    Ok(())
}

/// Resolves the specification text from `--spec` or `--program`.
fn load_specification(cli: &Cli) -> Result<String, Box<dyn Error>> {
    match (&cli.spec, &cli.program) {
        (Some(path), _) => Ok(SpecificationLoader::read_text(path)?),
        (None, Some(name)) => Ok(ProgramManager::get_program_text_by_name(name)?.to_string()),
        (None, None) => Err("either --spec or --program is required".into()),
    }
}

/// Resolves the input from a file, the inline tape, or piped stdin, in that order.
fn load_input(cli: &Cli) -> Result<String, Box<dyn Error>> {
    if let Some(path) = &cli.input {
        Ok(SpecificationLoader::read_text(path)?)
    } else if let Some(tape) = &cli.tape {
        Ok(tape.clone())
    } else if atty::isnt(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("Failed to read from stdin: {}", e))?;
        Ok(buffer)
    } else {
        Ok(String::new())
    }
}

fn print_report(report: &Report, output: &Path) {
    if !report.trace.is_empty() {
        for snapshot in &report.trace {
            println!(
                "Step: {}, State: {}, Tape: {}, Head: {}",
                snapshot.step, snapshot.state, snapshot.tape, snapshot.head
            );
        }
        println!();
    }

    println!("{}", report.message);
    if let Some(tape) = &report.tape {
        println!("Final tape saved to '{}': '{}'", output.display(), tape);
    }
    println!("{}", report.code());
}
