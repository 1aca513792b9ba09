use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;
use turboswift_core::{
    check, parse_source, run_source, tokenize, BridgeRegistry, Report, RunConfig, RunOutcome,
    StatementMode,
};

/// TurboSwift - run, check and inspect TurboSwift programs
#[derive(Parser)]
#[command(name = "turboswift", version, about, long_about = None)]
struct Cli {
    /// Suppress informational output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check, parse and execute a program's entry method
    Run {
        /// Path to .tsw file
        file: PathBuf,
        /// Contract to instantiate
        #[arg(long, default_value = "App")]
        entry_contract: String,
        /// Method to call on the entry contract
        #[arg(long, default_value = "main")]
        entry_method: String,
        /// Skip unrecognized statements instead of failing
        #[arg(long)]
        lenient: bool,
        /// Maximum nesting of interpreted calls
        #[arg(long, default_value_t = 256)]
        max_call_depth: usize,
    },

    /// Run the Turbalance line checks
    Check {
        /// Path to .tsw file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the token stream
    Tokens {
        /// Path to .tsw file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the parsed contracts as JSON
    Parse {
        /// Path to .tsw file
        file: PathBuf,
    },

    /// Compute the SHA-256 fingerprint of a program's AST
    Hash {
        /// Path to .tsw file
        file: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match cli.command {
        Commands::Run {
            file,
            entry_contract,
            entry_method,
            lenient,
            max_call_depth,
        } => {
            let config = RunConfig {
                entry_contract,
                entry_method,
                mode: if lenient {
                    StatementMode::Lenient
                } else {
                    StatementMode::Strict
                },
                max_call_depth,
            };
            cmd_run(&file, &config)
        }
        Commands::Check { file, json } => cmd_check(&file, json, cli.quiet),
        Commands::Tokens { file, json } => cmd_tokens(&file, json),
        Commands::Parse { file } => cmd_parse(&file),
        Commands::Hash { file } => cmd_hash(&file),
        Commands::Version => {
            println!(
                "turboswift {} (turboswift-core {})",
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_VERSION")
            );
            0
        }
    };

    process::exit(exit_code);
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

// ── Helpers ───────────────────────────────────────────────

fn report_error(message: impl std::fmt::Display) {
    eprintln!("{}: {}", "error".red().bold(), message);
}

/// Read a source file; `Err` carries the exit code
fn read_source(path: &Path) -> Result<String, i32> {
    std::fs::read_to_string(path).map_err(|e| {
        report_error(format!("cannot read '{}': {}", path.display(), e));
        2
    })
}

fn print_findings(report: &Report) {
    for finding in &report.findings {
        eprintln!("{}", finding.to_string().yellow());
    }
}

// ── Commands ──────────────────────────────────────────────

fn cmd_run(file: &Path, config: &RunConfig) -> i32 {
    let source = match read_source(file) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let bridges = BridgeRegistry::with_grey();
    let stdout = io::stdout();
    match run_source(&source, config, &bridges, stdout.lock()) {
        Ok(RunOutcome::Completed(summary)) => {
            info!(
                file = %file.display(),
                statements = summary.statements_executed,
                "run finished"
            );
            0
        }
        Ok(RunOutcome::Rejected(report)) => {
            print_findings(&report);
            eprintln!("Fix errors before running.");
            1
        }
        Err(e) if e.is_syntax() => {
            report_error(format!("Parsing error: {}", e));
            1
        }
        Err(e) => {
            report_error(e);
            1
        }
    }
}

fn cmd_check(file: &Path, json: bool, quiet: bool) -> i32 {
    let source = match read_source(file) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let report = check(&source);
    if json {
        let output = serde_json::json!({
            "clean": report.is_clean(),
            "count": report.len(),
            "findings": report.findings,
        });
        println!("{}", output);
    } else if report.is_clean() {
        if !quiet {
            println!("No syntax errors found.");
        }
    } else {
        print_findings(&report);
    }

    if report.is_clean() {
        0
    } else {
        1
    }
}

fn cmd_tokens(file: &Path, json: bool) -> i32 {
    let source = match read_source(file) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let tokens = tokenize(&source);
    if json {
        match serde_json::to_string(&tokens) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                report_error(e);
                return 1;
            }
        }
    } else {
        for token in &tokens {
            println!("{}", token);
        }
    }
    0
}

fn cmd_parse(file: &Path) -> i32 {
    let source = match read_source(file) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let program = match parse_source(&source) {
        Ok(p) => p,
        Err(e) => {
            report_error(format!("Parsing error: {}", e));
            return 1;
        }
    };
    match serde_json::to_string_pretty(&program) {
        Ok(out) => {
            println!("{}", out);
            0
        }
        Err(e) => {
            report_error(e);
            1
        }
    }
}

fn cmd_hash(file: &Path) -> i32 {
    let source = match read_source(file) {
        Ok(s) => s,
        Err(code) => return code,
    };

    match parse_source(&source) {
        Ok(program) => {
            println!("{}", program.fingerprint());
            0
        }
        Err(e) => {
            report_error(format!("Parsing error: {}", e));
            1
        }
    }
}
