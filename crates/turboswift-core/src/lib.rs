//! TurboSwift Core - front end and execution engine for the TurboSwift language
//!
//! TurboSwift scripts declare `contract`s whose methods build object trees
//! through a host toolkit bridge. This crate holds everything between raw
//! source text and a finished run; the command-line tool is a thin shell
//! around it.
//!
//! # Architecture
//!
//! ```text
//! Source ─→ Turbalance (line checks) ─→ findings? stop
//!    │
//!    └──→ Tokenizer → Parser → Program (contracts, raw method bodies)
//!                                 ↓
//!                    Interpreter (statement compiler + object model)
//!                                 ↓
//!                    Host bridge (e.g. headless `grey`)
//! ```
//!
//! # Error tiers
//!
//! - Turbalance findings are advisory values ([`diagnostics::Report`]); any
//!   finding blocks the run.
//! - Syntax errors abort parsing with the offending token index.
//! - Runtime errors abort the run; effects of finished statements remain.
//!
//! # Guarantees
//!
//! - **Deterministic**: same source produces the same findings, AST and output
//! - **Single-threaded**: one call stack, no suspension points

pub mod bridge;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod statement;
pub mod value;

use std::io::Write;

pub use bridge::{BridgeRegistry, HostClass, HostObject, Member};
pub use config::{RunConfig, StatementMode};
pub use diagnostics::{check, Finding, FindingKind, Report};
pub use error::{Error, Result};
pub use interpreter::{run_program, Interpreter, RunSummary};
pub use parser::ast::*;
pub use parser::tokenizer::{tokenize, Token};
pub use parser::{parse, parse_source};
pub use value::{ObjectRef, TurboObject, Value};

/// How a full pipeline run ended when no error was raised
#[derive(Debug)]
pub enum RunOutcome {
    /// Turbalance flagged the source; nothing was parsed or run
    Rejected(Report),
    /// The entry method returned normally
    Completed(RunSummary),
}

/// Run source text end to end: Turbalance gate, tokenize, parse, execute the entry method
///
/// # Errors
/// Syntax errors, a missing entry point, and runtime failures.
pub fn run_source<W: Write>(
    source: &str,
    config: &RunConfig,
    bridges: &BridgeRegistry,
    out: W,
) -> Result<RunOutcome> {
    let report = diagnostics::check(source);
    if !report.is_clean() {
        tracing::debug!(findings = report.len(), "turbalance rejected source");
        return Ok(RunOutcome::Rejected(report));
    }

    let program = parse(&tokenize(source))?;
    run_program(&program, config, bridges, out).map(RunOutcome::Completed)
}
