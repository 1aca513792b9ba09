//! Turbalance - line-based pre-flight checks
//!
//! Runs on raw source text before tokenization and reports brace balance
//! problems and a few malformed-declaration heuristics, one finding per
//! problem, keyed to a 1-based line number.
//!
//! # Scope
//!
//! Findings are advisory. The pass works line by line with plain substring
//! tests, so it can both miss errors the parser rejects and flag lines the
//! parser accepts. Callers treat any finding as a reason not to run.

use serde::Serialize;

// ── Findings ──────────────────────────────────────────────

/// Category of a Turbalance finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    ExtraClosingBrace,
    UnclosedBrace,
    MissingContractBrace,
    MissingParamList,
    MissingImportTerminator,
}

impl FindingKind {
    fn message(self) -> &'static str {
        match self {
            FindingKind::ExtraClosingBrace => "Extra '}'",
            FindingKind::UnclosedBrace => "Unclosed '{'",
            FindingKind::MissingContractBrace => "Expected '{' after 'contract'",
            FindingKind::MissingParamList => "Expected '(' after 'func'",
            FindingKind::MissingImportTerminator => "Import statement must end with ';'",
        }
    }
}

/// A single advisory message tied to a source line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub line: usize,
    pub kind: FindingKind,
    pub message: String,
}

impl Finding {
    fn new(line: usize, kind: FindingKind) -> Self {
        Finding {
            line,
            kind,
            message: kind.message().to_string(),
        }
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[TURBALANCE] Line {}: {}", self.line, self.message)
    }
}

/// All findings for one source text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub findings: Vec<Finding>,
}

impl Report {
    /// True when nothing was flagged and the program may run
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Findings rendered in the `[TURBALANCE] Line N: ...` format
    pub fn messages(&self) -> Vec<String> {
        self.findings.iter().map(ToString::to_string).collect()
    }

    pub fn count(&self, kind: FindingKind) -> usize {
        self.findings.iter().filter(|f| f.kind == kind).count()
    }
}

/// Lines split on `\r\n`, a bare `\r` or `\n`
fn source_lines(source: &str) -> impl Iterator<Item = &str> {
    source
        .split("\r\n")
        .flat_map(|chunk| chunk.split(['\r', '\n']))
}

// ── Public API ────────────────────────────────────────────

/// Run every Turbalance check over `source`.
///
/// Per line, findings appear in the order: braces, contract, func, import.
/// Unclosed braces are reported last, oldest opening line first.
pub fn check(source: &str) -> Report {
    let mut findings = Vec::new();
    let mut open_lines: Vec<usize> = Vec::new();

    for (index, line) in source_lines(source).enumerate() {
        let number = index + 1;

        for ch in line.chars() {
            match ch {
                '{' => open_lines.push(number),
                '}' => {
                    if open_lines.pop().is_none() {
                        findings.push(Finding::new(number, FindingKind::ExtraClosingBrace));
                    }
                }
                _ => {}
            }
        }

        let trimmed = line.trim();
        if trimmed.starts_with("contract") && !line.contains('{') {
            findings.push(Finding::new(number, FindingKind::MissingContractBrace));
        }
        if line.contains("func") && !line.contains('(') {
            findings.push(Finding::new(number, FindingKind::MissingParamList));
        }
        if trimmed.starts_with("import") && trimmed.contains("aka") && !trimmed.ends_with(';') {
            findings.push(Finding::new(number, FindingKind::MissingImportTerminator));
        }
    }

    findings.extend(
        open_lines
            .into_iter()
            .map(|number| Finding::new(number, FindingKind::UnclosedBrace)),
    );

    Report { findings }
}
