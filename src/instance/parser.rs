//! Plain-text instance format.
//!
//! ```text
//! <budget> <n>
//! <cost_0> <power_0>
//! ...
//! <cost_n-1> <power_n-1>
//! <s_0,0> ... <s_0,n-1>
//! ...
//! <s_n-1,0> ... <s_n-1,n-1>
//! ```
//!
//! Blank lines are skipped. Anything after the last synergy row is ignored.

use std::path::Path;

use super::types::ProblemInstance;
use crate::error::{Error, Result};

/// Parser for the whitespace-separated instance format.
///
/// # Examples
///
/// ```
/// use synergy_tabu::instance::InstanceParser;
///
/// let text = "10 2\n5 10\n5 10\n0 3\n3 0\n";
/// let instance = InstanceParser::new().parse(text).unwrap();
/// assert_eq!(instance.n(), 2);
/// assert_eq!(instance.synergy(0, 1), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InstanceParser {
    symmetrize: bool,
}

impl InstanceParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept asymmetric synergy matrices by folding both halves together
    /// (see [`ProblemInstance::symmetrized`]) instead of rejecting them.
    pub fn with_symmetrize(mut self, symmetrize: bool) -> Self {
        self.symmetrize = symmetrize;
        self
    }

    /// Reads and parses an instance file.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<ProblemInstance> {
        let content = std::fs::read_to_string(path)?;
        self.parse(&content)
    }

    /// Parses instance text.
    pub fn parse(&self, content: &str) -> Result<ProblemInstance> {
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (header_no, header) = lines
            .next()
            .ok_or_else(|| Error::parse(None, "empty instance"))?;
        let header = parse_row(header_no, header)?;
        if header.len() != 2 {
            return Err(Error::parse(
                Some(header_no),
                format!("expected `<budget> <n>`, found {} values", header.len()),
            ));
        }
        let budget = header[0];
        let n = usize::try_from(header[1]).map_err(|_| {
            Error::parse(Some(header_no), format!("item count {} is negative", header[1]))
        })?;

        // n comes from untrusted input; grow as rows are actually read
        let mut cost = Vec::new();
        let mut power = Vec::new();
        for item in 0..n {
            let (line_no, line) = lines.next().ok_or_else(|| {
                Error::parse(None, format!("missing cost/power line for item {item}"))
            })?;
            let row = parse_row(line_no, line)?;
            if row.len() != 2 {
                return Err(Error::parse(
                    Some(line_no),
                    format!("expected `<cost> <power>`, found {} values", row.len()),
                ));
            }
            cost.push(row[0]);
            power.push(row[1]);
        }

        let mut synergy = Vec::new();
        for i in 0..n {
            let (line_no, line) = lines
                .next()
                .ok_or_else(|| Error::parse(None, format!("missing synergy row {i}")))?;
            let row = parse_row(line_no, line)?;
            if row.len() != n {
                return Err(Error::Dimension {
                    what: format!("synergy row {i} (line {line_no})"),
                    expected: n,
                    found: row.len(),
                });
            }
            synergy.push(row);
        }

        if self.symmetrize {
            ProblemInstance::symmetrized(budget, cost, power, synergy)
        } else {
            ProblemInstance::new(budget, cost, power, synergy)
        }
    }
}

fn parse_row(line_no: usize, line: &str) -> Result<Vec<i64>> {
    line.split_whitespace()
        .map(|tok| {
            tok.parse::<i64>()
                .map_err(|_| Error::parse(Some(line_no), format!("invalid integer `{tok}`")))
        })
        .collect()
}

impl std::str::FromStr for ProblemInstance {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        InstanceParser::new().parse(s)
    }
}

impl ProblemInstance {
    /// Loads a symmetric instance from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        InstanceParser::new().parse_file(path)
    }
}
