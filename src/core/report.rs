/*!
 * Report Plumbing
 * Header shared by every simulation report
 */

use super::types::Adjustment;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Run metadata printed above every report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RunHeader {
    pub run_id: String,
    pub title: String,
    /// Effective parameters, in argument order
    pub parameters: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub adjustments: Vec<Adjustment>,
}

impl RunHeader {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    pub fn with_run_id(mut self, run_id: &str) -> Self {
        self.run_id = run_id.to_string();
        self
    }

    pub fn param(mut self, name: &str, value: impl ToString) -> Self {
        self.parameters.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_adjustments(mut self, adjustments: Vec<Adjustment>) -> Self {
        self.adjustments = adjustments;
        self
    }
}

impl fmt::Display for RunHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} ===", self.title)?;
        if !self.run_id.is_empty() {
            writeln!(f, "Run: {}", self.run_id)?;
        }
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect();
        if !params.is_empty() {
            writeln!(f, "- {}", params.join(", "))?;
        }
        for adjustment in &self.adjustments {
            writeln!(f, "- note: {}", adjustment)?;
        }
        Ok(())
    }
}

/// Common surface of the engine reports
pub trait Report: fmt::Display + Serialize {
    /// One-line status returned to the caller once the report is printed
    fn summary(&self) -> String;

    fn header(&self) -> &RunHeader;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lists_adjustments() {
        let header = RunHeader::new("Round Robin")
            .with_run_id("abc")
            .param("Processes", 3)
            .param("Quantum", "1s")
            .with_adjustments(vec![Adjustment::new("time quantum", 0, 1)]);
        let text = header.to_string();
        assert!(text.contains("=== Round Robin ==="));
        assert!(text.contains("Processes: 3, Quantum: 1s"));
        assert!(text.contains("time quantum '0' adjusted to 1"));
    }
}
