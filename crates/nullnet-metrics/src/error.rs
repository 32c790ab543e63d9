//! Error type shared by every analysis stage.
//!
//! Each variant aborts (at most) the analysis of a single graph. The batch
//! runner records the failure and moves on to the next file.

/// Errors raised while loading or analyzing one graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// An edge-list line did not describe a valid edge.
    #[error("parse error on line {line}: {reason}")]
    Parse {
        /// 1-based line number in the input text.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// A G(n,m) request asked for more edges than `n` nodes can hold.
    #[error("cannot place {edges} edges among {nodes} nodes (at most {max_edges})")]
    InvalidParameter {
        nodes: usize,
        edges: usize,
        max_edges: usize,
    },

    /// The null-model distribution has zero spread, so no z-score exists.
    #[error("null-model distribution of {len} samples has zero standard deviation")]
    DegenerateDistribution { len: usize },

    /// The graph has no nodes.
    #[error("graph has no nodes")]
    EmptyGraph,
}

impl AnalysisError {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "E1001",
            Self::InvalidParameter { .. } => "E2001",
            Self::DegenerateDistribution { .. } => "E3001",
            Self::EmptyGraph => "E3002",
        }
    }

    /// Optional remediation hint for operators.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Parse { .. } => {
                Some("Each line must hold exactly two node ids; self-loops are not allowed.")
            }
            Self::InvalidParameter { .. } => None,
            Self::DegenerateDistribution { .. } => {
                Some("Increase the number of null-model samples.")
            }
            Self::EmptyGraph => Some("Check that the input file contains at least one edge."),
        }
    }

    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            line,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AnalysisError;
    use std::collections::HashSet;

    #[test]
    fn codes_are_unique_and_machine_friendly() {
        let all = [
            AnalysisError::parse(1, "x"),
            AnalysisError::InvalidParameter {
                nodes: 2,
                edges: 3,
                max_edges: 1,
            },
            AnalysisError::DegenerateDistribution { len: 1 },
            AnalysisError::EmptyGraph,
        ];

        let mut seen = HashSet::new();
        for err in &all {
            let code = err.code();
            assert!(seen.insert(code), "duplicate code {code}");
            assert_eq!(code.len(), 5);
            assert!(code.starts_with('E'));
            assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn parse_error_mentions_line() {
        let err = AnalysisError::parse(7, "expected 2 node ids, found 3");
        assert_eq!(
            err.to_string(),
            "parse error on line 7: expected 2 node ids, found 3"
        );
    }
}
