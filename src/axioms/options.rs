//! Options for the axiom testers

use crate::utils::load_json;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How samples are drawn and which sign rule applies
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JacobiOptions {
    /// Bound on the number of tuples in deterministic mode
    pub max_runs: usize,
    /// Draw this many distinct tuples at random instead
    pub max_samples: Option<usize>,
    /// Seed for random sampling
    pub seed: Option<u64>,
    /// Force the super (`true`) or plain (`false`) sign rule; by default
    /// the algebra decides
    pub signed: Option<bool>,
    /// Check tuples in parallel
    pub parallel: bool,
}

impl Default for JacobiOptions {
    fn default() -> Self {
        JacobiOptions {
            max_runs: 4096,
            max_samples: None,
            seed: None,
            signed: None,
            parallel: false,
        }
    }
}

impl JacobiOptions {
    /// Random sampling of `max_samples` tuples, reproducible from `seed`
    pub fn sampled(max_samples: usize, seed: u64) -> Self {
        JacobiOptions {
            max_samples: Some(max_samples),
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Set the deterministic bound
    pub fn with_max_runs(mut self, max_runs: usize) -> Self {
        self.max_runs = max_runs;
        self
    }

    /// Force the sign rule
    pub fn with_signed(mut self, signed: bool) -> Self {
        self.signed = Some(signed);
        self
    }

    /// Enable parallel checking
    pub fn parallel(mut self) -> Self {
        self.parallel = true;
        self
    }

    /// Load options from a JSON file; missing fields take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_json(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let options: JacobiOptions = serde_json::from_str(r#"{"seed": 42, "parallel": true}"#).unwrap();
        assert_eq!(options.max_runs, 4096);
        assert_eq!(options.seed, Some(42));
        assert!(options.parallel);
        assert_eq!(options.signed, None);
    }
}
