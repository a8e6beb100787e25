//! Evaluation configuration.

use std::path::PathBuf;

use crate::tables::TableShape;

/// What to do when a table file cannot be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Log a warning and evaluate with all-zero tables (material only).
    #[default]
    ZeroFill,
    /// Return the error to the caller.
    Strict,
}

/// Where the tables live and how to load them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalConfig {
    /// Directory holding `KK_synthesized.bin`, `KKP_synthesized.bin` and
    /// `KPP_synthesized.bin`.
    pub eval_dir: PathBuf,
    pub policy: LoadPolicy,
    pub shape: TableShape,
}

impl EvalConfig {
    /// Configuration for `eval_dir` with default policy and shape.
    pub fn new(eval_dir: impl Into<PathBuf>) -> EvalConfig {
        EvalConfig {
            eval_dir: eval_dir.into(),
            ..EvalConfig::default()
        }
    }

    /// Same configuration with a different policy.
    pub fn with_policy(mut self, policy: LoadPolicy) -> EvalConfig {
        self.policy = policy;
        self
    }

    /// Same configuration with a different table shape.
    pub fn with_shape(mut self, shape: TableShape) -> EvalConfig {
        self.shape = shape;
        self
    }
}

impl Default for EvalConfig {
    fn default() -> EvalConfig {
        EvalConfig {
            eval_dir: PathBuf::from("."),
            policy: LoadPolicy::ZeroFill,
            shape: TableShape::STANDARD,
        }
    }
}
