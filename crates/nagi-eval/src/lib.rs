//! Incremental KPP/KKP/KK evaluation for shogi.

pub mod config;
pub mod diff;
pub mod error;
pub mod evaluator;
pub mod features;
pub mod full;
pub mod layout;
pub mod list;
pub mod loader;
pub mod material;
pub mod position;
pub mod snapshot;
pub mod stack;
pub mod sum;
pub mod tables;

#[cfg(test)]
mod testing;

pub use config::{EvalConfig, LoadPolicy};
pub use error::{SnapshotError, TableError};
pub use evaluator::{Evaluator, FV_SCALE, INF, MATE, TEMPO};
pub use features::{FeatureIndex, FeaturePair, board_feature, hand_feature};
pub use layout::{DefaultLayout, Layout, Plain, Twig};
pub use loader::{LoadOutcome, Loaded, init, save_dir};
pub use position::EvalPosition;
pub use snapshot::Snapshot;
pub use stack::{EvalStack, MAX_PLY, PlyRecord};
pub use sum::EvalSum;
pub use tables::{TableShape, Tables};
