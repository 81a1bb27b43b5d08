//! # Domain Services
//!
//! Scoring logic that operates on quote sets rather than on a single
//! entity.
//!
//! ## Services
//!
//! - [`scoring`]: Per-quote sub-scores and the weighted overall score
//! - [`ranking`]: Ranking strategies and recommendation texts
//! - [`price_analysis`]: Price deltas and side-by-side line items
//! - [`ComparisonEngine`]: Runs all of the above for one quote set

pub mod comparison_engine;
pub mod price_analysis;
pub mod ranking;
pub mod scoring;

pub use comparison_engine::{ComparisonEngine, ComparisonOutcome};
pub use ranking::{OverallScoreRanking, RankingStrategy};
pub use scoring::SubScores;
