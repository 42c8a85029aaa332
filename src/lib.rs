//! Theme-park review explorer: loads a review dataset once and answers
//! grouped rating queries, draws terminal charts and exports per-park summaries.

pub mod chart;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod menu;
pub mod stats;
pub mod tui;
pub mod types;
pub mod util;
