//! Progression systems

pub mod xp;
pub mod tracker;

pub use xp::{ProgressionConfig, XpCurve, xp_required};
pub use tracker::{ProgressionTracker, ProgressionEvent, ProgressionListener};
