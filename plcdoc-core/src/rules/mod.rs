// Line rewriting for network bodies. Each pass is a `RewriteRule` with its
// own guard; `RewriteEngine` runs them in pipeline order.
// - engine.rs: the trait, the engine and name lookup
// - call.rs: positional → named argument helpers
// - timers.rs, counters.rs, moves.rs, math.rs, comparison.rs: one family each

pub mod call;
pub mod comparison;
pub mod counters;
pub mod engine;
pub mod math;
pub mod moves;
pub mod timers;

pub use engine::{rule_by_name, RewriteEngine, RewriteRule};
