/// Per-pixel orchestration: passthrough vs the enhanced chain.
pub mod orchestrator;
/// Whole-frame drivers, sequential and rayon-parallel.
pub mod parallel;
