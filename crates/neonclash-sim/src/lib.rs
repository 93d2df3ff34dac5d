//! Headless simulation engine for NEON CLASH.
//!
//! `RoundEngine` owns the hecs ECS world, processes player commands and
//! per-frame input, runs all systems, and produces `RenderSnapshot`s.
//! Completely free of presentation dependencies, enabling deterministic
//! testing: same seed + same input script = identical snapshots.

pub mod engine;
pub mod systems;
pub mod world_setup;

#[cfg(test)]
mod tests;
