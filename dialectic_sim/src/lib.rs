//! Dialectic Simulation Harness
//!
//! Runs the whole Dialectic pipeline once, reproducibly from a single
//! 64-bit seed.
//!
//! # Pipeline
//!
//! ```text
//!  InitialConditions ──► Sampler ──► observed state
//!        │
//!        └──► evolve(R0, A0, t) ──► trajectory + emergent series
//!                                        │
//!                    consciousness_level ◄┤
//!                              synthesize ◄┤
//!              Mind A / Mind B ──► coevolve ──► shared trace
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use dialectic_sim::{SimWorld, SimConfig};
//!
//! let config = SimConfig {
//!     seed: 42,
//!     ..Default::default()
//! };
//!
//! let mut world = SimWorld::new(config)?;
//! let report = world.run()?;
//! ```

mod context;
mod error;
mod exporter;
mod world;

pub use context::SimContext;
pub use error::SimError;
pub use exporter::{SimExport, StepFrame};
pub use world::{RunReport, SimConfig, SimWorld};
