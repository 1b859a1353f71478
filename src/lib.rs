//! Scene Population Engine
//!
//! Decides, on each spawn request, how many objects to create, their shapes,
//! colors, and positions — and enforces at most one in-flight spawn at a
//! time. Rendering, AR tracking, and UI stay on the far side of the wire
//! protocol.
//!
//! ## Architecture
//!
//! ```text
//! SceneHostAgent  (host.rs)   ← commands in, publications + completions out
//!   ├── PopulationEngine  (engine.rs) ← batching, growth, re-entrancy guard
//!   │     └── UniformSampler  (sampler.rs) ← seeded color/position draws
//!   └── SceneRegistry  (scene.rs)  ← placed-object ledger, snapshots
//! ```
//!
//! `PopulationEngine` owns all mutable spawn state; the agent owns identity
//! and retention. Hosts that only consume the wire format can depend with
//! `default-features = false` and get `protocol` + `types` alone.

// Protocol types are always available (no engine feature needed).
pub mod protocol;
pub mod types;

// Engine-side modules require the `engine` feature.
#[cfg(feature = "engine")]
pub mod engine;
#[cfg(feature = "engine")]
pub mod host;
#[cfg(feature = "engine")]
pub mod sampler;
#[cfg(feature = "engine")]
pub mod scene;

// Convenience re-exports (engine only)
#[cfg(feature = "engine")]
pub use engine::{PlacementDirective, PopulationEngine, SpawnBatch, SpawnOutcome};
#[cfg(feature = "engine")]
pub use host::{HostCommand, Publication, SceneHostAgent, SceneHostConfig};
#[cfg(feature = "engine")]
pub use sampler::{PlacementSampler, UniformSampler};
#[cfg(feature = "engine")]
pub use scene::{PlacedObject, SceneRegistry};
pub use types::{EngineStats, Hsv, PopulationConfig, ShapeKind, SpawnVolume, Vec3};
