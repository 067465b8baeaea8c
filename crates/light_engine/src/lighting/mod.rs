//! Lighting system
//!
//! Dynamic light management for a fixed-function lighting unit: a bounded
//! registry of active lights, per-draw-call hardware light sets, the binder that
//! packs one into the other, and the per-frame glow visibility pass.

pub mod binder;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod glow;
pub mod light_set;
pub mod registry;

#[cfg(test)]
mod tests;

pub use binder::{bind_all, point_attenuation, BindOutcome, BindStats, BindStrategy};
pub use context::LightContext;
pub use descriptor::{DirectionalParams, LightInfo, LightKind, PointParams};
pub use error::{LightError, LightResult};
pub use glow::{draw_glow, glow_check};
pub use light_set::{
    AmbientEntry, DirectionalEntry, HardwareLight, LightSet, PointEntry, MAX_HARDWARE_LIGHTS, POINT_LIGHT_KC,
    POINT_LIGHT_KL,
};
pub use registry::{ActiveLights, LightNodeHandle, LightNodePool, LightRegistry, DEFAULT_REGISTRY_CAPACITY};
