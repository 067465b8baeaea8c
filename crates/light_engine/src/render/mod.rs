//! Rendering collaborators consumed by the light core
//!
//! The light core never talks to a GPU. It writes into these narrow interfaces:
//! - [`LightStream`] receives light state for the opaque and translucent passes
//! - [`Projector`] maps world positions through the active view-projection
//! - [`DepthBuffer`] answers per-pixel depth reads for glow occlusion
//! - [`SpriteRenderer`] draws the glow billboards
//!
//! Each comes with a small software implementation used by tests and tools.

pub mod billboard;
pub mod commands;
pub mod depth;
pub mod projection;

pub use billboard::{calculate_glow_matrix, BlendMode, GlowSprite, SpriteRenderer};
pub use commands::{DisplayCommand, DisplayList, LightStream, RenderPasses, LIGHT_PASSES};
pub use depth::{DepthBuffer, SoftwareDepthBuffer, DEPTH_FAR, DEPTH_HALF_RANGE};
pub use projection::{ProjectedPoint, Projector, ViewProjection};
