//! # Light Engine
//!
//! Bounded per-frame dynamic lighting for hardware with a fixed number of light
//! slots.
//!
//! ## Features
//!
//! - **Light Registry**: fixed-capacity pool of active lights, newest first
//! - **Light Sets**: per-draw-call hardware light slots plus ambient
//! - **Binding**: native point lights, or directional simulation for older paths
//! - **Glow**: depth-tested visibility and additive glow sprites for point lights
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use light_engine::prelude::*;
//!
//! let mut store = LightInfoStore::with_key();
//! let mut context = LightContext::default();
//!
//! let lamp = store.insert(LightInfo::point_glow([0, 50, 200], [255, 200, 120], 300));
//! let handle = context.insert_light(lamp);
//!
//! // Per draw call
//! let mut lights = context.new_lights();
//! lights.set_point_lights_enabled(true);
//! let strategy = BindStrategy::select(&lights, None);
//! context.bind_all(&mut lights, &store, strategy, &ViewProjection::identity());
//!
//! let mut display_list = DisplayList::new();
//! lights.submit(&mut display_list);
//!
//! if let Some(handle) = handle {
//!     context.remove_light(handle);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

pub mod config;
pub mod foundation;
pub mod lighting;
pub mod render;

/// Common imports for light engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, FogConfig, LightingConfig, ViewportConfig},
        foundation::{
            collections::{LightInfoKey, LightInfoStore},
            math::{Mat4, Mat4Ext, Vec3},
            memory::FrameArena,
        },
        lighting::{
            BindStats, BindStrategy, LightContext, LightError, LightInfo, LightKind, LightNodeHandle,
            LightRegistry, LightSet,
        },
        render::{
            DepthBuffer, DisplayCommand, DisplayList, LightStream, Projector, RenderPasses,
            SoftwareDepthBuffer, SpriteRenderer, ViewProjection,
        },
    };
}
