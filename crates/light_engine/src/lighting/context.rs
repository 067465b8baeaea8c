//! Scene light context
//!
//! Owns the registry and the scene-wide light settings. Everything else in a
//! frame borrows from here: entities register descriptors, draw calls ask for
//! seeded light sets, and the glow passes walk the same active list.

use crate::config::{FogConfig, LightingConfig, ViewportConfig};
use crate::foundation::collections::{LightInfoKey, LightInfoStore};
use crate::foundation::memory::FrameArena;
use crate::render::{DepthBuffer, Projector, SpriteRenderer};

use super::binder::{self, BindStats, BindStrategy};
use super::glow;
use super::light_set::{LightSet, MAX_HARDWARE_LIGHTS};
use super::registry::{LightNodeHandle, LightRegistry};

/// Scene-level light state
#[derive(Debug, Clone)]
pub struct LightContext {
    registry: LightRegistry,
    ambient_color: [u8; 3],
    fog: FogConfig,
    hardware_slots: usize,
    viewport: ViewportConfig,
}

impl LightContext {
    /// Create a context from scene configuration
    ///
    /// The slot count is clamped to the hardware limit; registry capacity is
    /// taken as given.
    pub fn new(config: &LightingConfig) -> Self {
        let hardware_slots = config.hardware_slots.clamp(1, MAX_HARDWARE_LIGHTS);
        if hardware_slots != config.hardware_slots {
            log::warn!(
                "LightContext: {} hardware slots requested, using {}",
                config.hardware_slots,
                hardware_slots
            );
        }

        log::info!(
            "LightContext: {} registry slots, {} hardware slots, ambient {:?}",
            config.registry_capacity,
            hardware_slots,
            config.ambient_color
        );

        Self {
            registry: LightRegistry::new(config.registry_capacity),
            ambient_color: config.ambient_color,
            fog: config.fog,
            hardware_slots,
            viewport: config.viewport,
        }
    }

    /// Ambient color seeded into new light sets
    pub fn ambient_color(&self) -> [u8; 3] {
        self.ambient_color
    }

    /// Change the ambient color for light sets created from now on
    pub fn set_ambient_color(&mut self, color: [u8; 3]) {
        self.ambient_color = color;
    }

    /// Fog settings
    pub fn fog(&self) -> &FogConfig {
        &self.fog
    }

    /// Replace the fog settings
    pub fn set_fog(&mut self, color: [u8; 3], near: i16, far: i16) {
        self.fog = FogConfig { color, near, far };
    }

    /// Hardware slots per light set
    pub fn hardware_slots(&self) -> usize {
        self.hardware_slots
    }

    /// Screen used for glow visibility
    pub fn viewport(&self) -> &ViewportConfig {
        &self.viewport
    }

    /// Active light registry
    pub fn registry(&self) -> &LightRegistry {
        &self.registry
    }

    /// Empty light set seeded with the current ambient color
    ///
    /// Native point lights start disabled; the draw call opts in.
    pub fn new_lights(&self) -> LightSet {
        LightSet::with_capacity(self.ambient_color, self.hardware_slots)
    }

    /// Like [`Self::new_lights`], allocated in the frame arena
    pub fn new_lights_in<'a>(&self, arena: &'a mut FrameArena<LightSet>) -> &'a mut LightSet {
        arena.alloc(self.new_lights())
    }

    /// Register a descriptor; `None` when the registry is full
    pub fn insert_light(&mut self, info: LightInfoKey) -> Option<LightNodeHandle> {
        let handle = self.registry.insert(info);
        if handle.is_none() {
            log::debug!("LightContext: registry full, light not registered");
        }
        handle
    }

    /// Unregister a light; stale handles are ignored
    pub fn remove_light(&mut self, handle: LightNodeHandle) -> bool {
        self.registry.remove(handle)
    }

    /// Unregister every light, typically on scene teardown
    pub fn destroy_list(&mut self) {
        let count = self.registry.len();
        self.registry.clear();
        log::debug!("LightContext: destroyed {} lights", count);
    }

    /// Bind every active light into `lights`
    pub fn bind_all(
        &self,
        lights: &mut LightSet,
        store: &LightInfoStore,
        strategy: BindStrategy,
        projector: &dyn Projector,
    ) -> BindStats {
        binder::bind_all(lights, &self.registry, store, strategy, projector)
    }

    /// Refresh glow visibility for this frame
    pub fn glow_check(&self, store: &mut LightInfoStore, projector: &dyn Projector, depth: &dyn DepthBuffer) -> usize {
        glow::glow_check(&self.registry, store, projector, depth, &self.viewport)
    }

    /// Draw glow sprites for lights found visible
    pub fn draw_glow(&self, store: &LightInfoStore, sprites: &mut dyn SpriteRenderer) -> usize {
        glow::draw_glow(&self.registry, store, sprites)
    }
}

impl Default for LightContext {
    fn default() -> Self {
        Self::new(&LightingConfig::default())
    }
}
