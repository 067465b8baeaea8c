//! Per-draw-call hardware light sets
//!
//! A [`LightSet`] is what one draw call can physically submit: an ambient term
//! plus up to [`MAX_HARDWARE_LIGHTS`] directional or point entries. Entries use
//! the fixed 16-byte hardware layout, with every color written twice (primary
//! and copy) because the hardware reads both.

use bytemuck::{Pod, Zeroable};

use crate::render::{LightStream, LIGHT_PASSES};

/// Hardware limit on simultaneously bound lights, ambient excluded
pub const MAX_HARDWARE_LIGHTS: usize = 7;

/// Constant attenuation written to every hardware point light
pub const POINT_LIGHT_KC: u8 = 8;

/// Linear attenuation written to every hardware point light
pub const POINT_LIGHT_KL: i8 = -1;

/// Ambient term
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct AmbientEntry {
    /// RGB color
    pub color: [u8; 3],
    _pad1: u8,
    /// Copy of `color`
    pub color_copy: [u8; 3],
    _pad2: u8,
}

impl AmbientEntry {
    /// Ambient entry with `color` in both channels
    pub fn new(color: [u8; 3]) -> Self {
        Self {
            color,
            color_copy: color,
            ..Self::default()
        }
    }
}

/// Directional hardware light
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct DirectionalEntry {
    /// RGB color
    pub color: [u8; 3],
    _pad1: u8,
    /// Copy of `color`
    pub color_copy: [u8; 3],
    _pad2: u8,
    /// Direction, components in ±127
    pub direction: [i8; 3],
    _pad3: u8,
    _pad4: [u8; 4],
}

impl DirectionalEntry {
    /// Directional entry with `color` in both channels
    pub fn new(color: [u8; 3], direction: [i8; 3]) -> Self {
        Self {
            color,
            color_copy: color,
            direction,
            ..Self::default()
        }
    }
}

/// Point hardware light
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct PointEntry {
    /// RGB color
    pub color: [u8; 3],
    /// Constant attenuation
    pub kc: u8,
    /// Copy of `color`
    pub color_copy: [u8; 3],
    /// Linear attenuation
    pub kl: i8,
    /// World position
    pub position: [i16; 3],
    /// Quadratic attenuation
    pub kq: u8,
    _pad: u8,
}

impl PointEntry {
    /// Point entry with the fixed constant and linear terms
    pub fn new(color: [u8; 3], position: [i16; 3], kq: u8) -> Self {
        Self {
            color,
            kc: POINT_LIGHT_KC,
            color_copy: color,
            kl: POINT_LIGHT_KL,
            position,
            kq,
            _pad: 0,
        }
    }
}

/// One occupied hardware light slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareLight {
    /// Directional light, also used for simulated point lights
    Directional(DirectionalEntry),
    /// Native point light
    Point(PointEntry),
}

impl HardwareLight {
    /// Primary color channel
    pub fn color(&self) -> [u8; 3] {
        match self {
            Self::Directional(entry) => entry.color,
            Self::Point(entry) => entry.color,
        }
    }

    /// Raw 16-byte hardware encoding
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Directional(entry) => bytemuck::bytes_of(entry),
            Self::Point(entry) => bytemuck::bytes_of(entry),
        }
    }
}

impl Default for HardwareLight {
    fn default() -> Self {
        Self::Directional(DirectionalEntry::default())
    }
}

/// Lights for one draw call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightSet {
    ambient: AmbientEntry,
    slots: [HardwareLight; MAX_HARDWARE_LIGHTS],
    count: usize,
    capacity: usize,
    point_lights_enabled: bool,
}

impl LightSet {
    /// Ambient-only set using every hardware slot
    pub fn new_ambient_only(ambient: [u8; 3]) -> Self {
        Self::with_capacity(ambient, MAX_HARDWARE_LIGHTS)
    }

    /// Ambient-only set limited to `capacity` slots (at most [`MAX_HARDWARE_LIGHTS`])
    pub fn with_capacity(ambient: [u8; 3], capacity: usize) -> Self {
        Self {
            ambient: AmbientEntry::new(ambient),
            slots: [HardwareLight::default(); MAX_HARDWARE_LIGHTS],
            count: 0,
            capacity: capacity.min(MAX_HARDWARE_LIGHTS),
            point_lights_enabled: false,
        }
    }

    /// Fill `count` identical directional lights and submit immediately
    ///
    /// Used for static lighting setups. `count` beyond the hardware limit is clamped.
    pub fn new_preset(
        ambient: [u8; 3],
        count: usize,
        color: [u8; 3],
        direction: [i8; 3],
        stream: &mut dyn LightStream,
    ) -> Self {
        let mut lights = Self::new_ambient_only(ambient);
        if count > lights.capacity {
            log::warn!(
                "LightSet: preset asked for {} lights, clamping to {}",
                count,
                lights.capacity
            );
        }
        let count = count.min(lights.capacity);
        lights.slots[..count].fill(HardwareLight::Directional(DirectionalEntry::new(color, direction)));
        lights.count = count;

        lights.submit(stream);
        lights
    }

    /// Reseed the ambient color and drop every bound light
    pub fn reset(&mut self, ambient: [u8; 3]) {
        self.ambient = AmbientEntry::new(ambient);
        self.count = 0;
    }

    /// Claim the next free slot, or `None` if the set is full
    pub fn acquire_slot(&mut self) -> Option<&mut HardwareLight> {
        if self.is_full() {
            return None;
        }
        let slot = &mut self.slots[self.count];
        self.count += 1;
        Some(slot)
    }

    /// Ambient term
    pub fn ambient(&self) -> &AmbientEntry {
        &self.ambient
    }

    /// Bound lights in bind order
    pub fn lights(&self) -> &[HardwareLight] {
        &self.slots[..self.count]
    }

    /// Number of bound lights
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether no light is bound
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of usable slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether every usable slot is bound
    pub fn is_full(&self) -> bool {
        self.count >= self.capacity
    }

    /// Whether native point lights may be used for this set
    pub fn point_lights_enabled(&self) -> bool {
        self.point_lights_enabled
    }

    /// Allow or forbid native point lights for this set
    pub fn set_point_lights_enabled(&mut self, enabled: bool) {
        self.point_lights_enabled = enabled;
    }

    /// Write this set to the opaque and translucent streams
    ///
    /// Each stream receives the light count, the bound lights with 1-based
    /// indices in bind order, then the ambient term at index `count + 1`.
    pub fn submit(&self, stream: &mut dyn LightStream) {
        for pass in LIGHT_PASSES.iter() {
            stream.emit_light_count(pass, self.count);
        }

        for (i, light) in self.lights().iter().enumerate() {
            for pass in LIGHT_PASSES.iter() {
                stream.emit_light(pass, light, i + 1);
            }
        }

        for pass in LIGHT_PASSES.iter() {
            stream.emit_ambient(pass, &self.ambient, self.count + 1);
        }
    }
}
