//! Light binding
//!
//! Walks the registry's active list and packs each descriptor into the next free
//! slot of a [`LightSet`]. The list is most-recent-first and binding stops
//! admitting once the set is full, so when more lights are registered than the
//! hardware holds, the newest ones win and older ones go dark. That starvation
//! is the intended backpressure.
//!
//! # Strategies
//!
//! - **Modern**: native hardware point lights, with a cheap screen-extent cull.
//! - **Legacy**: no native point lights; each point light becomes a directional
//!   light aimed from a reference position at the light, dimmed with distance.
//!
//! Directional lights bind identically under both.

use crate::foundation::collections::LightInfoStore;
use crate::foundation::math::{vec3_from_i16, Vec3};
use crate::render::Projector;

use super::descriptor::{DirectionalParams, LightInfo, PointParams};
use super::error::LightError;
use super::light_set::{DirectionalEntry, HardwareLight, LightSet, PointEntry};
use super::registry::LightRegistry;

/// Numerator of the quadratic attenuation derived from radius
const POINT_KQ_SCALE: f32 = 4_500_000.0;

/// Bounds for the quadratic attenuation term
const POINT_KQ_MIN: f32 = 20.0;
const POINT_KQ_MAX: f32 = 255.0;

/// Far edge of the projected depth band a point light may touch
const CULL_DEPTH_FAR: f32 = 600.0;

/// Projected half-extent beyond which a point light is off screen
const CULL_SCREEN_EXTENT: f32 = 400.0;

/// Length given to simulated point-light directions
const FAKE_POINT_DIRECTION_SCALE: f32 = 120.0;

/// How point lights are encoded for this draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BindStrategy {
    /// Native hardware point lights
    Modern,
    /// Point lights simulated by directional lights facing `reference`
    ///
    /// Without a reference position point lights are skipped.
    Legacy {
        /// Position being lit, usually the drawn object's origin
        reference: Option<Vec3>,
    },
}

impl BindStrategy {
    /// Pick the strategy for `lights`
    ///
    /// Modern only when no reference position is given and the set allows
    /// native point lights.
    pub fn select(lights: &LightSet, reference: Option<Vec3>) -> Self {
        match reference {
            None if lights.point_lights_enabled() => Self::Modern,
            reference => Self::Legacy { reference },
        }
    }
}

/// What happened to one descriptor during binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    /// Written to a slot
    Bound,
    /// Eligible, but the set had no free slot
    SetFull,
    /// Off screen, out of range, or without a usable radius
    Culled,
}

/// Per-pass binding counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BindStats {
    /// Lights written to the set
    pub bound: usize,
    /// Eligible lights dropped because the set was full
    pub dropped: usize,
    /// Lights that did not reach the set (cull, range, radius)
    pub culled: usize,
    /// Active nodes whose descriptor could not be resolved
    pub rejected: usize,
}

impl BindStats {
    fn record(&mut self, outcome: BindOutcome) {
        match outcome {
            BindOutcome::Bound => self.bound += 1,
            BindOutcome::SetFull => self.dropped += 1,
            BindOutcome::Culled => self.culled += 1,
        }
    }
}

/// Bind every active light in `registry` into `lights`
pub fn bind_all(
    lights: &mut LightSet,
    registry: &LightRegistry,
    store: &LightInfoStore,
    strategy: BindStrategy,
    projector: &dyn Projector,
) -> BindStats {
    let mut stats = BindStats::default();

    for (handle, key) in registry {
        let Some(info) = store.get(key) else {
            let error = LightError::DanglingDescriptor { slot: handle.index() };
            log::warn!("Binder: {}", error);
            stats.rejected += 1;
            continue;
        };

        let outcome = match strategy {
            BindStrategy::Modern => bind_modern(lights, info, projector),
            BindStrategy::Legacy { reference } => bind_legacy(lights, info, reference),
        };
        log::trace!("Binder: slot {} ({:?}) -> {:?}", handle.index(), info.kind(), outcome);
        stats.record(outcome);
    }

    if stats.dropped > 0 {
        log::trace!("Binder: light set full, {} lights left unbound", stats.dropped);
    }
    stats
}

fn bind_modern(lights: &mut LightSet, info: &LightInfo, projector: &dyn Projector) -> BindOutcome {
    match info {
        LightInfo::PointGlow(params) | LightInfo::PointPlain(params) => bind_point(lights, params, projector),
        LightInfo::Directional(params) => bind_directional(lights, params),
    }
}

fn bind_legacy(lights: &mut LightSet, info: &LightInfo, reference: Option<Vec3>) -> BindOutcome {
    match (info, reference) {
        (LightInfo::PointGlow(params) | LightInfo::PointPlain(params), Some(reference)) => {
            bind_point_with_reference(lights, params, &reference)
        }
        (LightInfo::PointGlow(_) | LightInfo::PointPlain(_), None) => BindOutcome::Culled,
        (LightInfo::Directional(params), _) => bind_directional(lights, params),
    }
}

/// Quadratic attenuation for a native point light of `radius`
///
/// `round(4_500_000 / radius²)` clamped to `[20, 255]`.
pub fn point_attenuation(radius: f32) -> u8 {
    (POINT_KQ_SCALE / (radius * radius))
        .round()
        .clamp(POINT_KQ_MIN, POINT_KQ_MAX) as u8
}

/// Whether a point light projected to `projected` may touch the screen
fn in_view_extent(projected: &Vec3, radius: f32) -> bool {
    -radius < projected.z
        && projected.z < CULL_DEPTH_FAR + radius
        && projected.x.abs() - radius < CULL_SCREEN_EXTENT
        && projected.y.abs() - radius < CULL_SCREEN_EXTENT
}

fn bind_point(lights: &mut LightSet, params: &PointParams, projector: &dyn Projector) -> BindOutcome {
    let radius = f32::from(params.radius);
    if radius <= 0.0 {
        return BindOutcome::Culled;
    }

    let projected = projector.transform_xyz(&params.world_position());
    if !in_view_extent(&projected, radius) {
        return BindOutcome::Culled;
    }

    let Some(slot) = lights.acquire_slot() else {
        return BindOutcome::SetFull;
    };
    *slot = HardwareLight::Point(PointEntry::new(
        params.color,
        params.position,
        point_attenuation(radius),
    ));
    BindOutcome::Bound
}

fn bind_point_with_reference(lights: &mut LightSet, params: &PointParams, reference: &Vec3) -> BindOutcome {
    if params.radius < 1 {
        return BindOutcome::Culled;
    }

    let radius = f32::from(params.radius);
    let diff = vec3_from_i16(params.position) - reference;
    let distance_sq = diff.norm_squared();
    // At exactly the radius the light contributes nothing
    if radius * radius <= distance_sq {
        return BindOutcome::Culled;
    }

    let Some(slot) = lights.acquire_slot() else {
        return BindOutcome::SetFull;
    };

    let distance = distance_sq.sqrt();
    let ratio = distance / radius;
    let falloff = 1.0 - ratio * ratio;
    let color = params.color.map(|channel| (f32::from(channel) * falloff) as u8);

    let direction_scale = if distance < 1.0 {
        FAKE_POINT_DIRECTION_SCALE
    } else {
        FAKE_POINT_DIRECTION_SCALE / distance
    };
    let direction = [
        (diff.x * direction_scale) as i8,
        (diff.y * direction_scale) as i8,
        (diff.z * direction_scale) as i8,
    ];

    *slot = HardwareLight::Directional(DirectionalEntry::new(color, direction));
    BindOutcome::Bound
}

fn bind_directional(lights: &mut LightSet, params: &DirectionalParams) -> BindOutcome {
    let Some(slot) = lights.acquire_slot() else {
        return BindOutcome::SetFull;
    };
    *slot = HardwareLight::Directional(DirectionalEntry::new(params.color, params.direction));
    BindOutcome::Bound
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::collections::LightInfoKey;
    use crate::lighting::MAX_HARDWARE_LIGHTS;
    use crate::render::ViewProjection;

    struct Scene {
        store: LightInfoStore,
        registry: LightRegistry,
    }

    impl Scene {
        fn new() -> Self {
            Self {
                store: LightInfoStore::with_key(),
                registry: LightRegistry::default(),
            }
        }

        fn add(&mut self, info: LightInfo) -> LightInfoKey {
            let key = self.store.insert(info);
            self.registry.insert(key).unwrap();
            key
        }

        fn bind(&self, lights: &mut LightSet, strategy: BindStrategy) -> BindStats {
            bind_all(lights, &self.registry, &self.store, strategy, &ViewProjection::identity())
        }
    }

    fn modern_set() -> LightSet {
        let mut lights = LightSet::new_ambient_only([0, 0, 0]);
        lights.set_point_lights_enabled(true);
        lights
    }

    fn bound_point(lights: &LightSet, index: usize) -> PointEntry {
        match lights.lights()[index] {
            HardwareLight::Point(entry) => entry,
            other => panic!("expected point light, got {:?}", other),
        }
    }

    fn bound_directional(lights: &LightSet, index: usize) -> DirectionalEntry {
        match lights.lights()[index] {
            HardwareLight::Directional(entry) => entry,
            other => panic!("expected directional light, got {:?}", other),
        }
    }

    #[test]
    fn test_strategy_selection() {
        let mut lights = LightSet::new_ambient_only([0, 0, 0]);
        let reference = Some(Vec3::new(1.0, 2.0, 3.0));

        assert_eq!(BindStrategy::select(&lights, None), BindStrategy::Legacy { reference: None });

        lights.set_point_lights_enabled(true);
        assert_eq!(BindStrategy::select(&lights, None), BindStrategy::Modern);
        assert_eq!(BindStrategy::select(&lights, reference), BindStrategy::Legacy { reference });
    }

    #[test]
    fn test_empty_registry_is_noop() {
        let scene = Scene::new();
        let mut lights = modern_set();

        let stats = scene.bind(&mut lights, BindStrategy::Modern);

        assert_eq!(stats, BindStats::default());
        assert!(lights.is_empty());
    }

    #[test]
    fn test_attenuation_clamp() {
        // 4.5e6 / 100² = 450
        assert_eq!(point_attenuation(100.0), 255);
        // 4.5e6 / 1000² = 4.5
        assert_eq!(point_attenuation(1000.0), 20);
        assert_eq!(point_attenuation(150.0), 200);
        assert_eq!(point_attenuation(300.0), 50);
        assert_eq!(point_attenuation(250.0), 72);
    }

    #[test]
    fn test_attenuation_rounds_to_nearest() {
        // 4.5e6 / 200² = 112.5
        assert_eq!(point_attenuation(200.0), 113);
        // 4.5e6 / 140² = 229.59
        assert_eq!(point_attenuation(140.0), 230);
        // 4.5e6 / 160² = 175.78
        assert_eq!(point_attenuation(160.0), 176);
    }

    #[test]
    fn test_modern_point_encoding() {
        let mut scene = Scene::new();
        scene.add(LightInfo::point_plain([10, -20, 100], [255, 128, 0], 300));
        let mut lights = modern_set();

        let stats = scene.bind(&mut lights, BindStrategy::Modern);

        assert_eq!(stats.bound, 1);
        let entry = bound_point(&lights, 0);
        assert_eq!(entry.color, [255, 128, 0]);
        assert_eq!(entry.color_copy, [255, 128, 0]);
        assert_eq!(entry.position, [10, -20, 100]);
        assert_eq!(entry.kq, 50);
        assert_eq!(entry.kl, -1);
        assert_eq!(entry.kc, 8);
    }

    #[test]
    fn test_modern_culls_off_screen_and_radiusless() {
        let mut scene = Scene::new();
        // Too deep
        scene.add(LightInfo::point_glow([0, 0, 2000], [255, 255, 255], 100));
        // Behind
        scene.add(LightInfo::point_glow([0, 0, -200], [255, 255, 255], 100));
        // Too far right
        scene.add(LightInfo::point_plain([600, 0, 100], [255, 255, 255], 100));
        // No radius
        scene.add(LightInfo::point_plain([0, 0, 100], [255, 255, 255], 0));
        scene.add(LightInfo::point_plain([0, 0, 100], [255, 255, 255], -5));
        let mut lights = modern_set();

        let stats = scene.bind(&mut lights, BindStrategy::Modern);

        assert_eq!(stats.culled, 5);
        assert!(lights.is_empty());
    }

    #[test]
    fn test_modern_extent_grows_with_radius() {
        let mut scene = Scene::new();
        // |x| - r = 499 - 100 = 399 < 400
        scene.add(LightInfo::point_plain([499, 0, 100], [1, 1, 1], 100));
        let mut lights = modern_set();

        assert_eq!(scene.bind(&mut lights, BindStrategy::Modern).bound, 1);
    }

    #[test]
    fn test_legacy_falloff() {
        let mut scene = Scene::new();
        scene.add(LightInfo::point_plain([0, 0, 0], [200, 100, 40], 100));
        let mut lights = LightSet::new_ambient_only([0, 0, 0]);

        let stats = scene.bind(&mut lights, BindStrategy::Legacy { reference: Some(Vec3::zeros()) });

        assert_eq!(stats.bound, 1);
        let entry = bound_directional(&lights, 0);
        assert_eq!(entry.color, [200, 100, 40]);
        assert_eq!(entry.color_copy, [200, 100, 40]);
        assert_eq!(entry.direction, [0, 0, 0]);
    }

    #[test]
    fn test_legacy_half_distance() {
        let mut scene = Scene::new();
        scene.add(LightInfo::point_plain([50, 0, 0], [200, 100, 40], 100));
        let mut lights = LightSet::new_ambient_only([0, 0, 0]);

        scene.bind(&mut lights, BindStrategy::Legacy { reference: Some(Vec3::zeros()) });

        let entry = bound_directional(&lights, 0);
        // 1 - (50 / 100)² = 0.75
        assert_eq!(entry.color, [150, 75, 30]);
        assert_eq!(entry.direction, [120, 0, 0]);
    }

    #[test]
    fn test_legacy_boundary_and_beyond_do_not_bind() {
        let mut scene = Scene::new();
        scene.add(LightInfo::point_plain([100, 0, 0], [255, 255, 255], 100));
        scene.add(LightInfo::point_glow([0, 150, 0], [255, 255, 255], 100));
        scene.add(LightInfo::point_glow([0, 0, 0], [255, 255, 255], 0));
        let mut lights = LightSet::new_ambient_only([0, 0, 0]);

        let stats = scene.bind(&mut lights, BindStrategy::Legacy { reference: Some(Vec3::zeros()) });

        assert_eq!(stats.culled, 3);
        assert!(lights.is_empty());
    }

    #[test]
    fn test_legacy_without_reference_binds_directionals_only() {
        let mut scene = Scene::new();
        scene.add(LightInfo::point_plain([0, 0, 0], [255, 255, 255], 100));
        scene.add(LightInfo::directional([0, 127, 0], [10, 20, 30]));
        let mut lights = LightSet::new_ambient_only([0, 0, 0]);

        let stats = scene.bind(&mut lights, BindStrategy::Legacy { reference: None });

        assert_eq!(stats.bound, 1);
        assert_eq!(stats.culled, 1);
        assert_eq!(bound_directional(&lights, 0).direction, [0, 127, 0]);
    }

    #[test]
    fn test_directional_pass_through() {
        let info = LightInfo::directional([-90, 64, 127], [12, 34, 56]);
        let strategies = [
            BindStrategy::Modern,
            BindStrategy::Legacy { reference: Some(Vec3::new(500.0, 0.0, 0.0)) },
        ];

        for strategy in strategies {
            let mut scene = Scene::new();
            scene.add(info);
            let mut lights = modern_set();

            scene.bind(&mut lights, strategy);

            let entry = bound_directional(&lights, 0);
            assert_eq!(entry.color, [12, 34, 56], "{:?}", strategy);
            assert_eq!(entry.color_copy, [12, 34, 56], "{:?}", strategy);
            assert_eq!(entry.direction, [-90, 64, 127], "{:?}", strategy);
        }
    }

    #[test]
    fn test_most_recent_lights_win() {
        let mut scene = Scene::new();
        let total = MAX_HARDWARE_LIGHTS + 3;
        for i in 0..total {
            scene.add(LightInfo::directional([0, 0, 127], [i as u8, 0, 0]));
        }
        let mut lights = modern_set();

        let stats = scene.bind(&mut lights, BindStrategy::Modern);

        assert_eq!(stats.bound, MAX_HARDWARE_LIGHTS);
        assert_eq!(stats.dropped, 3);
        let bound: Vec<u8> = lights.lights().iter().map(|light| light.color()[0]).collect();
        let expected: Vec<u8> = (3..total as u8).rev().collect();
        assert_eq!(bound, expected);
    }

    #[test]
    fn test_partially_filled_set_admits_remaining_capacity() {
        let mut scene = Scene::new();
        for i in 0..4 {
            scene.add(LightInfo::directional([0, 0, 127], [i, 0, 0]));
        }
        let mut lights = LightSet::with_capacity([0, 0, 0], 3);
        *lights.acquire_slot().unwrap() = HardwareLight::default();

        let stats = scene.bind(&mut lights, BindStrategy::Modern);

        assert_eq!(stats.bound, 2);
        assert_eq!(stats.dropped, 2);
        assert_eq!(lights.lights()[1].color(), [3, 0, 0]);
        assert_eq!(lights.lights()[2].color(), [2, 0, 0]);
    }

    #[test]
    fn test_dangling_descriptor_is_rejected() {
        let mut scene = Scene::new();
        let freed = scene.add(LightInfo::directional([0, 0, 127], [1, 1, 1]));
        scene.add(LightInfo::directional([0, 0, 127], [2, 2, 2]));
        scene.store.remove(freed);
        let mut lights = modern_set();

        let stats = scene.bind(&mut lights, BindStrategy::Modern);

        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.bound, 1);
        assert_eq!(lights.lights()[0].color(), [2, 2, 2]);
    }
}
