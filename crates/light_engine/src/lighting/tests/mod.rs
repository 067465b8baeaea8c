//! Whole-frame lighting scenarios

use crate::foundation::collections::{LightInfoKey, LightInfoStore};
use crate::foundation::math::{Mat4, Vec3};
use crate::foundation::memory::FrameArena;
use crate::lighting::{
    BindStrategy, HardwareLight, LightContext, LightInfo, LightSet, MAX_HARDWARE_LIGHTS,
};
use crate::render::{DisplayCommand, DisplayList, RenderPasses, SoftwareDepthBuffer, ViewProjection};

/// Camera with w = z and x, y, z passed through unchanged
fn camera() -> ViewProjection {
    ViewProjection::new(Mat4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
    ))
}

/// One directional light followed by eight glowing point lights
fn populate(context: &mut LightContext, store: &mut LightInfoStore) -> Vec<LightInfoKey> {
    let mut keys = vec![store.insert(LightInfo::directional([0, -127, 0], [255, 255, 255]))];
    for i in 1..=8i16 {
        keys.push(store.insert(LightInfo::point_glow([i * 10, 0, 100 + i], [200, 200, 200], 300)));
    }
    for &key in &keys {
        assert!(context.insert_light(key).is_some());
    }
    keys
}

#[test]
fn test_frame_with_more_lights_than_slots() {
    let mut store = LightInfoStore::with_key();
    let mut context = LightContext::default();
    populate(&mut context, &mut store);

    let mut arena = FrameArena::with_capacity(1);
    let lights = context.new_lights_in(&mut arena);
    lights.set_point_lights_enabled(true);
    let strategy = BindStrategy::select(lights, None);
    assert_eq!(strategy, BindStrategy::Modern);

    let stats = context.bind_all(lights, &store, strategy, &camera());

    // Newest first: the seven most recent points win, the oldest point and the directional go dark
    assert_eq!(stats.bound, MAX_HARDWARE_LIGHTS);
    assert_eq!(stats.dropped, 2);
    assert!(lights.lights().iter().all(|light| matches!(light, HardwareLight::Point(_))));
    let HardwareLight::Point(first) = lights.lights()[0] else {
        unreachable!();
    };
    assert_eq!(first.position, [80, 0, 108]);

    let mut list = DisplayList::new();
    lights.submit(&mut list);
    let opaque = list.commands(RenderPasses::OPAQUE);
    assert_eq!(opaque.len(), MAX_HARDWARE_LIGHTS + 2);
    assert_eq!(opaque[0], DisplayCommand::NumLights(MAX_HARDWARE_LIGHTS));
    assert!(matches!(opaque[MAX_HARDWARE_LIGHTS + 1], DisplayCommand::Ambient { index: 8, .. }));
    assert_eq!(list.commands(RenderPasses::TRANSLUCENT), opaque);

    arena.reset();
    assert!(arena.is_empty());
}

#[test]
fn test_glow_pass_over_frame() {
    let mut store = LightInfoStore::with_key();
    let mut context = LightContext::default();
    populate(&mut context, &mut store);

    let mut depth = SoftwareDepthBuffer::new(320, 240);
    assert_eq!(context.glow_check(&mut store, &camera(), &depth), 8);

    let mut list = DisplayList::new();
    assert_eq!(context.draw_glow(&store, &mut list), 8);
    let sprites = list
        .commands(RenderPasses::TRANSLUCENT)
        .iter()
        .filter(|command| matches!(command, DisplayCommand::Sprite(_)))
        .count();
    assert_eq!(sprites, 8);

    // Scene geometry now covers everything
    depth.clear(0);
    assert_eq!(context.glow_check(&mut store, &camera(), &depth), 0);
    list.clear();
    assert_eq!(context.draw_glow(&store, &mut list), 0);
}

#[test]
fn test_legacy_frame_lights_reference_position() {
    let mut store = LightInfoStore::with_key();
    let mut context = LightContext::default();
    let near = store.insert(LightInfo::point_plain([30, 0, 0], [100, 100, 100], 60));
    let far = store.insert(LightInfo::point_plain([500, 0, 0], [100, 100, 100], 60));
    context.insert_light(far);
    context.insert_light(near);

    let mut lights: LightSet = context.new_lights();
    let reference = Some(Vec3::zeros());
    let strategy = BindStrategy::select(&lights, reference);
    let stats = context.bind_all(&mut lights, &store, strategy, &camera());

    assert_eq!(stats.bound, 1);
    assert_eq!(stats.culled, 1);
    let HardwareLight::Directional(entry) = lights.lights()[0] else {
        unreachable!();
    };
    // 1 - (30 / 60)² = 0.75
    assert_eq!(entry.color, [75, 75, 75]);
    assert_eq!(entry.direction, [120, 0, 0]);
}

#[test]
fn test_dangling_descriptor_is_rejected() {
    let mut store = LightInfoStore::with_key();
    let mut context = LightContext::default();
    let keys = populate(&mut context, &mut store);

    // Freed by its owner without being unregistered
    store.remove(keys[8]);

    let mut lights = context.new_lights();
    lights.set_point_lights_enabled(true);
    let stats = context.bind_all(&mut lights, &store, BindStrategy::Modern, &camera());

    assert_eq!(stats.rejected, 1);
    assert_eq!(stats.bound, MAX_HARDWARE_LIGHTS);
    assert_eq!(stats.dropped, 1);
}

#[test]
fn test_teardown_releases_every_slot() {
    let mut store = LightInfoStore::with_key();
    let mut context = LightContext::default();
    let keys = populate(&mut context, &mut store);

    context.destroy_list();

    assert!(context.registry().is_empty());
    assert_eq!(context.registry().pool().len(), 0);
    let mut list = DisplayList::new();
    assert_eq!(context.draw_glow(&store, &mut list), 0);

    // Every slot is reusable afterwards
    for _ in 0..context.registry().capacity() {
        assert!(context.insert_light(keys[0]).is_some());
    }
    assert!(context.insert_light(keys[0]).is_none());
}
