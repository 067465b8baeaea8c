//! Glow visibility and glow sprite drawing
//!
//! Once per frame, after opaque geometry has filled the depth buffer,
//! [`glow_check`] marks which point-glow lights are unoccluded. [`draw_glow`]
//! then draws an additive billboard over each of them.

use crate::config::ViewportConfig;
use crate::foundation::collections::LightInfoStore;
use crate::render::depth::hardware_depth;
use crate::render::{BlendMode, DepthBuffer, GlowSprite, Projector, SpriteRenderer};

use super::descriptor::LightInfo;
use super::registry::LightRegistry;

/// World-space sprite scale per unit of squared radius
const GLOW_SCALE_PER_RADIUS_SQ: f32 = 2e-6;

/// Primitive alpha of glow sprites
const GLOW_ALPHA: u8 = 50;

/// Update the glow flag of every point-glow light
///
/// A light is visible when it projects inside the view volume and its depth is
/// strictly nearer than what the depth buffer holds at its pixel. Returns the
/// number of visible lights.
pub fn glow_check(
    registry: &LightRegistry,
    store: &mut LightInfoStore,
    projector: &dyn Projector,
    depth: &dyn DepthBuffer,
    viewport: &ViewportConfig,
) -> usize {
    let mut visible = 0;

    for (_, key) in registry {
        let Some(LightInfo::PointGlow(params)) = store.get_mut(key) else {
            continue;
        };

        let projected = projector.project(&params.world_position());
        params.draw_glow = false;

        if projected.clip.z > 1.0 && projected.ndc_x().abs() < 1.0 && projected.ndc_y().abs() < 1.0 {
            let (screen_x, screen_y) = projected.screen_position(viewport);
            let light_depth = hardware_depth(projected.ndc_z());
            let buffer_depth = depth.read_depth(screen_x, screen_y);

            if light_depth < buffer_depth {
                params.draw_glow = true;
                visible += 1;
            }
            log::trace!(
                "Glow: light at ({}, {}) depth {} vs buffer {}",
                screen_x, screen_y, light_depth, buffer_depth
            );
        }
    }

    visible
}

/// Draw a glow sprite for every point-glow light marked visible
///
/// Returns the number of sprites drawn.
pub fn draw_glow(registry: &LightRegistry, store: &LightInfoStore, sprites: &mut dyn SpriteRenderer) -> usize {
    if registry.is_empty() {
        return 0;
    }

    sprites.begin_batch(BlendMode::Additive);

    let mut drawn = 0;
    for (_, key) in registry {
        let Some(LightInfo::PointGlow(params)) = store.get(key) else {
            continue;
        };
        if !params.draw_glow {
            continue;
        }

        let radius = f32::from(params.radius);
        let scale = radius * radius * GLOW_SCALE_PER_RADIUS_SQ;
        let [r, g, b] = params.color;
        sprites.draw_sprite(&GlowSprite::new(params.world_position(), scale, [r, g, b, GLOW_ALPHA]));
        drawn += 1;
    }

    drawn
}
