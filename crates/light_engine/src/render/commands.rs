//! Display-list light commands
//!
//! Light state is appended to two parallel streams, one per render pass, and
//! both receive identical sequences.

use bitflags::bitflags;

use super::billboard::{BlendMode, GlowSprite, SpriteRenderer};
use crate::lighting::{AmbientEntry, HardwareLight};

bitflags! {
    /// Render passes a command stream belongs to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RenderPasses: u8 {
        /// Opaque geometry
        const OPAQUE = 1 << 0;
        /// Translucent geometry and effects
        const TRANSLUCENT = 1 << 1;
    }
}

/// Passes that receive light state
pub const LIGHT_PASSES: RenderPasses = RenderPasses::OPAQUE.union(RenderPasses::TRANSLUCENT);

/// Ordered, append-only sink for light state
///
/// `pass` is always a single flag.
pub trait LightStream {
    /// Declare how many lights follow
    fn emit_light_count(&mut self, pass: RenderPasses, count: usize);

    /// Emit one bound light, `index` starting at 1
    fn emit_light(&mut self, pass: RenderPasses, light: &HardwareLight, index: usize);

    /// Emit the ambient term, always after the bound lights
    fn emit_ambient(&mut self, pass: RenderPasses, ambient: &AmbientEntry, index: usize);
}

/// A recorded display-list command
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCommand {
    /// Number of lights for subsequent geometry
    NumLights(usize),
    /// One hardware light
    Light {
        /// 1-based light index
        index: usize,
        /// Encoded light
        light: HardwareLight,
    },
    /// Ambient term
    Ambient {
        /// 1-based light index, one past the last bound light
        index: usize,
        /// Encoded ambient
        ambient: AmbientEntry,
    },
    /// Render state setup for a run of sprites
    BeginSprites(BlendMode),
    /// One billboard sprite
    Sprite(GlowSprite),
}

/// In-memory display list with one command stream per pass
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    opaque: Vec<DisplayCommand>,
    translucent: Vec<DisplayCommand>,
}

impl DisplayList {
    /// Create an empty display list
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded for `pass`
    ///
    /// A multi-flag or empty `pass` yields the opaque stream if it is included,
    /// otherwise the translucent one.
    pub fn commands(&self, pass: RenderPasses) -> &[DisplayCommand] {
        if pass.contains(RenderPasses::OPAQUE) {
            &self.opaque
        } else {
            &self.translucent
        }
    }

    /// Drop every recorded command
    pub fn clear(&mut self) {
        self.opaque.clear();
        self.translucent.clear();
    }

    fn stream_mut(&mut self, pass: RenderPasses) -> &mut Vec<DisplayCommand> {
        if pass.contains(RenderPasses::OPAQUE) {
            &mut self.opaque
        } else {
            &mut self.translucent
        }
    }
}

impl LightStream for DisplayList {
    fn emit_light_count(&mut self, pass: RenderPasses, count: usize) {
        self.stream_mut(pass).push(DisplayCommand::NumLights(count));
    }

    fn emit_light(&mut self, pass: RenderPasses, light: &HardwareLight, index: usize) {
        self.stream_mut(pass).push(DisplayCommand::Light { index, light: *light });
    }

    fn emit_ambient(&mut self, pass: RenderPasses, ambient: &AmbientEntry, index: usize) {
        self.stream_mut(pass).push(DisplayCommand::Ambient { index, ambient: *ambient });
    }
}

impl SpriteRenderer for DisplayList {
    fn begin_batch(&mut self, blend: BlendMode) {
        self.translucent.push(DisplayCommand::BeginSprites(blend));
    }

    fn draw_sprite(&mut self, sprite: &GlowSprite) {
        self.translucent.push(DisplayCommand::Sprite(sprite.clone()));
    }
}
