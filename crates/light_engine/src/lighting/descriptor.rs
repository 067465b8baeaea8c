//! Light descriptors
//!
//! A descriptor is the entity-side description of one light. Positions are
//! fixed-point world units, directions are signed 8-bit normals scaled to ±127,
//! and colors are 8-bit RGB.

use crate::foundation::math::{vec3_from_i16, Vec3};

use super::error::{LightError, LightResult};

/// Light kind tag
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightKind {
    /// Point light that also draws a glow sprite when unoccluded
    PointGlow = 0,
    /// Directional light
    Directional = 1,
    /// Point light without glow
    PointPlain = 2,
}

impl LightKind {
    /// Whether this kind carries point parameters
    pub const fn is_point(self) -> bool {
        matches!(self, Self::PointGlow | Self::PointPlain)
    }
}

impl TryFrom<u8> for LightKind {
    type Error = LightError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::PointGlow),
            1 => Ok(Self::Directional),
            2 => Ok(Self::PointPlain),
            other => Err(LightError::UnknownLightKind(other)),
        }
    }
}

impl From<LightKind> for u8 {
    fn from(kind: LightKind) -> Self {
        kind as u8
    }
}

/// Point light parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointParams {
    /// World position
    pub position: [i16; 3],
    /// RGB color
    pub color: [u8; 3],
    /// Radius of influence in world units
    pub radius: i16,
    /// Set by the glow visibility pass, read by the glow draw pass
    pub draw_glow: bool,
}

impl PointParams {
    /// World position as a float vector
    pub fn world_position(&self) -> Vec3 {
        vec3_from_i16(self.position)
    }
}

/// Directional light parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionalParams {
    /// Direction the light travels along, components in ±127
    pub direction: [i8; 3],
    /// RGB color
    pub color: [u8; 3],
}

/// A light descriptor
///
/// The variant is the kind tag; the payload is only reachable through the
/// matching tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightInfo {
    /// Point light with glow sprite
    PointGlow(PointParams),
    /// Directional light
    Directional(DirectionalParams),
    /// Point light without glow sprite
    PointPlain(PointParams),
}

impl LightInfo {
    /// Create a point light of the given point kind
    ///
    /// Fails with [`LightError::WrongLightKind`] if `kind` is directional.
    pub fn point(kind: LightKind, position: [i16; 3], color: [u8; 3], radius: i16) -> LightResult<Self> {
        let params = PointParams {
            position,
            color,
            radius,
            draw_glow: false,
        };
        match kind {
            LightKind::PointGlow => Ok(Self::PointGlow(params)),
            LightKind::PointPlain => Ok(Self::PointPlain(params)),
            LightKind::Directional => Err(LightError::WrongLightKind {
                expected: "point",
                found: kind,
            }),
        }
    }

    /// Create a point light that draws a glow sprite
    pub fn point_glow(position: [i16; 3], color: [u8; 3], radius: i16) -> Self {
        Self::PointGlow(PointParams { position, color, radius, draw_glow: false })
    }

    /// Create a point light without glow
    pub fn point_plain(position: [i16; 3], color: [u8; 3], radius: i16) -> Self {
        Self::PointPlain(PointParams { position, color, radius, draw_glow: false })
    }

    /// Create a directional light
    pub fn directional(direction: [i8; 3], color: [u8; 3]) -> Self {
        Self::Directional(DirectionalParams { direction, color })
    }

    /// Kind tag of this descriptor
    pub const fn kind(&self) -> LightKind {
        match self {
            Self::PointGlow(_) => LightKind::PointGlow,
            Self::Directional(_) => LightKind::Directional,
            Self::PointPlain(_) => LightKind::PointPlain,
        }
    }

    /// Point parameters, if this is a point light
    pub fn point_params(&self) -> LightResult<&PointParams> {
        match self {
            Self::PointGlow(params) | Self::PointPlain(params) => Ok(params),
            Self::Directional(_) => Err(self.mismatch("point")),
        }
    }

    /// Mutable point parameters, if this is a point light
    pub fn point_params_mut(&mut self) -> LightResult<&mut PointParams> {
        let found = self.kind();
        match self {
            Self::PointGlow(params) | Self::PointPlain(params) => Ok(params),
            Self::Directional(_) => Err(LightError::WrongLightKind { expected: "point", found }),
        }
    }

    /// Directional parameters, if this is a directional light
    pub fn directional_params(&self) -> LightResult<&DirectionalParams> {
        match self {
            Self::Directional(params) => Ok(params),
            Self::PointGlow(_) | Self::PointPlain(_) => Err(self.mismatch("directional")),
        }
    }

    /// Overwrite this descriptor with a fresh point light of `kind`
    pub fn set_point(&mut self, kind: LightKind, position: [i16; 3], color: [u8; 3], radius: i16) -> LightResult<()> {
        *self = Self::point(kind, position, color, radius)?;
        Ok(())
    }

    /// Overwrite this descriptor with a directional light
    pub fn set_directional(&mut self, direction: [i8; 3], color: [u8; 3]) {
        *self = Self::directional(direction, color);
    }

    /// Move a point light
    pub fn set_point_position(&mut self, position: [i16; 3]) -> LightResult<()> {
        self.point_params_mut()?.position = position;
        Ok(())
    }

    /// Recolor and resize a point light
    pub fn set_point_color_and_radius(&mut self, color: [u8; 3], radius: i16) -> LightResult<()> {
        let params = self.point_params_mut()?;
        params.color = color;
        params.radius = radius;
        Ok(())
    }

    fn mismatch(&self, expected: &'static str) -> LightError {
        LightError::WrongLightKind { expected, found: self.kind() }
    }
}
