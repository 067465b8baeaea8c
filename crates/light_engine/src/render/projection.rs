//! World-to-screen projection for light culling and glow tests

use crate::config::ViewportConfig;
use crate::foundation::math::{Mat4, Vec3, Vec4};

/// A world position taken through the view-projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    /// Clip-space x, y, z before the perspective divide
    pub clip: Vec3,
    /// Reciprocal of clip w, capped to 1 when w < 1
    pub inv_w: f32,
}

impl ProjectedPoint {
    /// Normalized device x
    pub fn ndc_x(&self) -> f32 {
        self.clip.x * self.inv_w
    }

    /// Normalized device y
    pub fn ndc_y(&self) -> f32 {
        self.clip.y * self.inv_w
    }

    /// Normalized device z
    pub fn ndc_z(&self) -> f32 {
        self.clip.z * self.inv_w
    }

    /// Pixel coordinates on `viewport`, y pointing down
    pub fn screen_position(&self, viewport: &ViewportConfig) -> (i32, i32) {
        let half_width = viewport.width as f32 / 2.0;
        let half_height = viewport.height as f32 / 2.0;
        let x = self.ndc_x() * half_width + half_width;
        let y = self.ndc_y() * -half_height + half_height;
        (x as i32, y as i32)
    }
}

/// Transform service over the active view-projection
pub trait Projector {
    /// Multiply `world` (w = 1) by the view-projection, keeping x, y, z
    fn transform_xyz(&self, world: &Vec3) -> Vec3;

    /// Project `world` to clip space with a capped reciprocal w
    fn project(&self, world: &Vec3) -> ProjectedPoint;
}

/// Combined view-projection matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewProjection {
    matrix: Mat4,
}

impl ViewProjection {
    /// Wrap a combined view-projection matrix
    pub fn new(matrix: Mat4) -> Self {
        Self { matrix }
    }

    /// Combine a camera's view and projection matrices
    pub fn from_camera(view: &Mat4, projection: &Mat4) -> Self {
        Self::new(projection * view)
    }

    /// Identity transform: world space is clip space
    pub fn identity() -> Self {
        Self::new(Mat4::identity())
    }

    /// Combined matrix
    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    fn transform(&self, world: &Vec3) -> Vec4 {
        self.matrix * Vec4::new(world.x, world.y, world.z, 1.0)
    }
}

impl Default for ViewProjection {
    fn default() -> Self {
        Self::identity()
    }
}

impl Projector for ViewProjection {
    fn transform_xyz(&self, world: &Vec3) -> Vec3 {
        self.transform(world).xyz()
    }

    fn project(&self, world: &Vec3) -> ProjectedPoint {
        let clip = self.transform(world);
        let inv_w = if clip.w < 1.0 { 1.0 } else { 1.0 / clip.w };
        ProjectedPoint { clip: clip.xyz(), inv_w }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Perspective-style matrix with w = z
    fn depth_as_w() -> ViewProjection {
        ViewProjection::new(Mat4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
        ))
    }

    #[test]
    fn test_inv_w_is_capped() {
        let projector = depth_as_w();

        let near = projector.project(&Vec3::new(0.0, 0.0, 0.5));
        assert_relative_eq!(near.inv_w, 1.0);

        let far = projector.project(&Vec3::new(0.0, 0.0, 4.0));
        assert_relative_eq!(far.inv_w, 0.25);
        assert_relative_eq!(far.ndc_z(), 1.0);
    }

    #[test]
    fn test_transform_xyz_skips_divide() {
        let projector = depth_as_w();
        let transformed = projector.transform_xyz(&Vec3::new(2.0, 3.0, 4.0));

        assert_relative_eq!(transformed, Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_screen_position() {
        let viewport = ViewportConfig { width: 320, height: 240 };
        let center = ProjectedPoint { clip: Vec3::zeros(), inv_w: 1.0 };
        assert_eq!(center.screen_position(&viewport), (160, 120));

        let top_right = ProjectedPoint { clip: Vec3::new(0.5, 0.5, 0.0), inv_w: 1.0 };
        assert_eq!(top_right.screen_position(&viewport), (240, 60));
    }
}
