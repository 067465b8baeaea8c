//! Depth buffer access
//!
//! Depth values are hardware integers where smaller means nearer. A projected
//! point at normalized depth `z` maps to `trunc(z * DEPTH_HALF_RANGE) + DEPTH_HALF_RANGE`.

/// Half of the projected depth range in hardware units
pub const DEPTH_HALF_RANGE: i32 = (0x3FF / 2) * 32;

/// Clear value of an empty depth buffer, farther than any projected point
pub const DEPTH_FAR: i32 = 0x3FFFF;

/// Convert a normalized projected depth to hardware depth units
pub fn hardware_depth(ndc_z: f32) -> i32 {
    (ndc_z * DEPTH_HALF_RANGE as f32) as i32 + DEPTH_HALF_RANGE
}

/// Row-major offset of (x, y), widened before multiplying
fn pixel_offset(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

/// Read-only access to the frame's depth buffer
pub trait DepthBuffer {
    /// Depth stored at pixel (x, y)
    fn read_depth(&self, x: i32, y: i32) -> i32;
}

/// Row-major software depth buffer
#[derive(Debug, Clone)]
pub struct SoftwareDepthBuffer {
    values: Vec<i32>,
    width: u32,
    height: u32,
}

impl SoftwareDepthBuffer {
    /// Buffer cleared to [`DEPTH_FAR`]
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, DEPTH_FAR)
    }

    /// Buffer with every pixel set to `depth`
    pub fn filled(width: u32, height: u32, depth: i32) -> Self {
        Self {
            values: vec![depth; pixel_offset(width, 0, height)],
            width,
            height,
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reset every pixel to `depth`
    pub fn clear(&mut self, depth: i32) {
        self.values.fill(depth);
    }

    /// Write a depth value at (x, y), keeping the nearer of old and new.
    /// Silently ignores out-of-bounds coordinates.
    pub fn write_depth(&mut self, x: i32, y: i32, depth: i32) {
        if let Some(idx) = self.index(x, y) {
            if depth < self.values[idx] {
                self.values[idx] = depth;
            }
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = u32::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(pixel_offset(self.width, x, y))
    }
}

impl DepthBuffer for SoftwareDepthBuffer {
    /// Out-of-bounds reads return 0, nearer than anything projected
    fn read_depth(&self, x: i32, y: i32) -> i32 {
        self.index(x, y).map_or(0, |idx| self.values[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hardware_depth_range() {
        assert_eq!(DEPTH_HALF_RANGE, 16352);
        assert_eq!(hardware_depth(0.0), 16352);
        assert_eq!(hardware_depth(1.0), 32704);
        assert_eq!(hardware_depth(-1.0), 0);
    }

    #[test]
    fn test_write_keeps_nearest() {
        let mut depth = SoftwareDepthBuffer::new(4, 4);
        depth.write_depth(1, 2, 500);
        depth.write_depth(1, 2, 900);

        assert_eq!(depth.read_depth(1, 2), 500);
        assert_eq!(depth.read_depth(0, 0), DEPTH_FAR);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_pixel_offset_does_not_wrap() {
        // 70000² overflows u32
        assert_eq!(pixel_offset(70_000, 0, 70_000), 4_900_000_000);
        assert_eq!(pixel_offset(u32::MAX, u32::MAX, 1), 2 * u32::MAX as usize);
        assert_eq!(pixel_offset(4, 3, 2), 11);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut depth = SoftwareDepthBuffer::filled(2, 2, 100);
        depth.write_depth(5, 5, 1);

        assert_eq!(depth.read_depth(-1, 0), 0);
        assert_eq!(depth.read_depth(2, 0), 0);
        assert_eq!(depth.read_depth(1, 1), 100);
    }
}
