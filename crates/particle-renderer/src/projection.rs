//! Screen-space orthographic projection

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Projection uniform for GPU
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ProjectionUniform {
    pub matrix: [[f32; 4]; 4],
}

/// Maps pixel coordinates with the origin at the bottom-left corner of a
/// `width x height` surface onto clip space.
pub fn screen_projection(width: u32, height: u32) -> Mat4 {
    Mat4::orthographic_rh(0.0, width as f32, 0.0, height as f32, -1.0, 1.0)
}

impl ProjectionUniform {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            matrix: screen_projection(width, height).to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    fn to_clip(m: Mat4, p: Vec2) -> Vec3 {
        m.project_point3(p.extend(0.0))
    }

    #[test]
    fn test_corners_map_to_clip_edges() {
        let m = screen_projection(1920, 1080);

        assert!(to_clip(m, Vec2::ZERO).truncate().abs_diff_eq(Vec2::new(-1.0, -1.0), 1e-6));
        assert!(to_clip(m, Vec2::new(1920.0, 1080.0)).truncate().abs_diff_eq(Vec2::ONE, 1e-6));
        assert!(to_clip(m, Vec2::new(960.0, 540.0)).truncate().abs_diff_eq(Vec2::ZERO, 1e-6));
    }

    #[test]
    fn test_depth_inside_clip_volume() {
        let z = to_clip(screen_projection(800, 600), Vec2::new(10.0, 10.0)).z;
        assert!((0.0..=1.0).contains(&z));
    }

    #[test]
    fn test_uniform_is_column_major_mat4() {
        assert_eq!(std::mem::size_of::<ProjectionUniform>(), 64);
        let u = ProjectionUniform::new(2, 2);
        assert_eq!(u.matrix[0][0], 1.0);
        assert_eq!(u.matrix[1][1], 1.0);
        assert_eq!(u.matrix[3][0], -1.0);
        assert_eq!(u.matrix[3][1], -1.0);
    }
}
