use std::f32::consts::FRAC_PI_2;

use bevy::math::Vec3;
use terra_wgpu::vertex::WVertex;

use crate::{MeshAsset, TerrainError, TerrainResult};

/// Height of the waves surface at distance `r` of its center.
fn wave_height(r: f32) -> f32 {
    0.4 * (1.0 - r / 5.0) * (FRAC_PI_2 + r * 5.0).sin()
}

/// Derivative of [wave_height] along the radius.
fn wave_slope(r: f32) -> f32 {
    -0.4 / 5.0 * (FRAC_PI_2 + r * 5.0).sin() + 0.4 * (1.0 - r / 5.0) * 5.0 * (FRAC_PI_2 + r * 5.0).cos()
}

/// Create the waves surface: concentric ripples fading away from the center.
/// 
/// The surface spans [-3, 3] on the x and z axes with `resolution` vertices per side.
/// Normals are computed from the analytic slope of the surface.
/// 
/// # Errors
/// 
/// * `TerrainError::InvalidArgument` - The resolution is lower than 2.
pub fn waves(resolution: u32) -> TerrainResult<MeshAsset> {
    if resolution < 2 {
        return Err(TerrainError::InvalidArgument(
            format!("waves need at least 2 vertices per side, got {}", resolution)));
    }
    let nb = resolution;

    let mut vertices = Vec::with_capacity((nb * nb) as usize);
    for j in 0..nb {
        for i in 0..nb {
            // Offset so that no sample lies exactly on the center
            let x = 6.0 / nb as f32 * j as f32 - 3.000001;
            let y = 6.0 / nb as f32 * i as f32 - 3.000001;

            let r = (x * x + y * y).sqrt();
            let dh = wave_slope(r);
            let normal = Vec3::new(-x / r * dh, 1.0, -y / r * dh).normalize();

            vertices.push(WVertex {
                position: [x, wave_height(r), y],
                normal: normal.to_array(),
                uv: [j as f32 / (nb - 1) as f32, i as f32 / (nb - 1) as f32],
            });
        }
    }

    let mut indices = Vec::with_capacity(6 * ((nb - 1) * (nb - 1)) as usize);
    for j in 1..nb {
        for i in 1..nb {
            let k = j * nb + i;
            // Both triangles face up
            indices.extend_from_slice(&[k, k - nb - 1, k - nb]);
            indices.extend_from_slice(&[k, k - 1, k - nb - 1]);
        }
    }

    Ok(MeshAsset::new("Waves", vertices, indices))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::normals::face_normal;

    #[test]
    fn waves_grid_is_complete() {
        let mesh = waves(10).unwrap();
        assert_eq!(mesh.vertices.len(), 100);
        assert_eq!(mesh.indices.len(), 6 * 81);
        assert!(mesh.indices.iter().all(|&i| i < 100));
    }

    #[test]
    fn waves_normals_are_unit_and_finite() {
        let mesh = waves(16).unwrap();
        for vertex in &mesh.vertices {
            let normal = Vec3::from_array(vertex.normal);
            assert!(normal.is_finite());
            assert!((normal.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn normals_agree_with_triangle_winding() {
        let mesh = waves(64).unwrap();
        for triangle in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [triangle[0] as usize, triangle[1] as usize, triangle[2] as usize];
            let face = face_normal(
                Vec3::from_array(mesh.vertices[a].position),
                Vec3::from_array(mesh.vertices[b].position),
                Vec3::from_array(mesh.vertices[c].position));
            assert!(face.y > 0.0);
            for vertex in [a, b, c] {
                assert!(face.dot(Vec3::from_array(mesh.vertices[vertex].normal)) > 0.0);
            }
        }
    }

    #[test]
    fn center_normal_points_up() {
        let mesh = waves(16).unwrap();
        let center = mesh.vertices.iter()
            .min_by(|a, b| {
                let ra = a.position[0].hypot(a.position[2]);
                let rb = b.position[0].hypot(b.position[2]);
                ra.total_cmp(&rb)
            })
            .unwrap();
        assert!(Vec3::from_array(center.normal).dot(Vec3::Y) > 0.99);
    }

    #[test]
    fn waves_stay_within_amplitude() {
        let mesh = waves(32).unwrap();
        assert!(mesh.vertices.iter().all(|v| v.position[1].abs() <= 0.4));
        assert!(mesh.bounding_box.min.x >= -3.000001 && mesh.bounding_box.max.x < 3.0);
    }

    #[test]
    fn waves_need_two_vertices_per_side() {
        assert!(matches!(waves(1), Err(TerrainError::InvalidArgument(_))));
    }

    #[test]
    fn wave_peak_is_at_the_center() {
        assert!((wave_height(0.0) - 0.4).abs() < 1e-6);
        assert!(wave_slope(0.0).abs() < 0.1);
    }
}
