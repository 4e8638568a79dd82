//! Per-vertex ambient occlusion baking.
//!
//! Each vertex casts a hemisphere of rays (spherical Fibonacci
//! distribution, oriented along the smoothed vertex normal) against the
//! mesh's own triangles. The fraction of blocked rays, scaled by the
//! attenuation factor, darkens the vertex's occlusion channel. The bake
//! runs once at asset load time on the CPU; the shader multiplies the
//! resulting factor into the fragment color.

use cgmath::{InnerSpace, Vector3};

use crate::data_structures::model::ModelVertex;

/// Rays starting closer than this to a triangle don't count as blocked,
/// which keeps a vertex from occluding itself with its own faces.
const RAY_MIN_T: f32 = 1e-3;

/// Parameters for the ambient occlusion bake.
///
/// `quality` in [0, 1] selects the number of sample rays per vertex
/// (8 at 0.0 up to 64 at 1.0). `attenuation` in [0, 1] bounds how dark a
/// fully blocked vertex can get: its occlusion factor is
/// `1 - attenuation * blocked_fraction`.
#[derive(Clone, Copy, Debug)]
pub struct AoBakeParams {
    pub quality: f32,
    pub attenuation: f32,
}

impl Default for AoBakeParams {
    fn default() -> Self {
        Self {
            quality: 1.0,
            attenuation: 0.98,
        }
    }
}

impl AoBakeParams {
    fn sample_count(&self) -> u32 {
        (8.0 + self.quality.clamp(0.0, 1.0) * 56.0).round() as u32
    }
}

struct Triangle {
    v0: Vector3<f32>,
    v1: Vector3<f32>,
    v2: Vector3<f32>,
}

/// Bake occlusion factors into the `occlusion` channel of `vertices`.
///
/// `indices` are triangle-list indices into `vertices`. Vertices that are
/// not referenced by any triangle keep their current occlusion value.
pub fn bake_vertex_occlusion(vertices: &mut [ModelVertex], indices: &[u32], params: &AoBakeParams) {
    if vertices.is_empty() || indices.len() < 3 {
        return;
    }

    let triangles = build_triangles(vertices, indices);
    let normals = smooth_vertex_normals(vertices, indices);

    // Rays only look for blockers within half the bounding diagonal;
    // geometry further away contributes no occlusion.
    let (min, max) = bounds(vertices);
    let max_dist = (max - min).magnitude() * 0.5;
    if max_dist <= 0.0 {
        return;
    }

    let samples = params.sample_count();
    let attenuation = params.attenuation.clamp(0.0, 1.0);

    for (i, vertex) in vertices.iter_mut().enumerate() {
        let normal = match normals[i] {
            Some(n) => n,
            // Not part of any triangle, nothing sensible to sample.
            None => continue,
        };
        let origin = Vector3::from(vertex.position) + normal * RAY_MIN_T;

        let mut blocked = 0u32;
        for s in 0..samples {
            let dir = hemisphere_sample(normal, s, samples);
            if ray_hits_any(&triangles, origin, dir, max_dist) {
                blocked += 1;
            }
        }

        vertex.occlusion = 1.0 - attenuation * (blocked as f32 / samples as f32);
    }
}

fn bounds(vertices: &[ModelVertex]) -> (Vector3<f32>, Vector3<f32>) {
    let mut min = Vector3::new(f32::MAX, f32::MAX, f32::MAX);
    let mut max = Vector3::new(f32::MIN, f32::MIN, f32::MIN);
    for v in vertices {
        let p = Vector3::from(v.position);
        min = Vector3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
        max = Vector3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
    }
    (min, max)
}

fn build_triangles(vertices: &[ModelVertex], indices: &[u32]) -> Vec<Triangle> {
    indices
        .chunks_exact(3)
        .map(|c| Triangle {
            v0: Vector3::from(vertices[c[0] as usize].position),
            v1: Vector3::from(vertices[c[1] as usize].position),
            v2: Vector3::from(vertices[c[2] as usize].position),
        })
        .collect()
}

/// Area-weighted smooth normals. `None` for vertices outside any triangle.
fn smooth_vertex_normals(vertices: &[ModelVertex], indices: &[u32]) -> Vec<Option<Vector3<f32>>> {
    let mut accumulated = vec![Vector3::new(0.0, 0.0, 0.0); vertices.len()];
    let mut referenced = vec![false; vertices.len()];

    for c in indices.chunks_exact(3) {
        let p0 = Vector3::from(vertices[c[0] as usize].position);
        let p1 = Vector3::from(vertices[c[1] as usize].position);
        let p2 = Vector3::from(vertices[c[2] as usize].position);
        // The unnormalized cross product weights by triangle area.
        let face_normal = (p1 - p0).cross(p2 - p0);
        for &idx in c {
            accumulated[idx as usize] += face_normal;
            referenced[idx as usize] = true;
        }
    }

    accumulated
        .into_iter()
        .zip(referenced)
        .map(|(n, used)| {
            if !used {
                return None;
            }
            if n.magnitude2() > 0.0 {
                Some(n.normalize())
            } else {
                // Degenerate surrounding faces, fall back to up.
                Some(Vector3::new(0.0, 1.0, 0.0))
            }
        })
        .collect()
}

/// Deterministic spherical Fibonacci sample on the hemisphere around
/// `normal`. Deterministic sampling keeps bakes reproducible between runs.
fn hemisphere_sample(normal: Vector3<f32>, sample_idx: u32, total_samples: u32) -> Vector3<f32> {
    let golden_angle = std::f32::consts::PI * (3.0 - 5.0f32.sqrt());
    let y = 1.0 - (sample_idx as f32 / (total_samples - 1).max(1) as f32).clamp(0.0, 1.0);
    let radius = (1.0 - y * y).max(0.0).sqrt();
    let theta = golden_angle * sample_idx as f32;

    let x = theta.cos() * radius;
    let z = theta.sin() * radius;

    // Basis around the normal.
    let up = if normal.y.abs() < 0.99 {
        Vector3::new(0.0, 1.0, 0.0)
    } else {
        Vector3::new(1.0, 0.0, 0.0)
    };
    let tangent = normal.cross(up).normalize();
    let bitangent = normal.cross(tangent);

    (tangent * x + normal * y + bitangent * z).normalize()
}

fn ray_hits_any(
    triangles: &[Triangle],
    origin: Vector3<f32>,
    dir: Vector3<f32>,
    max_dist: f32,
) -> bool {
    triangles
        .iter()
        .any(|tri| ray_triangle_intersect(origin, dir, tri, max_dist))
}

/// Möller–Trumbore ray-triangle intersection.
fn ray_triangle_intersect(
    origin: Vector3<f32>,
    dir: Vector3<f32>,
    tri: &Triangle,
    max_dist: f32,
) -> bool {
    let edge1 = tri.v1 - tri.v0;
    let edge2 = tri.v2 - tri.v0;
    let h = dir.cross(edge2);
    let a = edge1.dot(h);

    if a.abs() < 1e-5 {
        return false;
    }

    let f = 1.0 / a;
    let s = origin - tri.v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return false;
    }

    let q = s.cross(edge1);
    let v = f * dir.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return false;
    }

    let t = f * edge2.dot(q);
    t > RAY_MIN_T && t < max_dist
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(position: [f32; 3]) -> ModelVertex {
        ModelVertex::pack(position, [0.0, 0.0])
    }

    /// A small triangle in the xz plane plus a wide blocking quad above it.
    fn capped_floor() -> (Vec<ModelVertex>, Vec<u32>) {
        let vertices = vec![
            // Floor triangle, wound so the accumulated normal points up.
            vertex([0.0, 0.0, 0.0]),
            vertex([2.0, 0.0, 2.0]),
            vertex([2.0, 0.0, 0.0]),
            // Ceiling quad at y = 1.
            vertex([-10.0, 1.0, -10.0]),
            vertex([10.0, 1.0, -10.0]),
            vertex([10.0, 1.0, 10.0]),
            vertex([-10.0, 1.0, 10.0]),
        ];
        let indices = vec![0, 1, 2, 3, 4, 5, 3, 5, 6];
        (vertices, indices)
    }

    #[test]
    fn lone_triangle_stays_fully_lit() {
        let mut vertices = vec![
            vertex([0.0, 0.0, 0.0]),
            vertex([1.0, 0.0, 0.0]),
            vertex([0.0, 0.0, 1.0]),
        ];
        let indices = vec![0, 1, 2];

        bake_vertex_occlusion(&mut vertices, &indices, &AoBakeParams::default());

        for v in &vertices {
            assert!(
                (v.occlusion - 1.0).abs() < 1e-6,
                "open triangle should not self-occlude, got {}",
                v.occlusion
            );
        }
    }

    #[test]
    fn capped_vertices_are_darkened() {
        let (mut vertices, indices) = capped_floor();

        bake_vertex_occlusion(&mut vertices, &indices, &AoBakeParams::default());

        for v in vertices.iter().take(3) {
            assert!(
                v.occlusion < 0.5,
                "floor vertex under a ceiling should be occluded, got {}",
                v.occlusion
            );
        }
    }

    #[test]
    fn attenuation_bounds_the_darkening() {
        let (mut vertices, indices) = capped_floor();
        let params = AoBakeParams {
            quality: 1.0,
            attenuation: 0.98,
        };

        bake_vertex_occlusion(&mut vertices, &indices, &params);

        for v in &vertices {
            assert!(v.occlusion >= 1.0 - params.attenuation - 1e-6);
            assert!(v.occlusion <= 1.0);
        }
    }

    #[test]
    fn lower_attenuation_keeps_vertices_brighter() {
        let (mut strong, indices) = capped_floor();
        let mut weak = strong.clone();

        bake_vertex_occlusion(
            &mut strong,
            &indices,
            &AoBakeParams {
                quality: 1.0,
                attenuation: 0.98,
            },
        );
        bake_vertex_occlusion(
            &mut weak,
            &indices,
            &AoBakeParams {
                quality: 1.0,
                attenuation: 0.5,
            },
        );

        for (s, w) in strong.iter().zip(weak.iter()).take(3) {
            assert!(w.occlusion > s.occlusion);
        }
    }

    #[test]
    fn hemisphere_samples_are_unit_length_and_above_horizon() {
        let normal = Vector3::new(0.0, 1.0, 0.0);
        for i in 0..32 {
            let sample = hemisphere_sample(normal, i, 32);
            assert!((sample.magnitude() - 1.0).abs() < 1e-2);
            assert!(sample.dot(normal) >= -1e-2);
        }
    }
}
