//! Renderable triangle mesh with a per-vertex tangent frame
//!
//! [`Mesh::from_obj`] flattens the indexed OBJ data into plain vertex arrays
//! (three vertices per triangle, no sharing) and derives a tangent and
//! bitangent for every vertex from the triangle's texture coordinates. The
//! shader uses them to bring normal-map and parallax lookups into world space.

use std::path::Path;

use objview_math::{Vec2, Vec3};

use crate::obj::ObjData;
use crate::AssetError;

/// Below this the UV mapping of a triangle is considered degenerate
const UV_DETERMINANT_EPSILON: f32 = 1e-9;

/// Flat vertex arrays, all of length `3 * triangle_count()`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub tex_coords: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub tangents: Vec<Vec3>,
    pub bitangents: Vec<Vec3>,
}

impl Mesh {
    pub fn empty() -> Self {
        Self::default()
    }

    fn with_capacity(vertices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            tex_coords: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            tangents: Vec::with_capacity(vertices),
            bitangents: Vec::with_capacity(vertices),
        }
    }

    /// Load an OBJ file and build the mesh from it
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let obj = ObjData::load(path.as_ref())?;
        let mesh = Self::from_obj(&obj)?;
        log::info!(
            "Loaded mesh {}: {} triangles",
            path.as_ref().display(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }

    /// De-index OBJ data and compute tangents
    ///
    /// Fails with [`AssetError::IndexOutOfRange`] if a face refers past the end
    /// of one of the lists; the reported index is 1-based, as in the file.
    pub fn from_obj(obj: &ObjData) -> Result<Self, AssetError> {
        let mut mesh = Self::with_capacity(obj.faces.len() * 3);

        for face in &obj.faces {
            let mut positions = [Vec3::ZERO; 3];
            let mut uvs = [Vec2::ZERO; 3];
            let mut normals = [Vec3::ZERO; 3];
            for (i, corner) in face.corners.iter().enumerate() {
                positions[i] = fetch(&obj.positions, corner.position, "position")?;
                uvs[i] = fetch(&obj.tex_coords, corner.tex_coord, "texture coordinate")?;
                normals[i] = fetch(&obj.normals, corner.normal, "normal")?;
            }

            let (tangent, bitangent) = triangle_tangent_basis(positions, uvs);

            for i in 0..3 {
                mesh.positions.push(positions[i]);
                mesh.tex_coords.push(uvs[i]);
                mesh.normals.push(normals[i]);
                mesh.tangents.push(orthogonalize_tangent(normals[i], tangent, bitangent));
                mesh.bitangents.push(bitangent);
            }
        }

        Ok(mesh)
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(self.positions.iter().fold((first, first), |(min, max), &p| {
            (min.min_components(p), max.max_components(p))
        }))
    }
}

fn fetch<T: Copy>(list: &[T], index: usize, kind: &'static str) -> Result<T, AssetError> {
    list.get(index).copied().ok_or(AssetError::IndexOutOfRange {
        kind,
        index: index + 1,
        len: list.len(),
    })
}

/// Unit tangent and bitangent of a triangle, following its UV directions
///
/// The tangent points along increasing `u`, the bitangent along increasing
/// `v`. When the UVs do not span an area there is no such direction; the
/// tangent is then any unit vector in the triangle's plane and the bitangent
/// completes the frame with the face normal.
pub fn triangle_tangent_basis(positions: [Vec3; 3], uvs: [Vec2; 3]) -> (Vec3, Vec3) {
    let dp1 = positions[1] - positions[0];
    let dp2 = positions[2] - positions[0];
    let duv1 = uvs[1] - uvs[0];
    let duv2 = uvs[2] - uvs[0];

    let det = duv1.perp_dot(duv2);
    if det.abs() < UV_DETERMINANT_EPSILON {
        let face_normal = dp1.cross(dp2).normalized();
        let tangent = face_normal.any_perpendicular();
        return (tangent, face_normal.cross(tangent));
    }

    let r = 1.0 / det;
    let tangent = ((dp1 * duv2.y - dp2 * duv1.y) * r).normalized();
    let bitangent = ((dp2 * duv1.x - dp1 * duv2.x) * r).normalized();
    (tangent, bitangent)
}

/// Gram-Schmidt the tangent against a vertex normal
///
/// The result is unit length, perpendicular to `normal`, and oriented so that
/// `normal × tangent` points the same way as `bitangent`.
pub fn orthogonalize_tangent(normal: Vec3, tangent: Vec3, bitangent: Vec3) -> Vec3 {
    let mut t = (tangent - normal * normal.dot(tangent)).normalized();
    // Tangent parallel to the normal, or a zero-area triangle
    if t == Vec3::ZERO {
        t = normal.any_perpendicular();
    }
    if normal.cross(t).dot(bitangent) < 0.0 {
        t = -t;
    }
    t
}
