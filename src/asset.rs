//! CPU-side asset loading.
//!
//! Wavefront OBJ files are parsed with [`tobj`] and expanded into a flat, non-indexed list of
//! [`MeshVertex`]: every triangle corner becomes its own vertex, so [`MeshData::vertex_count`]
//! is exactly the number of vertices a `TRIANGLES` draw must cover. Images are decoded with
//! [`image`] and flipped so that row 0 is the bottom row, which is what OpenGL expects.

use std::{io::BufRead, path::Path};

use glam::{Vec2, Vec3};
use image::DynamicImage;

use crate::{
    abs::{Vertex, VertexAttribute},
    error::{Result, ViewerError},
};

/// One interleaved vertex: position, texture coordinate and normal, tightly packed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
pub struct MeshVertex {
    pub position: Vec3,
    pub tex_coord: Vec2,
    pub normal: Vec3,
}

impl MeshVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 8;
}

impl Vertex for MeshVertex {
    const ATTRIBUTES: &'static [VertexAttribute] = &[
        VertexAttribute {
            location: 0,
            components: 3,
            offset: 0,
        },
        VertexAttribute {
            location: 1,
            components: 2,
            offset: size_of::<Vec3>(),
        },
        VertexAttribute {
            location: 2,
            components: 3,
            offset: size_of::<Vec3>() + size_of::<Vec2>(),
        },
    ];
}

/// Geometry of one model, ready to be uploaded as a single vertex buffer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub name: String,
    pub vertices: Vec<MeshVertex>,
}

impl MeshData {
    /// Number of vertices to draw. Never an index count.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// The vertex stream as `[x, y, z, u, v, nx, ny, nz, ...]`.
    pub fn interleaved(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.vertices.len() * MeshVertex::FLOATS);
        for v in &self.vertices {
            data.extend_from_slice(&v.position.to_array());
            data.extend_from_slice(&v.tex_coord.to_array());
            data.extend_from_slice(&v.normal.to_array());
        }
        data
    }

    /// Expands the indexed models produced by `tobj` into one flat vertex list.
    ///
    /// Models are concatenated in file order. Missing texture coordinates or normals are
    /// filled with zeros.
    fn from_models(name: &str, models: &[tobj::Model]) -> Self {
        let total = models.iter().map(|m| m.mesh.indices.len()).sum();
        let mut vertices = Vec::with_capacity(total);

        for model in models {
            let mesh = &model.mesh;
            for &index in &mesh.indices {
                let i = index as usize;
                let position = Vec3::new(
                    mesh.positions[i * 3],
                    mesh.positions[i * 3 + 1],
                    mesh.positions[i * 3 + 2],
                );
                let tex_coord = Vec2::new(
                    mesh.texcoords.get(i * 2).copied().unwrap_or(0.0),
                    mesh.texcoords.get(i * 2 + 1).copied().unwrap_or(0.0),
                );
                let normal = Vec3::new(
                    mesh.normals.get(i * 3).copied().unwrap_or(0.0),
                    mesh.normals.get(i * 3 + 1).copied().unwrap_or(0.0),
                    mesh.normals.get(i * 3 + 2).copied().unwrap_or(0.0),
                );
                vertices.push(MeshVertex {
                    position,
                    tex_coord,
                    normal,
                });
            }
        }

        Self {
            name: name.to_string(),
            vertices,
        }
    }
}

/// Loads and expands an OBJ file. Materials referenced by the file are ignored.
pub fn load_mesh(path: &Path) -> Result<MeshData> {
    let (models, _materials) =
        tobj::load_obj(path, &tobj::GPU_LOAD_OPTIONS).map_err(|source| ViewerError::Mesh {
            path: path.to_path_buf(),
            source,
        })?;

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mesh = MeshData::from_models(&name, &models);
    log::debug!(
        "Loaded mesh {:?}: {} model(s), {} vertices",
        path,
        models.len(),
        mesh.vertex_count()
    );
    Ok(mesh)
}

/// Parses OBJ text from a reader. `mtllib` statements are skipped.
pub fn parse_mesh<R: BufRead>(name: &str, reader: &mut R) -> Result<MeshData, tobj::LoadError> {
    let (models, _materials) = tobj::load_obj_buf(reader, &tobj::GPU_LOAD_OPTIONS, |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })?;
    Ok(MeshData::from_models(name, &models))
}

/// Decodes an image file and flips it to bottom-left origin.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let image = image::open(path).map_err(|source| ViewerError::Texture {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!(
        "Loaded image {:?}: {}x{}",
        path,
        image.width(),
        image.height()
    );
    Ok(image.flipv())
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Cursor;

    use super::*;

    pub(crate) const TRIANGLE_OBJ: &str = "\
o tri
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 0.0 1.0
vn 0.0 0.0 1.0
f 1/1/1 2/2/1 3/3/1
";

    pub(crate) fn triangle(name: &str) -> MeshData {
        parse_mesh(name, &mut Cursor::new(TRIANGLE_OBJ)).unwrap()
    }

    #[test]
    fn test_vertex_layout_matches_interleaving() {
        assert_eq!(size_of::<MeshVertex>(), 32);
        assert_eq!(MeshVertex::stride(), 32);
        let offsets: Vec<usize> = MeshVertex::ATTRIBUTES.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 20]);
        assert_eq!(std::mem::offset_of!(MeshVertex, position), 0);
        assert_eq!(std::mem::offset_of!(MeshVertex, tex_coord), 12);
        assert_eq!(std::mem::offset_of!(MeshVertex, normal), 20);
        let components: Vec<i32> = MeshVertex::ATTRIBUTES.iter().map(|a| a.components).collect();
        assert_eq!(components, vec![3, 2, 3]);
    }

    #[test]
    fn test_single_triangle_buffer() {
        let mesh = triangle("tri");
        assert_eq!(mesh.vertex_count(), 3);

        let data = mesh.interleaved();
        assert_eq!(data.len(), 24);
        // second corner: position, uv, normal at the declared float offsets
        assert_eq!(&data[8..11], &[1.0, 0.0, 0.0]);
        assert_eq!(&data[11..13], &[1.0, 0.0]);
        assert_eq!(&data[13..16], &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_quad_is_expanded_not_indexed() {
        let obj = "\
v -1 -1 0
v 1 -1 0
v 1 1 0
v -1 1 0
f 1 2 3 4
";
        let mesh = parse_mesh("quad", &mut Cursor::new(obj)).unwrap();
        // triangulated into two triangles, each corner its own vertex
        assert_eq!(mesh.vertex_count(), 6);
        assert!(mesh
            .vertices
            .iter()
            .all(|v| v.tex_coord == Vec2::ZERO && v.normal == Vec3::ZERO));
    }

    #[test]
    fn test_objects_are_concatenated() {
        let obj = format!("{TRIANGLE_OBJ}o second\nv 5 5 5\nv 6 5 5\nv 5 6 5\nf 4 5 6\n");
        let mesh = parse_mesh("two", &mut Cursor::new(obj)).unwrap();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.vertices[3].position, Vec3::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn test_load_mesh_from_file() {
        let dir = std::env::temp_dir().join(format!("stadium-asset-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("roof.obj");
        std::fs::write(&path, TRIANGLE_OBJ).unwrap();

        let mesh = load_mesh(&path).unwrap();
        assert_eq!(mesh.name, "roof");
        assert_eq!(mesh.vertex_count(), 3);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_files_are_errors() {
        let missing = Path::new("definitely/not/here.obj");
        assert!(matches!(load_mesh(missing), Err(ViewerError::Mesh { .. })));
        let missing = Path::new("definitely/not/here.png");
        assert!(matches!(load_image(missing), Err(ViewerError::Texture { .. })));
    }

    #[test]
    fn test_image_is_flipped() {
        let dir = std::env::temp_dir().join(format!("stadium-image-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("stripe.png");
        let mut img = image::RgbaImage::new(1, 2);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.put_pixel(0, 1, image::Rgba([0, 0, 255, 255]));
        img.save(&path).unwrap();

        let loaded = load_image(&path).unwrap().to_rgba8();
        assert_eq!(loaded.get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(loaded.get_pixel(0, 1).0, [255, 0, 0, 255]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
