//! OpenGL implementation of [`RenderBackend`].

use std::sync::Arc;

use glam::{Mat4, Vec4};
use glow::HasContext;
use image::DynamicImage;

use crate::{
    abs::{Mesh, Shader, ShaderProgram, Texture},
    asset::MeshData,
    error::Result,
    render::{MatrixUniform, RenderBackend},
};

/// Compiles and links `render/shaders/<name>/{vert,frag}.glsl`.
macro_rules! shader_program {
    ($name:ident, $gl:expr) => {{
        let vert = Shader::new(
            $gl,
            glow::VERTEX_SHADER,
            include_str!(concat!("shaders/", stringify!($name), "/vert.glsl")),
        )?;
        let frag = Shader::new(
            $gl,
            glow::FRAGMENT_SHADER,
            include_str!(concat!("shaders/", stringify!($name), "/frag.glsl")),
        )?;
        ShaderProgram::new($gl, &[&vert, &frag])?
    }};
}

/// Texture unit every object samples from.
const TEXTURE_UNIT: u32 = 0;

/// Renders with one textured shader program that stays bound for the backend's lifetime.
pub struct GlBackend {
    gl: Arc<glow::Context>,
    program: ShaderProgram,
    model_loc: Option<glow::UniformLocation>,
    view_loc: Option<glow::UniformLocation>,
    projection_loc: Option<glow::UniformLocation>,
}

impl GlBackend {
    /// Compiles the scene shader, resolves its uniforms and sets up fixed render state.
    pub fn new(gl: &Arc<glow::Context>, clear_color: Vec4) -> Result<Self> {
        let program = shader_program!(scene, gl);
        program.use_program();

        let model_loc = program.uniform_location(MatrixUniform::Model.name());
        let view_loc = program.uniform_location(MatrixUniform::View.name());
        let projection_loc = program.uniform_location(MatrixUniform::Projection.name());
        let sampler_loc = program.uniform_location("u_texture");
        program.set_uniform(sampler_loc.as_ref(), TEXTURE_UNIT as i32);

        unsafe {
            gl.clear_color(clear_color.x, clear_color.y, clear_color.z, clear_color.w);
            gl.enable(glow::DEPTH_TEST);
            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
        }

        log::debug!("Scene shader program ready");

        Ok(Self {
            gl: Arc::clone(gl),
            program,
            model_loc,
            view_loc,
            projection_loc,
        })
    }
}

impl RenderBackend for GlBackend {
    type Mesh = Mesh;
    type Texture = Texture;

    fn upload_mesh(&mut self, mesh: &MeshData) -> Result<Mesh> {
        let uploaded = Mesh::new(&self.gl, &mesh.vertices, glow::TRIANGLES)?;
        log::debug!("Uploaded mesh {} ({} vertices)", mesh.name, uploaded.vertex_count());
        Ok(uploaded)
    }

    fn upload_texture(&mut self, image: &DynamicImage) -> Result<Texture> {
        let texture = Texture::new(&self.gl, image)?;
        log::debug!(
            "Uploaded {}x{} texture",
            texture.width(),
            texture.height()
        );
        Ok(texture)
    }

    fn set_viewport(&mut self, width: i32, height: i32) {
        unsafe {
            self.gl.viewport(0, 0, width, height);
        }
    }

    fn clear(&mut self) {
        unsafe {
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    fn set_matrix(&mut self, uniform: MatrixUniform, matrix: &Mat4) {
        let location = match uniform {
            MatrixUniform::Model => self.model_loc.as_ref(),
            MatrixUniform::View => self.view_loc.as_ref(),
            MatrixUniform::Projection => self.projection_loc.as_ref(),
        };
        self.program.set_uniform(location, matrix);
    }

    fn draw(&mut self, mesh: &Mesh, texture: &Texture) {
        texture.bind(TEXTURE_UNIT);
        mesh.draw();
    }
}
