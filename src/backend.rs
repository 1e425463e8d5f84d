//! Capability seams between the renderer and the platform.
//!
//! [`GraphicsBackend`] is the minimal slice of a GL-style API the initializer
//! and the frame driver need. [`Surface`] is the drawable the backend is
//! obtained from and whose backing store tracks the window size.

use std::fmt;

/// Pipeline stage a shader object is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// GL-style drawing backend.
///
/// Object handles are opaque associated types; creation returns `None` when the
/// backend refuses (for WebGL, a lost context). Every method takes `&self`
/// because the underlying context is a shared handle.
pub trait GraphicsBackend {
    type Shader;
    type Program;
    type Buffer;
    type UniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Option<Self::Shader>;
    fn shader_source(&self, shader: &Self::Shader, source: &str);
    fn compile_shader(&self, shader: &Self::Shader);
    fn shader_compile_status(&self, shader: &Self::Shader) -> bool;
    fn shader_info_log(&self, shader: &Self::Shader) -> Option<String>;
    fn delete_shader(&self, shader: &Self::Shader);

    fn create_program(&self) -> Option<Self::Program>;
    fn attach_shader(&self, program: &Self::Program, shader: &Self::Shader);
    fn link_program(&self, program: &Self::Program);
    fn program_link_status(&self, program: &Self::Program) -> bool;
    fn program_info_log(&self, program: &Self::Program) -> Option<String>;
    fn delete_program(&self, program: &Self::Program);
    fn use_program(&self, program: &Self::Program);

    /// Index of a vertex attribute, negative when the name is not active.
    fn attrib_location(&self, program: &Self::Program, name: &str) -> i32;
    fn uniform_location(&self, program: &Self::Program, name: &str)
        -> Option<Self::UniformLocation>;

    fn create_buffer(&self) -> Option<Self::Buffer>;
    fn bind_array_buffer(&self, buffer: &Self::Buffer);
    /// Uploads `data` to the bound array buffer with static usage.
    fn upload_static_f32(&self, data: &[f32]);
    fn enable_vertex_attrib(&self, index: u32);
    /// Points `index` at the bound buffer as `size` floats per vertex.
    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        normalized: bool,
        stride: i32,
        offset: i32,
    );

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn clear_color_buffer(&self);
    fn uniform2f(&self, location: &Self::UniformLocation, x: f32, y: f32);
    fn uniform1f(&self, location: &Self::UniformLocation, x: f32);
    fn draw_triangle_strip(&self, first: i32, count: i32);
}

/// Drawable the backend comes from.
pub trait Surface {
    type Backend: GraphicsBackend;

    /// Obtains the drawing context, `None` when the platform has none.
    fn acquire_backend(&self) -> Option<Self::Backend>;
    /// Current size of the backing store in pixels.
    fn backing_size(&self) -> (u32, u32);
    fn set_backing_size(&mut self, width: u32, height: u32);
    /// Size the backing store should follow, i.e. the window's inner size.
    fn window_size(&self) -> (u32, u32);
}
