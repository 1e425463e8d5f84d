//! One-shot initialization: compile, link, cache locations, upload the quad.

use log::{error, info};

use crate::backend::{GraphicsBackend, ShaderStage, Surface};
use crate::config::RenderConfig;
use crate::error::InitError;
use crate::shaders::{ShaderSources, POSITION_ATTRIBUTE, RESOLUTION_UNIFORM, TIME_UNIFORM};

/// Full clip-space square as a triangle strip.
pub const QUAD_VERTICES: [f32; 8] = [-1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0];
pub const QUAD_VERTEX_COUNT: i32 = 4;

/// Everything a frame needs, produced once by [`initialize`].
///
/// Holding one is proof that the program linked and every location resolved.
pub struct RenderContext<B: GraphicsBackend> {
    backend: B,
    program: B::Program,
    quad: B::Buffer,
    position: u32,
    resolution: B::UniformLocation,
    time: B::UniformLocation,
    clear_color: [f32; 4],
}

impl<B: GraphicsBackend> RenderContext<B> {
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn program(&self) -> &B::Program {
        &self.program
    }

    pub fn quad(&self) -> &B::Buffer {
        &self.quad
    }

    pub fn position_attribute(&self) -> u32 {
        self.position
    }

    pub fn resolution_uniform(&self) -> &B::UniformLocation {
        &self.resolution
    }

    pub fn time_uniform(&self) -> &B::UniformLocation {
        &self.time
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }
}

/// Builds the built-in pattern on `surface`.
pub fn initialize<S: Surface>(
    surface: &S,
    config: &RenderConfig,
) -> Result<RenderContext<S::Backend>, InitError> {
    let sources = ShaderSources::pattern(config.tiling);
    initialize_with(surface, &sources, config)
}

/// Builds a context from arbitrary shader sources honouring the uniform contract.
pub fn initialize_with<S: Surface>(
    surface: &S,
    sources: &ShaderSources,
    config: &RenderConfig,
) -> Result<RenderContext<S::Backend>, InitError> {
    let Some(backend) = surface.acquire_backend() else {
        error!("graphics context is not supported on this surface");
        return Err(InitError::ContextUnavailable);
    };

    let program = build_program(&backend, sources)?;
    backend.use_program(&program);

    let (position, resolution, time) = match locate(&backend, &program) {
        Ok(locations) => locations,
        Err(err) => {
            error!("{err}");
            backend.delete_program(&program);
            return Err(err);
        }
    };

    let Some(quad) = backend.create_buffer() else {
        error!("vertex buffer creation failed");
        backend.delete_program(&program);
        return Err(InitError::BufferCreation);
    };
    backend.bind_array_buffer(&quad);
    backend.upload_static_f32(&QUAD_VERTICES);
    backend.enable_vertex_attrib(position);
    backend.vertex_attrib_pointer_f32(position, 2, false, 0, 0);

    info!("shader program ready (tiling: {:?})", config.tiling);
    Ok(RenderContext {
        backend,
        program,
        quad,
        position,
        resolution,
        time,
        clear_color: config.clear_color,
    })
}

fn build_program<B: GraphicsBackend>(
    backend: &B,
    sources: &ShaderSources,
) -> Result<B::Program, InitError> {
    let vertex = compile(backend, ShaderStage::Vertex, &sources.vertex)?;
    let fragment = match compile(backend, ShaderStage::Fragment, &sources.fragment) {
        Ok(shader) => shader,
        Err(err) => {
            backend.delete_shader(&vertex);
            return Err(err);
        }
    };

    let linked = link(backend, &vertex, &fragment);
    // The program keeps its attached shaders alive.
    backend.delete_shader(&vertex);
    backend.delete_shader(&fragment);
    linked
}

fn compile<B: GraphicsBackend>(
    backend: &B,
    stage: ShaderStage,
    source: &str,
) -> Result<B::Shader, InitError> {
    let Some(shader) = backend.create_shader(stage) else {
        error!("could not create {stage} shader");
        return Err(InitError::ShaderCreation(stage));
    };
    backend.shader_source(&shader, source);
    backend.compile_shader(&shader);

    if backend.shader_compile_status(&shader) {
        return Ok(shader);
    }
    let log = backend.shader_info_log(&shader).unwrap_or_default();
    error!("{stage} shader compilation error: {log}");
    backend.delete_shader(&shader);
    Err(InitError::Compile { stage, log })
}

fn link<B: GraphicsBackend>(
    backend: &B,
    vertex: &B::Shader,
    fragment: &B::Shader,
) -> Result<B::Program, InitError> {
    let Some(program) = backend.create_program() else {
        error!("could not create shader program");
        return Err(InitError::ProgramCreation);
    };
    backend.attach_shader(&program, vertex);
    backend.attach_shader(&program, fragment);
    backend.link_program(&program);

    if backend.program_link_status(&program) {
        return Ok(program);
    }
    let log = backend.program_info_log(&program).unwrap_or_default();
    error!("program linking error: {log}");
    backend.delete_program(&program);
    Err(InitError::Link { log })
}

fn locate<B: GraphicsBackend>(
    backend: &B,
    program: &B::Program,
) -> Result<(u32, B::UniformLocation, B::UniformLocation), InitError> {
    let position = u32::try_from(backend.attrib_location(program, POSITION_ATTRIBUTE))
        .map_err(|_| InitError::MissingAttribute(POSITION_ATTRIBUTE))?;
    let resolution = backend
        .uniform_location(program, RESOLUTION_UNIFORM)
        .ok_or(InitError::MissingUniform(RESOLUTION_UNIFORM))?;
    let time = backend
        .uniform_location(program, TIME_UNIFORM)
        .ok_or(InitError::MissingUniform(TIME_UNIFORM))?;
    Ok((position, resolution, time))
}
