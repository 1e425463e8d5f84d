#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use hexfold::{GraphicsBackend, ShaderStage, Surface};

/// Every backend call the renderer made, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(ShaderStage, u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(u32),
    CreateBuffer(u32),
    BindArrayBuffer(u32),
    Upload(Vec<f32>),
    EnableVertexAttrib(u32),
    VertexAttribPointer { index: u32, size: i32, normalized: bool, stride: i32, offset: i32 },
    AttribLookup(String),
    UniformLookup(String),
    Viewport(i32, i32, i32, i32),
    ClearColor([f32; 4]),
    Clear,
    Uniform2f(String, f32, f32),
    Uniform1f(String, f32),
    DrawTriangleStrip(i32, i32),
}

#[derive(Debug, Default)]
struct State {
    next_id: u32,
    sources: Vec<(u32, ShaderStage, String)>,
    compiled: Vec<u32>,
    calls: Vec<Call>,
}

/// Backend that records calls and "compiles" anything containing `void main`.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    state: Rc<RefCell<State>>,
    pub fail_link: bool,
    pub fail_buffer: bool,
}

impl RecordingBackend {
    pub fn failing_link() -> Self {
        Self {
            fail_link: true,
            ..Self::default()
        }
    }

    pub fn failing_buffer() -> Self {
        Self {
            fail_buffer: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|&call| pred(call)).count()
    }

    pub fn time_uniforms(&self) -> Vec<f32> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Uniform1f(name, value) if name == "iTime" => Some(*value),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }

    fn allocate(&self) -> u32 {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        state.next_id
    }

    fn source_of(&self, shader: u32) -> Option<(ShaderStage, String)> {
        self.state
            .borrow()
            .sources
            .iter()
            .find(|(id, _, _)| *id == shader)
            .map(|(_, stage, source)| (*stage, source.clone()))
    }

    fn linked_sources(&self) -> String {
        let state = self.state.borrow();
        state
            .compiled
            .iter()
            .filter_map(|id| state.sources.iter().find(|(sid, _, _)| sid == id))
            .map(|(_, _, source)| source.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Uniform handle that remembers its name for assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct Location(pub String);

impl GraphicsBackend for RecordingBackend {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type UniformLocation = Location;

    fn create_shader(&self, stage: ShaderStage) -> Option<u32> {
        let id = self.allocate();
        self.record(Call::CreateShader(stage, id));
        Some(id)
    }

    fn shader_source(&self, shader: &u32, source: &str) {
        let stage = self
            .calls()
            .iter()
            .find_map(|call| match call {
                Call::CreateShader(stage, id) if id == shader => Some(*stage),
                _ => None,
            })
            .unwrap_or(ShaderStage::Vertex);
        self.state
            .borrow_mut()
            .sources
            .push((*shader, stage, source.to_owned()));
    }

    fn compile_shader(&self, shader: &u32) {
        self.record(Call::CompileShader(*shader));
        let ok = self
            .source_of(*shader)
            .map(|(_, source)| source.contains("void main"))
            .unwrap_or(false);
        if ok {
            self.state.borrow_mut().compiled.push(*shader);
        }
    }

    fn shader_compile_status(&self, shader: &u32) -> bool {
        self.state.borrow().compiled.contains(shader)
    }

    fn shader_info_log(&self, shader: &u32) -> Option<String> {
        Some(format!("ERROR: 0:1: shader {shader} has no entry point"))
    }

    fn delete_shader(&self, shader: &u32) {
        self.record(Call::DeleteShader(*shader));
    }

    fn create_program(&self) -> Option<u32> {
        let id = self.allocate();
        self.record(Call::CreateProgram(id));
        Some(id)
    }

    fn attach_shader(&self, program: &u32, shader: &u32) {
        self.record(Call::AttachShader(*program, *shader));
    }

    fn link_program(&self, program: &u32) {
        self.record(Call::LinkProgram(*program));
    }

    fn program_link_status(&self, _program: &u32) -> bool {
        !self.fail_link
    }

    fn program_info_log(&self, _program: &u32) -> Option<String> {
        Some("ERROR: varying mismatch".to_owned())
    }

    fn delete_program(&self, program: &u32) {
        self.record(Call::DeleteProgram(*program));
    }

    fn use_program(&self, program: &u32) {
        self.record(Call::UseProgram(*program));
    }

    fn attrib_location(&self, _program: &u32, name: &str) -> i32 {
        self.record(Call::AttribLookup(name.to_owned()));
        if self.linked_sources().contains(&format!("attribute vec2 {name};")) {
            0
        } else {
            -1
        }
    }

    fn uniform_location(&self, _program: &u32, name: &str) -> Option<Location> {
        self.record(Call::UniformLookup(name.to_owned()));
        let declared = self
            .linked_sources()
            .lines()
            .any(|line| line.starts_with("uniform ") && line.contains(&format!(" {name};")));
        declared.then(|| Location(name.to_owned()))
    }

    fn create_buffer(&self) -> Option<u32> {
        if self.fail_buffer {
            return None;
        }
        let id = self.allocate();
        self.record(Call::CreateBuffer(id));
        Some(id)
    }

    fn bind_array_buffer(&self, buffer: &u32) {
        self.record(Call::BindArrayBuffer(*buffer));
    }

    fn upload_static_f32(&self, data: &[f32]) {
        self.record(Call::Upload(data.to_vec()));
    }

    fn enable_vertex_attrib(&self, index: u32) {
        self.record(Call::EnableVertexAttrib(index));
    }

    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        self.record(Call::VertexAttribPointer { index, size, normalized, stride, offset });
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(Call::ClearColor([r, g, b, a]));
    }

    fn clear_color_buffer(&self) {
        self.record(Call::Clear);
    }

    fn uniform2f(&self, location: &Location, x: f32, y: f32) {
        self.record(Call::Uniform2f(location.0.clone(), x, y));
    }

    fn uniform1f(&self, location: &Location, x: f32) {
        self.record(Call::Uniform1f(location.0.clone(), x));
    }

    fn draw_triangle_strip(&self, first: i32, count: i32) {
        self.record(Call::DrawTriangleStrip(first, count));
    }
}

/// Canvas stand-in: starts at the HTML default of 300x150.
#[derive(Debug, Clone)]
pub struct FakeSurface {
    pub backend: Option<RecordingBackend>,
    pub backing: (u32, u32),
    pub window: Rc<RefCell<(u32, u32)>>,
}

impl FakeSurface {
    pub fn new(window: (u32, u32)) -> Self {
        Self {
            backend: Some(RecordingBackend::default()),
            backing: (300, 150),
            window: Rc::new(RefCell::new(window)),
        }
    }

    pub fn without_context() -> Self {
        Self {
            backend: None,
            ..Self::new((800, 600))
        }
    }

    pub fn recorder(&self) -> RecordingBackend {
        self.backend.clone().expect("surface has a backend")
    }
}

impl Surface for FakeSurface {
    type Backend = RecordingBackend;

    fn acquire_backend(&self) -> Option<RecordingBackend> {
        self.backend.clone()
    }

    fn backing_size(&self) -> (u32, u32) {
        self.backing
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.backing = (width, height);
    }

    fn window_size(&self) -> (u32, u32) {
        *self.window.borrow()
    }
}
