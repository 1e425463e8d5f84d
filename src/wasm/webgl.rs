use js_sys::Float32Array;
use wasm_bindgen::JsCast;
use web_sys::{
    window, HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram,
    WebGlShader, WebGlUniformLocation,
};

use crate::backend::{GraphicsBackend, ShaderStage, Surface};

/// [`GraphicsBackend`] over a WebGL2 context.
#[derive(Clone)]
pub struct WebGlBackend {
    gl: GL,
}

impl WebGlBackend {
    pub fn new(gl: GL) -> Self {
        Self { gl }
    }

    pub fn context(&self) -> &GL {
        &self.gl
    }
}

impl GraphicsBackend for WebGlBackend {
    type Shader = WebGlShader;
    type Program = WebGlProgram;
    type Buffer = WebGlBuffer;
    type UniformLocation = WebGlUniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Option<WebGlShader> {
        let kind = match stage {
            ShaderStage::Vertex => GL::VERTEX_SHADER,
            ShaderStage::Fragment => GL::FRAGMENT_SHADER,
        };
        self.gl.create_shader(kind)
    }

    fn shader_source(&self, shader: &WebGlShader, source: &str) {
        self.gl.shader_source(shader, source);
    }

    fn compile_shader(&self, shader: &WebGlShader) {
        self.gl.compile_shader(shader);
    }

    fn shader_compile_status(&self, shader: &WebGlShader) -> bool {
        self.gl
            .get_shader_parameter(shader, GL::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false)
    }

    fn shader_info_log(&self, shader: &WebGlShader) -> Option<String> {
        self.gl.get_shader_info_log(shader)
    }

    fn delete_shader(&self, shader: &WebGlShader) {
        self.gl.delete_shader(Some(shader));
    }

    fn create_program(&self) -> Option<WebGlProgram> {
        self.gl.create_program()
    }

    fn attach_shader(&self, program: &WebGlProgram, shader: &WebGlShader) {
        self.gl.attach_shader(program, shader);
    }

    fn link_program(&self, program: &WebGlProgram) {
        self.gl.link_program(program);
    }

    fn program_link_status(&self, program: &WebGlProgram) -> bool {
        self.gl
            .get_program_parameter(program, GL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false)
    }

    fn program_info_log(&self, program: &WebGlProgram) -> Option<String> {
        self.gl.get_program_info_log(program)
    }

    fn delete_program(&self, program: &WebGlProgram) {
        self.gl.delete_program(Some(program));
    }

    fn use_program(&self, program: &WebGlProgram) {
        self.gl.use_program(Some(program));
    }

    fn attrib_location(&self, program: &WebGlProgram, name: &str) -> i32 {
        self.gl.get_attrib_location(program, name)
    }

    fn uniform_location(&self, program: &WebGlProgram, name: &str) -> Option<WebGlUniformLocation> {
        self.gl.get_uniform_location(program, name)
    }

    fn create_buffer(&self) -> Option<WebGlBuffer> {
        self.gl.create_buffer()
    }

    fn bind_array_buffer(&self, buffer: &WebGlBuffer) {
        self.gl.bind_buffer(GL::ARRAY_BUFFER, Some(buffer));
    }

    fn upload_static_f32(&self, data: &[f32]) {
        // `from` copies into JS memory, so no view into wasm memory outlives the call.
        let array = Float32Array::from(data);
        self.gl
            .buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &array, GL::STATIC_DRAW);
    }

    fn enable_vertex_attrib(&self, index: u32) {
        self.gl.enable_vertex_attrib_array(index);
    }

    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        self.gl
            .vertex_attrib_pointer_with_i32(index, size, GL::FLOAT, normalized, stride, offset);
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.gl.viewport(x, y, width, height);
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.gl.clear_color(r, g, b, a);
    }

    fn clear_color_buffer(&self) {
        self.gl.clear(GL::COLOR_BUFFER_BIT);
    }

    fn uniform2f(&self, location: &WebGlUniformLocation, x: f32, y: f32) {
        self.gl.uniform2f(Some(location), x, y);
    }

    fn uniform1f(&self, location: &WebGlUniformLocation, x: f32) {
        self.gl.uniform1f(Some(location), x);
    }

    fn draw_triangle_strip(&self, first: i32, count: i32) {
        self.gl.draw_arrays(GL::TRIANGLE_STRIP, first, count);
    }
}

/// [`Surface`] backed by a canvas that follows the window's inner size.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    type Backend = WebGlBackend;

    fn acquire_backend(&self) -> Option<WebGlBackend> {
        let context = self.canvas.get_context("webgl2").ok().flatten()?;
        context.dyn_into::<GL>().ok().map(WebGlBackend::new)
    }

    fn backing_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn window_size(&self) -> (u32, u32) {
        let Some(window) = window() else {
            return self.backing_size();
        };
        let dimension = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            value.ok().and_then(|v| v.as_f64()).map(|v| v.max(0.0) as u32)
        };
        match (dimension(window.inner_width()), dimension(window.inner_height())) {
            (Some(width), Some(height)) => (width, height),
            _ => self.backing_size(),
        }
    }
}
