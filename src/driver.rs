use std::cell::Cell;
use std::rc::Rc;

use log::{debug, trace};

use crate::backend::{GraphicsBackend, Surface};
use crate::clock::{FrameClock, FrameTime};
use crate::setup::{RenderContext, QUAD_VERTEX_COUNT};

/// Result of one [`FrameDriver::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// A frame was drawn; schedule the next one.
    Continue(FrameTime),
    /// The driver was stopped; nothing was drawn and nothing should be scheduled.
    Stopped,
}

/// Cloneable switch that halts a [`FrameDriver`].
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Rc<Cell<bool>>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.stopped.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }
}

/// Per-frame half of the renderer. Owns the surface and the initialized context.
pub struct FrameDriver<S: Surface> {
    surface: S,
    context: RenderContext<S::Backend>,
    clock: FrameClock,
    stop: StopHandle,
    frames: u64,
}

impl<S: Surface> FrameDriver<S> {
    pub fn new(surface: S, context: RenderContext<S::Backend>) -> Self {
        Self {
            surface,
            context,
            clock: FrameClock::new(),
            stop: StopHandle::default(),
            frames: 0,
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn context(&self) -> &RenderContext<S::Backend> {
        &self.context
    }

    /// Number of frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Renders one frame at timestamp `now_ms` (milliseconds).
    pub fn tick(&mut self, now_ms: f64) -> TickOutcome {
        if self.stop.is_stopped() {
            return TickOutcome::Stopped;
        }

        self.resize();

        let gl = self.context.backend();
        let [r, g, b, a] = self.context.clear_color();
        gl.clear_color(r, g, b, a);
        gl.clear_color_buffer();

        let time = self.clock.tick(now_ms);
        trace!("frame {}: dt={:.4}s t={:.4}s", self.frames, time.delta, time.elapsed);

        let (width, height) = self.surface.backing_size();
        gl.uniform2f(self.context.resolution_uniform(), width as f32, height as f32);
        gl.uniform1f(self.context.time_uniform(), time.elapsed);
        gl.draw_triangle_strip(0, QUAD_VERTEX_COUNT);

        self.frames += 1;
        TickOutcome::Continue(time)
    }

    /// Matches the backing store to the window. Returns whether it changed.
    pub fn resize(&mut self) -> bool {
        let (width, height) = self.surface.window_size();
        if self.surface.backing_size() == (width, height) {
            return false;
        }
        debug!("resizing surface to {width}x{height}");
        self.surface.set_backing_size(width, height);
        let gl = self.context.backend();
        gl.viewport(0, 0, clamp_i32(width), clamp_i32(height));
        true
    }
}

fn clamp_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
