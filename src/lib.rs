//! Full-screen animated fold pattern drawn with a single fragment shader.
//!
//! [`initialize`] turns a [`Surface`] into a [`RenderContext`]; a
//! [`FrameDriver`] built from that context draws one frame per [`tick`].
//! In the browser the `wasm` module wires both to a canvas and
//! `requestAnimationFrame`.
//!
//! [`tick`]: FrameDriver::tick

pub mod backend;
pub mod clock;
pub mod config;
pub mod driver;
pub mod error;
pub mod setup;
pub mod shaders;

pub use backend::{GraphicsBackend, ShaderStage, Surface};
pub use clock::{FrameClock, FrameTime};
pub use config::{RenderConfig, Tiling};
pub use driver::{FrameDriver, StopHandle, TickOutcome};
pub use error::InitError;
pub use setup::{initialize, initialize_with, RenderContext, QUAD_VERTEX_COUNT, QUAD_VERTICES};
pub use shaders::ShaderSources;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use crate::RenderConfig;

    pub mod render;
    pub mod webgl;

    thread_local! {
        static RUNNING: RefCell<Option<render::AnimationHandle>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        let config = RenderConfig::default();
        console_error_panic_hook::set_once();
        console_log::init_with_level(config.log_level).ok();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let Some(element) = document.get_element_by_id(&config.canvas_id) else {
            log::warn!("no #{} element on this page, nothing to draw", config.canvas_id);
            return Ok(());
        };
        let canvas = element.dyn_into::<web_sys::HtmlCanvasElement>()?;

        let handle = render::start(canvas, &config)?;
        RUNNING.with(|running| {
            if let Some(previous) = running.borrow_mut().replace(handle) {
                previous.stop();
            }
        });
        Ok(())
    }

    /// Halts the animation started by the entry point.
    #[wasm_bindgen]
    pub fn stop() {
        RUNNING.with(|running| {
            if let Some(handle) = running.borrow_mut().take() {
                handle.stop();
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::render::{start, AnimationHandle};
#[cfg(target_arch = "wasm32")]
pub use wasm::webgl::{CanvasSurface, WebGlBackend};
