use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{error, info};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, HtmlCanvasElement};

use super::webgl::CanvasSurface;
use crate::{initialize, FrameDriver, InitError, RenderConfig, StopHandle, TickOutcome};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Keeps a running animation reachable from JS so it can be halted.
pub struct AnimationHandle {
    stop: StopHandle,
    pending: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl AnimationHandle {
    /// Stops drawing and cancels the outstanding frame request.
    pub fn stop(&self) {
        self.stop.stop();
        if let (Some(id), Some(window)) = (self.pending.take(), window()) {
            window.cancel_animation_frame(id).ok();
        }
        // The closure owns a clone of `callback`; breaking the cycle frees it.
        let _ = self.callback.borrow_mut().take();
        info!("animation stopped");
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }
}

/// Initializes the pattern on `canvas` and, only if that succeeds, starts the
/// `requestAnimationFrame` loop.
pub fn start(canvas: HtmlCanvasElement, config: &RenderConfig) -> Result<AnimationHandle, InitError> {
    let surface = CanvasSurface::new(canvas);
    let context = initialize(&surface, config)?;
    let mut driver = FrameDriver::new(surface, context);

    let stop = driver.stop_handle();
    let pending = Rc::new(Cell::new(None));

    // `f` holds the animation-frame closure so that it can keep calling
    // `request_animation_frame` on itself. Storing it inside an `Option` lets
    // us create the `Closure` first and reference it from within afterwards.
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    let pending_in_loop = pending.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        pending_in_loop.set(None);
        match driver.tick(now) {
            TickOutcome::Continue(_) => {
                pending_in_loop.set(request_frame(&f));
            }
            TickOutcome::Stopped => {
                // Drop our handle to this closure so it is cleaned up once we return.
                let _ = f.borrow_mut().take();
            }
        }
    }) as Box<dyn FnMut(f64)>));

    pending.set(request_frame(&g));
    info!("animation started");
    Ok(AnimationHandle {
        stop,
        pending,
        callback: g,
    })
}

fn request_frame(callback: &FrameCallback) -> Option<i32> {
    let window = window()?;
    let borrowed = callback.borrow();
    let closure = borrowed.as_ref()?;
    match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(err) => {
            error!("requestAnimationFrame failed: {err:?}");
            None
        }
    }
}
