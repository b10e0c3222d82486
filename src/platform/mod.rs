//! Platform abstraction layer
//!
//! Frame scheduling: the simulation hands a frame callback to a scheduler,
//! which runs it again and again until the callback returns `Flow::Stop`.
//! The browser uses `requestAnimationFrame`; tests and the native binary
//! use a bounded tick count.

/// Whether the frame loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Runs a frame callback once per frame
pub trait FrameScheduler {
    /// Start driving `frame`. Browser schedulers return immediately and
    /// keep going from the event loop; others block until done.
    fn run<F>(self, frame: F)
    where
        F: FnMut() -> Flow + 'static;
}

/// Runs the callback back-to-back at most `limit` times
#[derive(Debug, Clone, Copy)]
pub struct BoundedTicks {
    limit: u64,
}

impl BoundedTicks {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl FrameScheduler for BoundedTicks {
    fn run<F>(self, mut frame: F)
    where
        F: FnMut() -> Flow + 'static,
    {
        for n in 0..self.limit {
            if frame() == Flow::Stop {
                log::debug!("Frame loop stopped after {} ticks", n + 1);
                return;
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AnimationFrameScheduler;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use super::{Flow, FrameScheduler};

    /// Resubmits the callback through `window.requestAnimationFrame`
    #[derive(Debug, Default, Clone, Copy)]
    pub struct AnimationFrameScheduler;

    impl FrameScheduler for AnimationFrameScheduler {
        fn run<F>(self, frame: F)
        where
            F: FnMut() -> Flow + 'static,
        {
            request_animation_frame(Rc::new(RefCell::new(frame)));
        }
    }

    fn request_animation_frame<F>(frame: Rc<RefCell<F>>)
    where
        F: FnMut() -> Flow + 'static,
    {
        let Some(window) = web_sys::window() else {
            log::error!("No window, frame loop not started");
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            let flow = (&mut *frame.borrow_mut())();
            if flow == Flow::Continue {
                request_animation_frame(frame);
            } else {
                log::info!("Frame loop stopped");
            }
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
