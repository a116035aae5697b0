use std::sync::Arc;

use log::debug;
use winit::window::{CursorGrabMode, Window as WinitWindow};

use crate::traits::window::WindowContext;

/// Wrapper around the winit window exposing only the capabilities the
/// core layers need.
pub struct ViewerWindow {
    inner: Arc<WinitWindow>,
}

impl ViewerWindow {
    pub fn new(window: Arc<WinitWindow>) -> Self {
        Self { inner: window }
    }

    pub fn inner(&self) -> &Arc<WinitWindow> {
        &self.inner
    }

    pub fn set_title(&self, title: &str) {
        self.inner.set_title(title);
    }
}

impl WindowContext for ViewerWindow {
    fn set_cursor_visible(&self, visible: bool) {
        self.inner.set_cursor_visible(visible);
    }

    fn set_cursor_grabbed(&self, grabbed: bool) {
        if grabbed {
            // Not every platform supports confinement; try locking before
            // giving up. A failed grab still leaves drag rotation working.
            let result = self
                .inner
                .set_cursor_grab(CursorGrabMode::Confined)
                .or_else(|_| self.inner.set_cursor_grab(CursorGrabMode::Locked));
            if let Err(err) = result {
                debug!("cursor grab unavailable: {err}");
            }
        } else if let Err(err) = self.inner.set_cursor_grab(CursorGrabMode::None) {
            debug!("cursor release failed: {err}");
        }
    }

    fn inner_size(&self) -> (u32, u32) {
        let size = self.inner.inner_size();
        (size.width, size.height)
    }

    fn request_redraw(&self) {
        self.inner.request_redraw();
    }
}
