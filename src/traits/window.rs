/// Host window capabilities consumed by the input layer.
pub trait WindowContext {
    /// Show or hide the system cursor.
    fn set_cursor_visible(&self, visible: bool);

    /// Confine the cursor to the window while dragging. Implementations
    /// that cannot grab the cursor may treat this as a no-op.
    fn set_cursor_grabbed(&self, grabbed: bool);

    /// Inner size of the window in physical pixels.
    fn inner_size(&self) -> (u32, u32);

    /// Request the window to redraw.
    fn request_redraw(&self);
}
