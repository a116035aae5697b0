use crate::scene::ComposedFrame;

/// Draw-submission backend consumed by the scene orchestrator.
///
/// A submission failure is transient: the caller logs it and re-issues the
/// same draws from current state on the next frame.
pub trait DrawBackend {
    /// Draw one composed frame and present it.
    fn submit(&mut self, frame: &ComposedFrame) -> Result<(), Box<dyn std::error::Error>>;

    /// Reconfigure the draw surface for a new window size.
    fn resize(&mut self, width: u32, height: u32);

    /// Human-readable backend description (adapter name, API, driver) for
    /// the window title.
    fn adapter_summary(&self) -> String;
}
