pub mod gpu_context;
pub mod mesh;
pub mod scene_renderer;

pub use gpu_context::GpuContext;
pub use scene_renderer::SceneRenderer;
