pub mod gltf;

pub use gltf::{load_mesh, MeshData};
