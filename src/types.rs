//! GPU-facing data layouts. Field order and padding mirror the WGSL
//! uniform structs; every vec3 is padded out to 16 bytes.

/// Mesh vertex: position plus normal.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Per-frame uniform data shared by every draw.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalsUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub view_pos: [f32; 3],
    pub _pad: f32,
}

/// Per-node uniform data: model transform and material base color.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct NodeUniform {
    pub model: [[f32; 4]; 4],
    pub base_color: [f32; 4],
}

/// Directional light parameters.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DirLight {
    pub direction: [f32; 3],
    pub _pad0: f32,
    pub ambient: [f32; 3],
    pub _pad1: f32,
    pub diffuse: [f32; 3],
    pub _pad2: f32,
    pub specular: [f32; 3],
    pub _pad3: f32,
}

/// Point light parameters; attenuation terms ride in the vec3 pad slots.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLight {
    pub position: [f32; 3],
    pub atten_constant: f32,
    pub ambient: [f32; 3],
    pub atten_linear: f32,
    pub diffuse: [f32; 3],
    pub atten_quadratic: f32,
    pub specular: [f32; 3],
    pub _pad: f32,
}

/// Static lighting rig: one directional light plus two point lights over
/// the clock face, and the shared material shininess.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub dir: DirLight,
    pub points: [PointLight; 2],
    pub shininess: f32,
    pub _pad: [f32; 3],
}

impl Default for LightsUniform {
    fn default() -> Self {
        let point = |position: [f32; 3]| PointLight {
            position,
            atten_constant: 1.0,
            ambient: [0.05; 3],
            atten_linear: 0.09,
            diffuse: [0.8; 3],
            atten_quadratic: 0.032,
            specular: [1.0; 3],
            _pad: 0.0,
        };

        Self {
            dir: DirLight {
                direction: [-0.2, -1.0, -0.3],
                _pad0: 0.0,
                ambient: [0.05; 3],
                _pad1: 0.0,
                diffuse: [0.4; 3],
                _pad2: 0.0,
                specular: [0.5; 3],
                _pad3: 0.0,
            },
            points: [
                point([-0.1305, 0.0973, 0.1043]),
                point([0.1468, 0.0973, 0.1043]),
            ],
            shininess: 32.0,
            _pad: [0.0; 3],
        }
    }
}
