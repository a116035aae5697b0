use glam::{Mat4, Vec3};
use log::warn;

use crate::camera::Camera;
use crate::clock::HandAngles;
use crate::traits::renderer::DrawBackend;

/// Handle into the draw backend's mesh table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshHandle(pub usize);

/// Role of a node in the clock scene; determines its per-frame transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Body,
    HourHand,
    MinuteHand,
    Cover,
}

#[derive(Debug, Clone, Copy)]
pub struct SceneNode {
    pub kind: NodeKind,
    pub mesh: MeshHandle,
}

/// One node ready to draw: mesh, resolved model transform, and whether it
/// needs alpha blending.
#[derive(Debug, Clone, Copy)]
pub struct NodeDraw {
    pub mesh: MeshHandle,
    pub model: Mat4,
    pub blended: bool,
}

/// Everything the draw backend needs for one frame, in draw order.
#[derive(Debug, Clone)]
pub struct ComposedFrame {
    pub view: Mat4,
    pub projection: Mat4,
    pub eye: Vec3,
    pub nodes: Vec<NodeDraw>,
}

/// Per-frame scene driver.
///
/// Holds the fixed node list and turns camera state plus clock angles into
/// a [`ComposedFrame`]. Draw order is body, hour hand, minute hand, cover;
/// the cover comes last because it is the only blended node.
pub struct SceneOrchestrator {
    nodes: Vec<SceneNode>,
}

impl SceneOrchestrator {
    pub fn new(
        body: MeshHandle,
        hour_hand: MeshHandle,
        minute_hand: MeshHandle,
        cover: Option<MeshHandle>,
    ) -> Self {
        let mut nodes = vec![
            SceneNode {
                kind: NodeKind::Body,
                mesh: body,
            },
            SceneNode {
                kind: NodeKind::HourHand,
                mesh: hour_hand,
            },
            SceneNode {
                kind: NodeKind::MinuteHand,
                mesh: minute_hand,
            },
        ];
        if let Some(mesh) = cover {
            nodes.push(SceneNode {
                kind: NodeKind::Cover,
                mesh,
            });
        }
        Self { nodes }
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Compose the frame: view/projection from the camera, one model
    /// transform per node. Pure with respect to its inputs.
    pub fn compose(&self, camera: &Camera, angles: HandAngles, aspect: f32) -> ComposedFrame {
        let nodes = self
            .nodes
            .iter()
            .map(|node| NodeDraw {
                mesh: node.mesh,
                model: Self::model_for(node.kind, angles),
                blended: node.kind == NodeKind::Cover,
            })
            .collect();

        ComposedFrame {
            view: camera.view_matrix(),
            projection: camera.projection_matrix(aspect),
            eye: camera.position,
            nodes,
        }
    }

    /// Submit a composed frame. A backend failure is logged and the frame
    /// dropped; the next frame re-issues the same draws from current
    /// state, so the loop itself never aborts here.
    pub fn render_frame(&self, backend: &mut dyn DrawBackend, frame: &ComposedFrame) {
        if let Err(err) = backend.submit(frame) {
            warn!("skipping frame: {err}");
        }
    }

    fn model_for(kind: NodeKind, angles: HandAngles) -> Mat4 {
        match kind {
            NodeKind::Body | NodeKind::Cover => Mat4::IDENTITY,
            NodeKind::HourHand => Mat4::from_rotation_z(angles.hour_deg.to_radians()),
            NodeKind::MinuteHand => Mat4::from_rotation_z(angles.minute_deg.to_radians()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orchestrator_with_cover() -> SceneOrchestrator {
        SceneOrchestrator::new(
            MeshHandle(0),
            MeshHandle(1),
            MeshHandle(2),
            Some(MeshHandle(3)),
        )
    }

    #[test]
    fn draw_order_is_body_hands_cover() {
        let scene = orchestrator_with_cover();
        let kinds: Vec<NodeKind> = scene.nodes().iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Body,
                NodeKind::HourHand,
                NodeKind::MinuteHand,
                NodeKind::Cover
            ]
        );
    }

    #[test]
    fn only_the_cover_is_blended() {
        let scene = orchestrator_with_cover();
        let camera = Camera::default();
        let angles = HandAngles {
            hour_deg: -90.0,
            minute_deg: 0.0,
        };
        let frame = scene.compose(&camera, angles, 4.0 / 3.0);

        let blended: Vec<bool> = frame.nodes.iter().map(|n| n.blended).collect();
        assert_eq!(blended, vec![false, false, false, true]);
    }

    #[test]
    fn hands_rotate_about_z() {
        let scene = SceneOrchestrator::new(MeshHandle(0), MeshHandle(1), MeshHandle(2), None);
        let camera = Camera::default();
        let angles = HandAngles {
            hour_deg: -90.0,
            minute_deg: -180.0,
        };
        let frame = scene.compose(&camera, angles, 1.0);

        assert_eq!(frame.nodes[0].model, Mat4::IDENTITY);

        // -90 degrees about Z maps +X to -Y.
        let x = frame.nodes[1].model.transform_vector3(Vec3::X);
        assert!((x - Vec3::NEG_Y).length() < 1e-5);

        // -180 degrees maps +X to -X and leaves Z fixed.
        let x = frame.nodes[2].model.transform_vector3(Vec3::X);
        assert!((x - Vec3::NEG_X).length() < 1e-5);
        let z = frame.nodes[2].model.transform_vector3(Vec3::Z);
        assert!((z - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn compose_carries_camera_state() {
        let scene = SceneOrchestrator::new(MeshHandle(0), MeshHandle(1), MeshHandle(2), None);
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 0.25));
        camera.process_scroll(20.0); // zoom to 25 degrees

        let angles = HandAngles {
            hour_deg: 0.0,
            minute_deg: 0.0,
        };
        let frame = scene.compose(&camera, angles, 2.0);

        assert_eq!(frame.eye, Vec3::new(0.0, 0.0, 0.25));
        assert_eq!(frame.view, camera.view_matrix());
        assert_eq!(frame.projection, camera.projection_matrix(2.0));
    }

    #[test]
    fn errors_from_the_backend_do_not_propagate() {
        struct FailingBackend;

        impl DrawBackend for FailingBackend {
            fn submit(
                &mut self,
                _frame: &ComposedFrame,
            ) -> Result<(), Box<dyn std::error::Error>> {
                Err("surface unavailable".into())
            }

            fn resize(&mut self, _width: u32, _height: u32) {}

            fn adapter_summary(&self) -> String {
                String::new()
            }
        }

        let scene = SceneOrchestrator::new(MeshHandle(0), MeshHandle(1), MeshHandle(2), None);
        let camera = Camera::default();
        let angles = HandAngles {
            hour_deg: 0.0,
            minute_deg: 0.0,
        };
        let frame = scene.compose(&camera, angles, 1.0);

        // Must not panic or return an error.
        scene.render_frame(&mut FailingBackend, &frame);
    }
}
