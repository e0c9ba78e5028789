//! Scene graph for the card: the envelope group, its parts, the camera and
//! the light.
//!
//! Every node carries a position, rotation (XYZ Euler) and scale relative to
//! its parent. The root node holds the pointer parallax rotation, so the
//! envelope and the background hearts tilt together.

use crate::color::{palette, Rgb};
use crate::graphics::{draw_line, draw_triangle, FillLight, FrameBuffer, Lighting};
use crate::math::{calculate_normal, normalize, ray_triangle, Affine, Vec3};
use crate::vertex::Vertex;
use std::f64::consts::{PI, TAU};

/// Envelope width.
pub const ENVELOPE_WIDTH: f64 = 3.2;
/// Envelope height.
pub const ENVELOPE_HEIGHT: f64 = 2.2;
/// Flap rotation before the card is opened; the letter peeks out.
pub const FLAP_REST_ANGLE: f64 = PI / 6.0;
/// Resting scale of the heart inside the envelope.
pub const SURPRISE_SCALE: f64 = 1.5;
/// Pink fill from below left.
const FILL_STRENGTH: f64 = 0.25;

const HEART_SEGMENTS: usize = 24;

pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Transform {
            position,
            ..Transform::default()
        }
    }

    pub fn to_affine(&self) -> Affine {
        Affine::from_parts(&self.position, &self.rotation, &self.scale)
    }
}

/// Flat-colored triangle list in node-local coordinates.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<[Vec3; 3]>,
    pub color: Rgb,
}

impl Mesh {
    pub fn plane(width: f64, height: f64, color: Rgb) -> Self {
        let (hw, hh) = (width / 2.0, height / 2.0);
        let corners = [[-hw, -hh, 0.0], [hw, -hh, 0.0], [hw, hh, 0.0], [-hw, hh, 0.0]];
        Mesh {
            triangles: vec![
                [corners[0], corners[1], corners[2]],
                [corners[0], corners[2], corners[3]],
            ],
            color,
        }
    }

    pub fn triangle(a: [f64; 2], b: [f64; 2], c: [f64; 2], color: Rgb) -> Self {
        Mesh {
            triangles: vec![[[a[0], a[1], 0.0], [b[0], b[1], 0.0], [c[0], c[1], 0.0]]],
            color,
        }
    }

    /// Flat heart outline about 1.1 units wide, tip down, centered on the origin.
    pub fn heart(color: Rgb) -> Self {
        let scale = 1.1 / 32.0;
        let outline: Vec<Vec3> = (0..HEART_SEGMENTS)
            .map(|i| {
                let s = TAU * i as f64 / HEART_SEGMENTS as f64;
                let x = 16.0 * s.sin().powi(3);
                let y = 13.0 * s.cos() - 5.0 * (2.0 * s).cos() - 2.0 * (3.0 * s).cos()
                    - (4.0 * s).cos();
                [x * scale, (y + 2.5) * scale, 0.0]
            })
            .collect();
        let triangles = (0..outline.len())
            .map(|i| [[0.0; 3], outline[i], outline[(i + 1) % outline.len()]])
            .collect();
        Mesh { triangles, color }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: &'static str,
    pub transform: Transform,
    pub parent: Option<NodeId>,
    pub mesh: Option<Mesh>,
}

/// Perspective camera looking down -Z.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    pub fov_y: f64,
    pub aspect: f64,
    pub near: f64,
}

impl Camera {
    fn focal(&self) -> f64 {
        1.0 / (self.fov_y / 2.0).tan()
    }
}

/// Handles to the nodes the card animates.
#[derive(Debug, Clone, Copy)]
pub struct CardNodes {
    pub envelope: NodeId,
    pub paper: NodeId,
    pub surprise: NodeId,
    pub flap_pivot: NodeId,
}

pub struct Scene {
    nodes: Vec<Node>,
    pub root: NodeId,
    pub camera: Camera,
    pub lighting: Lighting,
    pub background: Rgb,
    pub card: CardNodes,
}

/// A point projected onto the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub screen: [f64; 2],
    pub depth: f64,
}

impl Scene {
    /// Builds the envelope scene: back panel, letter, heart, fixed flaps and
    /// the hinged top flap, with the camera six units back.
    pub fn greeting_card() -> Self {
        let (w, h) = (ENVELOPE_WIDTH, ENVELOPE_HEIGHT);
        let mut scene = Scene {
            nodes: Vec::new(),
            root: 0,
            camera: Camera {
                position: [0.0, 0.0, 6.0],
                fov_y: 75f64.to_radians(),
                aspect: 1.0,
                near: 0.1,
            },
            lighting: Lighting {
                position: [5.0, 5.0, 5.0],
                ambient: 0.7,
                fill: Some(FillLight {
                    position: [-5.0, -2.0, 3.0],
                    color: palette::HOT_PINK,
                    strength: FILL_STRENGTH,
                }),
            },
            background: palette::LOVE_BG,
            card: CardNodes {
                envelope: 0,
                paper: 0,
                surprise: 0,
                flap_pivot: 0,
            },
        };

        let root = scene.add_node("root", None, Transform::default(), None);
        let envelope = scene.add_node("envelope", Some(root), Transform::default(), None);
        scene.add_node(
            "back",
            Some(envelope),
            Transform::default(),
            Some(Mesh::plane(w, h, palette::ENVELOPE)),
        );
        let paper = scene.add_node(
            "paper",
            Some(envelope),
            Transform::at([0.0, 0.0, 0.01]),
            Some(Mesh::plane(w - 0.2, h - 0.2, palette::PAPER)),
        );
        let surprise = scene.add_node(
            "surprise",
            Some(envelope),
            Transform {
                position: [0.0, 0.0, 0.05],
                scale: [SURPRISE_SCALE; 3],
                ..Transform::default()
            },
            Some(Mesh::heart(palette::SURPRISE)),
        );
        scene.add_node(
            "flap-bottom",
            Some(envelope),
            Transform::at([0.0, 0.0, 0.06]),
            Some(Mesh::triangle(
                [-w / 2.0, -h / 2.0],
                [w / 2.0, -h / 2.0],
                [0.0, 0.2],
                palette::ENVELOPE,
            )),
        );
        scene.add_node(
            "flap-left",
            Some(envelope),
            Transform::at([0.0, 0.0, 0.07]),
            Some(Mesh::triangle(
                [-w / 2.0, -h / 2.0],
                [-w / 2.0, h / 2.0],
                [0.0, 0.0],
                palette::ENVELOPE,
            )),
        );
        scene.add_node(
            "flap-right",
            Some(envelope),
            Transform::at([0.0, 0.0, 0.07]),
            Some(Mesh::triangle(
                [w / 2.0, -h / 2.0],
                [w / 2.0, h / 2.0],
                [0.0, 0.0],
                palette::ENVELOPE,
            )),
        );
        let flap_pivot = scene.add_node(
            "flap-pivot",
            Some(envelope),
            Transform {
                position: [0.0, h / 2.0, 0.06],
                rotation: [FLAP_REST_ANGLE, 0.0, 0.0],
                ..Transform::default()
            },
            None,
        );
        scene.add_node(
            "flap-top",
            Some(flap_pivot),
            Transform::at([0.0, -h / 2.0, 0.0]),
            Some(Mesh::triangle(
                [-w / 2.0, h / 2.0],
                [w / 2.0, h / 2.0],
                [0.0, 0.0],
                palette::ENVELOPE_INNER,
            )),
        );

        scene.root = root;
        scene.card = CardNodes {
            envelope,
            paper,
            surprise,
            flap_pivot,
        };
        scene
    }

    pub fn add_node(
        &mut self,
        name: &'static str,
        parent: Option<NodeId>,
        transform: Transform,
        mesh: Option<Mesh>,
    ) -> NodeId {
        self.nodes.push(Node {
            name,
            transform,
            parent,
            mesh,
        });
        self.nodes.len() - 1
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn transform(&self, id: NodeId) -> &Transform {
        &self.nodes[id].transform
    }

    pub fn transform_mut(&mut self, id: NodeId) -> &mut Transform {
        &mut self.nodes[id].transform
    }

    /// Node-to-world transform, composed through every ancestor.
    pub fn world_transform(&self, id: NodeId) -> Affine {
        let mut world = self.nodes[id].transform.to_affine();
        let mut parent = self.nodes[id].parent;
        while let Some(p) = parent {
            world = self.nodes[p].transform.to_affine().then(&world);
            parent = self.nodes[p].parent;
        }
        world
    }

    pub fn is_descendant(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.nodes[node].parent;
        }
        false
    }

    /// Updates the projection for a framebuffer of the given pixel size.
    pub fn set_viewport(&mut self, width: usize, height: usize) {
        if width > 0 && height > 0 {
            self.camera.aspect = width as f64 / height as f64;
        }
    }

    /// Projects a world-space point onto a `width` x `height` framebuffer.
    /// Points behind the near plane are not projected.
    pub fn project(&self, point: &Vec3, width: usize, height: usize) -> Option<Projected> {
        let camera = &self.camera;
        let x = point[0] - camera.position[0];
        let y = point[1] - camera.position[1];
        let depth = camera.position[2] - point[2];
        if depth < camera.near {
            return None;
        }
        let f = camera.focal();
        let ndc_x = x * f / (camera.aspect * depth);
        let ndc_y = y * f / depth;
        Some(Projected {
            screen: [
                (ndc_x + 1.0) / 2.0 * width as f64,
                (1.0 - ndc_y) / 2.0 * height as f64,
            ],
            depth,
        })
    }

    /// Ray from the camera through a point in normalized device coordinates.
    pub fn camera_ray(&self, ndc: [f64; 2]) -> (Vec3, Vec3) {
        let f = self.camera.focal();
        let dir = normalize(&[ndc[0] * self.camera.aspect / f, ndc[1] / f, -1.0]);
        (self.camera.position, dir)
    }

    /// Whether the pointer ray at `ndc` touches any part of the envelope.
    pub fn hit_envelope(&self, ndc: [f64; 2]) -> bool {
        let (origin, dir) = self.camera_ray(ndc);
        let envelope = self.card.envelope;
        self.nodes.iter().enumerate().any(|(id, node)| {
            let Some(mesh) = &node.mesh else {
                return false;
            };
            if !self.is_descendant(id, envelope) {
                return false;
            }
            let world = self.world_transform(id);
            mesh.triangles.iter().any(|[a, b, c]| {
                ray_triangle(&origin, &dir, &world.apply(a), &world.apply(b), &world.apply(c))
                    .is_some()
            })
        })
    }

    /// Rasterizes every mesh into `frame`.
    pub fn render(&self, frame: &mut FrameBuffer) {
        let (width, height) = (frame.width(), frame.height());
        for (id, node) in self.nodes.iter().enumerate() {
            let Some(mesh) = &node.mesh else {
                continue;
            };
            let world = self.world_transform(id);
            for triangle in &mesh.triangles {
                let Some(vertices) = self.vertices(&world, triangle, width, height) else {
                    continue;
                };
                draw_triangle(
                    &vertices[0],
                    &vertices[1],
                    &vertices[2],
                    frame,
                    &self.lighting,
                    mesh.color,
                );
            }
        }
    }

    /// Draws mesh edges only.
    pub fn render_wireframe(&self, frame: &mut FrameBuffer, color: Rgb) {
        let (width, height) = (frame.width(), frame.height());
        for (id, node) in self.nodes.iter().enumerate() {
            let Some(mesh) = &node.mesh else {
                continue;
            };
            let world = self.world_transform(id);
            for triangle in &mesh.triangles {
                let Some(v) = self.vertices(&world, triangle, width, height) else {
                    continue;
                };
                for (a, b) in [(0, 1), (1, 2), (2, 0)] {
                    draw_line(
                        v[a].screen_position[0],
                        v[a].screen_position[1],
                        v[b].screen_position[0],
                        v[b].screen_position[1],
                        frame,
                        color,
                    );
                }
            }
        }
    }

    fn vertices(
        &self,
        world: &Affine,
        triangle: &[Vec3; 3],
        width: usize,
        height: usize,
    ) -> Option<[Vertex; 3]> {
        let positions = triangle.map(|p| world.apply(&p));
        let normal = calculate_normal(&positions[0], &positions[1], &positions[2]);
        let mut vertices = [Vertex {
            position: [0.0; 3],
            screen_position: [0.0; 2],
            depth: 0.0,
            normal,
        }; 3];
        for (vertex, position) in vertices.iter_mut().zip(positions) {
            let projected = self.project(&position, width, height)?;
            vertex.position = position;
            vertex.screen_position = projected.screen;
            vertex.depth = projected.depth;
        }
        Some(vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_nodes_hang_under_envelope() {
        let scene = Scene::greeting_card();
        let card = scene.card;
        for id in [card.paper, card.surprise, card.flap_pivot] {
            assert!(scene.is_descendant(id, card.envelope));
        }
        assert!(!scene.is_descendant(card.envelope, card.paper));
        assert_eq!(scene.node(card.flap_pivot).name, "flap-pivot");
        assert_eq!(scene.transform(card.flap_pivot).rotation[0], FLAP_REST_ANGLE);
    }

    #[test]
    fn center_of_view_hits_the_envelope() {
        let scene = Scene::greeting_card();
        assert!(scene.hit_envelope([0.0, 0.0]));
        assert!(!scene.hit_envelope([0.95, 0.95]));
    }

    #[test]
    fn envelope_far_away_is_not_hit() {
        let mut scene = Scene::greeting_card();
        let envelope = scene.card.envelope;
        scene.transform_mut(envelope).position[1] = 10.0;
        assert!(!scene.hit_envelope([0.0, 0.0]));
    }

    #[test]
    fn world_transform_follows_parents() {
        let mut scene = Scene::greeting_card();
        let (envelope, paper) = (scene.card.envelope, scene.card.paper);
        scene.transform_mut(envelope).position = [1.0, 2.0, 0.0];
        let p = scene.world_transform(paper).apply(&[0.0; 3]);
        assert!((p[0] - 1.0).abs() < 1e-12);
        assert!((p[1] - 2.0).abs() < 1e-12);
        assert!((p[2] - 0.01).abs() < 1e-12);
    }

    #[test]
    fn projection_centers_points_on_the_axis() {
        let scene = Scene::greeting_card();
        let p = scene.project(&[0.0, 0.0, 0.0], 100, 50).unwrap();
        assert_eq!(p.screen, [50.0, 25.0]);
        assert_eq!(p.depth, 6.0);
        assert!(scene.project(&[0.0, 0.0, 7.0], 100, 50).is_none());
    }

    #[test]
    fn render_paints_envelope_in_the_middle() {
        let mut scene = Scene::greeting_card();
        scene.set_viewport(80, 48);
        let mut frame = FrameBuffer::new(80, 48);
        frame.clear(scene.background);
        scene.render(&mut frame);
        assert_ne!(frame.pixel(40, 24), scene.background);
        assert_eq!(frame.pixel(0, 0), scene.background);
    }

    #[test]
    fn fill_light_tints_the_envelope_pink() {
        fn green_and_blue(frame: &FrameBuffer) -> u32 {
            (0..frame.height())
                .flat_map(|y| (0..frame.width()).map(move |x| (x, y)))
                .map(|(x, y)| frame.pixel(x, y))
                .map(|p| u32::from(p.g) + u32::from(p.b))
                .sum()
        }

        let mut scene = Scene::greeting_card();
        scene.set_viewport(80, 48);
        let mut lit = FrameBuffer::new(80, 48);
        lit.clear(scene.background);
        scene.render(&mut lit);

        scene.lighting.fill = None;
        let mut plain = FrameBuffer::new(80, 48);
        plain.clear(scene.background);
        scene.render(&mut plain);

        assert!(green_and_blue(&lit) > green_and_blue(&plain));
    }
}
