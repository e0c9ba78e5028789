use crate::math::Vec3;

/// Vertex structure with world position, screen position, camera depth and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Vec3,
    pub screen_position: [f64; 2],
    /// Distance in front of the camera; smaller is closer
    pub depth: f64,
    pub normal: Vec3,
}
