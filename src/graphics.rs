use crate::color::Rgb;
use crate::math::{
    apply_lighting, calculate_light_intensity, edge_function, normalize, tint, Vec3,
};
use crate::vertex::Vertex;

/// RGB pixel buffer with a depth buffer of the same size.
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
    z_buffer: Vec<f64>,
}

/// Key point light plus ambient floor used by the rasterizer, with an
/// optional colored fill light.
#[derive(Debug, Clone, Copy)]
pub struct Lighting {
    pub position: Vec3,
    pub ambient: f64,
    pub fill: Option<FillLight>,
}

/// Colored point light added on top of the key light.
#[derive(Debug, Clone, Copy)]
pub struct FillLight {
    pub position: Vec3,
    pub color: Rgb,
    /// Share of the lit base color added when the light hits head on.
    pub strength: f64,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        FrameBuffer {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
            z_buffer: vec![f64::INFINITY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reallocates for a new size. Contents are discarded.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }
        *self = FrameBuffer::new(width, height);
    }

    pub fn clear(&mut self, background: Rgb) {
        self.pixels.fill(background);
        self.z_buffer.fill(f64::INFINITY);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    /// Blends `color` over the pixel at (`x`, `y`) if it passes the depth
    /// test. The depth buffer is left untouched.
    pub fn plot_point(&mut self, x: f64, y: f64, depth: f64, color: Rgb, opacity: f64) {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let offset = y * self.width + x;
        if depth < self.z_buffer[offset] {
            self.pixels[offset] = self.pixels[offset].lerp(color, opacity);
        }
    }
}

/// Draws a triangle with per-pixel lighting
pub fn draw_triangle(
    v0: &Vertex,
    v1: &Vertex,
    v2: &Vertex,
    frame: &mut FrameBuffer,
    lighting: &Lighting,
    base_color: Rgb,
) {
    let (width, height) = (frame.width, frame.height);
    if width == 0 || height == 0 {
        return;
    }

    // Compute bounding box of the triangle
    let min_x = v0.screen_position[0]
        .min(v1.screen_position[0])
        .min(v2.screen_position[0])
        .floor()
        .max(0.0);
    let max_x = v0.screen_position[0]
        .max(v1.screen_position[0])
        .max(v2.screen_position[0])
        .ceil()
        .min(width as f64 - 1.0);
    let min_y = v0.screen_position[1]
        .min(v1.screen_position[1])
        .min(v2.screen_position[1])
        .floor()
        .max(0.0);
    let max_y = v0.screen_position[1]
        .max(v1.screen_position[1])
        .max(v2.screen_position[1])
        .ceil()
        .min(height as f64 - 1.0);
    if min_x > max_x || min_y > max_y {
        return;
    }

    // Precompute area of the triangle
    let area = edge_function(&v0.screen_position, &v1.screen_position, &v2.screen_position);
    if area == 0.0 {
        return;
    }

    for y in min_y as usize..=max_y as usize {
        for x in min_x as usize..=max_x as usize {
            let p = [x as f64 + 0.5, y as f64 + 0.5];

            // Normalized barycentric coordinates; dividing by the signed area
            // accepts both windings.
            let w0 = edge_function(&v1.screen_position, &v2.screen_position, &p) / area;
            let w1 = edge_function(&v2.screen_position, &v0.screen_position, &p) / area;
            let w2 = edge_function(&v0.screen_position, &v1.screen_position, &p) / area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }

            let depth = v0.depth * w0 + v1.depth * w1 + v2.depth * w2;
            let offset = y * width + x;
            if depth >= frame.z_buffer[offset] {
                continue;
            }
            frame.z_buffer[offset] = depth;

            let position = [
                v0.position[0] * w0 + v1.position[0] * w1 + v2.position[0] * w2,
                v0.position[1] * w0 + v1.position[1] * w1 + v2.position[1] * w2,
                v0.position[2] * w0 + v1.position[2] * w1 + v2.position[2] * w2,
            ];
            let normal = normalize(&[
                v0.normal[0] * w0 + v1.normal[0] * w1 + v2.normal[0] * w2,
                v0.normal[1] * w0 + v1.normal[1] * w1 + v2.normal[1] * w2,
                v0.normal[2] * w0 + v1.normal[2] * w1 + v2.normal[2] * w2,
            ]);

            let intensity =
                calculate_light_intensity(&normal, &position, &lighting.position, lighting.ambient);
            let mut color = apply_lighting(base_color, intensity);
            if let Some(fill) = &lighting.fill {
                let amount = calculate_light_intensity(&normal, &position, &fill.position, 0.0);
                color = tint(color, base_color, fill.color, amount * fill.strength);
            }
            frame.pixels[offset] = color;
        }
    }
}

/// Draws a line between two points in the pixel buffer using Bresenham's algorithm
pub fn draw_line(x0: f64, y0: f64, x1: f64, y1: f64, frame: &mut FrameBuffer, color: Rgb) {
    let (mut x0, mut y0, x1, y1) = (
        x0.round() as isize,
        y0.round() as isize,
        x1.round() as isize,
        y1.round() as isize,
    );
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy; // error value e_xy

    loop {
        if x0 >= 0 && x0 < frame.width as isize && y0 >= 0 && y0 < frame.height as isize {
            let offset = y0 as usize * frame.width + x0 as usize;
            frame.pixels[offset] = color;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: f64, y: f64, depth: f64) -> Vertex {
        Vertex {
            position: [x, y, 0.0],
            screen_position: [x, y],
            depth,
            normal: [0.0, 0.0, 1.0],
        }
    }

    const LIGHT: Lighting = Lighting {
        position: [0.0, 0.0, 100.0],
        ambient: 1.0,
        fill: None,
    };

    #[test]
    fn triangle_fills_inside_for_either_winding() {
        let red = Rgb::new(200, 0, 0);
        for order in [[0, 1, 2], [0, 2, 1]] {
            let mut frame = FrameBuffer::new(10, 10);
            let vs = [vertex(0.0, 0.0, 1.0), vertex(10.0, 0.0, 1.0), vertex(0.0, 10.0, 1.0)];
            draw_triangle(&vs[order[0]], &vs[order[1]], &vs[order[2]], &mut frame, &LIGHT, red);
            assert_eq!(frame.pixel(1, 1), red);
            assert_eq!(frame.pixel(9, 9), Rgb::BLACK);
        }
    }

    #[test]
    fn fill_light_tints_towards_its_color() {
        let gray = Rgb::new(100, 100, 100);
        let lighting = Lighting {
            position: [0.0, 0.0, 100.0],
            ambient: 0.5,
            fill: Some(FillLight {
                position: [0.0, 0.0, 100.0],
                color: Rgb::new(255, 0, 0),
                strength: 0.5,
            }),
        };
        let mut frame = FrameBuffer::new(10, 10);
        let vs = [vertex(0.0, 0.0, 1.0), vertex(10.0, 0.0, 1.0), vertex(0.0, 10.0, 1.0)];
        draw_triangle(&vs[0], &vs[1], &vs[2], &mut frame, &lighting, gray);
        let lit = frame.pixel(1, 1);
        assert!(lit.r > lit.g, "{lit:?}");
        assert_eq!(lit.g, lit.b);

        let mut plain = FrameBuffer::new(10, 10);
        let unfilled = Lighting { fill: None, ..lighting };
        draw_triangle(&vs[0], &vs[1], &vs[2], &mut plain, &unfilled, gray);
        assert_eq!(plain.pixel(1, 1).g, lit.g);
        assert!(plain.pixel(1, 1).r < lit.r);
    }

    #[test]
    fn nearer_triangle_wins_depth_test() {
        let mut frame = FrameBuffer::new(8, 8);
        let near = [vertex(0.0, 0.0, 1.0), vertex(8.0, 0.0, 1.0), vertex(0.0, 8.0, 1.0)];
        let far = [vertex(0.0, 0.0, 5.0), vertex(8.0, 0.0, 5.0), vertex(0.0, 8.0, 5.0)];
        let (green, blue) = (Rgb::new(0, 200, 0), Rgb::new(0, 0, 200));
        draw_triangle(&near[0], &near[1], &near[2], &mut frame, &LIGHT, green);
        draw_triangle(&far[0], &far[1], &far[2], &mut frame, &LIGHT, blue);
        assert_eq!(frame.pixel(1, 1), green);
    }

    #[test]
    fn points_respect_depth_and_bounds() {
        let mut frame = FrameBuffer::new(4, 4);
        frame.plot_point(1.2, 1.7, 3.0, Rgb::WHITE, 1.0);
        frame.plot_point(-1.0, 2.0, 3.0, Rgb::WHITE, 1.0);
        frame.plot_point(9.0, 2.0, 3.0, Rgb::WHITE, 1.0);
        assert_eq!(frame.pixel(1, 1), Rgb::WHITE);

        let wall = [vertex(0.0, 0.0, 1.0), vertex(4.0, 0.0, 1.0), vertex(0.0, 4.0, 1.0)];
        draw_triangle(&wall[0], &wall[1], &wall[2], &mut frame, &LIGHT, Rgb::new(1, 2, 3));
        frame.plot_point(0.5, 0.5, 3.0, Rgb::WHITE, 1.0);
        assert_eq!(frame.pixel(0, 0), Rgb::new(1, 2, 3));
    }

    #[test]
    fn line_is_clipped_to_frame() {
        let mut frame = FrameBuffer::new(5, 5);
        draw_line(-3.0, 2.0, 10.0, 2.0, &mut frame, Rgb::WHITE);
        for x in 0..5 {
            assert_eq!(frame.pixel(x, 2), Rgb::WHITE);
        }
    }
}
