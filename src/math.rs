use crate::color::Rgb;

pub type Vec3 = [f64; 3];
pub type Mat3 = [[f64; 3]; 3];

pub const IDENTITY: Mat3 = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

pub fn add(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub fn sub(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn dot(a: &Vec3, b: &Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn cross(u: &Vec3, v: &Vec3) -> Vec3 {
    [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ]
}

pub fn normalize(v: &Vec3) -> Vec3 {
    let length = dot(v, v).sqrt();
    if length == 0.0 {
        return *v;
    }
    [v[0] / length, v[1] / length, v[2] / length]
}

/// Edge function used in rasterization
pub fn edge_function(a: &[f64; 2], b: &[f64; 2], c: &[f64; 2]) -> f64 {
    (c[0] - a[0]) * (b[1] - a[1]) - (c[1] - a[1]) * (b[0] - a[0])
}

/// Multiplies a 3x3 matrix by a 3-dimensional vector
pub fn multiply_matrix_vector(matrix: &Mat3, vector: &Vec3) -> Vec3 {
    let mut result = [0.0; 3];
    for i in 0..3 {
        for j in 0..3 {
            result[i] += matrix[i][j] * vector[j];
        }
    }
    result
}

/// Multiplies two 3x3 matrices
pub fn multiply_matrices(a: &Mat3, b: &Mat3) -> Mat3 {
    let mut result = [[0.0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    result
}

pub fn rotation_x(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    [[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]]
}

pub fn rotation_y(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]]
}

pub fn rotation_z(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]]
}

/// Euler rotation applied in X, Y, Z order (`Rx * Ry * Rz`).
pub fn euler_xyz(rotation: &Vec3) -> Mat3 {
    let xy = multiply_matrices(&rotation_x(rotation[0]), &rotation_y(rotation[1]));
    multiply_matrices(&xy, &rotation_z(rotation[2]))
}

/// Linear map plus translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub linear: Mat3,
    pub translation: Vec3,
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        linear: IDENTITY,
        translation: [0.0; 3],
    };

    /// Scale, then rotate, then translate.
    pub fn from_parts(position: &Vec3, rotation: &Vec3, scale: &Vec3) -> Self {
        let rotation = euler_xyz(rotation);
        let scaling = [
            [scale[0], 0.0, 0.0],
            [0.0, scale[1], 0.0],
            [0.0, 0.0, scale[2]],
        ];
        Affine {
            linear: multiply_matrices(&rotation, &scaling),
            translation: *position,
        }
    }

    /// `self ∘ inner`: applies `inner` first.
    pub fn then(&self, inner: &Affine) -> Affine {
        Affine {
            linear: multiply_matrices(&self.linear, &inner.linear),
            translation: add(
                &multiply_matrix_vector(&self.linear, &inner.translation),
                &self.translation,
            ),
        }
    }

    pub fn apply(&self, point: &Vec3) -> Vec3 {
        add(&multiply_matrix_vector(&self.linear, point), &self.translation)
    }
}

/// Calculates the normal vector of a triangle
pub fn calculate_normal(a: &Vec3, b: &Vec3, c: &Vec3) -> Vec3 {
    let u = sub(b, a);
    let v = sub(c, a);
    normalize(&cross(&u, &v))
}

/// Light intensity for a double-sided surface: the ambient floor plus the
/// diffuse term of a point light, whichever side of the surface faces it.
pub fn calculate_light_intensity(
    normal: &Vec3,
    position: &Vec3,
    light_pos: &Vec3,
    ambient: f64,
) -> f64 {
    let light_dir = normalize(&sub(light_pos, position));
    ambient + dot(normal, &light_dir).abs() * (1.0 - ambient)
}

/// Applies lighting to a color
pub fn apply_lighting(color: Rgb, intensity: f64) -> Rgb {
    let r = (color.r as f64 * intensity).min(255.0) as u8;
    let g = (color.g as f64 * intensity).min(255.0) as u8;
    let b = (color.b as f64 * intensity).min(255.0) as u8;
    Rgb::new(r, g, b)
}

/// Adds `light` reflected off `base` at `amount` to an already lit color.
pub fn tint(lit: Rgb, base: Rgb, light: Rgb, amount: f64) -> Rgb {
    let channel = |lit: u8, base: u8, light: u8| {
        let added = f64::from(base) * f64::from(light) / 255.0 * amount.max(0.0);
        (f64::from(lit) + added).min(255.0) as u8
    };
    Rgb::new(
        channel(lit.r, base.r, light.r),
        channel(lit.g, base.g, light.g),
        channel(lit.b, base.b, light.b),
    )
}

/// Möller–Trumbore ray/triangle test. Returns the ray parameter of the hit.
pub fn ray_triangle(origin: &Vec3, dir: &Vec3, a: &Vec3, b: &Vec3, c: &Vec3) -> Option<f64> {
    const EPSILON: f64 = 1e-9;
    let edge1 = sub(b, a);
    let edge2 = sub(c, a);
    let h = cross(dir, &edge2);
    let det = dot(&edge1, &h);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = sub(origin, a);
    let u = inv_det * dot(&s, &h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = cross(&s, &edge1);
    let v = inv_det * dot(dir, &q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = inv_det * dot(&edge2, &q);
    (t > EPSILON).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn close(a: &Vec3, b: &Vec3) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    #[test]
    fn rotation_x_turns_y_into_z() {
        let v = multiply_matrix_vector(&rotation_x(FRAC_PI_2), &[0.0, 1.0, 0.0]);
        assert!(close(&v, &[0.0, 0.0, 1.0]));
    }

    #[test]
    fn affine_composition_applies_inner_first() {
        let parent = Affine::from_parts(&[0.0, 1.0, 0.0], &[0.0; 3], &[2.0, 2.0, 2.0]);
        let child = Affine::from_parts(&[1.0, 0.0, 0.0], &[0.0; 3], &[1.0; 3]);
        let p = parent.then(&child).apply(&[0.0; 3]);
        assert!(close(&p, &[2.0, 1.0, 0.0]));
    }

    #[test]
    fn ray_hits_triangle_in_front() {
        let (a, b, c) = ([-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 1.0, 0.0]);
        let t = ray_triangle(&[0.0, 0.0, 5.0], &[0.0, 0.0, -1.0], &a, &b, &c);
        assert_eq!(t, Some(5.0));
        assert!(ray_triangle(&[3.0, 0.0, 5.0], &[0.0, 0.0, -1.0], &a, &b, &c).is_none());
        assert!(ray_triangle(&[0.0, 0.0, 5.0], &[0.0, 0.0, 1.0], &a, &b, &c).is_none());
    }

    #[test]
    fn lighting_is_double_sided() {
        let front = calculate_light_intensity(&[0.0, 0.0, 1.0], &[0.0; 3], &[0.0, 0.0, 5.0], 0.3);
        let back = calculate_light_intensity(&[0.0, 0.0, -1.0], &[0.0; 3], &[0.0, 0.0, 5.0], 0.3);
        assert!((front - 1.0).abs() < 1e-12);
        assert_eq!(front, back);
    }
}
