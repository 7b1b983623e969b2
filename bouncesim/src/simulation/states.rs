//! Core state types for the bouncing-body simulation.
//!
//! Defines one const-generic body used by both variants:
//! - `Body2` using `NVec2` (2d arena)
//! - `Body3` using `NVec3` (3d room)
//!
//! Physics treats every body as a bounding circle/sphere of `radius`.
//! `ShapeKind` and `Color` only matter to whoever draws the body.

use nalgebra::{SVector, Vector2, Vector3};
use rand::Rng;
use serde::Deserialize;

use super::boundary::Domain;
use super::params::Damping;

pub type Vector<const D: usize> = SVector<f64, D>;
pub type NVec2 = Vector2<f64>;
pub type NVec3 = Vector3<f64>;

/// Appearance tag selected at spawn time, never read by the physics
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Square,
    Circle,
    Triangle,
    Hexagon,
    Sphere,
}

impl ShapeKind {
    pub const COUNT: usize = 5;
    pub const ALL: [ShapeKind; Self::COUNT] = [
        ShapeKind::Square,
        ShapeKind::Circle,
        ShapeKind::Triangle,
        ShapeKind::Hexagon,
        ShapeKind::Sphere,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// RGB color, channels in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Convert hue (degrees), saturation and value into RGB
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        let h = hue.rem_euclid(360.0);
        let c = value * saturation;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = value - c;

        let (r, g, b) = if h < 60.0 {
            (c, x, 0.0)
        } else if h < 120.0 {
            (x, c, 0.0)
        } else if h < 180.0 {
            (0.0, c, x)
        } else if h < 240.0 {
            (0.0, x, c)
        } else if h < 300.0 {
            (x, 0.0, c)
        } else {
            (c, 0.0, x)
        };

        Self::new(r + m, g + m, b + m)
    }

    /// Saturated, bright color (random hue)
    pub fn random_vibrant<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_hsv(
            rng.gen_range(0.0..360.0),
            rng.gen_range(0.6..=1.0),
            rng.gen_range(0.7..=1.0),
        )
    }

    /// Each channel independently in [0.3, 1]
    pub fn random_pastel<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(
            rng.gen_range(0.3..=1.0),
            rng.gen_range(0.3..=1.0),
            rng.gen_range(0.3..=1.0),
        )
    }

    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }
}

/// Opaque handle to a body owned by a `World`
/// Handles taken before a `clear_all` no longer resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId {
    pub(crate) index: usize,
    pub(crate) epoch: u32,
}

impl BodyId {
    pub fn index(&self) -> usize {
        self.index
    }
}

#[derive(Debug, Clone)]
pub struct MotionBody<const D: usize> {
    pub x: Vector<D>, // position
    pub v: Vector<D>, // velocity
    pub a: Vector<D>, // pending acceleration, zeroed by every integrate
    pub m: f64, // mass
    pub radius: f64, // bounding radius (half size for boxes)
    pub bounce: f64, // fraction of speed kept on a wall hit
    pub color: Color,
    pub collisions: u64, // frames in which at least one wall was hit
    pub kind: ShapeKind,
}

pub type Body2 = MotionBody<2>;
pub type Body3 = MotionBody<3>;

impl<const D: usize> MotionBody<D> {
    pub fn new(x: Vector<D>, v: Vector<D>, radius: f64) -> Self {
        assert!(radius > 0.0, "body radius must be positive, got {radius}");
        Self {
            x,
            v,
            a: Vector::zeros(),
            m: 1.0,
            radius,
            bounce: 1.0,
            color: Color::WHITE,
            collisions: 0,
            kind: ShapeKind::Circle,
        }
    }

    pub fn with_mass(mut self, m: f64) -> Self {
        assert!(m > 0.0 && m.is_finite(), "body mass must be positive, got {m}");
        self.m = m;
        self
    }

    pub fn with_bounce(mut self, bounce: f64) -> Self {
        assert!(bounce > 0.0 && bounce <= 1.0, "bounce factor must be in (0, 1], got {bounce}");
        self.bounce = bounce;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_kind(mut self, kind: ShapeKind) -> Self {
        self.kind = kind;
        self
    }

    /// F = m a: accumulate `f / m` until the next `integrate`
    pub fn apply_force(&mut self, f: Vector<D>) {
        self.a += f / self.m;
    }

    /// Advance by one explicit Euler step
    /// Order: pending acceleration into velocity, damping, then drift
    pub fn integrate(&mut self, dt: f64, damping: &Damping) {
        assert!(dt >= 0.0, "integrate: dt must be non-negative, got {dt}");

        // v += a dt, then drop the accumulated forces
        self.v += self.a * dt;
        self.a = Vector::zeros();

        self.v *= damping.factor(dt);

        // x += v dt
        self.x += self.v * dt;
    }

    /// Clamp the body back inside `domain` and reflect the offending
    /// velocity components. Returns true if any wall was hit; the
    /// collision counter moves at most once per call
    pub fn resolve_boundaries(&mut self, domain: &Domain<D>) -> bool {
        let mut collided = false;

        for i in 0..D {
            if self.x[i] - self.radius < domain.min[i] {
                self.x[i] = domain.min[i] + self.radius;
                self.v[i] = self.v[i].abs() * self.bounce;
                collided = true;
            }
            // independent check: on a domain narrower than 2r this clamp wins
            if self.x[i] + self.radius > domain.max[i] {
                self.x[i] = domain.max[i] - self.radius;
                self.v[i] = -self.v[i].abs() * self.bounce;
                collided = true;
            }
        }

        if collided {
            self.collisions += 1;
        }
        collided
    }
}
