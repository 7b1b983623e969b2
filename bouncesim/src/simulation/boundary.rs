//! Axis-aligned walls the bodies bounce inside
//!
//! A `Domain` is the closed box `[min, max]` per axis; a body of radius `r`
//! is considered inside while its centre stays in `[min + r, max - r]`

use anyhow::{ensure, Result};

use super::states::Vector;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain<const D: usize> {
    pub min: Vector<D>,
    pub max: Vector<D>,
}

pub type Domain2 = Domain<2>;
pub type Domain3 = Domain<3>;

impl<const D: usize> Domain<D> {
    pub fn new(min: Vector<D>, max: Vector<D>) -> Result<Self> {
        for i in 0..D {
            ensure!(
                min[i].is_finite() && max[i].is_finite() && max[i] > min[i],
                "domain axis {i}: max ({}) must be greater than min ({})",
                max[i],
                min[i]
            );
        }
        Ok(Self { min, max })
    }

    /// Box of the given size centred on the origin (the 3d room)
    pub fn centered(size: Vector<D>) -> Result<Self> {
        Self::new(-size / 2.0, size / 2.0)
    }

    pub fn size(&self) -> Vector<D> {
        self.max - self.min
    }

    pub fn center(&self) -> Vector<D> {
        (self.min + self.max) / 2.0
    }

    /// True if a body of `radius` has room to move on every axis
    pub fn fits(&self, radius: f64) -> bool {
        (0..D).all(|i| self.max[i] - self.min[i] > 2.0 * radius)
    }

    pub fn contains(&self, x: &Vector<D>, radius: f64) -> bool {
        (0..D).all(|i| x[i] >= self.min[i] + radius && x[i] <= self.max[i] - radius)
    }

    /// Nearest point to `x` where a body of `radius` is inside
    pub fn clamp(&self, x: &Vector<D>, radius: f64) -> Vector<D> {
        Vector::from_fn(|i, _| {
            let lo = self.min[i] + radius;
            let hi = self.max[i] - radius;
            if hi < lo {
                (self.min[i] + self.max[i]) / 2.0
            } else {
                x[i].clamp(lo, hi)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::{NVec2, NVec3};

    #[test]
    fn rejects_inverted_axis() {
        assert!(Domain::new(NVec2::new(0.0, 5.0), NVec2::new(10.0, 5.0)).is_err());
        assert!(Domain::new(NVec2::new(0.0, 0.0), NVec2::new(-1.0, 5.0)).is_err());
    }

    #[test]
    fn centered_room() {
        let room = Domain::centered(NVec3::new(10.0, 10.0, 10.0)).unwrap();
        assert_eq!(room.min, NVec3::new(-5.0, -5.0, -5.0));
        assert_eq!(room.max, NVec3::new(5.0, 5.0, 5.0));
        assert_eq!(room.center(), NVec3::zeros());
    }

    #[test]
    fn fits_needs_strictly_more_than_a_diameter() {
        let d = Domain::new(NVec2::new(0.0, 0.0), NVec2::new(4.0, 10.0)).unwrap();
        assert!(d.fits(1.9));
        assert!(!d.fits(2.0));
    }

    #[test]
    fn clamp_pulls_inside() {
        let d = Domain::new(NVec2::new(0.0, 0.0), NVec2::new(10.0, 10.0)).unwrap();
        let p = d.clamp(&NVec2::new(-3.0, 20.0), 1.0);
        assert_eq!(p, NVec2::new(1.0, 9.0));
        assert!(d.contains(&p, 1.0));
    }
}
