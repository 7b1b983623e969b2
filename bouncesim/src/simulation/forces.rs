//! Force contributors applied to each body before it integrates
//!
//! Forces are pushed through `MotionBody::apply_force`, so every term
//! ends up as `f / m` in the body's pending acceleration

use super::states::{MotionBody, Vector};

/// Collection of force terms (gravity, drag, etc.)
/// Each term implements [`Force`] and all of them are applied to the
/// body in registration order
pub struct ForceSet<const D: usize> {
    terms: Vec<Box<dyn Force<D> + Send + Sync>>,
}

impl<const D: usize> ForceSet<D> {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Force<D> + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Apply every term at time `t` to `body`
    pub fn apply(&self, t: f64, body: &mut MotionBody<D>) {
        for term in &self.terms {
            let f = term.force(t, body);
            body.apply_force(f);
        }
    }
}

impl<const D: usize> Default for ForceSet<D> {
    fn default() -> Self {
        Self::new()
    }
}

/// A force source evaluated for one body at time `t`
pub trait Force<const D: usize> {
    fn force(&self, t: f64, body: &MotionBody<D>) -> Vector<D>;
}

/// Constant field: every body feels `m * g`
pub struct UniformGravity<const D: usize> {
    pub g: Vector<D>,
}

impl<const D: usize> Force<D> for UniformGravity<D> {
    fn force(&self, _t: f64, body: &MotionBody<D>) -> Vector<D> {
        self.g * body.m
    }
}

/// Velocity-proportional drag `-k v`
pub struct LinearDrag {
    pub k: f64,
}

impl<const D: usize> Force<D> for LinearDrag {
    fn force(&self, _t: f64, body: &MotionBody<D>) -> Vector<D> {
        -self.k * body.v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::{Body3, NVec3};

    #[test]
    fn gravity_acceleration_is_mass_independent() {
        let forces = ForceSet::new().with(UniformGravity { g: NVec3::new(0.0, -9.8, 0.0) });

        let mut light = Body3::new(NVec3::zeros(), NVec3::zeros(), 0.5);
        let mut heavy = Body3::new(NVec3::zeros(), NVec3::zeros(), 0.5).with_mass(4.0);
        forces.apply(0.0, &mut light);
        forces.apply(0.0, &mut heavy);

        assert!((light.a - heavy.a).norm() < 1e-12);
        assert!((light.a.y + 9.8).abs() < 1e-12);
    }

    #[test]
    fn terms_accumulate() {
        let forces = ForceSet::new()
            .with(UniformGravity { g: NVec3::new(0.0, -1.0, 0.0) })
            .with(LinearDrag { k: 0.5 });
        assert_eq!(forces.len(), 2);

        let mut b = Body3::new(NVec3::zeros(), NVec3::new(2.0, 0.0, 0.0), 0.5);
        forces.apply(0.0, &mut b);
        assert_eq!(b.a, NVec3::new(-1.0, -1.0, 0.0));
    }
}
