//! Fixed-step time integration for a set of bodies
//!
//! Bodies never interact, so one explicit Euler step is just the
//! per-body `apply forces -> integrate` sequence run over the slice

use super::forces::ForceSet;
use super::params::Damping;
use super::states::MotionBody;

/// Advance every body by one explicit Euler step of `dt`
/// Forces are evaluated at time `t` and consumed by the step
pub fn euler_step<const D: usize>(
    bodies: &mut [MotionBody<D>],
    forces: &ForceSet<D>,
    damping: &Damping,
    t: f64,
    dt: f64,
) {
    for b in bodies.iter_mut() {
        forces.apply(t, b);
        b.integrate(dt, damping);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::forces::UniformGravity;
    use crate::simulation::states::{Body3, NVec3};

    #[test]
    fn same_input_same_output() {
        let forces = ForceSet::new().with(UniformGravity { g: NVec3::new(0.0, -9.8, 0.0) });
        let damping = Damping::Linear { coefficient: 0.02 };

        let start = vec![
            Body3::new(NVec3::new(1.0, 2.0, 3.0), NVec3::new(-1.5, 4.0, 0.25), 0.5),
            Body3::new(NVec3::new(-2.0, 0.0, 1.0), NVec3::new(3.0, 0.0, -2.0), 0.5),
        ];
        let mut a = start.clone();
        let mut b = start;

        for _ in 0..100 {
            euler_step(&mut a, &forces, &damping, 0.0, 1.0 / 60.0);
            euler_step(&mut b, &forces, &damping, 0.0, 1.0 / 60.0);
        }

        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.x, y.x);
            assert_eq!(x.v, y.v);
        }
    }

    #[test]
    fn gravity_pulls_down() {
        let forces = ForceSet::new().with(UniformGravity { g: NVec3::new(0.0, -9.8, 0.0) });
        let mut bodies = vec![Body3::new(NVec3::zeros(), NVec3::zeros(), 0.5)];

        euler_step(&mut bodies, &forces, &Damping::None, 0.0, 0.1);

        assert!((bodies[0].v.y + 0.98).abs() < 1e-12);
        assert!((bodies[0].x.y + 0.098).abs() < 1e-12);
    }
}
