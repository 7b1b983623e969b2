//! Decorative placement pattern: nested rings of points
//!
//! `count` points sit on a circle of `radius` around `center`. After each
//! point, while the ring is shallower than `MAX_DEPTH` and has more than
//! two points, a child ring of `count / 2` points at `0.6 * radius` is
//! emitted around it (pre-order). Points lie in the plane of axes 0 and 1

use std::f64::consts::TAU;

use super::states::Vector;

const MAX_DEPTH: u32 = 2;
const SHRINK: f64 = 0.6;

struct Ring<const D: usize> {
    center: Vector<D>,
    count: usize,
    radius: f64,
    depth: u32,
    next: usize,
}

/// Finite iterator over the spiral positions, driven by an explicit stack
pub struct SpiralPattern<const D: usize> {
    stack: Vec<Ring<D>>,
}

impl<const D: usize> SpiralPattern<D> {
    pub fn new(center: Vector<D>, count: usize, radius: f64) -> Self {
        let mut stack = Vec::with_capacity(MAX_DEPTH as usize + 1);
        if count > 0 {
            stack.push(Ring { center, count, radius, depth: 0, next: 0 });
        }
        Self { stack }
    }
}

impl<const D: usize> Iterator for SpiralPattern<D> {
    type Item = Vector<D>;

    fn next(&mut self) -> Option<Vector<D>> {
        loop {
            let ring = self.stack.last_mut()?;
            if ring.next >= ring.count {
                self.stack.pop();
                continue;
            }

            let angle = ring.next as f64 * TAU / ring.count as f64;
            ring.next += 1;

            let mut p = ring.center;
            p[0] += ring.radius * angle.cos();
            if D > 1 {
                p[1] += ring.radius * angle.sin();
            }

            let child = (ring.depth < MAX_DEPTH && ring.count > 2).then(|| Ring {
                center: p,
                count: (ring.count / 2).max(1),
                radius: ring.radius * SHRINK,
                depth: ring.depth + 1,
                next: 0,
            });
            self.stack.extend(child);

            return Some(p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::NVec2;

    #[test]
    fn empty_for_zero_count() {
        assert_eq!(SpiralPattern::new(NVec2::zeros(), 0, 50.0).count(), 0);
    }

    #[test]
    fn small_rings_do_not_nest() {
        let pts: Vec<_> = SpiralPattern::new(NVec2::new(1.0, 1.0), 2, 10.0).collect();
        assert_eq!(pts.len(), 2);
        assert!((pts[0] - NVec2::new(11.0, 1.0)).norm() < 1e-9);
        assert!((pts[1] - NVec2::new(-9.0, 1.0)).norm() < 1e-9);
    }

    #[test]
    fn nesting_is_depth_bounded() {
        // 4 outer points, each with a 2-point child ring
        assert_eq!(SpiralPattern::new(NVec2::zeros(), 4, 50.0).count(), 12);
        // 8 outer, each with 4 children, each of those with 2
        assert_eq!(SpiralPattern::new(NVec2::zeros(), 8, 50.0).count(), 104);
    }

    #[test]
    fn children_follow_their_parent() {
        let pts: Vec<_> = SpiralPattern::new(NVec2::zeros(), 4, 50.0).collect();
        assert!((pts[0] - NVec2::new(50.0, 0.0)).norm() < 1e-9);
        assert!((pts[1] - NVec2::new(80.0, 0.0)).norm() < 1e-9);
        assert!((pts[2] - NVec2::new(20.0, 0.0)).norm() < 1e-9);
        assert!((pts[3] - NVec2::new(0.0, 50.0)).norm() < 1e-9);
    }
}
