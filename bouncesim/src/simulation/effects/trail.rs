use std::collections::VecDeque;

use crate::simulation::states::Vector;

/// Bounded FIFO of recent positions, oldest first
#[derive(Debug, Clone)]
pub struct TrailBuffer<const D: usize> {
    points: VecDeque<Vector<D>>,
    capacity: usize,
}

impl<const D: usize> TrailBuffer<D> {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a copy of `x`, dropping the oldest point when full
    pub fn record(&mut self, x: Vector<D>) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(x);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vector<D>> + '_ {
        self.points.iter()
    }

    pub fn snapshot(&self) -> Vec<Vector<D>> {
        self.points.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::NVec2;

    fn p(i: usize) -> NVec2 {
        NVec2::new(i as f64, -(i as f64))
    }

    #[test]
    fn evicts_oldest_first() {
        let mut trail = TrailBuffer::new(4);
        for i in 0..5 {
            trail.record(p(i));
        }
        assert_eq!(trail.len(), 4);
        assert_eq!(trail.snapshot(), vec![p(1), p(2), p(3), p(4)]);
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut trail = TrailBuffer::new(8);
        for i in 0..100 {
            trail.record(p(i));
            assert!(trail.len() <= trail.capacity());
        }
        assert_eq!(trail.iter().next(), Some(&p(92)));
    }

    #[test]
    fn zero_capacity_records_nothing() {
        let mut trail = TrailBuffer::new(0);
        trail.record(p(1));
        assert!(trail.is_empty());
    }
}
