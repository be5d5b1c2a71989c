use super::VelocityFilter;
use crate::motion::Velocity;
use std::collections::VecDeque;

/// Moving average filter
pub struct MovingAverageFilter {
    window_size: usize,
    buffer: VecDeque<Velocity>,
}

impl MovingAverageFilter {
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size,
            buffer: VecDeque::with_capacity(window_size),
        }
    }
}

impl VelocityFilter for MovingAverageFilter {
    fn apply(&mut self, velocity: Velocity) -> Velocity {
        if self.buffer.len() >= self.window_size {
            self.buffer.pop_front();
        }
        self.buffer.push_back(velocity);

        let n = self.buffer.len() as f64;
        let (sx, sy) = self
            .buffer
            .iter()
            .fold((0.0, 0.0), |(sx, sy), v| (sx + v.x, sy + v.y));

        Velocity::new(sx / n, sy / n)
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }

    fn name(&self) -> &str {
        "MovingAverageFilter"
    }
}
