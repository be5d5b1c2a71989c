use super::VelocityFilter;
use crate::motion::Velocity;

/// Exponential smoothing filter
pub struct ExponentialFilter {
    alpha: f64,
    last: Option<Velocity>,
}

impl ExponentialFilter {
    pub fn new(alpha: f64) -> Self {
        assert!(alpha > 0.0 && alpha <= 1.0, "Alpha must be in (0, 1]");
        Self { alpha, last: None }
    }
}

impl VelocityFilter for ExponentialFilter {
    fn apply(&mut self, velocity: Velocity) -> Velocity {
        let filtered = match self.last {
            Some(last) => Velocity::new(
                self.alpha * velocity.x + (1.0 - self.alpha) * last.x,
                self.alpha * velocity.y + (1.0 - self.alpha) * last.y,
            ),
            None => velocity,
        };

        self.last = Some(filtered);
        filtered
    }

    fn reset(&mut self) {
        self.last = None;
    }

    fn name(&self) -> &str {
        "ExponentialFilter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_filter() {
        let mut filter = ExponentialFilter::new(0.5);

        // First value passes through
        assert_eq!(filter.apply(Velocity::new(1.0, -1.0)), Velocity::new(1.0, -1.0));

        // Second value is smoothed
        assert_eq!(filter.apply(Velocity::new(0.0, 0.0)), Velocity::new(0.5, -0.5));
    }

    #[test]
    fn test_reset_forgets_history() {
        let mut filter = ExponentialFilter::new(0.2);
        filter.apply(Velocity::new(1.0, 1.0));
        filter.reset();
        assert_eq!(filter.apply(Velocity::new(-0.5, 0.0)), Velocity::new(-0.5, 0.0));
    }
}
