use std::f64::consts::PI;
use tokio::time::Instant;

/// Trait for types that can be interpolated.
pub trait Interpolatable: Sized + Clone {
    fn interpolate(&self, target: &Self, t: f64) -> Self;
}

impl Interpolatable for f32 {
    fn interpolate(&self, target: &Self, t: f64) -> Self {
        self + (target - self) * t as f32
    }
}

pub fn ease_in_out_sine(t: f64) -> f64 {
    -((PI * t).cos() - 1.0) / 2.0
}

/// Time-driven interpolation between two values.
///
/// Timing uses the tokio clock, so a paused test runtime advances it the same
/// way it advances `tokio::time::sleep`.
pub struct Animator<T>
where
    T: Interpolatable,
{
    pub from: T,
    pub to: T,
    pub duration: u32,
    pub start_time: Option<Instant>,
    pub ease_fn: fn(f64) -> f64,
    pub animating: bool,
    pub last_value: T,
}

impl<T> Animator<T>
where
    T: Interpolatable,
{
    pub fn new(from: T, to: T, ease_fn: fn(f64) -> f64) -> Self {
        Self {
            from: from.clone(),
            to,
            duration: 0,
            start_time: None,
            ease_fn,
            animating: false,
            last_value: from,
        }
    }

    pub fn start_from(&mut self, from: T, to: T, duration: u32) {
        self.from = from.clone();
        self.to = to;
        self.duration = duration;
        self.start_time = Some(Instant::now());
        self.animating = true;
        self.last_value = from;
    }

    /// Returns Some(new_value) if animating, None if finished
    pub fn update(&mut self) -> Option<T> {
        if !self.animating {
            return None;
        }

        let Some(start) = self.start_time else {
            self.animating = false;
            return None;
        };

        if self.duration == 0 {
            self.animating = false;
            self.last_value = self.to.clone();
            return Some(self.to.clone());
        }

        let elapsed = Instant::now().duration_since(start).as_millis() as f64;
        let mut t = (elapsed / (self.duration as f64)).clamp(0.0, 1.0);
        if t >= 1.0 {
            t = 1.0;
            self.animating = false;
        }
        let eased_t = (self.ease_fn)(t);
        let value = self.from.interpolate(&self.to, eased_t);
        self.last_value = value.clone();
        Some(value)
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_easing_endpoints() {
        assert!(ease_in_out_sine(0.0).abs() < 1e-9);
        assert!((ease_in_out_sine(1.0) - 1.0).abs() < 1e-9);
        assert!((ease_in_out_sine(0.5) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_interpolate_f32() {
        assert_eq!(0.0f32.interpolate(&1.0, 0.25), 0.25);
        assert_eq!(1.0f32.interpolate(&0.0, 1.0), 0.0);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let mut animator = Animator::new(0.0f32, 0.0, ease_in_out_sine);
        animator.start_from(0.0, 1.0, 0);
        assert_eq!(animator.update(), Some(1.0));
        assert!(!animator.is_animating());
        assert_eq!(animator.update(), None);
    }

    #[test]
    fn test_idle_animator_yields_nothing() {
        let mut animator = Animator::new(0.5f32, 0.5, ease_in_out_sine);
        assert_eq!(animator.update(), None);
        assert!(!animator.is_animating());
    }

    #[tokio::test(start_paused = true)]
    async fn test_animator_reaches_target() {
        let mut animator = Animator::new(1.0f32, 1.0, ease_in_out_sine);
        animator.start_from(1.0, 0.0, 100);

        tokio::time::advance(Duration::from_millis(50)).await;
        let midway = animator.update().unwrap();
        assert!(midway > 0.0 && midway < 1.0);
        assert!(animator.is_animating());

        tokio::time::advance(Duration::from_millis(60)).await;
        assert_eq!(animator.update(), Some(0.0));
        assert!(!animator.is_animating());
    }
}
