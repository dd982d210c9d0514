use nalgebra::Vector2;
use rand::RngExt;
use rand::rngs::StdRng;

#[inline]
pub fn distance(a: &Vector2<f32>, b: &Vector2<f32>) -> f32 {
    (b - a).norm()
}

/// Angle in radians of the direction pointing from `from` to `to`.
#[inline]
pub fn angle(from: &Vector2<f32>, to: &Vector2<f32>) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Unlike `f32::clamp` this never panics: an inverted range collapses to `min`.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn direction(angle: f32) -> Vector2<f32> {
    Vector2::new(angle.cos(), angle.sin())
}

/// Replaces NaN and infinities with zero.
#[inline]
pub fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

/// Uniform sample in `[min, max)`, returns `min` for an empty range.
pub fn random_range(rng: &mut StdRng, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }

    min + rng.random::<f32>() * (max - min)
}

/// Bernoulli trial, `chance` outside `[0, 1]` saturates.
pub fn roll(rng: &mut StdRng, chance: f32) -> bool {
    rng.random::<f32>() < chance
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_distance() {
        let a = Vector2::new(0.0, 0.0);
        let b = Vector2::new(3.0, 4.0);
        assert_eq!(distance(&a, &b), 5.0);
        assert_eq!(distance(&b, &a), 5.0);
    }

    #[test]
    fn test_angle() {
        let origin = Vector2::new(10.0, 10.0);
        assert_eq!(angle(&origin, &Vector2::new(20.0, 10.0)), 0.0);
        assert!((angle(&origin, &Vector2::new(10.0, 20.0)) - FRAC_PI_2).abs() < 1e-6);
        assert!((angle(&origin, &Vector2::new(0.0, 10.0)) - PI).abs() < 1e-6);
    }

    #[test]
    fn test_clamp_inverted_range_does_not_panic() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(5.0, 10.0, 0.0), 10.0);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
    }

    #[test]
    fn test_finite_or_zero() {
        assert_eq!(finite_or_zero(f32::NAN), 0.0);
        assert_eq!(finite_or_zero(f32::INFINITY), 0.0);
        assert_eq!(finite_or_zero(-0.5), -0.5);
    }

    #[test]
    fn test_random_range_bounds() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1000 {
            let value = random_range(&mut rng, -40.0, 40.0);
            assert!((-40.0..40.0).contains(&value));
        }

        assert_eq!(random_range(&mut rng, 3.0, 3.0), 3.0);
        assert_eq!(random_range(&mut rng, 3.0, -3.0), 3.0);
    }

    #[test]
    fn test_roll_saturates() {
        let mut rng = StdRng::seed_from_u64(1);

        assert!((0..100).all(|_| roll(&mut rng, 1.0)));
        assert!((0..100).all(|_| !roll(&mut rng, 0.0)));
    }
}
