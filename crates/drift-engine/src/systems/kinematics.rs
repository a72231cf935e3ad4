//! Randomized vector and vertical-step helpers.
//!
//! Spawning logic uses these to hand organisms their initial travel, and
//! hosts use the vertical step to wander a body's depth inside a bounded
//! band. All draws come from a caller-supplied [`Rng`].

use glam::DVec2;

use crate::core::rng::Rng;

/// Vertical strength arrives as a whole percentage.
const Z_STRENGTH_SCALE: f64 = 0.01;

/// Split `max_travel` into random X and Y magnitudes and sign each
/// independently. X is drawn uniformly in tenths up to `max_travel`, Y is
/// the remainder, so `|x| + |y|` always sums back to `max_travel`.
pub fn random_vector(max_travel: f64, rng: &mut Rng) -> DVec2 {
    let tenths = (max_travel * 10.0) as u32;
    let x = f64::from(rng.next_int(tenths)) / 10.0;
    let y = max_travel - x;
    DVec2::new(
        if rng.coin_flip() { -x } else { x },
        if rng.coin_flip() { -y } else { y },
    )
}

/// One random vertical step for a body sitting at `current_z`.
///
/// Direction is biased by where the body sits in its `[min, max]` band:
/// pinned at a bound it is forced back inside; strictly positive picks
/// randomly with a two-in-three downward skew; strictly negative is
/// forced upward; dead center is even odds. The magnitude is `strength`
/// (scaled to hundredths) shaved by a random percentage up to
/// `variation_percent`. Downward steps come back negative.
pub fn generate_z_step(
    strength: f64,
    variation_percent: u32,
    max: f64,
    min: f64,
    current_z: f64,
    rng: &mut Rng,
) -> f64 {
    let strength = strength * Z_STRENGTH_SCALE;
    let downward = if current_z >= max {
        true
    } else if current_z <= min {
        false
    } else if current_z > 0.0 {
        rng.next_int(3) % 2 == 0
    } else if current_z < 0.0 {
        false
    } else {
        rng.coin_flip()
    };
    let reduction = strength * f64::from(rng.next_int(variation_percent)) / 100.0;
    let step = strength - reduction;
    if downward {
        -step
    } else {
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitudes_sum_to_max_travel() {
        let mut rng = Rng::new(11);
        for _ in 0..200 {
            let v = random_vector(7.3, &mut rng);
            assert!(
                ((v.x.abs() + v.y.abs()) - 7.3).abs() < 1e-9,
                "sum was {}",
                v.x.abs() + v.y.abs()
            );
        }
    }

    #[test]
    fn zero_travel_yields_zero_vector() {
        let mut rng = Rng::new(5);
        let v = random_vector(0.0, &mut rng);
        assert_eq!(v, DVec2::ZERO);
    }

    #[test]
    fn vectors_cover_all_quadrant_signs() {
        let mut rng = Rng::new(3);
        let mut saw = [false; 4];
        for _ in 0..500 {
            let v = random_vector(5.0, &mut rng);
            if v.x == 0.0 || v.y == 0.0 {
                continue;
            }
            let quadrant = match (v.x > 0.0, v.y > 0.0) {
                (true, true) => 0,
                (false, true) => 1,
                (false, false) => 2,
                (true, false) => 3,
            };
            saw[quadrant] = true;
        }
        assert_eq!(saw, [true; 4]);
    }

    #[test]
    fn same_seed_same_vector() {
        let mut a = Rng::new(123);
        let mut b = Rng::new(123);
        for _ in 0..20 {
            assert_eq!(random_vector(4.0, &mut a), random_vector(4.0, &mut b));
        }
    }

    #[test]
    fn z_step_at_ceiling_is_forced_downward() {
        let mut rng = Rng::new(17);
        for _ in 0..50 {
            let step = generate_z_step(5.0, 20, 50.0, -10.0, 50.0, &mut rng);
            assert!(step < 0.0, "step was {}", step);
        }
    }

    #[test]
    fn z_step_at_floor_is_forced_upward() {
        let mut rng = Rng::new(17);
        for _ in 0..50 {
            let step = generate_z_step(5.0, 20, 50.0, -10.0, -10.0, &mut rng);
            assert!(step > 0.0, "step was {}", step);
        }
    }

    #[test]
    fn negative_depth_steps_upward() {
        let mut rng = Rng::new(29);
        for _ in 0..50 {
            let step = generate_z_step(5.0, 20, 50.0, -10.0, -4.0, &mut rng);
            assert!(step > 0.0);
        }
    }

    #[test]
    fn positive_depth_skews_downward() {
        let mut rng = Rng::new(31);
        let downs = (0..600)
            .filter(|_| generate_z_step(5.0, 20, 50.0, -10.0, 4.0, &mut rng) < 0.0)
            .count();
        // Two of three outcomes point down.
        assert!(downs > 300 && downs < 500, "downs: {}", downs);
    }

    #[test]
    fn magnitude_stays_within_variation_band() {
        let mut rng = Rng::new(37);
        for _ in 0..200 {
            let step = generate_z_step(5.0, 20, 50.0, -10.0, 4.0, &mut rng).abs();
            // Base 0.05, shaved by at most 19 percent.
            assert!(step <= 0.05 + 1e-12, "step was {}", step);
            assert!(step >= 0.05 * 0.81 - 1e-12, "step was {}", step);
        }
    }

    #[test]
    fn zero_depth_goes_both_ways() {
        let mut rng = Rng::new(41);
        let mut up = false;
        let mut down = false;
        for _ in 0..200 {
            let step = generate_z_step(5.0, 20, 50.0, -10.0, 0.0, &mut rng);
            if step > 0.0 {
                up = true;
            } else if step < 0.0 {
                down = true;
            }
        }
        assert!(up && down);
    }
}
