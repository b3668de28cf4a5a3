//! Angular scheduler (C1, §4.1).
//!
//! Picks the rotational offset `sigma` under which a cluster's starting
//! approximations are placed, so that successive clusters' angular grids
//! don't align and leave gaps uncovered.

use rand::Rng;

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Holds `last_sigma` across calls for the duration of one solve (§3:
/// "process-wide for the duration of a solve").
#[derive(Debug, Clone, Copy, Default)]
pub struct Scheduler {
    last_sigma: f64,
}

impl Scheduler {
    pub fn new() -> Self {
        Scheduler { last_sigma: 0.0 }
    }

    pub fn last_sigma(&self) -> f64 {
        self.last_sigma
    }

    /// Resets `last_sigma` to 0, as happens "when the first cluster of a
    /// phase is placed" (§3).
    pub fn reset(&mut self) {
        self.last_sigma = 0.0;
    }

    /// Returns the angle to place cluster `i_cluster` (size `n`) at, given
    /// the previous cluster's size `m`. Updates `last_sigma` unless
    /// `random_seed` is set.
    pub fn next_sigma(&mut self, random_seed: bool, i_cluster: usize, n: usize, m: usize) -> f64 {
        if random_seed {
            return rand::thread_rng().gen_range(0.0..std::f64::consts::TAU);
        }
        if i_cluster == 0 {
            self.last_sigma = 0.0;
            return 0.0;
        }
        let g = gcd(m, n) as f64;
        let delta = std::f64::consts::PI * (m as f64) * g / (4.0 * n as f64);
        self.last_sigma += delta;
        self.last_sigma
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn test_first_cluster_is_zero() {
        let mut sched = Scheduler::new();
        assert_eq!(sched.next_sigma(false, 0, 5, 0), 0.0);
        assert_eq!(sched.last_sigma(), 0.0);
    }

    #[test]
    fn test_gcd_progression() {
        let mut sched = Scheduler::new();
        sched.next_sigma(false, 0, 3, 0);
        let s1 = sched.next_sigma(false, 1, 5, 3);
        let expected1 = std::f64::consts::PI * 3.0 * (gcd(3, 5) as f64) / (4.0 * 5.0);
        assert!(approx_eq!(f64, s1, expected1, epsilon = 1e-14));

        let s2 = sched.next_sigma(false, 2, 4, 5);
        let expected2 = expected1 + std::f64::consts::PI * 5.0 * (gcd(5, 4) as f64) / (4.0 * 4.0);
        assert!(approx_eq!(f64, s2, expected2, epsilon = 1e-14));
    }

    #[test]
    fn test_random_seed_in_range() {
        let mut sched = Scheduler::new();
        for _ in 0..100 {
            let s = sched.next_sigma(true, 3, 7, 2);
            assert!((0.0..std::f64::consts::TAU).contains(&s));
        }
    }

    #[test]
    fn test_gcd_helper() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(7, 5), 1);
        assert_eq!(gcd(0, 5), 5);
    }
}
