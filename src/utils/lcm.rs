use crate::TimeStep;
use gcd::Gcd;

fn lcm(a: TimeStep, b: TimeStep) -> Option<TimeStep> {
    (a / a.gcd(b)).checked_mul(b)
}

/// LCM of all `numbers`, `None` on overflow. An empty slice gives 1.
pub fn multiple_lcm(numbers: &[TimeStep]) -> Option<TimeStep> {
    numbers.iter().try_fold(1, |acc, &x| lcm(acc, x))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_lcm() {
        assert_eq!(multiple_lcm(&[7, 11, 13]), Some(1001));
        assert_eq!(multiple_lcm(&[5, 6, 8]), Some(120));
        assert_eq!(multiple_lcm(&[4, 4, 2]), Some(4));
        assert_eq!(multiple_lcm(&[]), Some(1));
    }

    #[test]
    fn test_multiple_lcm_overflow() {
        assert_eq!(multiple_lcm(&[TimeStep::MAX, TimeStep::MAX - 1]), None);
    }
}
