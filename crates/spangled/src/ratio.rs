//! Exact rational helpers on top of `num-rational`.
//!
//! Every flag dimension is a big-integer fraction. Floats only show up at the
//! very end, when the renderer prints star outlines.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// The exact number type used for every measurement.
pub type Rational = BigRational;

/// Build `numer / denom` in lowest terms. Panics if `denom` is zero.
pub fn ratio(numer: i64, denom: i64) -> Rational {
    Rational::new(BigInt::from(numer), BigInt::from(denom))
}

/// Lift a whole number into a rational.
pub fn whole(n: impl Into<BigInt>) -> Rational {
    Rational::from_integer(n.into())
}

/// Closest rational to `value` whose denominator does not exceed
/// `max_denominator`.
///
/// Walks the continued fraction of `value` until the next convergent would
/// overshoot the bound, then picks between the last convergent and the best
/// semiconvergent. Bounds below one are treated as one.
pub fn limit_denominator(value: &Rational, max_denominator: &BigInt) -> Rational {
    let one = BigInt::one();
    let max_denominator = if *max_denominator < one { &one } else { max_denominator };
    if value.denom() <= max_denominator {
        return value.clone();
    }

    let (mut p0, mut q0, mut p1, mut q1) = (BigInt::zero(), BigInt::one(), BigInt::one(), BigInt::zero());
    let mut n = value.numer().clone();
    let mut d = value.denom().clone();
    loop {
        let a = n.div_floor(&d);
        let q2 = &q0 + &a * &q1;
        if &q2 > max_denominator {
            break;
        }
        let p2 = &p0 + &a * &p1;
        p0 = std::mem::replace(&mut p1, p2);
        q0 = std::mem::replace(&mut q1, q2);
        let rest = &n - &a * &d;
        n = std::mem::replace(&mut d, rest);
    }

    let k = (max_denominator - &q0).div_floor(&q1);
    let semiconvergent = Rational::new(&p0 + &k * &p1, &q0 + &k * &q1);
    let convergent = Rational::new(p1, q1);
    if (&convergent - value).abs() <= (&semiconvergent - value).abs() {
        convergent
    } else {
        semiconvergent
    }
}

/// Square root of a non-negative rational.
///
/// Exact when numerator and denominator are both perfect squares. Otherwise
/// the result is truncated to `digits` decimal places, which is what makes
/// proportional star diameters carry very large denominators.
pub fn sqrt_approx(value: &Rational, digits: u32) -> Rational {
    debug_assert!(!value.is_negative(), "square root of a negative rational");
    let value = value.abs();
    let (numer, denom) = (value.numer(), value.denom());

    let (numer_root, denom_root) = (numer.sqrt(), denom.sqrt());
    if &(&numer_root * &numer_root) == numer && &(&denom_root * &denom_root) == denom {
        return Rational::new(numer_root, denom_root);
    }

    // sqrt(n / d) == sqrt(n * d) / d
    let scale = BigInt::from(10u32).pow(digits);
    let root = (numer * denom * &scale * &scale).sqrt();
    Rational::new(root, denom * scale)
}

/// Least common multiple of the denominators of `values`.
pub fn lcm_of_denominators<'a>(values: impl IntoIterator<Item = &'a Rational>) -> BigInt {
    values
        .into_iter()
        .fold(BigInt::one(), |acc, value| acc.lcm(value.denom()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: i64) -> BigInt {
        BigInt::from(n)
    }

    #[test]
    fn limit_denominator_keeps_small_fractions() {
        let value = ratio(3, 7);
        assert_eq!(limit_denominator(&value, &big(10)), value);
    }

    #[test]
    fn limit_denominator_approximates_pi() {
        let pi = ratio(3_141_592_653_589_793, 1_000_000_000_000_000);
        assert_eq!(limit_denominator(&pi, &big(10)), ratio(22, 7));
        assert_eq!(limit_denominator(&pi, &big(100)), ratio(311, 99));
        assert_eq!(limit_denominator(&pi, &big(1000)), ratio(355, 113));
    }

    #[test]
    fn limit_denominator_with_bound_one_rounds_to_integer() {
        assert_eq!(limit_denominator(&ratio(7, 5), &big(1)), whole(1));
        assert_eq!(limit_denominator(&ratio(9, 5), &big(1)), whole(2));
        assert_eq!(limit_denominator(&ratio(1, 1000), &big(1)), whole(0));
    }

    #[test]
    fn limit_denominator_handles_negative_values() {
        assert_eq!(limit_denominator(&ratio(-1_000_001, 3_000_000), &big(10)), ratio(-1, 3));
    }

    #[test]
    fn sqrt_of_perfect_squares_is_exact() {
        assert_eq!(sqrt_approx(&ratio(9, 16), 12), ratio(3, 4));
        assert_eq!(sqrt_approx(&whole(0), 12), whole(0));
    }

    #[test]
    fn sqrt_of_two_is_truncated() {
        let root = sqrt_approx(&whole(2), 6);
        assert_eq!(root, ratio(1_414_213, 1_000_000));
        assert!(&root * &root < whole(2));
    }

    #[test]
    fn lcm_collects_every_denominator() {
        let values = [ratio(1, 4), ratio(5, 6), whole(3)];
        assert_eq!(lcm_of_denominators(&values), big(12));
    }
}
