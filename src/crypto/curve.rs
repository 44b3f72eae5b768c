//! Elliptic curve point operations

use num_bigint::BigUint;
use num_traits::Zero;

use super::{mod_inverse, sub_mod};
use crate::error::{Error, Result};
use crate::types::{P256, SCALAR_BITS};

/// Point on a short Weierstrass curve, or the point at infinity
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Point {
    Infinity,
    Affine { x: BigUint, y: BigUint },
}

impl Point {
    /// Create an affine point without checking curve membership
    pub fn new(x: BigUint, y: BigUint) -> Self {
        Point::Affine { x, y }
    }

    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    /// x coordinate, `None` for the point at infinity
    pub fn x(&self) -> Option<&BigUint> {
        match self {
            Point::Infinity => None,
            Point::Affine { x, .. } => Some(x),
        }
    }

    /// y coordinate, `None` for the point at infinity
    pub fn y(&self) -> Option<&BigUint> {
        match self {
            Point::Infinity => None,
            Point::Affine { y, .. } => Some(y),
        }
    }
}

/// Curve `y^2 = x^3 + a*x + b (mod p)` with a base point of order `n`.
///
/// Built once and shared by reference with every EC operation.
#[derive(Clone, Debug)]
pub struct Curve {
    p: BigUint,
    a: BigUint,
    b: BigUint,
    g: Point,
    n: BigUint,
}

impl Curve {
    /// Create a curve, rejecting a base point that does not satisfy the curve equation
    pub fn new(
        p: BigUint,
        a: BigUint,
        b: BigUint,
        gx: BigUint,
        gy: BigUint,
        n: BigUint,
    ) -> Result<Self> {
        if gx >= p || gy >= p {
            return Err(Error::PointNotOnCurve);
        }

        let curve = Self {
            a: a % &p,
            b: b % &p,
            g: Point::new(gx, gy),
            n,
            p,
        };

        if !curve.is_on_curve(&curve.g) {
            return Err(Error::PointNotOnCurve);
        }
        Ok(curve)
    }

    /// NIST P-256
    pub fn p256() -> Result<Self> {
        Self::new(P256::p(), P256::a(), P256::b(), P256::gx(), P256::gy(), P256::n())
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn a(&self) -> &BigUint {
        &self.a
    }

    pub fn b(&self) -> &BigUint {
        &self.b
    }

    /// Order of the base point
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    pub fn generator(&self) -> &Point {
        &self.g
    }

    /// Create a point, checking coordinate range and curve membership
    pub fn point(&self, x: BigUint, y: BigUint) -> Result<Point> {
        if x >= self.p || y >= self.p {
            return Err(Error::PointNotOnCurve);
        }
        let point = Point::new(x, y);
        if !self.is_on_curve(&point) {
            return Err(Error::PointNotOnCurve);
        }
        Ok(point)
    }

    /// Check the Weierstrass equation; the point at infinity is always on the curve
    pub fn is_on_curve(&self, point: &Point) -> bool {
        let (x, y) = match point {
            Point::Infinity => return true,
            Point::Affine { x, y } => (x, y),
        };

        let p = &self.p;
        let lhs = (y * y) % p;
        let rhs = (x * x * x + &self.a * x + &self.b) % p;
        lhs == rhs
    }

    /// Point addition on elliptic curve
    pub fn add(&self, lhs: &Point, rhs: &Point) -> Result<Point> {
        let (x1, y1) = match lhs {
            Point::Infinity => return Ok(rhs.clone()),
            Point::Affine { x, y } => (x, y),
        };
        let (x2, y2) = match rhs {
            Point::Infinity => return Ok(lhs.clone()),
            Point::Affine { x, y } => (x, y),
        };

        let p = &self.p;

        let s = if x1 == x2 {
            // Inverse points, or a vertical tangent when y == 0
            if y1 != y2 || y1.is_zero() {
                return Ok(Point::Infinity);
            }
            // Point doubling: s = (3*x^2 + a) / (2*y) mod p
            let numerator = (BigUint::from(3u32) * x1 * x1 + &self.a) % p;
            let denominator = (BigUint::from(2u32) * y1) % p;
            numerator * mod_inverse(&denominator, p)? % p
        } else {
            // Point addition: s = (y2 - y1) / (x2 - x1) mod p
            let numerator = sub_mod(y2, y1, p);
            let denominator = sub_mod(x2, x1, p);
            numerator * mod_inverse(&denominator, p)? % p
        };

        // x3 = s^2 - x1 - x2 mod p
        let x3 = sub_mod(&(&s * &s), &(x1 + x2), p);

        // y3 = s * (x1 - x3) - y1 mod p
        let y3 = sub_mod(&(&s * sub_mod(x1, &x3, p)), y1, p);

        Ok(Point::new(x3, y3))
    }

    /// Scalar multiplication using double-and-add algorithm.
    ///
    /// Always scans `SCALAR_BITS` bits of `k`, least significant first. Wider
    /// scalars are reduced modulo the group order before the scan.
    pub fn scalar_mult(&self, k: &BigUint, point: &Point) -> Result<Point> {
        let k = if k.bits() > SCALAR_BITS {
            k % &self.n
        } else {
            k.clone()
        };

        let mut result = Point::Infinity;
        let mut addend = point.clone();

        for i in 0..SCALAR_BITS {
            if k.bit(i) {
                result = self.add(&result, &addend)?;
            }
            addend = self.add(&addend, &addend)?;
        }

        Ok(result)
    }
}

/// y^2 = x^3 + 2x + 2 over F_17, generator (5, 1) of order 19
#[cfg(test)]
pub(crate) fn toy_curve() -> Curve {
    Curve::new(
        BigUint::from(17u32),
        BigUint::from(2u32),
        BigUint::from(2u32),
        BigUint::from(5u32),
        BigUint::from(1u32),
        BigUint::from(19u32),
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: u32, y: u32) -> Point {
        Point::new(BigUint::from(x), BigUint::from(y))
    }

    fn hex(s: &str) -> BigUint {
        BigUint::parse_bytes(s.as_bytes(), 16).unwrap()
    }

    #[test]
    fn test_generator_on_curve() {
        let curve = Curve::p256().unwrap();
        assert!(curve.is_on_curve(curve.generator()));
        assert!(curve.is_on_curve(&Point::Infinity));
        assert!(toy_curve().is_on_curve(&pt(5, 1)));
    }

    #[test]
    fn test_rejects_bad_generator() {
        let err = Curve::new(
            BigUint::from(17u32),
            BigUint::from(2u32),
            BigUint::from(2u32),
            BigUint::from(5u32),
            BigUint::from(2u32),
            BigUint::from(19u32),
        );
        assert!(matches!(err, Err(Error::PointNotOnCurve)));

        let curve = toy_curve();
        assert!(matches!(curve.point(BigUint::from(5u32), BigUint::from(2u32)), Err(Error::PointNotOnCurve)));
        assert!(matches!(curve.point(BigUint::from(22u32), BigUint::from(1u32)), Err(Error::PointNotOnCurve)));
        assert_eq!(curve.point(BigUint::from(6u32), BigUint::from(3u32)).unwrap(), pt(6, 3));
    }

    #[test]
    fn test_identity_is_neutral() {
        let curve = toy_curve();
        let g = curve.generator().clone();
        assert_eq!(curve.add(&g, &Point::Infinity).unwrap(), g);
        assert_eq!(curve.add(&Point::Infinity, &g).unwrap(), g);
        assert_eq!(curve.add(&Point::Infinity, &Point::Infinity).unwrap(), Point::Infinity);
    }

    #[test]
    fn test_inverse_points_sum_to_identity() {
        let curve = toy_curve();
        // 18G = -G
        assert_eq!(curve.add(&pt(5, 1), &pt(5, 16)).unwrap(), Point::Infinity);
    }

    #[test]
    fn test_toy_curve_multiples() {
        let curve = toy_curve();
        let g = curve.generator();
        let expected = [
            (1, pt(5, 1)),
            (2, pt(6, 3)),
            (3, pt(10, 6)),
            (7, pt(0, 6)),
            (10, pt(7, 11)),
            (18, pt(5, 16)),
            (19, Point::Infinity),
            (20, pt(5, 1)),
        ];
        for (k, point) in expected {
            assert_eq!(curve.scalar_mult(&BigUint::from(k as u32), g).unwrap(), point, "k = {}", k);
        }
    }

    #[test]
    fn test_doubling_matches_scalar_two() {
        let curve = toy_curve();
        let mut point = curve.generator().clone();
        for _ in 0..19 {
            let doubled = curve.add(&point, &point).unwrap();
            assert_eq!(doubled, curve.scalar_mult(&BigUint::from(2u32), &point).unwrap());
            assert!(curve.is_on_curve(&doubled));
            point = curve.add(&point, curve.generator()).unwrap();
        }
    }

    #[test]
    fn test_zero_scalar_is_identity() {
        let curve = Curve::p256().unwrap();
        assert_eq!(curve.scalar_mult(&BigUint::zero(), curve.generator()).unwrap(), Point::Infinity);
    }

    #[test]
    fn test_p256_small_multiples() {
        let curve = Curve::p256().unwrap();
        let g = curve.generator();

        let two_g = curve.scalar_mult(&BigUint::from(2u32), g).unwrap();
        assert_eq!(
            two_g,
            Point::new(
                hex("7cf27b188d034f7e8a52380304b51ac3c08969e277f21b35a60b48fc47669978"),
                hex("07775510db8ed040293d9ac69f7430dbba7dade63ce982299e04b79d227873d1"),
            )
        );
        assert_eq!(two_g, curve.add(g, g).unwrap());

        let three_g = curve.scalar_mult(&BigUint::from(3u32), g).unwrap();
        assert_eq!(
            three_g,
            Point::new(
                hex("5ecbe4d1a6330a44c8f7ef951d4bf165e6c6b721efada985fb41661bc6e7fd6c"),
                hex("8734640c4998ff7e374b06ce1a64a2ecd82ab036384fb83d9a79b127a27d5032"),
            )
        );
        assert_eq!(three_g, curve.add(&two_g, g).unwrap());
    }

    #[test]
    fn test_p256_order() {
        let curve = Curve::p256().unwrap();
        let n = curve.n().clone();
        assert_eq!(curve.scalar_mult(&n, curve.generator()).unwrap(), Point::Infinity);

        let n_minus_one = n.clone() - 1u32;
        let neg_g = curve.scalar_mult(&n_minus_one, curve.generator()).unwrap();
        assert!(curve.is_on_curve(&neg_g));
        assert_eq!(neg_g.x(), curve.generator().x());
    }

    #[test]
    fn test_wide_scalar_is_reduced() {
        let curve = Curve::p256().unwrap();
        let g = curve.generator();
        let wide = (BigUint::from(1u32) << 300u32) * curve.n() + 5u32;
        assert_eq!(
            curve.scalar_mult(&wide, g).unwrap(),
            curve.scalar_mult(&BigUint::from(5u32), g).unwrap()
        );
    }

    #[test]
    fn test_multiples_stay_on_curve() {
        let curve = Curve::p256().unwrap();
        for k in [1u64, 2, 3, 12345, 0xdead_beef, u64::MAX] {
            let point = curve.scalar_mult(&BigUint::from(k), curve.generator()).unwrap();
            assert!(curve.is_on_curve(&point), "k = {}", k);
        }
    }
}
