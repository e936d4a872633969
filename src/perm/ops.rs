//! Binary operations on permutations.
//!
//! The direct sum, skew sum and composition are also available through the
//! `+`, `-` and `*` operators, mirroring the usual notation of the pattern
//! literature.

use std::ops::{Add, Mul, Sub};

use super::{Entries, Perm, MAX_LEN};

impl Perm {
    /// Returns the direct sum, placing `other` after and entirely above
    /// `self`.
    ///
    /// ```
    /// use patova::Perm;
    ///
    /// let p = Perm::from_entries(&[2, 0, 1]).unwrap();
    /// let q = Perm::identity(4);
    /// assert_eq!(p.direct_sum(&q).to_string(), "3 1 2 4 5 6 7");
    /// ```
    pub fn direct_sum(&self, other: &Perm) -> Perm {
        assert!(self.len() + other.len() <= MAX_LEN, "sum too long");
        let shift = self.len() as u16;
        let entries: Entries = self
            .entries()
            .iter()
            .copied()
            .chain(other.entries().iter().map(|&v| v + shift))
            .collect();
        Perm::from_raw(entries)
    }

    /// Returns the skew sum, placing `other` after and entirely below
    /// `self`.
    ///
    /// ```
    /// use patova::Perm;
    ///
    /// let p = Perm::from_entries(&[2, 0, 1]).unwrap();
    /// let q = Perm::identity(4);
    /// assert_eq!(p.skew_sum(&q).to_string(), "7 5 6 1 2 3 4");
    /// ```
    pub fn skew_sum(&self, other: &Perm) -> Perm {
        assert!(self.len() + other.len() <= MAX_LEN, "sum too long");
        let shift = other.len() as u16;
        let entries: Entries = self
            .entries()
            .iter()
            .map(|&v| v + shift)
            .chain(other.entries().iter().copied())
            .collect();
        Perm::from_raw(entries)
    }

    /// Returns the functional composition applying `other` first, then
    /// `self`.
    ///
    /// Panics when the lengths differ.
    pub fn compose(&self, other: &Perm) -> Perm {
        assert_eq!(
            self.len(),
            other.len(),
            "cannot compose permutations of different lengths"
        );
        let entries: Entries = other
            .entries()
            .iter()
            .map(|&v| self.entries()[v as usize])
            .collect();
        Perm::from_raw(entries)
    }

    /// Returns the permutation raised to an integer power, with negative
    /// powers going through the inverse.
    pub fn pow(&self, exp: i32) -> Perm {
        let mut base = if exp < 0 { self.inverse() } else { self.clone() };
        let mut remaining = exp.unsigned_abs();
        let mut result = Perm::identity(self.len());
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.compose(&base);
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.compose(&base);
            }
        }
        result
    }
}

impl Add for &Perm {
    type Output = Perm;

    fn add(self, rhs: &Perm) -> Perm {
        self.direct_sum(rhs)
    }
}

impl Add for Perm {
    type Output = Perm;

    fn add(self, rhs: Perm) -> Perm {
        self.direct_sum(&rhs)
    }
}

impl Sub for &Perm {
    type Output = Perm;

    fn sub(self, rhs: &Perm) -> Perm {
        self.skew_sum(rhs)
    }
}

impl Sub for Perm {
    type Output = Perm;

    fn sub(self, rhs: Perm) -> Perm {
        self.skew_sum(&rhs)
    }
}

impl Mul for &Perm {
    type Output = Perm;

    fn mul(self, rhs: &Perm) -> Perm {
        self.compose(rhs)
    }
}

impl Mul for Perm {
    type Output = Perm;

    fn mul(self, rhs: Perm) -> Perm {
        self.compose(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(entries: &[u16]) -> Perm {
        Perm::from_entries(entries).unwrap()
    }

    #[test]
    fn sums_concatenate() {
        let sum = &(&p(&[0]) + &p(&[2, 0, 1])) + &p(&[1, 0]);
        assert_eq!(sum, p(&[0, 3, 1, 2, 5, 4]));

        let ident = Perm::identity(10);
        assert_eq!(&ident + &ident, Perm::identity(20));

        let desc = Perm::decreasing(10);
        assert_eq!(&desc - &desc, Perm::decreasing(20));

        assert_eq!(&Perm::default() + &p(&[1, 0]), p(&[1, 0]));
    }

    #[test]
    fn composition_applies_right_first() {
        let a = p(&[1, 2, 0]);
        let b = p(&[0, 2, 1]);
        // (a * b)(i) = a(b(i))
        assert_eq!(&a * &b, p(&[1, 0, 2]));
        assert_eq!(&a * &a.inverse(), Perm::identity(3));
    }

    #[test]
    fn powers() {
        let q = p(&[1, 2, 0]);
        assert_eq!(q.pow(0), Perm::identity(3));
        assert_eq!(q.pow(3), Perm::identity(3));
        assert_eq!(q.pow(-1), q.inverse());
        assert_eq!(q.pow(4), q);
        assert_eq!(q.pow(-2).compose(&q.pow(2)), Perm::identity(3));
    }
}
