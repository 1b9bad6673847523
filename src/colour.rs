// SPDX-License-Identifier: AGPL-3.0-only

//! Colour-space matrices and vectors for SU(3) gauge fields.
//!
//! A gauge link `U_mu(x)` is a 3x3 unitary matrix with determinant 1,
//! representing the parallel transporter along direction mu from site x.
//! A fermion carries one 3-component colour vector per spin index.
//!
//! Storage: row-major, 9 `Complex64` values per matrix (18 f64).
//!
//! # References
//!
//! - Gattringer & Lang, "QCD on the Lattice" (2010), Ch. 2
//! - Creutz, "Quarks, Gluons and Lattices" (1983), Ch. 8

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::complex::Complex64;
use crate::constants::{lcg_gaussian, DIVISION_GUARD, N_COLOURS};

/// 3x3 complex matrix used for gauge links.
///
/// Row-major storage: `m[row][col]`.
#[derive(Clone, Copy, Debug)]
#[must_use]
pub struct ColourMatrix {
    /// Matrix elements m[row][col].
    pub m: [[Complex64; N_COLOURS]; N_COLOURS],
}

/// 3-component complex colour vector.
#[derive(Clone, Copy, Debug)]
#[must_use]
pub struct ColourVector {
    /// Vector components.
    pub c: [Complex64; N_COLOURS],
}

impl Mul for ColourMatrix {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let mut r = Self::ZERO;
        for i in 0..N_COLOURS {
            for j in 0..N_COLOURS {
                let mut s = Complex64::ZERO;
                for k in 0..N_COLOURS {
                    s += self.m[i][k] * rhs.m[k][j];
                }
                r.m[i][j] = s;
            }
        }
        r
    }
}

impl Mul<ColourVector> for ColourMatrix {
    type Output = ColourVector;
    fn mul(self, rhs: ColourVector) -> ColourVector {
        let mut r = ColourVector::ZERO;
        for i in 0..N_COLOURS {
            let mut s = Complex64::ZERO;
            for k in 0..N_COLOURS {
                s += self.m[i][k] * rhs.c[k];
            }
            r.c[i] = s;
        }
        r
    }
}

impl Add for ColourMatrix {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        let mut r = Self::ZERO;
        for i in 0..N_COLOURS {
            for j in 0..N_COLOURS {
                r.m[i][j] = self.m[i][j] + rhs.m[i][j];
            }
        }
        r
    }
}

impl Sub for ColourMatrix {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        let mut r = Self::ZERO;
        for i in 0..N_COLOURS {
            for j in 0..N_COLOURS {
                r.m[i][j] = self.m[i][j] - rhs.m[i][j];
            }
        }
        r
    }
}

impl ColourMatrix {
    /// 3x3 identity matrix.
    pub const IDENTITY: Self = Self {
        m: [
            [Complex64::ONE, Complex64::ZERO, Complex64::ZERO],
            [Complex64::ZERO, Complex64::ONE, Complex64::ZERO],
            [Complex64::ZERO, Complex64::ZERO, Complex64::ONE],
        ],
    };

    /// Zero matrix (all elements 0).
    pub const ZERO: Self = Self {
        m: [[Complex64::ZERO; N_COLOURS]; N_COLOURS],
    };

    /// Conjugate transpose (adjoint / dagger).
    pub fn adjoint(self) -> Self {
        let mut r = Self::ZERO;
        for i in 0..N_COLOURS {
            for j in 0..N_COLOURS {
                r.m[i][j] = self.m[j][i].conj();
            }
        }
        r
    }

    /// Trace: Tr(U) = sum_i `U_ii`
    pub fn trace(self) -> Complex64 {
        self.m[0][0] + self.m[1][1] + self.m[2][2]
    }

    /// Determinant of a 3x3 complex matrix.
    pub fn det(self) -> Complex64 {
        let m = &self.m;
        let a = m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1]);
        let b = m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0]);
        let c = m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0]);
        a - b + c
    }

    /// Scale by a real number.
    pub fn scale(self, s: f64) -> Self {
        let mut r = Self::ZERO;
        for i in 0..N_COLOURS {
            for j in 0..N_COLOURS {
                r.m[i][j] = self.m[i][j].scale(s);
            }
        }
        r
    }

    /// Scale by a complex number.
    pub fn scale_complex(self, s: Complex64) -> Self {
        let mut r = Self::ZERO;
        for i in 0..N_COLOURS {
            for j in 0..N_COLOURS {
                r.m[i][j] = self.m[i][j] * s;
            }
        }
        r
    }

    /// Frobenius norm squared: sum |`m_ij`|^2
    #[must_use]
    pub fn norm_sq(self) -> f64 {
        let mut s = 0.0;
        for i in 0..N_COLOURS {
            for j in 0..N_COLOURS {
                s += self.m[i][j].abs_sq();
            }
        }
        s
    }

    /// Project onto SU(3) via modified Gram-Schmidt reunitarization.
    ///
    /// Orthonormalizes rows 0 and 1, then fixes row 2 to the conjugate
    /// cross product so that det = 1.
    pub fn reunitarize(self) -> Self {
        let mut u = self;

        let n0 = row_norm(&u, 0);
        if n0 > DIVISION_GUARD {
            let inv = 1.0 / n0;
            for j in 0..N_COLOURS {
                u.m[0][j] = u.m[0][j].scale(inv);
            }
        }

        let dot01 = row_dot(&u, 0, 1);
        for j in 0..N_COLOURS {
            u.m[1][j] -= u.m[0][j] * dot01;
        }
        let n1 = row_norm(&u, 1);
        if n1 > DIVISION_GUARD {
            let inv = 1.0 / n1;
            for j in 0..N_COLOURS {
                u.m[1][j] = u.m[1][j].scale(inv);
            }
        }

        u.m[2][0] = (u.m[0][1] * u.m[1][2] - u.m[0][2] * u.m[1][1]).conj();
        u.m[2][1] = (u.m[0][2] * u.m[1][0] - u.m[0][0] * u.m[1][2]).conj();
        u.m[2][2] = (u.m[0][0] * u.m[1][1] - u.m[0][1] * u.m[1][0]).conj();

        u
    }

    /// Generate a random SU(3) matrix from LCG state.
    ///
    /// Fills a 3x3 matrix with complex Gaussian entries and reunitarizes.
    /// Deterministic for a given seed; used by gauge-configuration setup
    /// and the reference operator tests.
    pub fn random_sun(seed: &mut u64) -> Self {
        let mut u = Self::ZERO;
        for i in 0..N_COLOURS {
            for j in 0..N_COLOURS {
                let re = lcg_gaussian(seed);
                let im = lcg_gaussian(seed);
                u.m[i][j] = Complex64::new(re, im);
            }
        }
        u.reunitarize()
    }
}

impl ColourVector {
    /// Zero vector.
    pub const ZERO: Self = Self {
        c: [Complex64::ZERO; N_COLOURS],
    };

    /// All-ones vector, the fill value of the reference fermion fields.
    pub const ONES: Self = Self {
        c: [Complex64::ONE; N_COLOURS],
    };

    /// Scale by a real number.
    pub fn scale(self, s: f64) -> Self {
        Self {
            c: [self.c[0].scale(s), self.c[1].scale(s), self.c[2].scale(s)],
        }
    }

    /// Scale by a complex number.
    pub fn scale_complex(self, s: Complex64) -> Self {
        Self {
            c: [self.c[0] * s, self.c[1] * s, self.c[2] * s],
        }
    }

    /// Conjugating inner product: <self | other> = sum_c self_c* other_c
    pub fn dot(self, other: Self) -> Complex64 {
        let mut s = Complex64::ZERO;
        for c in 0..N_COLOURS {
            s += self.c[c].conj() * other.c[c];
        }
        s
    }

    /// Squared norm.
    #[must_use]
    pub fn norm_sq(self) -> f64 {
        self.dot(self).re
    }
}

impl Add for ColourVector {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            c: [
                self.c[0] + rhs.c[0],
                self.c[1] + rhs.c[1],
                self.c[2] + rhs.c[2],
            ],
        }
    }
}

impl AddAssign for ColourVector {
    fn add_assign(&mut self, rhs: Self) {
        for c in 0..N_COLOURS {
            self.c[c] += rhs.c[c];
        }
    }
}

impl Sub for ColourVector {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            c: [
                self.c[0] - rhs.c[0],
                self.c[1] - rhs.c[1],
                self.c[2] - rhs.c[2],
            ],
        }
    }
}

impl SubAssign for ColourVector {
    fn sub_assign(&mut self, rhs: Self) {
        for c in 0..N_COLOURS {
            self.c[c] -= rhs.c[c];
        }
    }
}

impl Neg for ColourVector {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            c: [-self.c[0], -self.c[1], -self.c[2]],
        }
    }
}

fn row_norm(u: &ColourMatrix, row: usize) -> f64 {
    let mut s = 0.0;
    for j in 0..N_COLOURS {
        s += u.m[row][j].abs_sq();
    }
    s.sqrt()
}

fn row_dot(u: &ColourMatrix, r1: usize, r2: usize) -> Complex64 {
    let mut s = Complex64::ZERO;
    for j in 0..N_COLOURS {
        s += u.m[r1][j].conj() * u.m[r2][j];
    }
    s
}
