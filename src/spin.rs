// SPDX-License-Identifier: AGPL-3.0-only

//! Spin-space matrices: Euclidean gamma matrices and hop projectors.
//!
//! A Wilson fermion carries four spin components per site. Each hop
//! direction projects the spinor with `(1 - gamma_mu)` (forward) or
//! `(1 + gamma_mu)` (backward) before the colour transport by the gauge
//! link.
//!
//! The basis is the Euclidean chiral representation:
//!
//!   `gamma_0` = [[0, I2], [I2, 0]]
//!   `gamma_k` = [[0, -i sigma_k], [i sigma_k, 0]]   (k = 1, 2, 3)
//!   `gamma_5` = `gamma_0 gamma_1 gamma_2 gamma_3` = diag(-1, -1, 1, 1)
//!
//! satisfying `{gamma_mu, gamma_nu} = 2 delta_mu_nu`, all Hermitian.
//!
//! # References
//!
//! - Gattringer & Lang, "QCD on the Lattice" (2010), Ch. 5 and App. A
//! - Montvay & Muenster, "Quantum Fields on a Lattice" (1994), Ch. 4

use std::ops::{Add, Mul, Sub};

use crate::complex::Complex64;
use crate::constants::{N_DIMS, N_SPINS};

/// 4x4 complex matrix acting on spin indices.
///
/// Row-major storage: `m[row][col]`.
#[derive(Clone, Copy, Debug)]
#[must_use]
pub struct SpinMatrix {
    /// Matrix elements m[row][col].
    pub m: [[Complex64; N_SPINS]; N_SPINS],
}

const O: Complex64 = Complex64::ZERO;
const P: Complex64 = Complex64::ONE;
const N: Complex64 = Complex64::new(-1.0, 0.0);
const J: Complex64 = Complex64::I;
const NJ: Complex64 = Complex64::new(0.0, -1.0);

/// The four Euclidean gamma matrices, indexed by lattice dimension.
/// Dimension 0 is the temporal direction.
pub const GAMMAS: [SpinMatrix; N_DIMS] = [
    // gamma_0
    SpinMatrix {
        m: [[O, O, P, O], [O, O, O, P], [P, O, O, O], [O, P, O, O]],
    },
    // gamma_1
    SpinMatrix {
        m: [[O, O, O, NJ], [O, O, NJ, O], [O, J, O, O], [J, O, O, O]],
    },
    // gamma_2
    SpinMatrix {
        m: [[O, O, O, N], [O, O, P, O], [O, P, O, O], [N, O, O, O]],
    },
    // gamma_3
    SpinMatrix {
        m: [[O, O, NJ, O], [O, O, O, J], [J, O, O, O], [O, NJ, O, O]],
    },
];

/// `gamma_5` = `gamma_0 gamma_1 gamma_2 gamma_3` = diag(-1, -1, 1, 1).
pub const GAMMA_5: SpinMatrix = SpinMatrix {
    m: [[N, O, O, O], [O, N, O, O], [O, O, P, O], [O, O, O, P]],
};

impl SpinMatrix {
    /// 4x4 identity matrix.
    pub const IDENTITY: Self = Self {
        m: [[P, O, O, O], [O, P, O, O], [O, O, P, O], [O, O, O, P]],
    };

    /// Zero matrix (all elements 0).
    pub const ZERO: Self = Self {
        m: [[O; N_SPINS]; N_SPINS],
    };

    /// Conjugate transpose (adjoint / dagger).
    pub fn adjoint(self) -> Self {
        let mut r = Self::ZERO;
        for i in 0..N_SPINS {
            for j in 0..N_SPINS {
                r.m[i][j] = self.m[j][i].conj();
            }
        }
        r
    }

    /// Scale by a real number.
    pub fn scale(self, s: f64) -> Self {
        let mut r = Self::ZERO;
        for i in 0..N_SPINS {
            for j in 0..N_SPINS {
                r.m[i][j] = self.m[i][j].scale(s);
            }
        }
        r
    }
}

impl Mul for SpinMatrix {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let mut r = Self::ZERO;
        for i in 0..N_SPINS {
            for j in 0..N_SPINS {
                let mut s = Complex64::ZERO;
                for k in 0..N_SPINS {
                    s += self.m[i][k] * rhs.m[k][j];
                }
                r.m[i][j] = s;
            }
        }
        r
    }
}

impl Add for SpinMatrix {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        let mut r = Self::ZERO;
        for i in 0..N_SPINS {
            for j in 0..N_SPINS {
                r.m[i][j] = self.m[i][j] + rhs.m[i][j];
            }
        }
        r
    }
}

impl Sub for SpinMatrix {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        let mut r = Self::ZERO;
        for i in 0..N_SPINS {
            for j in 0..N_SPINS {
                r.m[i][j] = self.m[i][j] - rhs.m[i][j];
            }
        }
        r
    }
}

/// Wilson hop projector pairs, one per dimension:
/// `[mu][0]` = `1 - gamma_mu` (forward hop),
/// `[mu][1]` = `1 + gamma_mu` (backward hop).
pub fn wilson_projectors() -> [[SpinMatrix; 2]; N_DIMS] {
    let mut pairs = [[SpinMatrix::ZERO; 2]; N_DIMS];
    for (mu, pair) in pairs.iter_mut().enumerate() {
        pair[0] = SpinMatrix::IDENTITY - GAMMAS[mu];
        pair[1] = SpinMatrix::IDENTITY + GAMMAS[mu];
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrices_close(a: &SpinMatrix, b: &SpinMatrix, tol: f64) -> bool {
        for i in 0..N_SPINS {
            for j in 0..N_SPINS {
                if (a.m[i][j] - b.m[i][j]).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn gammas_anticommute() {
        for mu in 0..N_DIMS {
            for nu in 0..N_DIMS {
                let anti = GAMMAS[mu] * GAMMAS[nu] + GAMMAS[nu] * GAMMAS[mu];
                let expected = if mu == nu {
                    SpinMatrix::IDENTITY.scale(2.0)
                } else {
                    SpinMatrix::ZERO
                };
                assert!(
                    matrices_close(&anti, &expected, 1e-14),
                    "{{gamma_{mu}, gamma_{nu}}} != 2 delta"
                );
            }
        }
    }

    #[test]
    fn gammas_are_hermitian() {
        for (mu, gamma) in GAMMAS.iter().enumerate() {
            assert!(
                matrices_close(gamma, &gamma.adjoint(), 1e-14),
                "gamma_{mu} not Hermitian"
            );
        }
    }

    #[test]
    fn gamma5_is_the_product() {
        let product = GAMMAS[0] * GAMMAS[1] * GAMMAS[2] * GAMMAS[3];
        assert!(matrices_close(&product, &GAMMA_5, 1e-14));
    }

    #[test]
    fn gamma5_squares_to_identity() {
        let sq = GAMMA_5 * GAMMA_5;
        assert!(matrices_close(&sq, &SpinMatrix::IDENTITY, 1e-14));
    }

    #[test]
    fn gamma5_anticommutes_with_gammas() {
        for (mu, gamma) in GAMMAS.iter().enumerate() {
            let anti = GAMMA_5 * *gamma + *gamma * GAMMA_5;
            assert!(
                matrices_close(&anti, &SpinMatrix::ZERO, 1e-14),
                "gamma_5 does not anticommute with gamma_{mu}"
            );
        }
    }

    #[test]
    fn projector_pair_sums_to_two() {
        for pair in wilson_projectors() {
            let sum = pair[0] + pair[1];
            assert!(matrices_close(&sum, &SpinMatrix::IDENTITY.scale(2.0), 1e-14));
        }
    }

    #[test]
    fn halved_projectors_are_idempotent() {
        // (1 +- gamma)^2 = 2 (1 +- gamma) since gamma^2 = 1
        for pair in wilson_projectors() {
            for p in pair {
                let sq = p * p;
                assert!(matrices_close(&sq, &p.scale(2.0), 1e-13));
            }
        }
    }
}
