// SPDX-License-Identifier: AGPL-3.0-only

//! Wilson fermion action: the full lattice Dirac operator.
//!
//! Composes a diagonal mass term with the nearest-neighbour hopping term:
//!
//!   (D psi)(x) = (4 + m) psi(x) - (1/2) (H psi)(x)
//!
//! where H hops with spin structures `(1 - gamma_mu)` forward and
//! `(1 + gamma_mu)` backward. With identity gauge links and a uniform
//! input the hopping term sums to `8 psi`, so the operator reduces to
//! `m psi`; this cancellation pins the normalization convention and is
//! exercised by the reference tests.
//!
//! Boundary phases are given per dimension as angles `phi_d` and enter
//! as `exp(i phi_d)` on each periodic wraparound.
//!
//! The action owns its hopping matrix and borrows the gauge field; it is
//! immutable after construction and freely reusable across `apply_full`
//! calls. `apply_hermitian` returns `gamma_5 D psi`, the Hermitian
//! (indefinite) form used by solvers on the normal equations.
//!
//! # References
//!
//! - Wilson, PRD 10, 2445 (1974)
//! - Gattringer & Lang, "QCD on the Lattice" (2010), Ch. 5

use rayon::prelude::*;

use crate::complex::Complex64;
use crate::constants::{N_DIMS, N_SPINS};
use crate::error::LatticeError;
use crate::field::{LatticeColourMatrix, LatticeColourVector};
use crate::hopping::HoppingMatrix;
use crate::spin::{wilson_projectors, GAMMA_5};

/// Wilson Dirac operator over a borrowed gauge field.
#[derive(Debug)]
pub struct WilsonAction<'a> {
    mass: f64,
    hopping: HoppingMatrix<'a>,
}

impl<'a> WilsonAction<'a> {
    /// Construct the operator for a bare mass, gauge field, and
    /// per-dimension boundary phase angles.
    ///
    /// Fails with `DimensionMismatch` if the gauge field is not
    /// 4-dimensional (the gamma structures are fixed) or if
    /// `boundary_phases` does not hold one angle per dimension, and with
    /// `SizeMismatch` if the gauge field does not carry one link per
    /// dimension.
    pub fn new(
        mass: f64,
        gauge_field: &'a LatticeColourMatrix,
        boundary_phases: &[f64],
    ) -> Result<Self, LatticeError> {
        if gauge_field.num_dims() != N_DIMS {
            return Err(LatticeError::DimensionMismatch {
                expected: N_DIMS,
                found: gauge_field.num_dims(),
            });
        }

        let phases: Vec<Complex64> = boundary_phases
            .iter()
            .map(|&phi| Complex64::from_polar(phi))
            .collect();
        let hopping = HoppingMatrix::new(gauge_field, &phases, &wilson_projectors())?;

        Ok(Self { mass, hopping })
    }

    /// Bare mass parameter.
    #[must_use]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Hopping parameter kappa = 1 / (2 (m + 4)).
    #[must_use]
    pub fn kappa(&self) -> f64 {
        1.0 / (2.0 * (self.mass + 4.0))
    }

    /// Apply the full operator: eta = D psi.
    ///
    /// Linear in `psi`; returns a new field and never fails once
    /// construction succeeded.
    #[must_use]
    pub fn apply_full(&self, psi: &LatticeColourVector) -> LatticeColourVector {
        let mut eta = self.hopping.apply_full(psi);
        let diag = 4.0 + self.mass;
        eta.as_mut_slice()
            .par_iter_mut()
            .zip(psi.as_slice().par_iter())
            .for_each(|(e, p)| {
                *e = p.scale(diag) - e.scale(0.5);
            });
        eta
    }

    /// Apply the Hermitian form: eta = gamma_5 D psi.
    #[must_use]
    pub fn apply_hermitian(&self, psi: &LatticeColourVector) -> LatticeColourVector {
        self.multiply_gamma5(&self.apply_full(psi))
    }

    /// Multiply by gamma_5 (diagonal in this basis).
    #[must_use]
    pub fn multiply_gamma5(&self, psi: &LatticeColourVector) -> LatticeColourVector {
        let mut out = psi.clone();
        out.as_mut_slice()
            .par_chunks_mut(N_SPINS)
            .for_each(|site| {
                for (alpha, v) in site.iter_mut().enumerate() {
                    *v = v.scale_complex(GAMMA_5.m[alpha][alpha]);
                }
            });
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::{ColourMatrix, ColourVector};
    use crate::layout::Layout;

    fn identity_gauge(layout: &Layout) -> LatticeColourMatrix {
        LatticeColourMatrix::new(layout, ColourMatrix::IDENTITY, N_DIMS).unwrap()
    }

    fn random_gauge(layout: &Layout, seed: u64) -> LatticeColourMatrix {
        let mut gauge =
            LatticeColourMatrix::new(layout, ColourMatrix::IDENTITY, N_DIMS).unwrap();
        let mut state = seed;
        for link in gauge.as_mut_slice() {
            *link = ColourMatrix::random_sun(&mut state);
        }
        gauge
    }

    #[test]
    fn identity_gauge_uniform_input_reduces_to_mass_term() {
        let layout = Layout::lexicographic(&[4, 4, 4, 4]).unwrap();
        let gauge = identity_gauge(&layout);
        let action = WilsonAction::new(0.1, &gauge, &[0.0; 4]).unwrap();

        let psi = LatticeColourVector::new(&layout, ColourVector::ONES, N_SPINS).unwrap();
        let eta = action.apply_full(&psi);

        for site in 0..eta.volume() {
            for spin in 0..N_SPINS {
                for c in 0..3 {
                    let v = eta.site(site, spin).c[c];
                    assert!(
                        (v.re - 0.1).abs() < 1e-12 && v.im.abs() < 1e-12,
                        "hopping term should cancel the diagonal down to m: {v}"
                    );
                }
            }
        }
    }

    #[test]
    fn gamma5_twice_is_identity() {
        let layout = Layout::lexicographic(&[2, 2, 2, 2]).unwrap();
        let gauge = identity_gauge(&layout);
        let action = WilsonAction::new(0.2, &gauge, &[0.0; 4]).unwrap();

        let psi = LatticeColourVector::random(&layout, N_SPINS, 11).unwrap();
        let back = action.multiply_gamma5(&action.multiply_gamma5(&psi));

        let mut diff = back;
        diff.axpy(Complex64::new(-1.0, 0.0), &psi);
        assert!(diff.norm_sq() < 1e-24);
    }

    #[test]
    fn apply_hermitian_is_hermitian() {
        let layout = Layout::lexicographic(&[4, 2, 2, 2]).unwrap();
        let gauge = random_gauge(&layout, 42);
        let action = WilsonAction::new(0.3, &gauge, &[0.0; 4]).unwrap();

        let psi = LatticeColourVector::random(&layout, N_SPINS, 7).unwrap();
        let phi = LatticeColourVector::random(&layout, N_SPINS, 8).unwrap();

        let lhs = phi.dot(&action.apply_hermitian(&psi));
        let rhs = action.apply_hermitian(&phi).dot(&psi);
        assert!(
            (lhs.re - rhs.re).abs() < 1e-10 && (lhs.im - rhs.im).abs() < 1e-10,
            "<phi|g5 D psi> = <g5 D phi|psi> violated: {lhs} vs {rhs}"
        );
    }

    #[test]
    fn operator_is_linear() {
        let layout = Layout::lexicographic(&[4, 2, 2, 2]).unwrap();
        let gauge = random_gauge(&layout, 99);
        let action = WilsonAction::new(0.1, &gauge, &[0.0; 4]).unwrap();

        let psi1 = LatticeColourVector::random(&layout, N_SPINS, 1).unwrap();
        let psi2 = LatticeColourVector::random(&layout, N_SPINS, 2).unwrap();
        let a = Complex64::new(0.7, -0.3);
        let b = Complex64::new(-1.1, 0.2);

        let mut combined = psi1.zeros_like();
        combined.axpy(a, &psi1);
        combined.axpy(b, &psi2);

        let lhs = action.apply_full(&combined);
        let mut rhs = psi1.zeros_like();
        rhs.axpy(a, &action.apply_full(&psi1));
        rhs.axpy(b, &action.apply_full(&psi2));

        let mut diff = lhs;
        diff.axpy(Complex64::new(-1.0, 0.0), &rhs);
        assert!(diff.norm_sq() < 1e-20, "superposition violated: {}", diff.norm_sq());
    }

    #[test]
    fn rebuilding_the_action_leaves_old_outputs_alone() {
        let layout = Layout::lexicographic(&[2, 2, 2, 2]).unwrap();
        let gauge = identity_gauge(&layout);
        let psi = LatticeColourVector::new(&layout, ColourVector::ONES, N_SPINS).unwrap();

        let action = WilsonAction::new(0.1, &gauge, &[0.0; 4]).unwrap();
        let eta = action.apply_full(&psi);
        let snapshot: Vec<ColourVector> = eta.as_slice().to_vec();

        let action = WilsonAction::new(0.5, &gauge, &[0.0; 4]).unwrap();
        let _eta2 = action.apply_full(&psi);

        for (a, b) in eta.as_slice().iter().zip(snapshot.iter()) {
            assert_eq!(a.c[0].re.to_bits(), b.c[0].re.to_bits());
        }
    }

    #[test]
    fn non_4d_gauge_field_is_an_error() {
        let layout = Layout::lexicographic(&[4, 4, 4]).unwrap();
        let gauge = LatticeColourMatrix::new(&layout, ColourMatrix::IDENTITY, 3).unwrap();
        let err = WilsonAction::new(0.1, &gauge, &[0.0; 3]).unwrap_err();
        assert_eq!(
            err,
            LatticeError::DimensionMismatch {
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn wrong_phase_count_is_an_error() {
        let layout = Layout::lexicographic(&[2, 2, 2, 2]).unwrap();
        let gauge = identity_gauge(&layout);
        let err = WilsonAction::new(0.1, &gauge, &[0.0; 2]).unwrap_err();
        assert_eq!(
            err,
            LatticeError::DimensionMismatch {
                expected: 4,
                found: 2
            }
        );
    }
}
