// SPDX-License-Identifier: AGPL-3.0-only

//! Conjugate Gradient inverter for the Wilson operator.
//!
//! Propagator calculations need `x = D^-1 b`. D itself is neither
//! Hermitian nor definite, so CG runs on the normal equations:
//!
//!   D+ D x = D+ b,   with   D+ D = (gamma_5 D)^2
//!
//! using the Hermitian form exposed by the action. Standard CG with a
//! relative residual convergence criterion `||r||^2 / ||b||^2 < tol^2`.
//!
//! The operator is the caller's: CG never mutates it and only invokes
//! `apply_hermitian`, so each iteration costs two hopping applications.
//!
//! # References
//!
//! - Hestenes & Stiefel (1952), original CG
//! - Gattringer & Lang, "QCD on the Lattice" (2010), Ch. 6.2

use serde::{Deserialize, Serialize};

use crate::complex::Complex64;
use crate::constants::DIVISION_GUARD;
use crate::field::LatticeColourVector;
use crate::wilson::WilsonAction;

/// CG solver diagnostics.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CgResult {
    pub converged: bool,
    pub iterations: usize,
    pub final_residual: f64,
    pub initial_residual: f64,
}

/// The normal operator D+ D = (gamma_5 D)^2.
fn apply_normal(action: &WilsonAction, psi: &LatticeColourVector) -> LatticeColourVector {
    action.apply_hermitian(&action.apply_hermitian(psi))
}

/// Solve D+ D x = b using Conjugate Gradient.
///
/// `x` holds the initial guess and is updated in place with the
/// solution. `tol` is the relative residual tolerance.
pub fn cg_solve(
    action: &WilsonAction,
    x: &mut LatticeColourVector,
    b: &LatticeColourVector,
    tol: f64,
    max_iter: usize,
) -> CgResult {
    let b_norm_sq = b.norm_sq();
    if b_norm_sq < DIVISION_GUARD {
        return CgResult {
            converged: true,
            iterations: 0,
            final_residual: 0.0,
            initial_residual: 0.0,
        };
    }

    // r = b - A x
    let ax = apply_normal(action, x);
    let mut r = b.clone();
    r.axpy(Complex64::new(-1.0, 0.0), &ax);

    let mut r_norm_sq = r.norm_sq();
    let initial_residual = (r_norm_sq / b_norm_sq).sqrt();
    let tol_sq = tol * tol * b_norm_sq;

    if r_norm_sq < tol_sq {
        return CgResult {
            converged: true,
            iterations: 0,
            final_residual: initial_residual,
            initial_residual,
        };
    }

    let mut p = r.clone();
    let mut iterations = 0;

    for iter in 0..max_iter {
        iterations = iter + 1;

        let ap = apply_normal(action, &p);

        // alpha = <r|r> / <p|Ap>
        let p_ap = p.dot(&ap).re;
        if p_ap.abs() < DIVISION_GUARD {
            break;
        }
        let alpha = r_norm_sq / p_ap;

        x.axpy(Complex64::new(alpha, 0.0), &p);
        r.axpy(Complex64::new(-alpha, 0.0), &ap);

        let r_norm_sq_new = r.norm_sq();
        if r_norm_sq_new < tol_sq {
            r_norm_sq = r_norm_sq_new;
            break;
        }

        // beta = <r_new|r_new> / <r_old|r_old>
        let beta = r_norm_sq_new / r_norm_sq;
        r_norm_sq = r_norm_sq_new;

        // p = r + beta * p
        for (pi, ri) in p.as_mut_slice().iter_mut().zip(r.as_slice().iter()) {
            *pi = *ri + pi.scale(beta);
        }
    }

    let final_residual = (r_norm_sq / b_norm_sq).sqrt();

    CgResult {
        converged: final_residual < tol,
        iterations,
        final_residual,
        initial_residual,
    }
}

/// Solve D x = b: the quark propagator applied to a source.
///
/// Forms `D+ b = gamma_5 D gamma_5 b` and runs CG on the normal
/// equations from a zero initial guess.
pub fn solve_dirac(
    action: &WilsonAction,
    b: &LatticeColourVector,
    tol: f64,
    max_iter: usize,
) -> (LatticeColourVector, CgResult) {
    let b_dag = action.multiply_gamma5(&action.apply_full(&action.multiply_gamma5(b)));
    let mut x = b.zeros_like();
    let result = cg_solve(action, &mut x, &b_dag, tol, max_iter);
    (x, result)
}
