// SPDX-License-Identifier: AGPL-3.0-only

//! ferrion: Wilson fermion operators for 4D lattice QCD.
//!
//! The computational core of quark propagator calculations: a lattice
//! site layout, dense gauge-link and fermion field containers, the
//! nearest-neighbour hopping matrix, and the Wilson Dirac operator it
//! composes into, plus the CG inverter that consumes them. The hopping
//! matrix application is the kernel that iterative solvers call millions
//! of times; everything here is built so that call is a deterministic,
//! lock-free parallel pass over sites.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `complex` | Complex f64 arithmetic |
//! | `constants` | Colour/spin/dimension counts, LCG PRNG, numeric guards |
//! | `error` | Typed construction and addressing errors |
//! | `layout` | Lexicographic and even-odd site-index bijections |
//! | `colour` | SU(3) matrices and colour vectors |
//! | `spin` | Euclidean gamma matrices and Wilson hop projectors |
//! | `field` | Dense (site, sub-index) field containers |
//! | `hopping` | Nearest-neighbour coupling operator |
//! | `wilson` | Wilson fermion action D = (4 + m) - H/2 |
//! | `cg` | Conjugate gradient on the normal equations |
//!
//! # References
//!
//! - Wilson, PRD 10, 2445 (1974)
//! - Gattringer & Lang, "Quantum Chromodynamics on the Lattice" (2010)
//! - Montvay & Muenster, "Quantum Fields on a Lattice" (1994)

/// Conjugate gradient solver for the Wilson operator.
pub mod cg;
/// SU(3) colour matrices and colour vectors.
pub mod colour;
/// Complex f64 arithmetic (re, im).
pub mod complex;
/// Shared counts, LCG PRNG, and numerical guards.
pub mod constants;
/// Typed errors for construction and addressing.
pub mod error;
/// Dense lattice field containers and fermion linear algebra.
pub mod field;
/// Nearest-neighbour hopping operator with precomputed tables.
pub mod hopping;
/// Lexicographic and even-odd site layouts.
pub mod layout;
/// Euclidean gamma matrices and Wilson hop projectors.
pub mod spin;
/// Wilson fermion action: the full Dirac operator.
pub mod wilson;
