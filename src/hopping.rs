// SPDX-License-Identifier: AGPL-3.0-only

//! Nearest-neighbour hopping term of the lattice Dirac operator.
//!
//! The hopping matrix couples each site's fermion vector to its eight
//! nearest neighbours (forward and backward in each dimension):
//!
//!   (H psi)(x) = sum_mu [ phase(x, +mu) S(+mu) U_mu(x)      psi(x+mu)
//!                       + phase(x, -mu) S(-mu) U_mu(x-mu)^+ psi(x-mu) ]
//!
//! where `S` is the per-direction spin structure and `U_mu` the gauge
//! link. The operator is never materialized as a matrix: construction
//! precomputes, per site and direction, the neighbour's array index, the
//! gauge-link storage index, and the accumulated boundary phase (the
//! dimension's phase factor, or its inverse for backward hops, when the
//! hop wraps around the periodic boundary). Application is then a single
//! pass over sites.
//!
//! Each output site accumulates only from its own neighbours' inputs, so
//! the site loop parallelizes without locks: rayon partitions the output
//! into disjoint per-site blocks, and the gauge field and hop tables are
//! read-shared. The per-site direction loop has a fixed order, keeping
//! floating-point sums reproducible run to run.
//!
//! The gauge field is borrowed for the lifetime of the operator, which
//! also pins the documented precondition that links are not mutated
//! while the operator is in use; rebuild the operator after a gauge
//! update.
//!
//! # References
//!
//! - Wilson, PRD 10, 2445 (1974)
//! - Gattringer & Lang, "QCD on the Lattice" (2010), Ch. 5

use rayon::prelude::*;

use crate::complex::Complex64;
use crate::constants::N_SPINS;
use crate::error::LatticeError;
use crate::field::{LatticeColourMatrix, LatticeColourVector};
use crate::spin::SpinMatrix;

/// One precomputed hop: neighbour site, gauge-link slot, boundary phase.
#[derive(Clone, Copy, Debug)]
struct Hop {
    /// Array index of the neighbouring site.
    site: usize,
    /// Storage index of the gauge link transporting this hop.
    link: usize,
    /// Accumulated boundary phase (1 unless the hop wrapped).
    phase: Complex64,
}

/// Sparse application of the nearest-neighbour coupling operator.
#[derive(Debug)]
pub struct HoppingMatrix<'a> {
    gauge_field: &'a LatticeColourMatrix,
    /// Spin structures, `[2 mu]` forward and `[2 mu + 1]` backward.
    spin_structures: Vec<SpinMatrix>,
    /// `2 num_dims` hops per site, same direction order as the structures.
    hops: Vec<Hop>,
    num_dims: usize,
}

impl<'a> HoppingMatrix<'a> {
    /// Build the hopping operator for `gauge_field`.
    ///
    /// `boundary_phases` holds one complex factor per lattice dimension,
    /// applied (or its inverse, for backward hops) whenever a hop crosses
    /// the periodic boundary in that dimension. `spin_structures` holds
    /// one `[forward, backward]` matrix pair per dimension.
    ///
    /// Fails with `SizeMismatch` if the gauge field does not carry one
    /// link per dimension, and with `DimensionMismatch` if either
    /// per-dimension argument has the wrong length.
    pub fn new(
        gauge_field: &'a LatticeColourMatrix,
        boundary_phases: &[Complex64],
        spin_structures: &[[SpinMatrix; 2]],
    ) -> Result<Self, LatticeError> {
        let num_dims = gauge_field.num_dims();
        if gauge_field.site_size() != num_dims {
            return Err(LatticeError::SizeMismatch {
                expected: num_dims,
                found: gauge_field.site_size(),
            });
        }
        if boundary_phases.len() != num_dims {
            return Err(LatticeError::DimensionMismatch {
                expected: num_dims,
                found: boundary_phases.len(),
            });
        }
        if spin_structures.len() != num_dims {
            return Err(LatticeError::DimensionMismatch {
                expected: num_dims,
                found: spin_structures.len(),
            });
        }

        let layout = gauge_field.layout();
        let shape = layout.shape();
        let volume = layout.volume();

        let mut hops = Vec::with_capacity(volume * 2 * num_dims);
        for array_index in 0..volume {
            let coords = layout.site_coords(layout.array_to_site(array_index));
            for mu in 0..num_dims {
                let extent = shape[mu];
                let mut neighbour = coords.clone();

                // Forward hop: link lives at x.
                let fwd_wraps = coords[mu] + 1 == extent;
                neighbour[mu] = (coords[mu] + 1) % extent;
                let fwd_site = layout.site_to_array(layout.lexico_index(&neighbour));
                hops.push(Hop {
                    site: fwd_site,
                    link: array_index * num_dims + mu,
                    phase: if fwd_wraps {
                        boundary_phases[mu]
                    } else {
                        Complex64::ONE
                    },
                });

                // Backward hop: adjoint link lives at x - mu.
                let bwd_wraps = coords[mu] == 0;
                neighbour[mu] = (coords[mu] + extent - 1) % extent;
                let bwd_site = layout.site_to_array(layout.lexico_index(&neighbour));
                hops.push(Hop {
                    site: bwd_site,
                    link: bwd_site * num_dims + mu,
                    phase: if bwd_wraps {
                        boundary_phases[mu].inv()
                    } else {
                        Complex64::ONE
                    },
                });
            }
        }

        let mut structures = Vec::with_capacity(2 * num_dims);
        for pair in spin_structures {
            structures.push(pair[0]);
            structures.push(pair[1]);
        }

        Ok(Self {
            gauge_field,
            spin_structures: structures,
            hops,
            num_dims,
        })
    }

    /// Total number of lattice sites.
    #[must_use]
    pub fn volume(&self) -> usize {
        self.gauge_field.volume()
    }

    /// Number of lattice dimensions.
    #[must_use]
    pub fn num_dims(&self) -> usize {
        self.num_dims
    }

    /// Apply the hopping operator: out = H psi.
    ///
    /// `fermion_in` must share the gauge field's layout and carry four
    /// spin components per site. Pure numeric transform; never fails once
    /// construction succeeded.
    #[must_use]
    pub fn apply_full(&self, fermion_in: &LatticeColourVector) -> LatticeColourVector {
        assert!(
            fermion_in.layout() == self.gauge_field.layout(),
            "fermion field layout disagrees with the gauge field layout"
        );
        assert!(
            fermion_in.site_size() == N_SPINS,
            "fermion field must carry {N_SPINS} spin components, has {}",
            fermion_in.site_size()
        );

        let ns = fermion_in.site_size();
        let nh = 2 * self.num_dims;
        let links = self.gauge_field.as_slice();
        let input = fermion_in.as_slice();

        let mut out = fermion_in.zeros_like();
        out.as_mut_slice()
            .par_chunks_mut(ns)
            .enumerate()
            .for_each(|(site, out_site)| {
                let hops = &self.hops[site * nh..(site + 1) * nh];
                for (h, hop) in hops.iter().enumerate() {
                    // Even slots are forward hops, odd slots backward
                    // (adjoint transport).
                    let link = if h % 2 == 0 {
                        links[hop.link]
                    } else {
                        links[hop.link].adjoint()
                    };
                    let structure = &self.spin_structures[h];
                    let neighbour = &input[hop.site * ns..hop.site * ns + ns];

                    for (beta, in_spin) in neighbour.iter().enumerate() {
                        let transported = link * *in_spin;
                        for (alpha, out_spin) in out_site.iter_mut().enumerate() {
                            let weight = hop.phase * structure.m[alpha][beta];
                            if weight.re == 0.0 && weight.im == 0.0 {
                                continue;
                            }
                            *out_spin += transported.scale_complex(weight);
                        }
                    }
                }
            });

        out
    }
}
