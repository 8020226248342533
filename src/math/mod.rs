// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Some helper mathematics, and the map between baselines and rows.

#[cfg(test)]
mod tests;

use indexmap::IndexMap;

use crate::c64;

/// Complex exponential. The argument is assumed to be purely imaginary.
///
/// This function doesn't actually use complex numbers; it just returns the real
/// and imag components from Euler's formula (i.e. e^{ix} = cos{x} + i sin{x}).
#[inline]
pub(crate) fn cexp(x: f64) -> c64 {
    let (im, re) = x.sin_cos();
    c64::new(re, im)
}

/// For each cross-correlation baseline, the rows of the visibility array that
/// belong to it.
///
/// Keys are antenna pairs `(i, j)` with `i < j`, in ascending order. Every pair
/// of antenna labels supplied at construction has an entry, even if no rows
/// use it.
#[derive(Debug, Clone)]
pub struct BaselineIndex {
    rows: IndexMap<(usize, usize), Vec<usize>>,
}

impl BaselineIndex {
    /// Build the index from the per-row antenna columns.
    ///
    /// `unique_ants` should be sorted (e.g. from
    /// [`crate::Observation::unique_antennas`]). Rows whose pair isn't formed
    /// from `unique_ants` with `ant1 < ant2` are not indexed.
    ///
    /// # Panics
    ///
    /// If `ant1` and `ant2` have different lengths. A validated
    /// [`crate::Observation`] never does.
    pub(crate) fn new(ant1: &[usize], ant2: &[usize], unique_ants: &[usize]) -> BaselineIndex {
        assert_eq!(ant1.len(), ant2.len(), "ant1.len() != ant2.len()");

        let mut rows = IndexMap::new();
        for (i, &a1) in unique_ants.iter().enumerate() {
            for &a2 in &unique_ants[i + 1..] {
                if a2 > a1 {
                    rows.insert((a1, a2), vec![]);
                }
            }
        }

        for (i_row, (&a1, &a2)) in ant1.iter().zip(ant2.iter()).enumerate() {
            if let Some(baseline_rows) = rows.get_mut(&(a1, a2)) {
                baseline_rows.push(i_row);
            }
        }

        BaselineIndex { rows }
    }

    /// The rows belonging to baseline `(ant1, ant2)`. Pairs that aren't in
    /// the index have no rows.
    pub fn get(&self, ant1: usize, ant2: usize) -> &[usize] {
        self.rows
            .get(&(ant1, ant2))
            .map(|rows| rows.as_slice())
            .unwrap_or(&[])
    }

    /// Iterate over each baseline and its rows, in ascending baseline order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &[usize])> {
        self.rows.iter().map(|(&bl, rows)| (bl, rows.as_slice()))
    }

    pub fn num_baselines(&self) -> usize {
        self.rows.len()
    }

    /// The number of rows across all baselines.
    pub fn num_rows(&self) -> usize {
        self.rows.values().map(|rows| rows.len()).sum()
    }
}
