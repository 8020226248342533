// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashSet;

use approx::assert_abs_diff_eq;

use super::*;
use crate::constants::PI;

#[test]
fn test_cexp() {
    assert_abs_diff_eq!(cexp(0.0), c64::new(1.0, 0.0));
    assert_abs_diff_eq!(cexp(PI), c64::new(-1.0, 0.0), epsilon = 1e-15);
    assert_abs_diff_eq!(cexp(PI / 2.0), c64::new(0.0, 1.0), epsilon = 1e-15);
}

#[test]
fn test_baseline_index_matches_rows() {
    // Two timesteps of a 4-antenna array, with antenna 3's rows missing.
    let ant1 = [0, 0, 1, 0, 0, 1];
    let ant2 = [1, 2, 2, 1, 2, 2];
    let index = BaselineIndex::new(&ant1, &ant2, &[0, 1, 2]);

    assert_eq!(index.num_baselines(), 3);
    assert_eq!(index.get(0, 1), &[0, 3]);
    assert_eq!(index.get(0, 2), &[1, 4]);
    assert_eq!(index.get(1, 2), &[2, 5]);

    for ((a1, a2), rows) in index.iter() {
        assert!(a1 < a2);
        for &row in rows {
            assert_eq!((ant1[row], ant2[row]), (a1, a2));
        }
    }

    // The union of all entries is every row, exactly once.
    let mut all_rows: Vec<usize> = index.iter().flat_map(|(_, rows)| rows.to_vec()).collect();
    all_rows.sort_unstable();
    assert_eq!(all_rows, (0..ant1.len()).collect::<Vec<_>>());
    assert_eq!(index.num_rows(), ant1.len());
}

#[test]
fn test_baseline_index_empty_entries() {
    // Antenna 3 is present in the labels, but only pairs with 0 appear.
    let ant1 = [0, 0];
    let ant2 = [1, 3];
    let index = BaselineIndex::new(&ant1, &ant2, &[0, 1, 3]);

    assert_eq!(index.num_baselines(), 3);
    assert_eq!(index.get(0, 1), &[0]);
    assert_eq!(index.get(0, 3), &[1]);
    assert!(index.get(1, 3).is_empty());
    // Pairs that aren't in the index are treated as empty.
    assert!(index.get(1, 0).is_empty());
    assert!(index.get(7, 8).is_empty());
}

#[test]
fn test_baseline_index_is_ordered() {
    let ant1 = [2, 1, 0, 0, 1, 0];
    let ant2 = [3, 3, 3, 2, 2, 1];
    let index = BaselineIndex::new(&ant1, &ant2, &[0, 1, 2, 3]);
    let keys: Vec<(usize, usize)> = index.iter().map(|(bl, _)| bl).collect();
    assert_eq!(keys, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);

    let unique: HashSet<usize> = index.iter().flat_map(|(_, rows)| rows.to_vec()).collect();
    assert_eq!(unique.len(), 6);
}

#[test]
#[should_panic]
fn test_baseline_index_mismatched_columns() {
    BaselineIndex::new(&[0, 0, 1], &[1, 2], &[0, 1, 2]);
}
