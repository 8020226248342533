// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Helpers shared by the unit tests.

use hifitime::Epoch;
use marlu::{c64, UVW};
use ndarray::prelude::*;
use vec1::Vec1;

use crate::ObservationParts;

pub(crate) const TEST_CHAN_WIDTH: f64 = 40e3;
pub(crate) const TEST_INT_TIME: f64 = 8.0;

/// Antenna positions \[metres\] that aren't regularly spaced, so that no two
/// baselines share a UVW.
fn antenna_position(ant: usize) -> (f64, f64, f64) {
    let a = ant as f64;
    (100.0 * a + 17.0 * a * a, 30.0 * a - 4.0 * a * a, 5.0 * a)
}

/// Cross-correlation rows for every baseline of `num_ants` antennas over
/// `num_times` timesteps, time-major like a measurement set. Visibilities are
/// zero and nothing is flagged.
pub(crate) fn synthetic_parts(
    num_ants: usize,
    num_chans: usize,
    num_corrs: usize,
    num_times: usize,
) -> ObservationParts {
    let mut uvws = vec![];
    let mut ant1 = vec![];
    let mut ant2 = vec![];
    let mut time_index = vec![];
    for i_time in 0..num_times {
        // Rotate the baselines a little each timestep.
        let (s_h, c_h) = (0.1 * i_time as f64).sin_cos();
        for a1 in 0..num_ants {
            for a2 in a1 + 1..num_ants {
                let (x1, y1, z1) = antenna_position(a1);
                let (x2, y2, z2) = antenna_position(a2);
                let (dx, dy, dz) = (x2 - x1, y2 - y1, z2 - z1);
                uvws.push(UVW {
                    u: dx * c_h - dy * s_h,
                    v: dx * s_h + dy * c_h,
                    w: dz,
                });
                ant1.push(a1);
                ant2.push(a2);
                time_index.push(i_time);
            }
        }
    }
    let num_rows = uvws.len();

    let chan_freqs =
        Vec1::try_from_vec((0..num_chans).map(|i| 150e6 + i as f64 * TEST_CHAN_WIDTH).collect())
            .unwrap();
    let timestamps = Vec1::try_from_vec(
        (0..num_times)
            .map(|i| Epoch::from_gpst_seconds(1090008640.0 + i as f64 * TEST_INT_TIME))
            .collect(),
    )
    .unwrap();

    ObservationParts {
        vis: Array3::from_elem((num_rows, num_chans, num_corrs), c64::default()),
        flags: Array3::from_elem((num_rows, num_chans, num_corrs), false),
        flag_row: vec![false; num_rows],
        uvws,
        ant1,
        ant2,
        integration_times: vec![TEST_INT_TIME; num_rows],
        chan_freqs,
        chan_width: TEST_CHAN_WIDTH,
        num_ants,
        time_index,
        timestamps,
    }
}
