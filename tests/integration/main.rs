// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod end_to_end;

use std::path::Path;

use hifitime::Epoch;
use ndarray::prelude::*;
use vec1::vec1;

use zagros::{
    io::{ObservationReader, VisReadError},
    model::SkyModeller,
    rime::FeedBasis,
    Hypothesis, Observation, ObservationParts, UVW,
};

/// A single timestep and channel from three antennas, with the visibilities of
/// a point source with parameters `theta`.
fn three_antenna_parts(theta: &[f64]) -> ObservationParts {
    let uvws = vec![
        UVW {
            u: 120.0,
            v: 35.0,
            w: 2.0,
        },
        UVW {
            u: -40.0,
            v: 210.0,
            w: -3.5,
        },
        UVW {
            u: -160.0,
            v: 175.0,
            w: -5.5,
        },
    ];
    let mut parts = ObservationParts {
        vis: Array3::zeros((3, 1, 4)),
        flags: Array3::from_elem((3, 1, 4), false),
        flag_row: vec![false; 3],
        uvws,
        ant1: vec![0, 0, 1],
        ant2: vec![1, 2, 2],
        integration_times: vec![2.0; 3],
        chan_freqs: vec1![182e6],
        chan_width: 10e3,
        num_ants: 3,
        time_index: vec![0; 3],
        timestamps: vec1![Epoch::from_gpst_seconds(1065880128.0)],
    };

    let obs = Observation::new(parts.clone()).unwrap();
    let modeller = SkyModeller::new(4, FeedBasis::Circular, Default::default()).unwrap();
    parts.vis = modeller
        .model(Hypothesis::PointSource, theta, &obs)
        .unwrap();
    parts
}

/// Hands out the same parts for any measurement set.
struct FixedReader(ObservationParts);

impl ObservationReader for FixedReader {
    fn read(&self, _ms: &Path, _data_column: &str) -> Result<ObservationParts, VisReadError> {
        Ok(self.0.clone())
    }
}
