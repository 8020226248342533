// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all noise-model-related errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoiseError {
    #[error("The {quantity} must be strictly positive and finite to form a noise weight, but it is {value}")]
    NonPositive { quantity: &'static str, value: f64 },

    #[error("No SEFD was supplied for antenna {antenna}; {num_sefds} SEFDs were given but the observation has {num_ants} antennas")]
    MissingSefd {
        antenna: usize,
        num_sefds: usize,
        num_ants: usize,
    },
}
