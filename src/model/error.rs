// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all sky-model-related errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Visibilities with {num_corrs} correlations can't be modelled; only 1, 2 or 4 correlations are supported")]
    UnsupportedCorrelationCount { num_corrs: usize },

    #[error("Hypothesis {hypothesis} has no sky model")]
    UnsupportedHypothesis { hypothesis: u8 },

    #[error("Hypothesis {hypothesis} takes {expected} parameters, but {got} were given")]
    ThetaLength {
        hypothesis: u8,
        expected: usize,
        got: usize,
    },

    #[error("The offset (l, m) = ({l}, {m}) is not a direction on the sky; l² + m² must be less than 1")]
    NotOnSky { l: f64, m: f64 },
}
