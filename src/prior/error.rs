// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors that can occur when setting up priors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PriorError {
    #[error("The prior on '{param}' has bounds [{min}, {max}]; bounds must be finite with min <= max")]
    Bounds {
        param: &'static str,
        min: f64,
        max: f64,
    },

    #[error("The log-uniform prior on '{param}' needs a lower bound greater than 0, but it is {min}")]
    LogLowerBound { param: &'static str, min: f64 },
}
