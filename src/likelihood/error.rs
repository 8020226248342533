// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors from evaluating the likelihood.

use thiserror::Error;

use crate::{model::ModelError, noise::NoiseError};

#[derive(Error, Debug)]
pub enum LikelihoodError {
    #[error("The evaluation context was used before its weights were prepared; call prepare() first")]
    NotPrepared,

    #[error("All {num_vis} visibilities are flagged; there is nothing to compare the model against")]
    AllFlagged { num_vis: usize },

    #[error("The log-likelihood for theta {theta:?} is {loglike}, which is not finite")]
    NonFinite { loglike: f64, theta: Vec<f64> },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Noise(#[from] NoiseError),
}
