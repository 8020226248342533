// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors from reading and interpreting parameters.

use std::path::PathBuf;

use thiserror::Error;

use super::ArgFileTypes;

#[derive(Error, Debug)]
pub enum ParamsError {
    #[error("Parameter file '{file}' doesn't have a recognised file extension! Valid extensions are: {valid}")]
    UnrecognisedExtension { file: PathBuf, valid: String },

    #[error("Couldn't decode {file_type} structure from '{file}':\n{err}")]
    Decode {
        file: PathBuf,
        file_type: ArgFileTypes,
        err: String,
    },

    #[error("Couldn't encode parameters as toml: {0}")]
    Encode(String),

    #[error("Both SEFDs and a simulated sigma were given; only one noise model can be used")]
    AmbiguousNoise,

    #[error("No noise model was given; supply either per-antenna SEFDs or a simulated sigma")]
    MissingNoise,

    #[error("No priors were given; the point-source hypothesis needs priors on flux, offset_x and offset_y")]
    MissingPriors,

    #[error("The number of live points must be greater than 0")]
    ZeroLivePoints,

    #[error("The initial exploratory run can't use more live points ({nlive_init}) than the main run ({nlive})")]
    TooManyInitialLivePoints { nlive: usize, nlive_init: usize },

    #[error("The number of repeats must be greater than 0")]
    ZeroRepeats,

    #[error("The precision criterion must be positive and finite, but it is {0}")]
    PrecisionCriterion(f64),

    #[error("The dynamic goal must be between 0 and 1, but it is {0}")]
    DynamicGoal(f64),

    #[error("The seed {seed} is too large; seeds can be at most {max}")]
    SeedTooLarge { seed: u64, max: u64 },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
