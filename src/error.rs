// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all zagros-related errors. This should be the *only* error
//! enum that is publicly visible at the top of the crate.

use thiserror::Error;

use crate::{
    cli::CliArgsError,
    io::VisReadError,
    likelihood::LikelihoodError,
    model::ModelError,
    noise::NoiseError,
    observation::ObservationError,
    params::ParamsError,
    prior::PriorError,
    sampler::SamplerError,
};

/// The broad category of a [`ZagrosError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unsupported or inconsistent settings, e.g. an unsupported hypothesis,
    /// correlation count or noise configuration.
    Configuration,

    /// A number outside the domain of a calculation, e.g. a non-positive
    /// SEFD.
    Domain,

    /// A malformed or empty observation, including one with every visibility
    /// flagged.
    Data,

    /// Reading or writing files.
    Io,

    /// Something went wrong inside the nested sampler.
    External,
}

#[derive(Error, Debug)]
pub enum ZagrosError {
    #[error(transparent)]
    Observation(#[from] ObservationError),

    #[error(transparent)]
    Noise(#[from] NoiseError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Prior(#[from] PriorError),

    #[error(transparent)]
    Likelihood(#[from] LikelihoodError),

    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error(transparent)]
    VisRead(#[from] VisReadError),

    #[error(transparent)]
    CliArgs(#[from] CliArgsError),

    #[error("The nested sampler failed: {0}")]
    Sampler(SamplerError),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

impl ZagrosError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ZagrosError::Observation(_) => ErrorKind::Data,
            ZagrosError::Noise(e) => noise_kind(e),
            ZagrosError::Model(e) => model_kind(e),
            ZagrosError::Prior(_) => ErrorKind::Configuration,
            ZagrosError::Likelihood(e) => match e {
                LikelihoodError::NotPrepared => ErrorKind::Configuration,
                LikelihoodError::AllFlagged { .. } => ErrorKind::Data,
                LikelihoodError::NonFinite { .. } => ErrorKind::Domain,
                LikelihoodError::Model(e) => model_kind(e),
                LikelihoodError::Noise(e) => noise_kind(e),
            },
            ZagrosError::Params(ParamsError::IO(_)) => ErrorKind::Io,
            ZagrosError::Params(_) => ErrorKind::Configuration,
            ZagrosError::VisRead(VisReadError::Observation(_)) => ErrorKind::Data,
            ZagrosError::VisRead(_) => ErrorKind::Io,
            ZagrosError::CliArgs(_) => ErrorKind::Configuration,
            ZagrosError::Sampler(_) => ErrorKind::External,
            ZagrosError::IO(_) => ErrorKind::Io,
        }
    }
}

fn noise_kind(e: &NoiseError) -> ErrorKind {
    match e {
        NoiseError::NonPositive { .. } => ErrorKind::Domain,
        NoiseError::MissingSefd { .. } => ErrorKind::Configuration,
    }
}

fn model_kind(e: &ModelError) -> ErrorKind {
    match e {
        ModelError::NotOnSky { .. } => ErrorKind::Domain,
        ModelError::UnsupportedCorrelationCount { .. }
        | ModelError::UnsupportedHypothesis { .. }
        | ModelError::ThetaLength { .. } => ErrorKind::Configuration,
    }
}
