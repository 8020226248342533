// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The seam between `zagros` and a nested-sampling implementation.
//!
//! `zagros` doesn't evolve live points itself. A host program implements
//! [`NestedSampler`] around its sampler of choice, and `zagros` hands it the
//! prior transform and the log-likelihood as callbacks.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings for a (dynamic) nested-sampling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerSettings {
    /// The dimensionality of the parameter space.
    pub num_params: usize,

    /// The number of derived parameters; `zagros` never produces any.
    pub num_derived: usize,

    /// The number of live points (for a dynamic run, the constant-budget
    /// equivalent).
    pub nlive: usize,

    /// The number of live points in the initial exploratory run of a dynamic
    /// sampler.
    pub nlive_init: usize,

    /// The length of each slice-sampling chain.
    pub num_repeats: usize,

    /// Stop when the evidence in the live points is below this fraction of
    /// the total.
    pub precision_criterion: f64,

    /// The random seed. If this is `None`, the sampler picks one.
    pub seed: Option<u64>,

    /// 0 spends the budget on the evidence, 1 on parameter estimation.
    pub dynamic_goal: f64,

    pub do_clustering: bool,

    pub read_resume: bool,

    /// The directory that sampler outputs are written to.
    pub base_dir: PathBuf,

    /// The prefix of all sampler output files.
    pub file_root: String,
}

/// What a sampler reports once it finishes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SamplerRun {
    /// The natural log of the evidence and its uncertainty, if the sampler
    /// computes them.
    pub log_evidence: Option<(f64, f64)>,

    /// The number of likelihood evaluations.
    pub num_likelihood_calls: usize,
}

/// A boxed error from a sampler implementation.
pub type SamplerError = Box<dyn std::error::Error + Send + Sync>;

/// Maps a unit-hypercube point to a parameter vector, or `None` if it can't.
pub type PriorCallback<'a> = dyn Fn(&[f64]) -> Option<Vec<f64>> + 'a;

/// Produces the log-likelihood and derived parameters of a parameter vector.
pub type LoglikeCallback<'a> = dyn Fn(&[f64]) -> Result<(f64, Vec<f64>), SamplerError> + 'a;

/// A nested-sampling implementation.
pub trait NestedSampler {
    /// Run to completion, calling `prior` to obtain candidate parameters and
    /// `loglike` to score them.
    fn run(
        &mut self,
        settings: &SamplerSettings,
        prior: &PriorCallback,
        loglike: &LoglikeCallback,
    ) -> Result<SamplerRun, SamplerError>;
}
