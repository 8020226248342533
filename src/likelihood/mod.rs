// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
The Gaussian log-likelihood of observed visibilities given a sky model.

An [`EvaluationContext`] owns everything that doesn't change between samples:
the observation, the baseline index, the noise model and (once prepared) the
weights. Preparation is an explicit step:

```ignore
let mut context = EvaluationContext::new(obs, Hypothesis::PointSource, noise, modelling)?;
context.prepare()?;
let (loglike, derived) = context.evaluate(&theta)?;
```

For every visibility with a non-zero weight `w`,

```text
chi² = Σ w |model - data|²
ln L = -chi²/2 - Σ ln(2π/w)
```

where each weight applies to both the real and imaginary part of its
visibility.
 */

mod error;

pub use error::LikelihoodError;

use log::{debug, info, trace};
use ndarray::prelude::*;

use crate::{
    constants::TAU,
    math::BaselineIndex,
    model::{ModelError, SkyModeller},
    noise::{NoiseModel, Weights},
    params::ModellingParams,
    Hypothesis, Observation,
};

/// Everything computed by [`EvaluationContext::prepare`].
#[derive(Debug, Clone)]
struct Prepared {
    /// `[row][channel][correlation]`, zero where flagged.
    weights: Array3<f64>,

    /// `Σ ln(2π/w)` over the non-zero weights.
    log_norm: f64,

    num_unflagged: usize,
}

#[derive(Debug, Clone)]
enum State {
    Unprepared,
    Prepared(Prepared),
}

/// The data, noise and model needed to evaluate the likelihood.
#[derive(Debug, Clone)]
pub struct EvaluationContext {
    obs: Observation,
    hypothesis: Hypothesis,
    noise: NoiseModel,
    modeller: SkyModeller,
    baseline_index: BaselineIndex,
    state: State,
}

impl EvaluationContext {
    /// Set up a context. The weights are not computed until
    /// [`EvaluationContext::prepare`] is called.
    ///
    /// # Errors
    ///
    /// If the hypothesis is unsupported, or the observation's correlation
    /// count isn't 1, 2 or 4.
    pub fn new(
        obs: Observation,
        hypothesis: Hypothesis,
        noise: NoiseModel,
        modelling: ModellingParams,
    ) -> Result<EvaluationContext, LikelihoodError> {
        if let Hypothesis::Unsupported(hypothesis) = hypothesis {
            return Err(ModelError::UnsupportedHypothesis { hypothesis }.into());
        }
        let modeller = SkyModeller::new(
            obs.num_corrs(),
            modelling.feed_basis,
            modelling.offset_unit,
        )?;
        let baseline_index =
            BaselineIndex::new(obs.ant1(), obs.ant2(), &obs.unique_antennas());
        debug!(
            "Indexed {} rows over {} baselines",
            baseline_index.num_rows(),
            baseline_index.num_baselines()
        );

        Ok(EvaluationContext {
            obs,
            hypothesis,
            noise,
            modeller,
            baseline_index,
            state: State::Unprepared,
        })
    }

    /// Compute the weights and the likelihood normalisation. Calling this
    /// more than once does nothing.
    ///
    /// # Errors
    ///
    /// If the noise model can't produce weights for this observation, or
    /// every visibility is flagged.
    pub fn prepare(&mut self) -> Result<(), LikelihoodError> {
        if self.is_prepared() {
            return Ok(());
        }

        let Weights {
            weights,
            num_unflagged,
        } = self.noise.compute_weights(&self.obs, &self.baseline_index)?;
        let num_vis = weights.len();
        if num_unflagged == 0 {
            return Err(LikelihoodError::AllFlagged { num_vis });
        }
        let log_norm: f64 = weights
            .iter()
            .filter(|&&w| w != 0.0)
            .map(|&w| (TAU / w).ln())
            .sum();

        info!(
            "Percentage of unflagged visibilities: {num_unflagged} / {num_vis} = {:.2}%",
            num_unflagged as f64 / num_vis as f64 * 100.0
        );
        debug!("Log-likelihood normalisation: {log_norm}");

        self.state = State::Prepared(Prepared {
            weights,
            log_norm,
            num_unflagged,
        });
        Ok(())
    }

    pub fn is_prepared(&self) -> bool {
        matches!(self.state, State::Prepared(_))
    }

    fn prepared(&self) -> Result<&Prepared, LikelihoodError> {
        match &self.state {
            State::Prepared(p) => Ok(p),
            State::Unprepared => Err(LikelihoodError::NotPrepared),
        }
    }

    /// The weighted sum of squared residuals between the model made from
    /// `theta` and the data.
    pub fn chi_squared(&self, theta: &[f64]) -> Result<f64, LikelihoodError> {
        let prepared = self.prepared()?;
        let vis_model = self.modeller.model(self.hypothesis, theta, &self.obs)?;

        let chi2: f64 = vis_model
            .iter()
            .zip(self.obs.vis().iter())
            .zip(prepared.weights.iter())
            .filter(|(_, &w)| w != 0.0)
            .map(|((model, data), &w)| (model - data).norm_sqr() * w)
            .sum();
        Ok(chi2)
    }

    /// The log-likelihood of `theta`, with the (always empty) derived
    /// parameters a nested sampler expects.
    ///
    /// # Errors
    ///
    /// If the context hasn't been prepared, `theta` doesn't suit the
    /// hypothesis, or the log-likelihood isn't finite.
    pub fn evaluate(&self, theta: &[f64]) -> Result<(f64, Vec<f64>), LikelihoodError> {
        let log_norm = self.prepared()?.log_norm;
        let chi2 = self.chi_squared(theta)?;
        let loglike = -chi2 / 2.0 - log_norm;
        trace!("theta {theta:?}: chi² = {chi2}, ln L = {loglike}");

        if !loglike.is_finite() {
            return Err(LikelihoodError::NonFinite {
                loglike,
                theta: theta.to_vec(),
            });
        }
        Ok((loglike, vec![]))
    }

    /// Like [`EvaluationContext::evaluate`], but prepares the context first if
    /// needed.
    pub fn loglike(&mut self, theta: &[f64]) -> Result<(f64, Vec<f64>), LikelihoodError> {
        self.prepare()?;
        self.evaluate(theta)
    }

    pub fn observation(&self) -> &Observation {
        &self.obs
    }

    pub fn hypothesis(&self) -> Hypothesis {
        self.hypothesis
    }

    pub fn noise(&self) -> &NoiseModel {
        &self.noise
    }

    pub fn modeller(&self) -> &SkyModeller {
        &self.modeller
    }

    pub fn baseline_index(&self) -> &BaselineIndex {
        &self.baseline_index
    }

    /// The weights, if the context has been prepared.
    pub fn weights(&self) -> Option<ArrayView3<f64>> {
        match &self.state {
            State::Prepared(p) => Some(p.weights.view()),
            State::Unprepared => None,
        }
    }

    /// The number of visibilities with a non-zero weight, if the context has
    /// been prepared.
    pub fn num_unflagged(&self) -> Option<usize> {
        match &self.state {
            State::Prepared(p) => Some(p.num_unflagged),
            State::Unprepared => None,
        }
    }
}
