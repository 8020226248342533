// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Hypotheses and the prior transform.

A nested sampler draws points from the unit hypercube; the prior transform
maps each coordinate through a named distribution to a physical parameter.
 */

mod error;
#[cfg(test)]
mod tests;

pub use error::PriorError;

use log::{trace, warn};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::constants::NUM_POINT_SOURCE_PARAMS;

/// A model of the sky to be tested against the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hypothesis {
    /// A single unpolarised point source (id 0), with parameters Stokes I flux
    /// density and x and y offsets from the phase centre.
    PointSource,

    /// Any other id. These are accepted so that they can be reported, but
    /// have no sky model or prior.
    Unsupported(u8),
}

impl From<u8> for Hypothesis {
    fn from(id: u8) -> Hypothesis {
        match id {
            0 => Hypothesis::PointSource,
            _ => Hypothesis::Unsupported(id),
        }
    }
}

impl std::fmt::Display for Hypothesis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hypothesis::PointSource => write!(f, "0 (single point source)"),
            Hypothesis::Unsupported(id) => write!(f, "{id} (unsupported)"),
        }
    }
}

impl Hypothesis {
    pub fn id(self) -> u8 {
        match self {
            Hypothesis::PointSource => 0,
            Hypothesis::Unsupported(id) => id,
        }
    }

    pub fn is_supported(self) -> bool {
        !matches!(self, Hypothesis::Unsupported(_))
    }

    /// The number of parameters of this hypothesis, if it's supported.
    pub fn num_params(self) -> Option<usize> {
        match self {
            Hypothesis::PointSource => Some(NUM_POINT_SOURCE_PARAMS),
            Hypothesis::Unsupported(_) => None,
        }
    }

    /// The names of the parameters, in the order they appear in theta.
    pub fn param_names(self) -> &'static [&'static str] {
        match self {
            Hypothesis::PointSource => &["flux", "offset_x", "offset_y"],
            Hypothesis::Unsupported(_) => &[],
        }
    }
}

/// The shape of a prior.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
pub enum Distribution {
    /// Uniform between the bounds.
    #[default]
    #[serde(rename = "U")]
    #[strum(serialize = "U")]
    Uniform,

    /// Uniform in the logarithm between the bounds.
    #[serde(rename = "LOG")]
    #[strum(serialize = "LOG")]
    LogUniform,

    /// Always the lower bound.
    #[serde(rename = "DELTA")]
    #[strum(serialize = "DELTA")]
    Delta,
}

/// A prior on one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorSpec {
    #[serde(default)]
    pub distribution: Distribution,
    pub min: f64,
    pub max: f64,
}

impl PriorSpec {
    pub fn uniform(min: f64, max: f64) -> PriorSpec {
        PriorSpec {
            distribution: Distribution::Uniform,
            min,
            max,
        }
    }

    fn validate(&self, param: &'static str) -> Result<(), PriorError> {
        let PriorSpec {
            distribution,
            min,
            max,
        } = *self;
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(PriorError::Bounds { param, min, max });
        }
        if distribution == Distribution::LogUniform && min <= 0.0 {
            return Err(PriorError::LogLowerBound { param, min });
        }
        Ok(())
    }

    /// Map a unit-interval coordinate `x` to the parameter.
    pub fn apply(&self, x: f64) -> f64 {
        match self.distribution {
            Distribution::Uniform => self.min + x * (self.max - self.min),
            Distribution::LogUniform => self.min * (self.max / self.min).powf(x),
            Distribution::Delta => self.min,
        }
    }
}

/// Priors on the parameters of [`Hypothesis::PointSource`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointSourcePriors {
    /// Stokes I flux density \[Jy\].
    pub flux: PriorSpec,

    /// Offset from the phase centre, in the configured offset unit.
    pub offset_x: PriorSpec,

    pub offset_y: PriorSpec,
}

/// Maps unit-hypercube points to parameter vectors for a hypothesis.
#[derive(Debug, Clone)]
pub struct PriorTransform {
    hypothesis: Hypothesis,

    /// One per parameter, in theta order. Empty for unsupported hypotheses.
    priors: Vec<PriorSpec>,
}

impl PriorTransform {
    /// # Errors
    ///
    /// If any prior has invalid bounds. Unsupported hypotheses are not an
    /// error here; their transform always yields nothing.
    pub fn new(
        hypothesis: Hypothesis,
        priors: &PointSourcePriors,
    ) -> Result<PriorTransform, PriorError> {
        let priors = match hypothesis {
            Hypothesis::PointSource => {
                let specs = vec![priors.flux, priors.offset_x, priors.offset_y];
                for (spec, &param) in specs.iter().zip(hypothesis.param_names()) {
                    spec.validate(param)?;
                }
                specs
            }
            Hypothesis::Unsupported(_) => vec![],
        };

        Ok(PriorTransform { hypothesis, priors })
    }

    pub fn hypothesis(&self) -> Hypothesis {
        self.hypothesis
    }

    pub fn priors(&self) -> &[PriorSpec] {
        &self.priors
    }

    /// Map `hcube`, a point in the unit hypercube, to a parameter vector.
    ///
    /// Returns `None` (and logs a warning) if the hypothesis is unsupported
    /// or `hcube` has the wrong number of dimensions.
    pub fn transform(&self, hcube: &[f64]) -> Option<Vec<f64>> {
        if !self.hypothesis.is_supported() {
            warn!("Illegal hypothesis {}; no prior transform", self.hypothesis);
            return None;
        }
        if hcube.len() != self.priors.len() {
            warn!(
                "Expected a {}-dimensional hypercube point for hypothesis {}, got {}",
                self.priors.len(),
                self.hypothesis,
                hcube.len()
            );
            return None;
        }

        let theta: Vec<f64> = self
            .priors
            .iter()
            .zip(hcube)
            .map(|(prior, &x)| prior.apply(x))
            .collect();
        trace!("Prior transform {hcube:?} -> {theta:?}");
        Some(theta)
    }
}
