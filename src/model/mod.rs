// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to generate sky-model visibilities.

mod error;

pub use error::ModelError;

use log::trace;
use marlu::{c64, Jones, LmnRime, LMN};
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    constants::NUM_POINT_SOURCE_PARAMS,
    rime::{phase_delay, predict_vis, FeedBasis, Stokes},
    Hypothesis, Observation,
};

/// The correlation products held by each visibility, resolved once from the
/// length of the correlation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correlations {
    /// Only the first parallel-hand product (e.g. RR).
    One,

    /// Both parallel-hand products (e.g. RR and LL).
    Two,

    /// All four products (e.g. RR, RL, LR, LL).
    Four,
}

impl Correlations {
    pub fn from_count(num_corrs: usize) -> Result<Correlations, ModelError> {
        match num_corrs {
            1 => Ok(Correlations::One),
            2 => Ok(Correlations::Two),
            4 => Ok(Correlations::Four),
            _ => Err(ModelError::UnsupportedCorrelationCount { num_corrs }),
        }
    }

    pub fn count(self) -> usize {
        match self {
            Correlations::One => 1,
            Correlations::Two => 2,
            Correlations::Four => 4,
        }
    }

    /// The elements of a brightness matrix that these correlations see. One
    /// or two correlations only see the diagonal.
    pub fn select(self, b: Jones<f64>) -> Vec<c64> {
        match self {
            Correlations::One => vec![b[0]],
            Correlations::Two => vec![b[0], b[3]],
            Correlations::Four => vec![b[0], b[1], b[2], b[3]],
        }
    }
}

/// The units of the source-offset parameters.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum OffsetUnit {
    /// The offsets are already the direction cosines l and m.
    #[default]
    DirectionCosine,

    Radians,

    Degrees,

    Arcseconds,
}

impl OffsetUnit {
    /// Convert an offset from the phase centre into a direction cosine.
    /// Angular offsets `x` become `sin(x)`.
    pub fn to_direction_cosine(self, offset: f64) -> f64 {
        match self {
            OffsetUnit::DirectionCosine => offset,
            OffsetUnit::Radians => offset.sin(),
            OffsetUnit::Degrees => offset.to_radians().sin(),
            OffsetUnit::Arcseconds => (offset / 3600.0).to_radians().sin(),
        }
    }
}

/// A point source at a position relative to the phase centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSource {
    pub stokes: Stokes,

    /// Direction cosines of the source. `n` is always `sqrt(1 - l² - m²)`.
    pub l: f64,
    pub m: f64,
    pub n: f64,
}

impl PointSource {
    /// # Errors
    ///
    /// If `(l, m)` isn't inside the unit circle.
    pub fn new(stokes: Stokes, l: f64, m: f64) -> Result<PointSource, ModelError> {
        let n_sq = 1.0 - l * l - m * m;
        if n_sq.is_nan() || n_sq <= 0.0 {
            return Err(ModelError::NotOnSky { l, m });
        }
        Ok(PointSource {
            stokes,
            l,
            m,
            n: n_sq.sqrt(),
        })
    }
}

/// Turns parameter vectors into model visibilities.
#[derive(Debug, Clone, Copy)]
pub struct SkyModeller {
    corrs: Correlations,
    feed: FeedBasis,
    offset_unit: OffsetUnit,
}

impl SkyModeller {
    /// # Errors
    ///
    /// If `num_corrs` isn't 1, 2 or 4.
    pub fn new(
        num_corrs: usize,
        feed: FeedBasis,
        offset_unit: OffsetUnit,
    ) -> Result<SkyModeller, ModelError> {
        Ok(SkyModeller {
            corrs: Correlations::from_count(num_corrs)?,
            feed,
            offset_unit,
        })
    }

    pub fn correlations(&self) -> Correlations {
        self.corrs
    }

    pub fn feed(&self) -> FeedBasis {
        self.feed
    }

    pub fn offset_unit(&self) -> OffsetUnit {
        self.offset_unit
    }

    /// Interpret `theta` as the sources of a hypothesis.
    ///
    /// For [`Hypothesis::PointSource`], `theta` is the Stokes I flux density
    /// \[Jy\] followed by the x and y offsets from the phase centre.
    pub fn sky_model(
        &self,
        hypothesis: Hypothesis,
        theta: &[f64],
    ) -> Result<Vec<PointSource>, ModelError> {
        match hypothesis {
            Hypothesis::PointSource => {
                if theta.len() != NUM_POINT_SOURCE_PARAMS {
                    return Err(ModelError::ThetaLength {
                        hypothesis: hypothesis.id(),
                        expected: NUM_POINT_SOURCE_PARAMS,
                        got: theta.len(),
                    });
                }
                let l = self.offset_unit.to_direction_cosine(theta[1]);
                let m = self.offset_unit.to_direction_cosine(theta[2]);
                let source = PointSource::new(Stokes::unpolarised(theta[0]), l, m)?;
                Ok(vec![source])
            }

            Hypothesis::Unsupported(hypothesis) => {
                Err(ModelError::UnsupportedHypothesis { hypothesis })
            }
        }
    }

    /// Add the visibilities of `sources` to `vis_model`, which has the same
    /// dimensions as the observation's visibilities.
    pub fn model_with(
        &self,
        sources: &[PointSource],
        obs: &Observation,
        vis_model: ArrayViewMut3<c64>,
    ) {
        if sources.is_empty() {
            return;
        }
        assert_eq!(
            vis_model.dim(),
            obs.vis().dim(),
            "vis_model.dim() != obs.vis().dim()"
        );

        let lmns: Vec<LmnRime> = sources
            .iter()
            .map(|&PointSource { l, m, n, .. }| LMN { l, m, n }.prepare_for_rime())
            .collect();
        let phase = phase_delay(&lmns, obs.uvws(), obs.chan_freqs());

        let num_corrs = self.corrs.count();
        let mut coherencies = Array2::zeros((sources.len(), num_corrs));
        coherencies
            .outer_iter_mut()
            .zip(sources)
            .for_each(|(mut coherency, source)| {
                let selected = self.corrs.select(self.feed.brightness(source.stokes));
                coherency
                    .iter_mut()
                    .zip(selected)
                    .for_each(|(c, s)| *c = s);
            });
        trace!("Modelling {} sources", sources.len());

        predict_vis(phase.view(), coherencies.view(), vis_model);
    }

    /// Generate the model visibilities of a hypothesis with parameters
    /// `theta`, `[row][channel][correlation]`.
    ///
    /// This function is not as efficient as [`SkyModeller::model_with`] when
    /// the caller already has a buffer.
    pub fn model(
        &self,
        hypothesis: Hypothesis,
        theta: &[f64],
        obs: &Observation,
    ) -> Result<Array3<c64>, ModelError> {
        let sources = self.sky_model(hypothesis, theta)?;
        let mut vis_model = Array3::zeros(obs.vis().dim());
        self.model_with(&sources, obs, vis_model.view_mut());
        Ok(vis_model)
    }
}
