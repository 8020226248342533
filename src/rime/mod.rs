// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Radio-interferometer measurement equation (RIME) primitives.

Only what a direction-independent point-source model needs: phase delays,
Stokes-to-brightness conversion and summing coherencies onto visibilities.
There are no Jones terms (beams, gains) here.
 */


use marlu::{c64, Jones, LmnRime, UVW};
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::{constants::VEL_C, math::cexp};

/// The four Stokes flux densities of a source \[Jy\].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stokes {
    pub i: f64,
    pub q: f64,
    pub u: f64,
    pub v: f64,
}

impl Stokes {
    /// An unpolarised source.
    pub fn unpolarised(i: f64) -> Stokes {
        Stokes {
            i,
            ..Default::default()
        }
    }
}

/// The polarisation basis of the antenna feeds, which determines how Stokes
/// parameters become correlations.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FeedBasis {
    /// RR, RL, LR, LL.
    #[default]
    #[strum(serialize = "circular")]
    Circular,

    /// XX, XY, YX, YY.
    #[strum(serialize = "linear")]
    Linear,
}

impl FeedBasis {
    /// Convert Stokes flux densities into a brightness matrix, ordered
    /// `[p0q0, p0q1, p1q0, p1q1]` for the feeds `p` and `q` of this basis.
    pub fn brightness(self, Stokes { i, q, u, v }: Stokes) -> Jones<f64> {
        match self {
            FeedBasis::Circular => Jones::from([
                c64::new(i + v, 0.0),
                c64::new(q, u),
                c64::new(q, -u),
                c64::new(i - v, 0.0),
            ]),

            FeedBasis::Linear => Jones::from([
                c64::new(i + q, 0.0),
                c64::new(u, v),
                c64::new(u, -v),
                c64::new(i - q, 0.0),
            ]),
        }
    }

    /// The names of the correlation products, in brightness-matrix order.
    pub fn correlation_names(self) -> [&'static str; 4] {
        match self {
            FeedBasis::Circular => ["RR", "RL", "LR", "LL"],
            FeedBasis::Linear => ["XX", "XY", "YX", "YY"],
        }
    }
}

/// Phase delays for each source, row and channel; the output has dimensions
/// `[source][row][channel]`.
///
/// Each element is `exp(-2πi f/c (ul + vm + w(n-1)))`. `lmns` must have been
/// made with [`marlu::LMN::prepare_for_rime`], which carries the 2π and the
/// `n-1`. `uvws` are in \[metres\] and `freqs` in \[Hz\].
pub fn phase_delay(lmns: &[LmnRime], uvws: &[UVW], freqs: &[f64]) -> Array3<c64> {
    let mut phase = Array3::zeros((lmns.len(), uvws.len(), freqs.len()));
    phase
        .outer_iter_mut()
        .zip(lmns)
        .for_each(|(mut phase_rc, &LmnRime { l, m, n })| {
            phase_rc
                .outer_iter_mut()
                .zip(uvws)
                .for_each(|(mut phase_c, &uvw)| {
                    phase_c.iter_mut().zip(freqs).for_each(|(p, &freq)| {
                        // Divide UVW by lambda to make UVW dimensionless.
                        let UVW { u, v, w } = uvw * freq / VEL_C;
                        *p = cexp(-(u * l + v * m + w * n));
                    })
                });
        });
    phase
}

/// Sum each source's coherency, scaled by its phase delay, onto the model
/// visibilities.
///
/// `phase`: `[source][row][channel]`, from [`phase_delay`].
///
/// `coherencies`: `[source][correlation]`, the correlations of each source's
/// brightness matrix that the visibilities hold.
///
/// `vis_model`: `[row][channel][correlation]`. This is added to, not
/// overwritten.
pub fn predict_vis(
    phase: ArrayView3<c64>,
    coherencies: ArrayView2<c64>,
    mut vis_model: ArrayViewMut3<c64>,
) {
    assert_eq!(
        phase.len_of(Axis(0)),
        coherencies.len_of(Axis(0)),
        "phase.len_of(Axis(0)) != coherencies.len_of(Axis(0))"
    );
    assert_eq!(
        (phase.len_of(Axis(1)), phase.len_of(Axis(2))),
        (vis_model.len_of(Axis(0)), vis_model.len_of(Axis(1))),
        "phase and vis_model disagree on rows and channels"
    );
    assert_eq!(
        coherencies.len_of(Axis(1)),
        vis_model.len_of(Axis(2)),
        "coherencies.len_of(Axis(1)) != vis_model.len_of(Axis(2))"
    );

    for (phase_rc, coherency) in phase.outer_iter().zip(coherencies.outer_iter()) {
        vis_model
            .outer_iter_mut()
            .zip(phase_rc.outer_iter())
            .for_each(|(mut vis_model_cp, phase_c)| {
                vis_model_cp
                    .outer_iter_mut()
                    .zip(phase_c.iter())
                    .for_each(|(mut vis_model_p, &p)| {
                        vis_model_p
                            .iter_mut()
                            .zip(coherency.iter())
                            .for_each(|(vis, &b)| *vis += p * b);
                    });
            });
    }
}
