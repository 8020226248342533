// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Bayesian likelihood evaluation for radio-interferometric visibilities.

`zagros` compares observed visibilities against visibilities predicted from a
parametric sky model, producing the Gaussian log-likelihood a nested sampler
needs. The pieces, leaf-first:

- [`math::BaselineIndex`]: which rows belong to which antenna pair;
- [`noise::NoiseModel`]: per-visibility weights from SEFDs or a simulated
  sigma;
- [`model::SkyModeller`]: point-source model visibilities (using the
  primitives in [`rime`]);
- [`likelihood::EvaluationContext`]: chi-squared and log-likelihood, with an
  explicit `prepare` then `evaluate` lifecycle;
- [`prior::PriorTransform`]: unit hypercube to physical parameters.

Reading measurement sets and running the nested-sampling algorithm are left
to the host program, through the [`io::ObservationReader`] and
[`sampler::NestedSampler`] traits.
 */

pub mod cli;
pub mod constants;
mod error;
pub mod io;
pub mod likelihood;
pub mod math;
pub mod model;
pub mod noise;
pub mod observation;
pub mod params;
pub mod prior;
pub mod rime;
pub mod sampler;

#[cfg(test)]
mod tests;

// Re-exports.
pub use error::{ErrorKind, ZagrosError};
pub use likelihood::EvaluationContext;
pub use marlu::{c64, Jones, UVW};
pub use observation::{Observation, ObservationParts};
pub use prior::{Hypothesis, PriorTransform};
