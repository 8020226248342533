// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision. `zagros` should do as many
calculations as possible in double precision.
 */

pub use marlu::constants::VEL_C;
pub use std::f64::consts::{PI, TAU};

/// The default number of live points handed to the nested sampler.
pub const DEFAULT_NLIVE: usize = 1000;

/// The default number of live points used in the initial exploratory run of a
/// dynamic nested sampler.
pub const DEFAULT_NLIVE_INIT: usize = 100;

/// The default evidence tolerance used as a termination criterion.
pub const DEFAULT_PRECISION_CRITERION: f64 = 0.001;

/// The default dynamic goal; 0 maximises evidence accuracy, 1 maximises
/// parameter-estimation accuracy.
pub const DEFAULT_DYNAMIC_GOAL: f64 = 1.0;

/// The number of parameters describing a single point source: Stokes I flux
/// density and an offset in each direction from the phase centre.
pub const NUM_POINT_SOURCE_PARAMS: usize = 3;
