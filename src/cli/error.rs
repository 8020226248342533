// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors from inconsistent command-line arguments.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliArgsError {
    #[error("Hypothesis {0} is not supported; only hypothesis 0 (a single point source) can be sampled")]
    UnsupportedHypothesis(u8),

    #[error("Hypothesis {hypothesis} has {expected} parameters, but --npar is {got}")]
    ParamCount {
        hypothesis: u8,
        expected: usize,
        got: usize,
    },

    #[error("Hypothesis {hypothesis} needs {expected_points} point source(s) and {expected_gaussians} Gaussian source(s), but --npsrc is {npsrc} and --ngsrc is {ngsrc}")]
    SourceCounts {
        hypothesis: u8,
        expected_points: usize,
        expected_gaussians: usize,
        npsrc: usize,
        ngsrc: usize,
    },
}
