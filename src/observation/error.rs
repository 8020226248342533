// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors from assembling an [`super::Observation`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ObservationError {
    #[error("The observation has no rows (were all rows autocorrelations?)")]
    NoRows,

    #[error("The observation has no frequency channels")]
    NoChannels,

    #[error("The observation has no correlations")]
    NoCorrelations,

    #[error("The observation has {num_ants} antennas; at least 2 are needed to form a baseline")]
    TooFewAntennas { num_ants: usize },

    #[error("The {column} column has {got} rows, but the visibilities have {expected}")]
    ColumnLength {
        column: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("The flag array has shape {got:?}, but the visibilities have shape {expected:?}")]
    FlagShape {
        expected: (usize, usize, usize),
        got: (usize, usize, usize),
    },

    #[error("There are {got} channel frequencies, but the visibilities have {expected} channels")]
    ChannelFrequencies { expected: usize, got: usize },

    #[error("Row {row} is an autocorrelation of antenna {ant}; autocorrelations must be excluded")]
    Autocorrelation { row: usize, ant: usize },

    #[error("Row {row} has antenna1 ({ant1}) > antenna2 ({ant2}); baselines must be ordered")]
    UnorderedBaseline { row: usize, ant1: usize, ant2: usize },

    #[error("Row {row} refers to antenna {ant}, but there are only {num_ants} antennas")]
    AntennaOutOfRange {
        row: usize,
        ant: usize,
        num_ants: usize,
    },

    #[error("Row {row} has unique-time index {index}, but there are only {num_timestamps} unique timestamps")]
    TimeIndexOutOfRange {
        row: usize,
        index: usize,
        num_timestamps: usize,
    },
}
