// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Observed visibilities and the metadata needed to model them.

This can be thought of as what remains of a measurement set once it has been
read: cross-correlation rows only, a single spectral window, and flags
already attached. It never changes after it has been built.
 */

mod error;

pub use error::ObservationError;

use hifitime::Epoch;
use itertools::Itertools;
use marlu::{c64, UVW};
use ndarray::prelude::*;
use vec1::Vec1;

/// The raw columns of an observation, as handed over by a reader. Turn this
/// into an [`Observation`] with [`Observation::new`], which checks that the
/// columns are consistent.
#[derive(Debug, Clone)]
pub struct ObservationParts {
    /// Visibilities with dimensions `[row][channel][correlation]`.
    pub vis: Array3<c64>,

    /// Flags with the same dimensions as `vis`.
    pub flags: Array3<bool>,

    /// Whole-row flags.
    pub flag_row: Vec<bool>,

    /// The [`UVW`] coordinate of each row \[metres\].
    pub uvws: Vec<UVW>,

    /// The first antenna of each row.
    pub ant1: Vec<usize>,

    /// The second antenna of each row.
    pub ant2: Vec<usize>,

    /// The integration time (exposure) of each row \[seconds\].
    pub integration_times: Vec<f64>,

    /// The centre frequency of each channel \[Hz\].
    pub chan_freqs: Vec1<f64>,

    /// The width of a channel \[Hz\]. Only one spectral window is handled, so
    /// all channels share this width.
    pub chan_width: f64,

    /// The number of antennas in the array, including any that don't appear
    /// in the rows.
    pub num_ants: usize,

    /// For each row, the index into `timestamps`.
    pub time_index: Vec<usize>,

    /// The unique timestamps of the observation.
    pub timestamps: Vec1<Epoch>,
}

/// A validated, immutable observation.
#[derive(Debug, Clone)]
pub struct Observation {
    vis: Array3<c64>,
    flags: Array3<bool>,
    flag_row: Vec<bool>,
    uvws: Vec<UVW>,
    ant1: Vec<usize>,
    ant2: Vec<usize>,
    integration_times: Vec<f64>,
    chan_freqs: Vec1<f64>,
    chan_width: f64,
    num_ants: usize,
    time_index: Vec<usize>,
    timestamps: Vec1<Epoch>,
}

impl Observation {
    /// Check the supplied columns for consistency.
    ///
    /// # Errors
    ///
    /// Any mismatch between column lengths, flag and visibility shapes,
    /// autocorrelation rows, unordered or out-of-range antenna indices and
    /// out-of-range time indices are reported as an [`ObservationError`].
    pub fn new(parts: ObservationParts) -> Result<Observation, ObservationError> {
        let ObservationParts {
            vis,
            flags,
            flag_row,
            uvws,
            ant1,
            ant2,
            integration_times,
            chan_freqs,
            chan_width,
            num_ants,
            time_index,
            timestamps,
        } = parts;

        let (num_rows, num_chans, num_corrs) = vis.dim();
        if num_rows == 0 {
            return Err(ObservationError::NoRows);
        }
        if num_chans == 0 {
            return Err(ObservationError::NoChannels);
        }
        if num_corrs == 0 {
            return Err(ObservationError::NoCorrelations);
        }
        if num_ants < 2 {
            return Err(ObservationError::TooFewAntennas { num_ants });
        }
        if flags.dim() != vis.dim() {
            return Err(ObservationError::FlagShape {
                expected: vis.dim(),
                got: flags.dim(),
            });
        }
        if chan_freqs.len() != num_chans {
            return Err(ObservationError::ChannelFrequencies {
                expected: num_chans,
                got: chan_freqs.len(),
            });
        }
        for (column, len) in [
            ("FLAG_ROW", flag_row.len()),
            ("UVW", uvws.len()),
            ("ANTENNA1", ant1.len()),
            ("ANTENNA2", ant2.len()),
            ("EXPOSURE", integration_times.len()),
            ("TIME", time_index.len()),
        ] {
            if len != num_rows {
                return Err(ObservationError::ColumnLength {
                    column,
                    expected: num_rows,
                    got: len,
                });
            }
        }

        for (row, (&a1, &a2)) in ant1.iter().zip(ant2.iter()).enumerate() {
            if a1 == a2 {
                return Err(ObservationError::Autocorrelation { row, ant: a1 });
            }
            if a1 > a2 {
                return Err(ObservationError::UnorderedBaseline {
                    row,
                    ant1: a1,
                    ant2: a2,
                });
            }
            // a1 < a2, so only a2 needs checking.
            if a2 >= num_ants {
                return Err(ObservationError::AntennaOutOfRange {
                    row,
                    ant: a2,
                    num_ants,
                });
            }
        }

        if let Some((row, &index)) = time_index
            .iter()
            .enumerate()
            .find(|(_, &i)| i >= timestamps.len())
        {
            return Err(ObservationError::TimeIndexOutOfRange {
                row,
                index,
                num_timestamps: timestamps.len(),
            });
        }

        Ok(Observation {
            vis,
            flags,
            flag_row,
            uvws,
            ant1,
            ant2,
            integration_times,
            chan_freqs,
            chan_width,
            num_ants,
            time_index,
            timestamps,
        })
    }

    /// The observed visibilities, `[row][channel][correlation]`.
    pub fn vis(&self) -> ArrayView3<c64> {
        self.vis.view()
    }

    /// The per-visibility flags, `[row][channel][correlation]`. These do not
    /// include the row flags; see [`Observation::is_flagged`].
    pub fn flags(&self) -> ArrayView3<bool> {
        self.flags.view()
    }

    pub fn flag_row(&self) -> &[bool] {
        &self.flag_row
    }

    /// Is this visibility flagged, either by itself or because its whole row
    /// is flagged? Everything that masks flagged data goes through this.
    pub fn is_flagged(&self, row: usize, chan: usize, corr: usize) -> bool {
        self.flag_row[row] || self.flags[(row, chan, corr)]
    }

    pub fn uvws(&self) -> &[UVW] {
        &self.uvws
    }

    pub fn ant1(&self) -> &[usize] {
        &self.ant1
    }

    pub fn ant2(&self) -> &[usize] {
        &self.ant2
    }

    /// \[seconds\]
    pub fn integration_times(&self) -> &[f64] {
        &self.integration_times
    }

    /// \[Hz\]
    pub fn chan_freqs(&self) -> &Vec1<f64> {
        &self.chan_freqs
    }

    /// \[Hz\]
    pub fn chan_width(&self) -> f64 {
        self.chan_width
    }

    pub fn num_ants(&self) -> usize {
        self.num_ants
    }

    /// The number of cross-correlation baselines the array can form. This is
    /// not necessarily the number of baselines present in the rows.
    pub fn num_baselines(&self) -> usize {
        (self.num_ants * (self.num_ants - 1)) / 2
    }

    pub fn num_rows(&self) -> usize {
        self.vis.len_of(Axis(0))
    }

    pub fn num_chans(&self) -> usize {
        self.vis.len_of(Axis(1))
    }

    pub fn num_corrs(&self) -> usize {
        self.vis.len_of(Axis(2))
    }

    pub fn time_index(&self) -> &[usize] {
        &self.time_index
    }

    pub fn timestamps(&self) -> &Vec1<Epoch> {
        &self.timestamps
    }

    /// The sorted, de-duplicated antenna labels appearing in either antenna
    /// column.
    pub fn unique_antennas(&self) -> Vec<usize> {
        self.ant1
            .iter()
            .chain(self.ant2.iter())
            .copied()
            .sorted_unstable()
            .dedup()
            .collect()
    }

    /// Count the visibilities that are not flagged by either their own flag
    /// or their row's flag.
    pub fn num_unflagged(&self) -> usize {
        self.flags
            .indexed_iter()
            .filter(|&((row, chan, corr), _)| !self.is_flagged(row, chan, corr))
            .count()
    }
}
