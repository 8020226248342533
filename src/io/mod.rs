// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Getting observations into `zagros`.
//!
//! Measurement-set access is left to the host program, which implements
//! [`ObservationReader`]. Whatever the reader hands back goes through the same
//! post-processing and validation here.


use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use crate::{observation::ObservationError, Observation, ObservationParts, UVW};

/// What to read from a measurement set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// The path to the measurement set.
    pub ms: PathBuf,

    /// The name of the column holding the visibilities, e.g. "DATA".
    pub data_column: String,

    /// Negate the UVWs after reading. Visibilities predicted by some other
    /// packages use the opposite sign convention.
    pub invert_uvw: bool,
}

/// Something that can read the columns of an observation.
///
/// Implementations should drop autocorrelation rows, read only the first
/// spectral window, and attach the whole-row flags separately from the
/// per-visibility flags.
pub trait ObservationReader {
    fn read(&self, ms: &Path, data_column: &str) -> Result<ObservationParts, VisReadError>;
}

#[derive(Error, Debug)]
pub enum VisReadError {
    #[error("Couldn't read '{ms}': {err}")]
    Reader {
        ms: PathBuf,
        err: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("The column '{0}' isn't in the measurement set")]
    MissingColumn(String),

    #[error(transparent)]
    Observation(#[from] ObservationError),
}

/// Read an observation with `reader`, apply `options` and validate the
/// result.
pub fn read_observation(
    reader: &dyn ObservationReader,
    options: &ReadOptions,
) -> Result<Observation, VisReadError> {
    debug!(
        "Reading column {} of {}",
        options.data_column,
        options.ms.display()
    );
    let mut parts = reader.read(&options.ms, &options.data_column)?;
    if options.invert_uvw {
        debug!("Inverting UVWs");
        for uvw in parts.uvws.iter_mut() {
            *uvw = UVW {
                u: -uvw.u,
                v: -uvw.v,
                w: -uvw.w,
            };
        }
    }

    let obs = Observation::new(parts)?;
    info!(
        "Read {} rows x {} channels x {} correlations from {} antennas",
        obs.num_rows(),
        obs.num_chans(),
        obs.num_corrs(),
        obs.num_ants()
    );
    Ok(obs)
}
