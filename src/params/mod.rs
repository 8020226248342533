// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parameters that configure a `zagros` run, as read from a parameter file.
//!
//! All fields are optional in the file; what must be present depends on the
//! hypothesis and is checked when the parameters are turned into the types
//! the rest of `zagros` uses. Command-line arguments override anything set
//! here.

mod error;

pub use error::ParamsError;

use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
    str::FromStr,
};

use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    constants::{
        DEFAULT_DYNAMIC_GOAL, DEFAULT_NLIVE, DEFAULT_NLIVE_INIT, DEFAULT_PRECISION_CRITERION,
    },
    model::OffsetUnit,
    noise::NoiseModel,
    prior::PointSourcePriors,
    rime::FeedBasis,
    sampler::SamplerSettings,
};

lazy_static::lazy_static! {
    pub(crate) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");
}

/// The formats a parameter file may be written in, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
pub enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
    #[strum(to_string = "yaml", serialize = "yml")]
    Yaml,
}

/// Everything a parameter file can hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZagrosParams {
    pub priors: Option<PointSourcePriors>,

    #[serde(default)]
    pub noise: NoiseParams,

    #[serde(default)]
    pub modelling: ModellingParams,

    #[serde(default)]
    pub sampler: SamplerParams,
}

impl ZagrosParams {
    /// Read parameters from a TOML, JSON or YAML file, chosen by its
    /// extension.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<ZagrosParams, ParamsError> {
        let file = file.as_ref();
        debug!("Attempting to parse parameter file {}", file.display());

        let file_type = file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok())
            .ok_or_else(|| ParamsError::UnrecognisedExtension {
                file: file.to_path_buf(),
                valid: ARG_FILE_TYPES_COMMA_SEPARATED.to_string(),
            })?;

        let mut contents = String::new();
        File::open(file)?.read_to_string(&mut contents)?;
        ZagrosParams::from_str_as(&contents, file_type).map_err(|err| ParamsError::Decode {
            file: file.to_path_buf(),
            file_type,
            err,
        })
    }

    /// Parse parameters from a string in the given format. The error is the
    /// decoder's message.
    pub fn from_str_as(contents: &str, file_type: ArgFileTypes) -> Result<ZagrosParams, String> {
        debug!("Parsing {file_type} parameters...");
        match file_type {
            ArgFileTypes::Toml => toml::from_str(contents).map_err(|e| e.to_string()),
            ArgFileTypes::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
            ArgFileTypes::Yaml => serde_yaml::from_str(contents).map_err(|e| e.to_string()),
        }
    }

    /// Serialise these parameters as TOML, e.g. to reproduce a run.
    pub fn to_toml(&self) -> Result<String, ParamsError> {
        toml::to_string(self).map_err(|e| ParamsError::Encode(e.to_string()))
    }
}

/// How the visibility noise is set. Exactly one of these must be given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoiseParams {
    /// The system-equivalent flux density of each antenna \[Jy\], indexed by
    /// antenna number.
    pub sefds: Option<Vec<f64>>,

    /// A single noise σ for every visibility \[Jy\], e.g. the noise added to a
    /// simulation.
    pub sigma_sim: Option<f64>,
}

impl NoiseParams {
    pub fn to_noise_model(&self) -> Result<NoiseModel, ParamsError> {
        match (&self.sefds, self.sigma_sim) {
            (Some(sefds), None) => Ok(NoiseModel::PerBaseline {
                sefds: sefds.clone(),
            }),
            (None, Some(sigma)) => Ok(NoiseModel::Uniform { sigma }),
            (Some(_), Some(_)) => Err(ParamsError::AmbiguousNoise),
            (None, None) => Err(ParamsError::MissingNoise),
        }
    }
}

/// Choices about how model visibilities are formed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModellingParams {
    #[serde(default)]
    pub feed_basis: FeedBasis,

    #[serde(default)]
    pub offset_unit: OffsetUnit,
}

/// The largest seed that survives a round trip through a parameter file.
pub const MAX_SEED: u64 = i64::MAX as u64;

/// Nested-sampler settings. Anything not given takes a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplerParams {
    pub nlive: Option<usize>,
    pub nlive_init: Option<usize>,
    pub num_repeats: Option<usize>,
    pub precision_criterion: Option<f64>,
    pub seed: Option<u64>,
    pub dynamic_goal: Option<f64>,
    pub do_clustering: Option<bool>,
    pub read_resume: Option<bool>,
}

impl SamplerParams {
    /// Fill in defaults. The number of repeats defaults to 5 per parameter.
    pub fn to_settings(
        &self,
        num_params: usize,
        base_dir: PathBuf,
        file_root: String,
    ) -> Result<SamplerSettings, ParamsError> {
        let nlive = self.nlive.unwrap_or(DEFAULT_NLIVE);
        let nlive_init = self.nlive_init.unwrap_or(DEFAULT_NLIVE_INIT);
        let num_repeats = self.num_repeats.unwrap_or(5 * num_params);
        let precision_criterion = self
            .precision_criterion
            .unwrap_or(DEFAULT_PRECISION_CRITERION);
        let dynamic_goal = self.dynamic_goal.unwrap_or(DEFAULT_DYNAMIC_GOAL);

        if nlive == 0 || nlive_init == 0 {
            return Err(ParamsError::ZeroLivePoints);
        }
        if nlive_init > nlive {
            return Err(ParamsError::TooManyInitialLivePoints { nlive, nlive_init });
        }
        if num_repeats == 0 {
            return Err(ParamsError::ZeroRepeats);
        }
        if !(precision_criterion > 0.0 && precision_criterion.is_finite()) {
            return Err(ParamsError::PrecisionCriterion(precision_criterion));
        }
        if !(0.0..=1.0).contains(&dynamic_goal) {
            return Err(ParamsError::DynamicGoal(dynamic_goal));
        }
        // TOML integers are signed.
        if let Some(seed) = self.seed.filter(|&s| s > MAX_SEED) {
            return Err(ParamsError::SeedTooLarge {
                seed,
                max: MAX_SEED,
            });
        }

        Ok(SamplerSettings {
            num_params,
            num_derived: 0,
            nlive,
            nlive_init,
            num_repeats,
            precision_criterion,
            seed: self.seed,
            dynamic_goal,
            do_clustering: self.do_clustering.unwrap_or(false),
            read_resume: self.read_resume.unwrap_or(false),
            base_dir,
            file_root,
        })
    }
}
