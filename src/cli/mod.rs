// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line interface code.
//!
//! `zagros` doesn't ship an executable; a host program that can read
//! measurement sets and run a nested sampler parses [`ZagrosArgs`] and hands
//! its reader and sampler to [`ZagrosArgs::run`].

mod error;
mod printers;

pub use error::CliArgsError;

use std::{
    borrow::Cow,
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use clap::{AppSettings, Parser};
use log::{debug, info};

use crate::{
    constants::VEL_C,
    io::{read_observation, ObservationReader, ReadOptions},
    model::{Correlations, OffsetUnit, SkyModeller},
    noise::NoiseModel,
    params::{ParamsError, ZagrosParams, ARG_FILE_TYPES_COMMA_SEPARATED},
    prior::PriorTransform,
    rime::FeedBasis,
    sampler::{NestedSampler, SamplerError, SamplerRun, SamplerSettings},
    EvaluationContext, Hypothesis, ZagrosError,
};
use printers::InfoPrinter;

// Add build-time information from the "built" crate.
include!(concat!(env!("OUT_DIR"), "/built.rs"));

lazy_static::lazy_static! {
    static ref PARAMS_HELP: String =
        format!("Priors, noise, modelling and sampler settings may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);
}

#[derive(Debug, Clone, Parser)]
#[clap(
    version,
    author,
    about = "Bayesian inference of sky-model parameters from radio-interferometric visibilities"
)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
#[clap(infer_long_args = true)]
pub struct ZagrosArgs {
    /// The input measurement set.
    pub ms: PathBuf,

    /// The name of the data column in the measurement set, e.g. DATA.
    pub col: String,

    /// Invert the UVW coordinates. Necessary to compare against visibilities
    /// generated with the opposite sign convention (e.g. by MeqTrees).
    #[clap(long, alias = "iuvw")]
    pub invert_uvw: bool,

    /// The hypothesis to test. 0 is a single point source.
    #[clap(long, possible_values(&["0", "1", "2"]))]
    pub hypo: u8,

    /// The number of point sources in the hypothesis.
    #[clap(long)]
    pub npsrc: usize,

    /// The number of Gaussian sources in the hypothesis.
    #[clap(long)]
    pub ngsrc: usize,

    /// The number of parameters being sampled.
    #[clap(long)]
    pub npar: usize,

    /// The directory that sampler outputs are written to.
    #[clap(long)]
    pub basedir: PathBuf,

    /// The prefix of all sampler output files.
    #[clap(long)]
    pub fileroot: String,

    #[clap(long, help = PARAMS_HELP.as_str(), help_heading = "CONFIGURATION")]
    pub params: Option<PathBuf>,

    /// The SEFD of each antenna, indexed by antenna number [Jy].
    #[clap(long, multiple_values(true), help_heading = "NOISE")]
    pub sefds: Option<Vec<f64>>,

    /// Use this noise sigma for every visibility rather than SEFDs [Jy].
    #[clap(long, help_heading = "NOISE")]
    pub sigma_sim: Option<f64>,

    /// The polarisation basis of the feeds: circular or linear. Default:
    /// circular
    #[clap(long, help_heading = "MODELLING")]
    pub feed_basis: Option<FeedBasis>,

    /// The units of the source offsets: direction-cosine, radians, degrees or
    /// arcseconds. Default: direction-cosine
    #[clap(long, help_heading = "MODELLING")]
    pub offset_unit: Option<OffsetUnit>,

    /// The number of live points.
    #[clap(long, help_heading = "SAMPLER")]
    pub nlive: Option<usize>,

    /// The number of live points in the initial exploratory run.
    #[clap(long, help_heading = "SAMPLER")]
    pub nlive_init: Option<usize>,

    /// The length of each slice-sampling chain. Default: 5 per parameter
    #[clap(long, help_heading = "SAMPLER")]
    pub num_repeats: Option<usize>,

    /// The evidence tolerance used to stop sampling.
    #[clap(long, help_heading = "SAMPLER")]
    pub precision_criterion: Option<f64>,

    /// The random seed given to the sampler.
    #[clap(long, help_heading = "SAMPLER")]
    pub seed: Option<u64>,

    /// The verbosity of the program. Increase by specifying multiple times
    /// (e.g. -vv). The default is to print only high-level information.
    #[clap(short, long, parse(from_occurrences))]
    pub verbosity: u8,

    /// Only verify that arguments were correctly ingested and print out
    /// high-level information.
    #[clap(long)]
    pub dry_run: bool,

    /// Save the merged parameters into a new TOML file that can be used to
    /// reproduce this run.
    #[clap(long)]
    pub save_toml: Option<PathBuf>,
}

impl ZagrosArgs {
    /// Combine the parameter file (if any) with the command-line arguments,
    /// preferring the command line.
    pub fn merge(&self) -> Result<ZagrosParams, ParamsError> {
        debug!("Merging command-line arguments with the parameter file");
        let mut params = match &self.params {
            Some(file) => ZagrosParams::from_file(file)?,
            None => ZagrosParams::default(),
        };

        // Noise on the command line replaces the whole noise section, so that
        // the file's other noise model doesn't make things ambiguous.
        if self.sefds.is_some() || self.sigma_sim.is_some() {
            params.noise.sefds = self.sefds.clone();
            params.noise.sigma_sim = self.sigma_sim;
        }
        if let Some(feed_basis) = self.feed_basis {
            params.modelling.feed_basis = feed_basis;
        }
        if let Some(offset_unit) = self.offset_unit {
            params.modelling.offset_unit = offset_unit;
        }
        let sampler = &mut params.sampler;
        sampler.nlive = self.nlive.or(sampler.nlive);
        sampler.nlive_init = self.nlive_init.or(sampler.nlive_init);
        sampler.num_repeats = self.num_repeats.or(sampler.num_repeats);
        sampler.precision_criterion = self.precision_criterion.or(sampler.precision_criterion);
        sampler.seed = self.seed.or(sampler.seed);

        Ok(params)
    }

    /// Check that the hypothesis and the source and parameter counts agree.
    pub fn validate(&self) -> Result<Hypothesis, CliArgsError> {
        let hypothesis = Hypothesis::from(self.hypo);
        let num_params = match hypothesis.num_params() {
            Some(n) => n,
            None => return Err(CliArgsError::UnsupportedHypothesis(self.hypo)),
        };
        if self.npar != num_params {
            return Err(CliArgsError::ParamCount {
                hypothesis: self.hypo,
                expected: num_params,
                got: self.npar,
            });
        }
        if hypothesis == Hypothesis::PointSource && (self.npsrc != 1 || self.ngsrc != 0) {
            return Err(CliArgsError::SourceCounts {
                hypothesis: self.hypo,
                expected_points: 1,
                expected_gaussians: 0,
                npsrc: self.npsrc,
                ngsrc: self.ngsrc,
            });
        }
        Ok(hypothesis)
    }

    /// Set everything up and run `sampler` over the likelihood. Nothing is
    /// sampled for a dry run, and `None` is returned.
    pub fn run(
        self,
        reader: &dyn ObservationReader,
        sampler: &mut dyn NestedSampler,
    ) -> Result<Option<SamplerRun>, ZagrosError> {
        if setup_logging(self.verbosity).is_err() {
            debug!("A logger was already set up; not changing it");
        }
        info!("zagros {}", env!("CARGO_PKG_VERSION"));
        display_build_info();

        let params = self.merge()?;
        // Validate the sampler settings before anything is written out.
        let settings = params.sampler.to_settings(
            self.npar,
            self.basedir.clone(),
            self.fileroot.clone(),
        )?;
        if let Some(toml) = &self.save_toml {
            let mut f = BufWriter::new(File::create(toml)?);
            f.write_all(params.to_toml()?.as_bytes())?;
            info!("Saved parameters to {}", toml.display());
        }

        let hypothesis = self.validate()?;
        let priors = params.priors.ok_or(ParamsError::MissingPriors)?;
        let prior_transform = PriorTransform::new(hypothesis, &priors)?;
        let noise = params.noise.to_noise_model()?;

        let read_options = ReadOptions {
            ms: self.ms.clone(),
            data_column: self.col.clone(),
            invert_uvw: self.invert_uvw,
        };
        let obs = read_observation(reader, &read_options)?;
        let mut context = EvaluationContext::new(obs, hypothesis, noise, params.modelling)?;
        // Prepare now, so that any problem with the noise model is reported
        // before sampling starts.
        context.prepare()?;

        print_setup(&read_options, &context, &prior_transform, &settings);

        if self.dry_run {
            info!("Dry run -- exiting now.");
            return Ok(None);
        }

        let prior = |hcube: &[f64]| prior_transform.transform(hcube);
        let loglike = |theta: &[f64]| {
            context
                .evaluate(theta)
                .map_err(|e| Box::new(e) as SamplerError)
        };
        let run = sampler
            .run(&settings, &prior, &loglike)
            .map_err(ZagrosError::Sampler)?;

        if let Some((log_z, log_z_err)) = run.log_evidence {
            info!("ln Z = {log_z} ± {log_z_err}");
        }
        info!(
            "zagros complete after {} likelihood evaluations.",
            run.num_likelihood_calls
        );
        Ok(Some(run))
    }
}

fn print_setup(
    read_options: &ReadOptions,
    context: &EvaluationContext,
    prior_transform: &PriorTransform,
    settings: &SamplerSettings,
) {
    let obs = context.observation();
    let modeller = context.modeller();

    let mut printer = InfoPrinter::new("Likelihood set up".into());
    let mut block: Vec<Cow<'static, str>> = vec![
        format!("Measurement set: {}", read_options.ms.display()).into(),
        format!("Data column: {}", read_options.data_column).into(),
    ];
    if read_options.invert_uvw {
        block.push("UVWs inverted".into());
    }
    printer.push_block(block);

    let freqs = obs.chan_freqs();
    printer.push_block(vec![
        format!(
            "{} rows, {} channels, {} correlations ({})",
            obs.num_rows(),
            obs.num_chans(),
            obs.num_corrs(),
            correlation_names(modeller).join(" ")
        )
        .into(),
        format!(
            "{} antennas, {} baselines, {} timestamps",
            obs.num_ants(),
            obs.num_baselines(),
            obs.timestamps().len()
        )
        .into(),
        format!(
            "Frequencies {:.3}-{:.3} MHz, channel width {} kHz (λ ≈ {:.3} m)",
            freqs.first() / 1e6,
            freqs.last() / 1e6,
            obs.chan_width() / 1e3,
            VEL_C / freqs.first()
        )
        .into(),
    ]);

    let hypothesis = context.hypothesis();
    let mut block: Vec<Cow<'static, str>> = vec![format!("Hypothesis {hypothesis}").into()];
    for (name, prior) in hypothesis.param_names().iter().zip(prior_transform.priors()) {
        block.push(
            format!(
                "{name}: {} [{}, {}]",
                prior.distribution, prior.min, prior.max
            )
            .into(),
        );
    }
    if hypothesis == Hypothesis::PointSource {
        block.push(format!("Offsets in {}", modeller.offset_unit()).into());
    }
    printer.push_block(block);

    printer.push_line(
        match context.noise() {
            NoiseModel::PerBaseline { sefds } => {
                format!("Noise from per-antenna SEFDs ({} given)", sefds.len())
            }
            NoiseModel::Uniform { sigma } => format!("Noise sigma {sigma} Jy everywhere"),
        }
        .into(),
    );

    let mut block: Vec<Cow<'static, str>> = vec![
        format!(
            "{} live points ({} initially), {} repeats",
            settings.nlive, settings.nlive_init, settings.num_repeats
        )
        .into(),
        format!(
            "Precision criterion {}, dynamic goal {}",
            settings.precision_criterion, settings.dynamic_goal
        )
        .into(),
        format!(
            "Outputs: {}/{}",
            settings.base_dir.display(),
            settings.file_root
        )
        .into(),
    ];
    if let Some(seed) = settings.seed {
        block.push(format!("Seed {seed}").into());
    }
    printer.push_block(block);

    printer.display();
}

fn correlation_names(modeller: &SkyModeller) -> Vec<&'static str> {
    let names = modeller.feed().correlation_names();
    match modeller.correlations() {
        Correlations::One => vec![names[0]],
        Correlations::Two => vec![names[0], names[3]],
        Correlations::Four => names.to_vec(),
    }
}

/// Activate a logger. All log messages are put onto `stdout`. `env_logger`
/// automatically only uses colours and fancy symbols if we're on a tty (e.g. a
/// terminal); piped output will be formatted sensibly. Source code lines are
/// displayed in log messages when verbosity >= 3.
pub fn setup_logging(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stdout);
    builder.format_target(false);
    match verbosity {
        0 => builder.filter_level(log::LevelFilter::Info),
        1 => builder.filter_level(log::LevelFilter::Debug),
        2 => builder.filter_level(log::LevelFilter::Trace),
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
            builder.format(|buf, record| {
                let timestamp = buf.timestamp();
                let level = record.level();
                let target = record.target();
                let line = record.line().unwrap_or(0);
                let message = record.args();

                writeln!(buf, "[{timestamp} {level} {target}:{line}] {message}")
            })
        }
    };
    builder.try_init()
}

/// Write many info-level log lines of how this library was compiled.
pub fn display_build_info() {
    let dirty = match GIT_DIRTY {
        Some(true) => " (dirty)",
        _ => "",
    };
    match GIT_COMMIT_HASH_SHORT {
        Some(hash) => {
            info!("Compiled on git commit hash: {hash}{dirty}");
        }
        None => info!("Compiled on git commit hash: <no git info>"),
    }
    if let Some(hr) = GIT_HEAD_REF {
        info!("            git head ref: {}", hr);
    }
    info!("            {}", BUILT_TIME_UTC);
    info!("         with compiler {}", RUSTC_VERSION);
    info!("");
}
