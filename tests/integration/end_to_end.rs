// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Write;

use approx::assert_relative_eq;
use clap::Parser;
use indoc::indoc;
use marlu::c64;
use tempfile::Builder;

use zagros::{
    cli::ZagrosArgs,
    noise::NoiseModel,
    params::ModellingParams,
    sampler::{
        LoglikeCallback, NestedSampler, PriorCallback, SamplerError, SamplerRun, SamplerSettings,
    },
    EvaluationContext, Hypothesis, Observation, PriorTransform,
};

use super::{three_antenna_parts, FixedReader};

const TRUTH: [f64; 3] = [1.0, 0.0, 0.0];

/// A deterministic stand-in for thermal noise.
fn noise_pattern(i: usize) -> c64 {
    let x = i as f64;
    c64::new((1.3 * x).sin(), (0.7 * x + 0.4).cos())
}

fn context(noise_amplitude: f64) -> EvaluationContext {
    let mut parts = three_antenna_parts(&TRUTH);
    parts
        .vis
        .iter_mut()
        .enumerate()
        .for_each(|(i, v)| *v += noise_pattern(i) * noise_amplitude);
    let obs = Observation::new(parts).unwrap();
    let mut context = EvaluationContext::new(
        obs,
        Hypothesis::PointSource,
        NoiseModel::Uniform { sigma: 0.01 },
        ModellingParams::default(),
    )
    .unwrap();
    context.prepare().unwrap();
    context
}

#[test]
fn test_noisier_data_are_less_likely() {
    let mut previous = f64::INFINITY;
    for amplitude in [0.0, 0.001, 0.01, 0.05, 0.1] {
        let (loglike, _) = context(amplitude).evaluate(&TRUTH).unwrap();
        assert!(loglike.is_finite());
        assert!(
            loglike < previous,
            "amplitude {amplitude}: {loglike} >= {previous}"
        );
        previous = loglike;
    }
}

#[test]
fn test_noiseless_loglike_is_the_normalisation() {
    let context = context(0.0);
    let (loglike, _) = context.evaluate(&TRUTH).unwrap();
    // 3 rows * 1 channel * 4 correlations, each with w = 1e4.
    let expected = -12.0 * (std::f64::consts::TAU / 1e4).ln();
    assert_relative_eq!(loglike, expected, max_relative = 1e-10);
}

#[test]
fn test_sampling_through_the_prior() {
    let context = context(0.0);
    let priors = toml::from_str(indoc! {r#"
        flux = { min = 0.0, max = 2.0 }
        offset_x = { min = -0.01, max = 0.01 }
        offset_y = { min = -0.01, max = 0.01 }
    "#})
    .unwrap();
    let prior = PriorTransform::new(Hypothesis::PointSource, &priors).unwrap();

    let centre = prior.transform(&[0.5, 0.5, 0.5]).unwrap();
    let at_centre = context.evaluate(&centre).unwrap().0;
    for hcube in [[0.2, 0.5, 0.5], [0.5, 0.9, 0.5], [0.5, 0.5, 0.1]] {
        let theta = prior.transform(&hcube).unwrap();
        assert!(context.evaluate(&theta).unwrap().0 < at_centre);
    }
    assert!(prior.transform(&[0.5, 0.5]).is_none());
}

/// Walks the flux along a line through the unit hypercube and reports the
/// best point as the "evidence".
struct LineSampler {
    best: Option<Vec<f64>>,
}

impl NestedSampler for LineSampler {
    fn run(
        &mut self,
        settings: &SamplerSettings,
        prior: &PriorCallback,
        loglike: &LoglikeCallback,
    ) -> Result<SamplerRun, SamplerError> {
        assert_eq!(settings.num_params, 3);
        let mut best: Option<(Vec<f64>, f64)> = None;
        let num_steps = settings.nlive;
        for i in 0..=num_steps {
            let x = i as f64 / num_steps as f64;
            let theta = prior(&[x, 0.5, 0.5]).ok_or("bad hypercube point")?;
            let (ll, _) = loglike(&theta)?;
            if best.as_ref().map_or(true, |(_, b)| ll > *b) {
                best = Some((theta, ll));
            }
        }
        let (theta, ll) = best.ok_or("no points were evaluated")?;
        self.best = Some(theta);
        Ok(SamplerRun {
            log_evidence: Some((ll, 0.0)),
            num_likelihood_calls: num_steps + 1,
        })
    }
}

#[test]
fn test_cli_run() {
    let mut params = Builder::new().suffix(".yaml").tempfile().unwrap();
    params
        .write_all(
            indoc! {r#"
                priors:
                  flux: { min: 0.0, max: 2.0 }
                  offset_x: { min: -0.01, max: 0.01 }
                  offset_y: { min: -0.01, max: 0.01 }
                noise:
                  sigma_sim: 0.01
            "#}
            .as_bytes(),
        )
        .unwrap();
    params.flush().unwrap();
    let params_path = params.path().display().to_string();

    let args = ZagrosArgs::try_parse_from([
        "zagros",
        "sim.ms",
        "DATA",
        "--hypo",
        "0",
        "--npsrc",
        "1",
        "--ngsrc",
        "0",
        "--npar",
        "3",
        "--basedir",
        "chains",
        "--fileroot",
        "sim",
        "--params",
        params_path.as_str(),
        "--nlive",
        "20",
        "--nlive-init",
        "10",
    ])
    .unwrap();

    let reader = FixedReader(three_antenna_parts(&TRUTH));
    let mut sampler = LineSampler { best: None };
    let run = args.run(&reader, &mut sampler).unwrap().unwrap();
    assert_eq!(run.num_likelihood_calls, 21);
    // The flux grid has a point exactly on the true flux.
    assert_relative_eq!(sampler.best.unwrap()[0], 1.0);
}
