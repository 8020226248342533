// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use approx::assert_abs_diff_eq;

use super::*;

fn uniform_priors() -> PointSourcePriors {
    PointSourcePriors {
        flux: PriorSpec::uniform(0.5, 10.0),
        offset_x: PriorSpec::uniform(-0.01, 0.01),
        offset_y: PriorSpec::uniform(-0.02, 0.03),
    }
}

#[test]
fn test_lower_corner_gives_lower_bounds() {
    let pt = PriorTransform::new(Hypothesis::PointSource, &uniform_priors()).unwrap();
    let theta = pt.transform(&[0.0, 0.0, 0.0]).unwrap();
    assert_eq!(theta, vec![0.5, -0.01, -0.02]);
}

#[test]
fn test_upper_corner_gives_upper_bounds() {
    let pt = PriorTransform::new(Hypothesis::PointSource, &uniform_priors()).unwrap();
    let theta = pt.transform(&[1.0, 1.0, 1.0]).unwrap();
    assert_abs_diff_eq!(theta[0], 10.0, epsilon = 1e-15);
    assert_abs_diff_eq!(theta[1], 0.01, epsilon = 1e-15);
    assert_abs_diff_eq!(theta[2], 0.03, epsilon = 1e-15);
}

#[test]
fn test_midpoint() {
    let pt = PriorTransform::new(Hypothesis::PointSource, &uniform_priors()).unwrap();
    let theta = pt.transform(&[0.5, 0.5, 0.5]).unwrap();
    assert_abs_diff_eq!(theta[0], 5.25, epsilon = 1e-15);
    assert_abs_diff_eq!(theta[1], 0.0, epsilon = 1e-15);
    assert_abs_diff_eq!(theta[2], 0.005, epsilon = 1e-15);
}

#[test]
fn test_unsupported_hypothesis_gives_none() {
    let hypothesis = Hypothesis::from(99);
    assert_eq!(hypothesis, Hypothesis::Unsupported(99));
    let pt = PriorTransform::new(hypothesis, &uniform_priors()).unwrap();
    assert!(pt.priors().is_empty());
    assert!(pt.transform(&[0.1, 0.2, 0.3]).is_none());
    assert!(pt.transform(&[]).is_none());
}

#[test]
fn test_wrong_hcube_length_gives_none() {
    let pt = PriorTransform::new(Hypothesis::PointSource, &uniform_priors()).unwrap();
    assert!(pt.transform(&[0.1, 0.2]).is_none());
    assert!(pt.transform(&[0.1, 0.2, 0.3, 0.4]).is_none());
}

#[test]
fn test_log_uniform() {
    let prior = PriorSpec {
        distribution: Distribution::LogUniform,
        min: 0.1,
        max: 1000.0,
    };
    assert_abs_diff_eq!(prior.apply(0.0), 0.1, epsilon = 1e-12);
    assert_abs_diff_eq!(prior.apply(0.25), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(prior.apply(0.5), 10.0, epsilon = 1e-10);
    assert_abs_diff_eq!(prior.apply(1.0), 1000.0, epsilon = 1e-9);
}

#[test]
fn test_delta() {
    let prior = PriorSpec {
        distribution: Distribution::Delta,
        min: 3.0,
        max: 3.0,
    };
    assert_eq!(prior.apply(0.0), 3.0);
    assert_eq!(prior.apply(0.7), 3.0);
}

#[test]
fn test_invalid_bounds() {
    let mut priors = uniform_priors();
    priors.offset_x = PriorSpec::uniform(1.0, -1.0);
    let result = PriorTransform::new(Hypothesis::PointSource, &priors);
    assert!(matches!(
        result,
        Err(PriorError::Bounds {
            param: "offset_x",
            ..
        })
    ));

    let mut priors = uniform_priors();
    priors.flux = PriorSpec::uniform(0.0, f64::INFINITY);
    let result = PriorTransform::new(Hypothesis::PointSource, &priors);
    assert!(matches!(
        result,
        Err(PriorError::Bounds { param: "flux", .. })
    ));
}

#[test]
fn test_log_uniform_needs_positive_lower_bound() {
    let mut priors = uniform_priors();
    priors.flux = PriorSpec {
        distribution: Distribution::LogUniform,
        min: 0.0,
        max: 10.0,
    };
    let result = PriorTransform::new(Hypothesis::PointSource, &priors);
    assert!(matches!(
        result,
        Err(PriorError::LogLowerBound { param: "flux", .. })
    ));
}

#[test]
fn test_distribution_names() {
    assert_eq!(Distribution::from_str("U").unwrap(), Distribution::Uniform);
    assert_eq!(Distribution::from_str("LOG").unwrap(), Distribution::LogUniform);
    assert_eq!(Distribution::from_str("DELTA").unwrap(), Distribution::Delta);
    assert!(Distribution::from_str("GAUSS").is_err());
    assert_eq!(Distribution::LogUniform.to_string(), "LOG");
}

#[test]
fn test_hypothesis_ids() {
    assert_eq!(Hypothesis::from(0), Hypothesis::PointSource);
    assert_eq!(Hypothesis::PointSource.id(), 0);
    assert_eq!(Hypothesis::PointSource.num_params(), Some(3));
    assert_eq!(Hypothesis::from(2).num_params(), None);
    assert!(!Hypothesis::from(1).is_supported());
    assert_eq!(Hypothesis::from(1).id(), 1);
}
