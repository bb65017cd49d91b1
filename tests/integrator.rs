use partonsim::callbacks::SinkCallback;
use partonsim::core::estimators::*;
use partonsim::integrators::importance::{self, FlavourSum, MonteCarloIntegrator, Proposals};
use partonsim::parameters::Parameters;
use partonsim::reference;

use assert_approx_eq::assert_approx_eq;
use rand::Rng;
use rand_pcg::Pcg64;
use serde::Serialize;

fn assert_eq_rng<R>(lhs: &R, rhs: &R)
where
    R: Rng + Serialize,
{
    assert_eq!(
        serde_json::to_string(lhs).unwrap(),
        serde_json::to_string(rhs).unwrap()
    );
}

fn rng() -> Pcg64 {
    Pcg64::new(0xcafef00dd15ea5e5, 0xa02bdbf7bb3c0a7ac28fa16a64abf96)
}

fn assert_compatible(value: f64, error: f64, target: f64) {
    assert!(
        (value - target).abs() < 5.0 * error,
        "{} \u{b1} {} is not compatible with {}",
        value,
        error,
        target
    );
}

#[test]
fn fixed_beam_cross_section() {
    let parameters = Parameters::default();
    let mut integrator = MonteCarloIntegrator::new(
        &parameters,
        Proposals::fixed_beam(&parameters),
        FlavourSum::Explicit,
    );
    integrator.extend(&mut rng(), 100_000);

    let estimators = integrator.integrate().unwrap();
    let target = reference::fixed_beam_cross_section(&parameters);

    assert_approx_eq!(target, 42_213.18, 0.01);
    assert_eq!(estimators.calls(), 100_000);
    assert_eq!(estimators.non_finite_calls(), 0);
    assert_eq!(estimators.efficiency(), 1.0);
    assert_compatible(estimators.mean(), estimators.std(), target);
    // the relative error is well below a percent
    assert!(estimators.std() < 0.01 * target);
}

#[test]
fn flat_beam_cross_section() {
    let parameters = Parameters::default();
    let (s_min, s_max) = parameters.flat_beam_range();
    let mut integrator = MonteCarloIntegrator::new(
        &parameters,
        Proposals::flat_beam(&parameters).unwrap(),
        FlavourSum::Random,
    );
    integrator.extend(&mut rng(), 100_000);

    let estimators = integrator.integrate().unwrap();
    let target = reference::flat_beam_cross_section(&parameters, s_min, s_max);

    assert_approx_eq!(target, 9_929.33, 0.01);
    assert_compatible(estimators.mean(), estimators.std(), target);
}

#[test]
fn explicit_and_random_flavour_sums_agree() {
    let parameters = Parameters::default();
    let mut rng = rng();

    let mut results = Vec::new();

    for &flavour_sum in &[FlavourSum::Explicit, FlavourSum::Random] {
        let mut integrator = MonteCarloIntegrator::new(
            &parameters,
            Proposals::flat_beam(&parameters).unwrap(),
            flavour_sum,
        );
        integrator.extend(&mut rng, 50_000);
        results.push(integrator.integrate().unwrap());
    }

    let difference = results[0].mean() - results[1].mean();
    let error = (results[0].var() + results[1].var()).sqrt();

    assert!(difference.abs() < 5.0 * error);
}

#[test]
fn breit_wigner_proposal_reduces_the_error() {
    let parameters = Parameters::default();
    let (s_min, s_max) = parameters.flat_beam_range();
    let target = reference::flat_beam_cross_section(&parameters, s_min, s_max);

    let mut flat = MonteCarloIntegrator::new(
        &parameters,
        Proposals::flat_beam(&parameters).unwrap(),
        FlavourSum::Explicit,
    );
    let mut peaked = MonteCarloIntegrator::new(
        &parameters,
        Proposals::breit_wigner(&parameters).unwrap(),
        FlavourSum::Explicit,
    );

    let mut rng = rng();
    flat.extend(&mut rng, 20_000);
    peaked.extend(&mut rng, 20_000);

    let flat = flat.integrate().unwrap();
    let peaked = peaked.integrate().unwrap();

    assert_compatible(peaked.mean(), peaked.std(), target);
    assert!(peaked.std() < 0.5 * flat.std());
}

#[test]
fn error_scales_with_inverse_square_root() {
    let parameters = Parameters::default();
    let mut integrator = MonteCarloIntegrator::new(
        &parameters,
        Proposals::flat_beam(&parameters).unwrap(),
        FlavourSum::Random,
    );
    let mut rng = rng();

    let points: Vec<(f64, f64)> = [100, 1_000, 10_000, 100_000]
        .iter()
        .map(|&n| {
            integrator.extend(&mut rng, n);
            let std = integrator.integrate().unwrap().std();
            ((n as f64).ln(), std.ln())
        })
        .collect();

    // least-squares slope of log(error) against log(N)
    let len = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / len;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / len;
    let slope = points
        .iter()
        .map(|p| (p.0 - mean_x) * (p.1 - mean_y))
        .sum::<f64>()
        / points.iter().map(|p| (p.0 - mean_x).powi(2)).sum::<f64>();

    assert_approx_eq!(slope, -0.5, 0.1);
}

#[test]
fn resuming_from_a_checkpoint_replays_the_run() {
    let parameters = Parameters::default();
    let new_integrator = || {
        MonteCarloIntegrator::new(
            &parameters,
            Proposals::flat_beam(&parameters).unwrap(),
            FlavourSum::Random,
        )
    };

    let mut integrator = new_integrator();
    let chkpts = importance::refine(
        &mut integrator,
        &mut rng(),
        &SinkCallback {},
        &[1_000, 2_000, 4_000],
    )
    .unwrap();

    for pair in chkpts.windows(2) {
        assert_eq_rng(pair[0].rng_after(), pair[1].rng_before());
    }

    // a single-shot run with the same seed ends in the same state
    let mut rng_single = rng();
    let mut single = new_integrator();
    single.extend(&mut rng_single, 4_000);

    assert_eq_rng(chkpts[2].rng_after(), &rng_single);
    assert_eq!(chkpts[2].estimators(), &single.integrate().unwrap());

    // the weights do not depend on how the buffer was filled
    assert_eq!(integrator.weights(), single.weights());
}
