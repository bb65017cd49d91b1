use partonsim::analysis::{Analysis, ClusterReference};
use partonsim::core::estimators::BasicEstimators;
use partonsim::integrators::importance::{FlavourSum, MonteCarloIntegrator, Proposals};
use partonsim::parameters::Parameters;
use partonsim::shower::Shower;
use partonsim::Result;

use log::info;
use rand_pcg::Pcg64;

const EVENTS: usize = 10_000;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let parameters = Parameters::default();

    // one generator for the whole run: first the hard events, then the shower
    let mut rng = Pcg64::new(0xcafef00dd15ea5e5, 0xa02bdbf7bb3c0a7ac28fa16a64abf96);

    let mut integrator = MonteCarloIntegrator::new(
        &parameters,
        Proposals::fixed_beam(&parameters),
        FlavourSum::Random,
    );
    integrator.extend(&mut rng, EVENTS);

    let estimators = integrator.integrate()?;
    info!(
        "sigma = {} \u{b1} {} pb",
        estimators.mean(),
        estimators.std()
    );

    let shower = Shower::from_parameters(&parameters, 1.0)?;
    let mut analysis = Analysis::new(ClusterReference::Incoming)?;

    for (i, (mut event, weight)) in integrator.events()?.into_iter().enumerate() {
        shower.run(&mut rng, &mut event, parameters.z_mass2())?;
        analysis.analyze(&event, weight)?;

        if (i + 1) % 1000 == 0 {
            info!("showered and analyzed {} events", i + 1);
        }
    }

    analysis.write_to_path("jet_rates.yoda")?;
    info!("histograms written to jet_rates.yoda");

    Ok(())
}
