use partonsim::callbacks::SimpleCallback;
use partonsim::integrators::importance::{self, FlavourSum, MonteCarloIntegrator, Proposals};
use partonsim::parameters::Parameters;
use partonsim::{reference, Result};

use rand_pcg::Pcg64;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let parameters = Parameters::default();
    let (s_min, s_max) = parameters.flat_beam_range();

    println!(
        "analytic cross sections: fixed beam {:.2} pb, flat beam {:.2} pb",
        reference::fixed_beam_cross_section(&parameters),
        reference::flat_beam_cross_section(&parameters, s_min, s_max)
    );

    let setups = vec![
        ("fixed beam", Proposals::fixed_beam(&parameters)),
        ("flat beam", Proposals::flat_beam(&parameters)?),
        ("flat beam, Breit-Wigner sampling", Proposals::breit_wigner(&parameters)?),
    ];

    for (name, proposals) in setups {
        for &flavour_sum in &[FlavourSum::Explicit, FlavourSum::Random] {
            println!("\n{} with {:?} flavour sum", name, flavour_sum);

            // initialize the random number generator
            let mut rng = Pcg64::new(0xcafef00dd15ea5e5, 0xa02bdbf7bb3c0a7ac28fa16a64abf96);
            let mut integrator =
                MonteCarloIntegrator::new(&parameters, proposals.clone(), flavour_sum);

            importance::refine(
                &mut integrator,
                &mut rng,
                &SimpleCallback {},
                &[100, 1_000, 10_000, 100_000],
            )?;
        }
    }

    Ok(())
}
