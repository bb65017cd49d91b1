use partonsim::event;
use partonsim::integrators::importance::{FlavourSum, MonteCarloIntegrator, Proposals};
use partonsim::parameters::Parameters;
use partonsim::particle::Particle;
use partonsim::shower::Shower;

use assert_approx_eq::assert_approx_eq;
use rand_pcg::Pcg64;

fn rng() -> Pcg64 {
    Pcg64::new(0xcafef00dd15ea5e5, 0xa02bdbf7bb3c0a7ac28fa16a64abf96)
}

fn hard_events(parameters: &Parameters, n: usize, rng: &mut Pcg64) -> Vec<Vec<Particle>> {
    let mut integrator = MonteCarloIntegrator::new(
        parameters,
        Proposals::fixed_beam(parameters),
        FlavourSum::Random,
    );
    integrator.extend(rng, n);

    integrator
        .events()
        .unwrap()
        .into_iter()
        .map(|(event, _)| event)
        .collect()
}

#[test]
fn showered_events_conserve_momentum_and_colour() {
    let parameters = Parameters::default();
    let shower = Shower::from_parameters(&parameters, 1.0).unwrap();
    let mut rng = rng();

    let mut max_len = 0;

    for mut event in hard_events(&parameters, 200, &mut rng) {
        let incoming = event[..2].to_vec();
        let len = shower
            .run(&mut rng, &mut event, parameters.z_mass2())
            .unwrap();

        assert_eq!(len, event.len());
        assert!(len >= 4);
        max_len = max_len.max(len);

        // incoming particles are untouched
        assert_eq!(&event[..2], incoming.as_slice());

        let imbalance = event::momentum_imbalance(&event);
        assert_approx_eq!(imbalance.e, 0.0, 1e-9);
        assert_approx_eq!(imbalance.px, 0.0, 1e-9);
        assert_approx_eq!(imbalance.py, 0.0, 1e-9);
        assert_approx_eq!(imbalance.pz, 0.0, 1e-9);

        assert!(event::is_color_balanced(&event));

        for particle in &event[2..] {
            assert!(particle.mom.e > 0.0);
            // every outgoing particle is a quark, an antiquark or a gluon
            assert!(particle.is_gluon() || (1..=5).contains(&particle.pid.abs()));
        }

        // quark number is conserved
        let quarks = event[2..].iter().filter(|p| !p.is_gluon() && p.pid > 0).count();
        let antiquarks = event[2..].iter().filter(|p| !p.is_gluon() && p.pid < 0).count();
        assert_eq!(quarks, antiquarks);
    }

    // at the Z mass the shower radiates in almost every event
    assert!(max_len > 6);
}

#[test]
fn quark_pair_showers_down_to_the_cutoff() {
    let parameters = Parameters::default();
    let shower = Shower::from_parameters(&parameters, 1.0).unwrap();

    let mut event = event::from_sample(parameters.z_mass2(), 0.5, 1.0, 2);
    let len = shower
        .run(&mut rng(), &mut event, parameters.z_mass2())
        .unwrap();

    assert!(len - 2 >= 2);
    assert!(event::is_color_balanced(&event));
}

#[test]
fn scale_below_the_cutoff_leaves_the_event_alone() {
    let parameters = Parameters::default();
    let shower = Shower::from_parameters(&parameters, 1.0).unwrap();

    let original = event::from_sample(parameters.z_mass2(), -0.1, 4.0, 5);
    let mut event = original.clone();

    assert_eq!(shower.run(&mut rng(), &mut event, 0.5).unwrap(), 4);
    assert_eq!(event, original);
}

#[test]
fn showers_are_reproducible() {
    let parameters = Parameters::default();
    let shower = Shower::from_parameters(&parameters, 1.0).unwrap();
    let original = event::from_sample(parameters.z_mass2(), 0.0, 0.0, 1);

    let mut first = original.clone();
    let mut second = original;

    shower
        .run(&mut rng(), &mut first, parameters.z_mass2())
        .unwrap();
    shower
        .run(&mut rng(), &mut second, parameters.z_mass2())
        .unwrap();

    assert_eq!(first, second);
}
