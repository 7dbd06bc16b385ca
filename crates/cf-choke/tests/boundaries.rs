//! Degenerate compositions and the over-critical sentinel.

use cf_choke::{ChokeCase, ChokeError, InverseSolver, InverseStatus, Method, Mixture, api};
use cf_fluids::StandardFluidModel;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn zero_gas_fraction_gives_finite_liquid_flow() {
    let mixtures = [
        Mixture::gas_water(0.0),
        Mixture::gas_oil(0.0),
        Mixture::gas_oil_water(0.0, 0.0, 0.0),
        Mixture::steam(0.0),
    ];
    for method in Method::ALL {
        for mixture in mixtures {
            let case = ChokeCase::new(mixture);
            let w = api::mass_rate_kghr(method, &case, 20.0, 10.0).unwrap();
            assert!(w.is_finite() && w > 0.0, "{method} {}: {w}", mixture.label());
        }
    }
}

#[test]
fn liquid_flow_exceeds_gas_flow_at_equal_pressures() {
    // Denser fluid, same orifice: more mass
    let gas = ChokeCase::new(Mixture::gas_water(1.0));
    let liquid = ChokeCase::new(Mixture::gas_water(0.0));
    let w_gas = api::mass_rate_kghr(Method::Chien, &gas, 20.0, 10.0).unwrap();
    let w_liquid = api::mass_rate_kghr(Method::Chien, &liquid, 20.0, 10.0).unwrap();
    assert!(w_liquid > 5.0 * w_gas);
}

#[test]
fn out_of_range_fractions_are_clamped() {
    let clamped = ChokeCase::new(Mixture::gas_oil(1.7));
    let pure = ChokeCase::new(Mixture::gas_oil(1.0));
    for method in Method::ALL {
        let a = api::mass_rate_kghr(method, &clamped, 30.0, 20.0).unwrap();
        let b = api::mass_rate_kghr(method, &pure, 30.0, 20.0).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn over_critical_requests_return_zero() {
    init_tracing();
    let case = ChokeCase::new(Mixture::steam(1.0));
    for method in [Method::AlSafran, Method::Perkins] {
        let w_crit = api::critical_mass_rate_kghr(method, &case, 10.0).unwrap();
        let too_much = 2.0 * w_crit;

        assert_eq!(api::downstream_pressure_atm(method, &case, too_much, 10.0).unwrap(), 0.0);
        assert_eq!(api::pressure_drop_atm(method, &case, too_much, 10.0).unwrap(), 0.0);

        // Upstream pressure simply rises to deliver it
        let p1 = api::upstream_pressure_atm(method, &case, too_much, 5.0).unwrap();
        assert!(p1 > 10.0);
    }
}

#[test]
fn sentinel_is_distinguishable_through_the_solver() {
    init_tracing();
    let model = StandardFluidModel::default();
    let case = ChokeCase::new(Mixture::gas_water(0.5));
    let correlation = Method::Perkins.correlation();
    let solver = InverseSolver::new(correlation.as_ref(), &model, &case);

    let over = solver.downstream_pressure(1.0e5, 30.0).unwrap();
    assert_eq!(over.status, InverseStatus::ExceedsCritical);
    assert_eq!(over.pressure_atm, 0.0);
    assert!(over.critical_kghr.unwrap() < 1.0e5);

    let zero_rate = solver.pressure_drop(0.0, 30.0).unwrap();
    assert_eq!(zero_rate.status, InverseStatus::Solved);
    assert_eq!(zero_rate.pressure_atm, 0.0);
}

#[test]
fn invalid_inputs_are_errors() {
    let case = ChokeCase::new(Mixture::gas_water(0.5));
    assert!(matches!(
        api::mass_rate_kghr(Method::AlSafran, &case, -1.0, 0.5),
        Err(ChokeError::InvalidArg { .. })
    ));
    assert!(matches!(
        api::upstream_pressure_atm(Method::Perkins, &case, f64::NAN, 10.0),
        Err(ChokeError::InvalidArg { .. })
    ));

    let oversized = ChokeCase::new(Mixture::gas_water(0.5)).with_choke_diameter_mm(150.0);
    assert!(matches!(
        api::mass_rate_kghr(Method::Chien, &oversized, 20.0, 10.0),
        Err(ChokeError::InvalidArg { .. })
    ));

    let nan_fraction = ChokeCase::new(Mixture::gas_oil(f64::NAN));
    assert!(api::mass_rate_kghr(Method::Chien, &nan_fraction, 20.0, 10.0).is_err());
}
