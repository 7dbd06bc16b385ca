//! Monotonicity and the critical-flow ceiling.

use cf_choke::{ChokeCase, ChokeCorrelation, Method, Mixture};
use cf_fluids::StandardFluidModel;
use proptest::prelude::*;

fn mixture_strategy() -> impl Strategy<Value = Mixture> {
    (0usize..4, 0.05_f64..1.0).prop_map(|(kind, x)| match kind {
        0 => Mixture::gas_water(x),
        1 => Mixture::gas_oil(x),
        2 => Mixture::gas_oil_water(x, 0.5 * (1.0 - x), 0.5 * (1.0 - x)),
        _ => Mixture::steam(x),
    })
}

fn upstream_pressure(mixture: &Mixture, frac: f64) -> f64 {
    if mixture.is_steam() {
        3.0 + 17.0 * frac
    } else {
        10.0 + 90.0 * frac
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn flow_never_rises_with_downstream_pressure(
        mixture in mixture_strategy(),
        p1_frac in 0.0_f64..1.0,
        a in 0.001_f64..1.0,
        b in 0.001_f64..1.0,
        method_idx in 0usize..3,
    ) {
        let model = StandardFluidModel::default();
        let case = ChokeCase::new(mixture);
        let correlation = Method::ALL[method_idx].correlation();
        let p1 = upstream_pressure(&mixture, p1_frac);
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };

        let w_lo = correlation.flow(&model, &case, p1, p1 * lo).unwrap().kg_per_hour();
        let w_hi = correlation.flow(&model, &case, p1, p1 * hi).unwrap().kg_per_hour();
        prop_assert!(w_lo >= w_hi - 1e-9 * w_lo.max(1.0), "{} vs {}", w_lo, w_hi);
        prop_assert!(w_hi >= 0.0);
    }

    #[test]
    fn flow_below_critical_ratio_equals_critical_flow(
        mixture in mixture_strategy(),
        p1_frac in 0.0_f64..1.0,
        depth in 0.01_f64..1.0,
        use_perkins in any::<bool>(),
    ) {
        let model = StandardFluidModel::default();
        let case = ChokeCase::new(mixture);
        let method = if use_perkins { Method::Perkins } else { Method::AlSafran };
        let correlation = method.correlation();
        let p1 = upstream_pressure(&mixture, p1_frac);

        let critical = correlation.critical_flow(&model, &case, p1).unwrap().unwrap();
        let rc = critical.critical_ratio.unwrap();
        prop_assert!(rc > 0.0 && rc < 1.0);

        let forward = correlation.flow(&model, &case, p1, p1 * rc * depth).unwrap();
        prop_assert!(forward.choked);
        let w_crit = critical.kg_per_hour();
        prop_assert!((forward.kg_per_hour() - w_crit).abs() <= 1e-9 * w_crit);
    }
}

#[test]
fn critical_flow_bounds_every_forward_flow() {
    let model = StandardFluidModel::default();
    let case = ChokeCase::new(Mixture::gas_oil(0.6));
    for method in [Method::AlSafran, Method::Perkins] {
        let correlation = method.correlation();
        let w_crit = correlation
            .critical_flow(&model, &case, 80.0)
            .unwrap()
            .unwrap()
            .kg_per_hour();
        for p2 in [0.0, 10.0, 40.0, 60.0, 79.0, 80.0] {
            let w = correlation.flow(&model, &case, 80.0, p2).unwrap().kg_per_hour();
            assert!(w <= w_crit * (1.0 + 1e-12), "{method} at p2 = {p2}: {w} > {w_crit}");
        }
    }
}

#[test]
fn chien_keeps_rising_without_a_choke_limit() {
    let model = StandardFluidModel::default();
    let case = ChokeCase::new(Mixture::gas_water(0.9));
    let chien = cf_choke::Chien::default();
    let deep = chien.flow(&model, &case, 50.0, 1.0).unwrap();
    let shallow = chien.flow(&model, &case, 50.0, 25.0).unwrap();
    assert!(deep.kg_per_hour() > shallow.kg_per_hour());
    assert!(chien.critical_flow(&model, &case, 50.0).unwrap().is_none());
}
