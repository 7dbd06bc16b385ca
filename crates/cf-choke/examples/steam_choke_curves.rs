//! Prints steam choke characteristics for the three correlations.
//!
//! `cargo run -p cf-choke --example steam_choke_curves`

use cf_choke::{
    ChokeCase, ChokeGeometry, ChokeResult, Method, Mixture, PressureSweep,
    downstream_pressure_vs_flow, flow_vs_downstream_pressure, upstream_pressure_vs_flow,
};
use cf_core::units::mm;
use cf_fluids::StandardFluidModel;

const P1_ATM: f64 = 20.0;

fn main() -> ChokeResult<()> {
    tracing_subscriber::fmt::init();

    let model = StandardFluidModel::default();
    let geometry = ChokeGeometry::from_lengths(mm(5.0), mm(100.0))?;
    let case = ChokeCase::new(Mixture::steam(1.0)).with_geometry(geometry);
    let sweep = PressureSweep::new(1.0, P1_ATM, 20)?;

    println!("Steam, x = 1, d = 5 mm, p1 = {P1_ATM} atm");
    println!("Downstream pressure sweep: {sweep}");
    println!();

    let mut curves = Vec::new();
    for method in Method::ALL {
        let correlation = method.correlation();
        curves.push(flow_vs_downstream_pressure(
            correlation.as_ref(),
            &model,
            &case,
            P1_ATM,
            &sweep,
        )?);
    }

    println!("{:>10} {:>12} {:>12} {:>12}", "p2 [atm]", "Chien", "Al-Safran", "Perkins");
    for (i, p2) in sweep.points().into_iter().enumerate() {
        println!(
            "{:>10.2} {:>12.1} {:>12.1} {:>12.1}",
            p2, curves[0].y[i], curves[1].y[i], curves[2].y[i]
        );
    }
    println!();

    let flows = [25.0, 50.0, 100.0, 150.0, 200.0, 250.0];
    println!("Downstream pressure [atm] against rate at p1 = {P1_ATM} atm (0 = over-critical)");
    println!("{:>10} {:>12} {:>12} {:>12}", "w [kg/h]", "Chien", "Al-Safran", "Perkins");
    let mut inverse = Vec::new();
    for method in Method::ALL {
        let correlation = method.correlation();
        inverse.push(downstream_pressure_vs_flow(
            correlation.as_ref(),
            &model,
            &case,
            P1_ATM,
            &flows,
        )?);
    }
    for (i, w) in flows.iter().enumerate() {
        println!(
            "{:>10.1} {:>12.3} {:>12.3} {:>12.3}",
            w, inverse[0].y[i], inverse[1].y[i], inverse[2].y[i]
        );
    }
    println!();

    let p2_atm = 5.0;
    println!("Upstream pressure [atm] against rate at p2 = {p2_atm} atm");
    println!("{:>10} {:>12} {:>12} {:>12}", "w [kg/h]", "Chien", "Al-Safran", "Perkins");
    let mut upstream = Vec::new();
    for method in Method::ALL {
        let correlation = method.correlation();
        upstream.push(upstream_pressure_vs_flow(
            correlation.as_ref(),
            &model,
            &case,
            p2_atm,
            &flows,
        )?);
    }
    for (i, w) in flows.iter().enumerate() {
        println!(
            "{:>10.1} {:>12.3} {:>12.3} {:>12.3}",
            w, upstream[0].y[i], upstream[1].y[i], upstream[2].y[i]
        );
    }

    Ok(())
}
