use ascent_sim::dynamics::state::AlphaLaw;
use ascent_sim::io::json::{self, FlightSummary};
use ascent_sim::io::table;
use ascent_sim::sim::{self, IntegrationConfig, IntegrationMethod};
use ascent_sim::vehicle::presets;

fn main() {
    let (vehicle, initial) = presets::reference_booster();
    let config = IntegrationConfig::for_vehicle(&vehicle, IntegrationMethod::Rk4, AlphaLaw::ThetaMinusThetaC, 0.1);

    println!("Simulating reference booster ({}, dt = {} s) ...", config.method, config.dt);
    let run = sim::simulate(&vehicle, &initial, &config).expect("Reference booster is valid");

    let summary = FlightSummary::from_trajectory(&run).expect("Run has samples");
    println!("Burnout altitude: {:.2} km", summary.final_altitude / 1000.0);
    println!("Burnout speed: {:.1} m/s (max Mach {:.2})", summary.final_velocity, summary.max_mach);
    println!(
        "Max q: {:.1} kPa at t = {:.1} s",
        summary.max_dynamic_pressure / 1000.0,
        summary.max_dynamic_pressure_time
    );

    table::write_trajectory_file("reference_booster.tsv", &run.samples).expect("Failed to write table");
    json::write_summary_file("reference_booster.json", &summary).expect("Failed to write JSON");

    println!("Exported: reference_booster.tsv, reference_booster.json");
}
