use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{info, warn};

use ascent_sim::config::ScenarioConfig;
use ascent_sim::dynamics::state::AlphaLaw;
use ascent_sim::io::json::{self, FlightSummary};
use ascent_sim::io::table;
use ascent_sim::physics::atmosphere::{self, MAX_ALTITUDE, MIN_ALTITUDE};
use ascent_sim::physics::nozzle;
use ascent_sim::sim::{self, IntegrationConfig, IntegrationMethod, Trajectory};
use ascent_sim::vehicle::{InitialConditions, VehicleParameters};

#[derive(Parser)]
#[command(name = "ascent-sim")]
#[command(version)]
#[command(about = "Powered-ascent trajectory through a layered standard atmosphere", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single trajectory
    Run {
        /// Scenario file (TOML); defaults to the reference booster
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Integration method
        #[arg(short, long)]
        method: Option<IntegrationMethod>,

        /// Angle-of-attack law
        #[arg(short, long)]
        alpha_law: Option<AlphaLaw>,

        /// Step size (s)
        #[arg(long)]
        dt: Option<f64>,

        /// Run duration (s); defaults to the burn duration
        #[arg(long)]
        duration: Option<f64>,

        /// Write the sample table (tab-separated) here
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Write a JSON flight summary here
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// Run every method / step size / alpha law of the study plan
    Matrix {
        /// Scenario file (TOML); integration settings are ignored
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory
        #[arg(long, default_value = "results")]
        out_dir: PathBuf,
    },

    /// Print the atmosphere table
    Atmosphere {
        /// Lowest altitude (m)
        #[arg(long, default_value_t = MIN_ALTITUDE, allow_negative_numbers = true)]
        from: f64,

        /// Highest altitude (m)
        #[arg(long, default_value_t = MAX_ALTITUDE, allow_negative_numbers = true)]
        to: f64,

        /// Altitude step (m)
        #[arg(long, default_value_t = 2_000.0)]
        step: f64,
    },

    /// Solve the nozzle area-Mach relation for a section diameter
    Nozzle {
        /// Section diameter (m)
        #[arg(short, long, required = true, num_args = 1..)]
        diameter: Vec<f64>,

        /// Throat diameter (m)
        #[arg(long, default_value_t = nozzle::DEFAULT_THROAT_DIAMETER)]
        throat: f64,

        /// Ratio of specific heats
        #[arg(short, long, default_value_t = nozzle::DEFAULT_K)]
        k: f64,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run { config, method, alpha_law, dt, duration, out, summary } => {
            let mut scenario = load_scenario(config.as_deref())?;
            let i = &mut scenario.integration;
            i.method = method.unwrap_or(i.method);
            i.alpha_law = alpha_law.unwrap_or(i.alpha_law);
            i.dt = dt.unwrap_or(i.dt);
            i.duration = duration.or(i.duration);
            scenario.validate()?;
            run_single(&scenario, out.as_deref(), summary.as_deref())
        }
        Commands::Matrix { config, out_dir } => {
            let scenario = load_scenario(config.as_deref())?;
            run_matrix(&scenario, &out_dir)
        }
        Commands::Atmosphere { from, to, step } => print_atmosphere(from, to, step),
        Commands::Nozzle { diameter, throat, k } => {
            print_nozzle(&diameter, throat, k);
            Ok(())
        }
    }
}

fn load_scenario(path: Option<&Path>) -> Result<ScenarioConfig> {
    match path {
        Some(p) => ScenarioConfig::load(p).with_context(|| format!("loading {}", p.display())),
        None => Ok(ScenarioConfig::default()),
    }
}

// ---------------------------------------------------------------------------
// Single run
// ---------------------------------------------------------------------------

fn run_single(scenario: &ScenarioConfig, out: Option<&Path>, summary: Option<&Path>) -> Result<()> {
    let config = scenario.integration_config();
    print_vehicle(&scenario.vehicle, &scenario.initial);

    let run = sim::simulate(&scenario.vehicle, &scenario.initial, &config)?;
    print_run(&run);

    if let Some(path) = out {
        table::write_trajectory_file(path, &run.samples)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("Samples written to {}", path.display());
    }
    if let Some(path) = summary {
        if let Some(s) = FlightSummary::from_trajectory(&run) {
            json::write_summary_file(path, &s).with_context(|| format!("writing {}", path.display()))?;
            info!("Summary written to {}", path.display());
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Study matrix
// ---------------------------------------------------------------------------

fn run_file_stem(config: &IntegrationConfig) -> String {
    format!(
        "{}_alpha_{}_dt_{}",
        config.method.slug(),
        config.alpha_law.slug(),
        config.dt
    )
}

fn run_matrix(scenario: &ScenarioConfig, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
    print_vehicle(&scenario.vehicle, &scenario.initial);

    for config in sim::reference_matrix(scenario.vehicle.burn_duration) {
        let run = sim::simulate(&scenario.vehicle, &scenario.initial, &config)?;
        print_run(&run);

        let stem = run_file_stem(&config);
        let table_path = out_dir.join(format!("{stem}.tsv"));
        table::write_trajectory_file(&table_path, &run.samples)
            .with_context(|| format!("writing {}", table_path.display()))?;

        match FlightSummary::from_trajectory(&run) {
            Some(s) => {
                let json_path = out_dir.join(format!("{stem}.json"));
                json::write_summary_file(&json_path, &s)
                    .with_context(|| format!("writing {}", json_path.display()))?;
            }
            None => warn!("{stem}: empty trajectory, no summary"),
        }
        info!("{stem}: {} samples, {}", run.samples.len(), run.termination);
    }

    info!("All results saved in {}", out_dir.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Console output
// ---------------------------------------------------------------------------

fn print_vehicle(v: &VehicleParameters, ic: &InitialConditions) {
    println!();
    println!("====================================================================");
    println!("  POWERED ASCENT TRAJECTORY");
    println!("====================================================================");
    println!();
    println!("  Vehicle / Initial Conditions");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Mass flow:     {:>8.2} kg/s  Exhaust vel:  {:>8.1} m/s",
        v.mass_flow, v.exhaust_velocity
    );
    println!(
        "  Initial mass:  {:>8.1} kg    Burn time:    {:>8.1} s",
        v.initial_mass, v.burn_duration
    );
    println!(
        "  Thrust:        {:>8.0} N     TWR:          {:>8.2}",
        v.thrust(),
        v.twr()
    );
    println!(
        "  Ref. area:     {:>8.4} m^2   Nozzle exit:  {:>8.4} m^2",
        v.reference_area, v.nozzle_exit_area
    );
    if let Some(dv) = v.delta_v() {
        println!("  Ideal dV:      {:>8.0} m/s", dv);
    }
    println!(
        "  V0 = {} m/s   theta_c0 = {} deg   theta0 = {} deg   y0 = {} m   omega_z0 = {} 1/s",
        ic.velocity, ic.flight_path_angle, ic.pitch_angle, ic.altitude, ic.pitch_rate
    );
    println!();
}

fn print_run(run: &Trajectory) {
    let c = &run.config;
    println!("  {} | {} | dt = {} s", c.method, c.alpha_law, c.dt);
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>4} {:>7} {:>8} {:>8} {:>7} {:>7} {:>8} {:>8} {:>9} {:>8}",
        "N", "t(s)", "V(m/s)", "V_dot", "M", "alpha", "theta_c", "y(m)", "x(m)", "m(kg)"
    );
    println!("  {}", "─".repeat(84));

    let stride = (run.samples.len() / 25).max(1);
    for (i, s) in run.samples.iter().enumerate().step_by(stride) {
        println!(
            "  {:>4} {:>7.1} {:>8.1} {:>8.2} {:>7.3} {:>7.2} {:>8.2} {:>8.0} {:>9.0} {:>8.1}",
            i + 1,
            s.time,
            s.state.velocity,
            s.dvelocity,
            s.mach,
            s.alpha,
            s.state.flight_path_angle,
            s.state.altitude,
            s.state.downrange,
            s.state.mass
        );
    }

    if let Some(last) = run.last() {
        println!();
        println!("  Final ({}):", run.termination);
        println!("    t = {:.2} s   V = {:.2} m/s   V_dot = {:.3} m/s^2", last.time, last.state.velocity, last.dvelocity);
        println!(
            "    y = {:.1} m   x = {:.1} m   m = {:.2} kg",
            last.state.altitude, last.state.downrange, last.state.mass
        );
        println!(
            "    x_dot = {:.3} m/s   y_dot = {:.3} m/s",
            last.horizontal_velocity, last.vertical_velocity
        );
    }
    println!();
}

fn print_atmosphere(from: f64, to: f64, step: f64) -> Result<()> {
    anyhow::ensure!(step > 0.0, "altitude step must be positive, got {step}");

    println!(
        "  {:>9} {:>9} {:>8} {:>12} {:>11} {:>8} {:>9}",
        "h(m)", "H(m)", "T(K)", "p(Pa)", "rho(kg/m3)", "a(m/s)", "g(m/s2)"
    );
    println!("  {}", "─".repeat(74));

    let count = ((to - from) / step).floor().max(0.0) as usize;
    for i in 0..=count {
        let h = from + i as f64 * step;
        match atmosphere::compute_atmosphere(h) {
            Ok(a) => println!(
                "  {:>9.0} {:>9.1} {:>8.2} {:>12.4} {:>11.6} {:>8.2} {:>9.5}",
                h, a.geopotential, a.temperature, a.pressure, a.density, a.sound_speed, a.gravity
            ),
            Err(e) => println!("  {:>9.0}  {}", h, e),
        }
    }
    Ok(())
}

fn print_nozzle(diameters: &[f64], throat: f64, k: f64) {
    println!("  Area-Mach relation, k = {k}, d* = {throat} m");
    println!("  ──────────────────────────────────────────────────────────────────");
    for &d in diameters {
        match nozzle::solve_mach(d, throat, k) {
            Ok(sol) => {
                println!("  d = {d} m   (d*/d)^2 = {:.10}", sol.area_ratio);
                if let Some(m) = sol.subsonic {
                    println!("    M = {m:.8} (subsonic)");
                }
                if let Some(m) = sol.supersonic {
                    println!("    M = {m:.8} (supersonic)");
                }
            }
            Err(e) => println!("  d = {d} m   {e}"),
        }
    }
}
