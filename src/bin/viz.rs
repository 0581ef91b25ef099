use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use ascent_sim::dynamics::state::AlphaLaw;
use ascent_sim::sim::{self, IntegrationConfig, IntegrationMethod, Trajectory, TrajectorySample};
use ascent_sim::vehicle::{presets, InitialConditions, VehicleParameters};

const DT: f64 = 0.1;

fn main() -> eframe::Result {
    env_logger::init();

    let (vehicle, initial) = presets::reference_booster();
    let mut app = AscentViz {
        vehicle,
        initial,
        alpha_law: AlphaLaw::ThetaMinusThetaC,
        runs: Vec::new(),
        error: None,
    };
    app.rerun();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 900.0]),
        ..Default::default()
    };
    eframe::run_native("Powered Ascent", options, Box::new(|_| Ok(Box::new(app))))
}

struct AscentViz {
    vehicle: VehicleParameters,
    initial: InitialConditions,
    alpha_law: AlphaLaw,
    runs: Vec<Trajectory>,
    error: Option<String>,
}

impl AscentViz {
    /// One run per integration method at the current alpha law.
    fn rerun(&mut self) {
        let runs: Result<Vec<_>, _> = IntegrationMethod::ALL
            .iter()
            .map(|&m| {
                let config = IntegrationConfig::for_vehicle(&self.vehicle, m, self.alpha_law, DT);
                sim::simulate(&self.vehicle, &self.initial, &config)
            })
            .collect();
        match runs {
            Ok(runs) => {
                self.runs = runs;
                self.error = None;
            }
            Err(e) => {
                self.runs.clear();
                self.error = Some(e.to_string());
            }
        }
    }

    fn plot(
        &self,
        ui: &mut egui::Ui,
        id: &str,
        size: egui::Vec2,
        x_label: &str,
        f: impl Fn(&TrajectorySample) -> [f64; 2],
    ) {
        Plot::new(id)
            .width(size.x)
            .height(size.y)
            .x_axis_label(x_label)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                for run in &self.runs {
                    let points: PlotPoints = run.samples.iter().map(&f).collect();
                    plot_ui.line(Line::new(run.config.method.to_string(), points));
                }
            });
    }
}

impl eframe::App for AscentViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!(
                "Booster: {:.0} kg, {:.0} N for {:.0} s",
                self.vehicle.initial_mass,
                self.vehicle.thrust(),
                self.vehicle.burn_duration
            ));
            ui.horizontal(|ui| {
                let before = self.alpha_law;
                ui.label("Alpha law:");
                ui.radio_value(&mut self.alpha_law, AlphaLaw::ThetaMinusThetaC, "theta - theta_c");
                ui.radio_value(&mut self.alpha_law, AlphaLaw::Zero, "zero");
                if self.alpha_law != before {
                    self.rerun();
                }
            });
            if let Some(rk4) = self.runs.iter().find(|r| r.config.method == IntegrationMethod::Rk4) {
                if let Some(last) = rk4.last() {
                    ui.label(format!(
                        "RK4 burnout: t = {:.1} s  |  V = {:.1} m/s  |  y = {:.2} km  |  x = {:.2} km  |  m = {:.1} kg",
                        last.time,
                        last.state.velocity,
                        last.state.altitude / 1000.0,
                        last.state.downrange / 1000.0,
                        last.state.mass,
                    ));
                }
            }
            if let Some(err) = &self.error {
                ui.colored_label(egui::Color32::RED, err);
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let size = egui::vec2(available.x / 2.0 - 8.0, available.y / 4.0 - 24.0);

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label("Velocity (m/s)");
                    self.plot(ui, "velocity", size, "Time (s)", |s| [s.time, s.state.velocity]);
                });
                ui.vertical(|ui| {
                    ui.label("Altitude (km)");
                    self.plot(ui, "altitude", size, "Time (s)", |s| [s.time, s.state.altitude / 1000.0]);
                });
            });

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label("Flight Path Angle (deg)");
                    self.plot(ui, "theta_c", size, "Time (s)", |s| [s.time, s.state.flight_path_angle]);
                });
                ui.vertical(|ui| {
                    ui.label("Pitch Angle (deg)");
                    self.plot(ui, "theta", size, "Time (s)", |s| [s.time, s.state.pitch_angle]);
                });
            });

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label("Downrange (km)");
                    self.plot(ui, "downrange", size, "Time (s)", |s| [s.time, s.state.downrange / 1000.0]);
                });
                ui.vertical(|ui| {
                    ui.label("Mach");
                    self.plot(ui, "mach", size, "Time (s)", |s| [s.time, s.mach]);
                });
            });

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label("Angle of Attack (deg)");
                    self.plot(ui, "alpha", size, "Time (s)", |s| [s.time, s.alpha]);
                });
                ui.vertical(|ui| {
                    ui.label("Trajectory Profile (km)");
                    self.plot(ui, "profile", size, "Downrange (km)", |s| {
                        [s.state.downrange / 1000.0, s.state.altitude / 1000.0]
                    });
                });
            });
        });
    }
}
