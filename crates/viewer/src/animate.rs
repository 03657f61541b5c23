//! Native window that animates a trajectory.

use std::time::Duration;

use eframe::egui::{self, Color32};
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints, Points};
use swing_pendulum::{PlotBounds, Trajectory};
use tracing::debug;

use crate::Playback;

/// Configuration for [`show`].
///
/// Construct with [`ShowConfig::new`] and chain builder methods as needed.
///
/// # Example
///
/// ```ignore
/// swing_viewer::show(trajectory, ShowConfig::new().title("Swing").interval(Duration::from_millis(20)))?;
/// ```
pub struct ShowConfig {
    title: String,
    interval: Duration,
    looping: bool,
}

impl ShowConfig {
    /// Creates a config with defaults: a generic title, 50 ms frames, looping.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: String::from("Simple Pendulum Simulation"),
            interval: Playback::DEFAULT_INTERVAL,
            looping: true,
        }
    }

    /// Sets the window title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the time between frames.
    #[must_use]
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets whether the animation restarts after the last frame.
    #[must_use]
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Opens a blocking window that animates `trajectory`.
///
/// The upper plot shows the rod and bob; the lower one shows the angle trace
/// so far with a dashed marker at the current time. A play/pause button and a
/// frame slider sit along the bottom. Blocks until the window is closed.
///
/// # Errors
///
/// Returns an error if the native window cannot be created.
pub fn show(trajectory: Trajectory, config: ShowConfig) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 760.0]),
        ..Default::default()
    };

    let playback = Playback::for_trajectory(&trajectory)
        .with_interval(config.interval)
        .looping(config.looping);
    let bounds = PlotBounds::for_trajectory(&trajectory);

    debug!(frames = trajectory.len(), "opening animation window");

    eframe::run_native(
        &config.title,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(AnimationApp {
                trajectory,
                bounds,
                playback,
            }))
        }),
    )
}

/// The egui [`eframe::App`] that renders one frame per repaint.
struct AnimationApp {
    trajectory: Trajectory,
    bounds: PlotBounds,
    playback: Playback,
}

impl AnimationApp {
    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let label = if self.playback.is_playing() {
                "Pause"
            } else {
                "Play"
            };
            if ui.button(label).clicked() {
                self.playback.toggle();
            }

            let mut index = self.playback.index();
            let last = self.playback.frame_count().saturating_sub(1);
            let slider = ui.add(egui::Slider::new(&mut index, 0..=last).text("frame"));
            if slider.changed() {
                self.playback.pause();
                self.playback.seek(index);
            }

            let time = self.trajectory.times()[self.playback.index()];
            ui.label(format!("t = {time:.2} s"));
        });
    }

    fn pendulum_plot(&self, ui: &mut egui::Ui, height: f32) {
        let frame = self.playback.frame(&self.trajectory);
        let extent = self.bounds.pendulum;

        Plot::new("pendulum")
            .height(height)
            .data_aspect(1.0)
            .include_x(extent.min)
            .include_x(extent.max)
            .include_y(extent.min)
            .include_y(extent.max)
            .x_axis_label("X-axis")
            .y_axis_label("Y-axis")
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                let rod: PlotPoints = frame.bob.rod().to_vec().into();
                plot_ui.line(Line::new(rod).color(Color32::DARK_GREEN).width(2.0));

                let bob: PlotPoints = vec![[frame.bob.x, frame.bob.y]].into();
                plot_ui.points(Points::new(bob).color(Color32::DARK_GREEN).radius(8.0));
            });
    }

    fn angle_plot(&self, ui: &mut egui::Ui) {
        let frame = self.playback.frame(&self.trajectory);
        let (time, angle) = (self.bounds.time, self.bounds.angle);

        Plot::new("angle")
            .legend(Legend::default())
            .include_x(time.min)
            .include_x(time.max)
            .include_y(angle.min)
            .include_y(angle.max)
            .x_axis_label("Time (s)")
            .y_axis_label("Angular Displacement (rad)")
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                let trace: PlotPoints = frame.trace.points().map(|(t, a)| [t, a]).collect();
                plot_ui.line(
                    Line::new(trace)
                        .color(Color32::BLUE)
                        .width(2.0)
                        .name("Angular Displacement vs. Time"),
                );

                let marker: PlotPoints = frame.marker.segment().to_vec().into();
                plot_ui.line(
                    Line::new(marker)
                        .color(Color32::RED)
                        .width(2.0)
                        .style(LineStyle::dashed_dense())
                        .name("Current Angle"),
                );
            });
    }
}

impl eframe::App for AnimationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let elapsed = ctx.input(|input| input.stable_dt);
        self.playback.advance(Duration::from_secs_f32(elapsed.max(0.0)));

        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| self.controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            let height = ui.available_height() * 2.0 / 3.0;
            self.pendulum_plot(ui, height);
            self.angle_plot(ui);
        });

        if self.playback.is_playing() {
            ctx.request_repaint_after(self.playback.interval());
        }
    }
}
