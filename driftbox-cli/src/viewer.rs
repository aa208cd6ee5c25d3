//! Interactive viewer for driftbox
//!
//! Draws the particles, maps the mouse onto the pointer (left button
//! attracts, right button repels) and exposes every simulation parameter as
//! a slider. When started from a scene file, the file is watched and
//! reloaded on modification.

use crate::scene::SceneConfig;
use driftbox_core::params::{
    ATTRACTION_RANGE, FRICTION_RANGE, GRAVITY_RANGE, MAX_SPEED_RANGE, PARTICLE_SIZE_RANGE,
    REPULSION_RANGE, STOP_THRESHOLD_RANGE,
};
use driftbox_core::{ParamRange, PointerMode, PointerState, Simulation};
use eframe::egui;
use glam::Vec2;
use notify::{Event, RecommendedWatcher, Watcher};
use std::path::PathBuf;
use std::sync::mpsc;

const MAX_SLIDER_PARTICLES: usize = 10_000;
const INITIAL_VIEWPORT: (f32, f32) = (960.0, 640.0);

/// Driftbox viewer application
pub struct ViewerApp {
    scene_path: Option<PathBuf>,
    scene: SceneConfig,
    sim: Simulation,
    pointer: PointerState,
    last_load_error: Option<String>,
    playing: bool,
    #[allow(dead_code)] // Kept alive to maintain file watching
    file_watcher: Option<RecommendedWatcher>,
    file_receiver: mpsc::Receiver<notify::Result<Event>>,
}

impl ViewerApp {
    pub fn new(
        scene_path: Option<PathBuf>,
        scene: SceneConfig,
        seed: u64,
        _cc: &eframe::CreationContext<'_>,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let watcher = scene_path.as_ref().and_then(|path| {
            let mut watcher = notify::recommended_watcher(move |res| {
                // The receiver is gone during shutdown
                let _ = tx.send(res);
            })
            .map_err(|e| log::warn!("file watching unavailable: {}", e))
            .ok()?;
            if let Err(e) = watcher.watch(path, notify::RecursiveMode::NonRecursive) {
                log::warn!("cannot watch {}: {}", path.display(), e);
            }
            Some(watcher)
        });

        let sim = Simulation::new(INITIAL_VIEWPORT.0, INITIAL_VIEWPORT.1, &scene.params, seed);

        Self {
            scene_path,
            scene,
            sim,
            pointer: PointerState::idle(),
            last_load_error: None,
            playing: true,
            file_watcher: watcher,
            file_receiver: rx,
        }
    }

    fn reload_scene(&mut self) {
        let Some(path) = self.scene_path.as_ref() else {
            return;
        };

        match SceneConfig::load(path) {
            Ok(scene) => {
                let reseed = scene.params.particle_count != self.scene.params.particle_count;
                self.scene = scene;
                if reseed {
                    self.sim.reseed(&self.scene.params);
                }
                self.last_load_error = None;
                log::info!("reloaded {}", path.display());
            }
            Err(e) => {
                // Keep running on the last good parameters
                log::error!("failed to reload {}: {}", path.display(), e);
                self.last_load_error = Some(e.to_string());
            }
        }
    }

    fn check_file_changes(&mut self) {
        let mut needs_reload = false;
        while let Ok(event) = self.file_receiver.try_recv() {
            match event {
                Ok(Event {
                    kind: notify::EventKind::Modify(_),
                    ..
                }) => needs_reload = true,
                Ok(_) => {}
                Err(e) => log::warn!("file watcher error: {}", e),
            }
        }

        if needs_reload {
            self.reload_scene();
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button(if self.playing { "⏸ Pause" } else { "▶ Play" }).clicked() {
                self.playing = !self.playing;
            }
            if ui.button("⏭ Step").clicked() {
                self.sim.step(&self.scene.params, &self.pointer);
            }
        });
        ui.separator();

        let params = &mut self.scene.params;
        ui.add(
            egui::Slider::new(&mut params.particle_count, 0..=MAX_SLIDER_PARTICLES)
                .text("particles"),
        );
        if ui.button("Reseed").clicked() {
            self.sim.reseed(params);
        }
        ui.separator();

        param_slider(ui, &mut params.attraction_strength, ATTRACTION_RANGE, "attraction");
        param_slider(ui, &mut params.repulsion_strength, REPULSION_RANGE, "repulsion");
        param_slider(ui, &mut params.max_speed, MAX_SPEED_RANGE, "max speed");
        param_slider(ui, &mut params.particle_size, PARTICLE_SIZE_RANGE, "size");
        param_slider(ui, &mut params.gravity, GRAVITY_RANGE, "gravity");
        param_slider(ui, &mut params.friction, FRICTION_RANGE, "friction");
        param_slider(ui, &mut params.stop_threshold, STOP_THRESHOLD_RANGE, "stop threshold");

        ui.horizontal(|ui| {
            ui.label("color");
            ui.color_edit_button_srgb(&mut self.scene.color);
        });
        ui.separator();

        ui.label(format!("frame {}", self.sim.frame()));
        ui.label(format!("energy {:.1}", self.sim.kinetic_energy()));
        ui.label("left drag: attract, right drag: repel");
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;
        self.sim.resize(rect.width(), rect.height());

        let center = rect.center();
        let to_screen = |pos: Vec2| center + egui::vec2(pos.x, -pos.y);

        let (primary, secondary) =
            ui.input(|i| (i.pointer.primary_down(), i.pointer.secondary_down()));
        self.pointer = match response.hover_pos() {
            Some(hover) => {
                let offset = hover - center;
                let mode = if primary {
                    PointerMode::Attract
                } else if secondary {
                    PointerMode::Repel
                } else {
                    PointerMode::None
                };
                PointerState::new(Vec2::new(offset.x, -offset.y), mode)
            }
            None => PointerState::idle(),
        };

        painter.rect_filled(rect, 0.0, egui::Color32::from_gray(12));

        let [r, g, b] = self.scene.color;
        for particle in self.sim.particles() {
            let alpha = (particle.opacity * 255.0).round() as u8;
            painter.circle_filled(
                to_screen(particle.pos),
                particle.radius,
                egui::Color32::from_rgba_unmultiplied(r, g, b, alpha),
            );
        }

        if let Some(ref error) = self.last_load_error {
            painter.text(
                rect.left_bottom() + egui::vec2(8.0, -8.0),
                egui::Align2::LEFT_BOTTOM,
                format!("Error: {}", error),
                egui::FontId::default(),
                egui::Color32::RED,
            );
        }
    }
}

fn param_slider(ui: &mut egui::Ui, value: &mut f32, range: ParamRange, label: &str) {
    ui.add(egui::Slider::new(value, range.min..=range.max).text(label));
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_changes();

        egui::SidePanel::right("controls").show(ctx, |ui| {
            self.controls(ui);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.canvas(ui);
            });

        // Parameters and pointer are settled for this frame
        if self.playing {
            self.sim.step(&self.scene.params, &self.pointer);
            ctx.request_repaint();
        }
    }
}
