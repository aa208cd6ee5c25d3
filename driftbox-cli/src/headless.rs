//! Run a scene without a window and print a summary

use crate::scene::SceneConfig;
use driftbox_core::{FrameStats, PointerState, Simulation};
use glam::Vec2;

/// Options for a headless run
#[derive(Debug, Clone)]
pub struct HeadlessRun {
    pub frames: u64,
    pub width: f32,
    pub height: f32,
    pub seed: u64,
    pub pointer: PointerState,
}

/// What a headless run ends with
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub last_frame: FrameStats,
    pub total_collisions: usize,
    pub kinetic_energy: f32,
    pub min: Vec2,
    pub max: Vec2,
}

pub fn run_headless(scene: &SceneConfig, run: &HeadlessRun) -> RunSummary {
    let mut sim = Simulation::new(run.width, run.height, &scene.params, run.seed);
    let mut last_frame = FrameStats::default();
    let mut total_collisions = 0;

    for _ in 0..run.frames {
        last_frame = sim.step(&scene.params, &run.pointer);
        total_collisions += last_frame.collisions;
    }

    let (min, max) = sim.particles().iter().fold(
        (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
        |(min, max), p| (min.min(p.pos), max.max(p.pos)),
    );

    RunSummary {
        last_frame,
        total_collisions,
        kinetic_energy: sim.kinetic_energy(),
        min,
        max,
    }
}

pub fn print_summary(summary: &RunSummary) {
    let stats = &summary.last_frame;
    println!("frames = {}", stats.frame);
    println!("particles = {}", stats.particles);
    println!("occupied_cells = {}", stats.occupied_cells);
    println!("candidate_pairs = {}", stats.candidate_pairs);
    println!("collisions = {}", stats.collisions);
    println!("total_collisions = {}", summary.total_collisions);
    println!("kinetic_energy = {}", summary.kinetic_energy);
    if stats.particles > 0 {
        println!("min = ({}, {})", summary.min.x, summary.min.y);
        println!("max = ({}, {})", summary.max.x, summary.max.y);
    }
}
