//! Sweeping-screen timing probe.
//!
//! Purpose
//! - One spotlight, one screen rotating about its centre for two seconds at
//!   60 fps, tracked continuously. Prints the opening angle every 30 frames
//!   and the total frame time.
//!
//! References
//! - Code: crates/lightscene/src/scene/tasks.rs::ScreenTracker
//! - Code: crates/lightscene/src/scene/anims.rs::RotateScreen

use std::time::Instant;

use lightscene::prelude::*;

fn main() {
    let mut scene = Scene::new();
    let screen = scene.add_screen(Screen::segment(Vec2::new(3.0, -1.0), Vec2::new(3.0, 1.0)));
    let spot = scene.add_spotlight(
        DirectionalLightField::new(LightCfg::spotlight(), ShadowCfg::default())
            .expect("default spotlight cfg is valid"),
        Some(screen),
    );
    let mut sched = Scheduler::new();
    sched.add(ScreenTracker::new(spot));

    let t0 = Instant::now();
    let mut frame = 0usize;
    let frames = sched.play(
        &mut scene,
        vec![Box::new(RotateScreen::new(screen, std::f64::consts::FRAC_PI_2))],
        2.0,
        1.0 / 60.0,
        |scene, time| {
            if frame % 30 == 0 {
                println!(
                    "t={time:.2} opening={:.4} shapes={}",
                    scene.opening_angle(spot),
                    scene.shapes().len()
                );
            }
            frame += 1;
        },
    );
    println!("frames={frames} elapsed={:?}", t0.elapsed());
}
