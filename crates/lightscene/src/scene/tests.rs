use super::*;
use crate::geom::{Arc, Color};
use crate::light::{
    DirectionalLightField, LightCfg, LightIndicator, RadialLightField, Screen, ShadowCfg,
};
use nalgebra::{vector, Vector2};
use std::f64::consts::TAU;

fn spot_scene() -> (Scene, SpotlightId, ScreenId) {
    let mut scene = Scene::new();
    let mut screen = Screen::segment(vector![0.0, -1.0], vector![0.0, 1.0]);
    screen.rotate(-TAU / 6.0);
    let sid = scene.add_screen(screen);
    let light = DirectionalLightField::new(
        LightCfg {
            source: vector![-5.0, 0.0],
            radius: 8.0,
            ..LightCfg::spotlight()
        },
        ShadowCfg::default(),
    )
    .unwrap();
    let spot = scene.add_spotlight(light, Some(sid));
    (scene, spot, sid)
}

fn expected_wedge(scene: &Scene, spot: SpotlightId) -> (f64, f64) {
    let light = scene.spotlight(spot).unwrap();
    let (lo, hi) = light.viewing_angles(scene.spotlight_screen(spot));
    (lo, hi - lo)
}

fn boxed<A: Animation + 'static>(a: A) -> Vec<Box<dyn Animation>> {
    vec![Box::new(a)]
}

#[test]
fn add_spotlight_computes_initial_cone() {
    let (scene, spot, _) = spot_scene();
    let light = scene.spotlight(spot).unwrap();
    assert_eq!(light.wedge(), Some(expected_wedge(&scene, spot)));
    assert!(light.shadow().is_some());
}

#[test]
fn tracker_follows_rotating_screen_every_frame() {
    let (mut scene, spot, sid) = spot_scene();
    let mut sched = Scheduler::new();
    sched.add(ScreenTracker::new(spot));
    let initial = scene.opening_angle(spot);
    let frames = sched.play(
        &mut scene,
        boxed(RotateScreen::new(sid, TAU / 6.0)),
        1.0,
        0.1,
        |scene, _t| {
            let light = scene.spotlight(spot).unwrap();
            assert_eq!(light.wedge(), Some(expected_wedge(scene, spot)));
        },
    );
    assert_eq!(frames, 10);
    // screen now faces the source, so it subtends a wider angle
    assert!(scene.opening_angle(spot) > initial);
    let (a, b) = scene.screen(sid).unwrap().endpoints().unwrap();
    assert!(a.x.abs() < 1e-9 && b.x.abs() < 1e-9);
}

#[test]
fn removing_tracker_freezes_cone() {
    let (mut scene, spot, sid) = spot_scene();
    let mut sched = Scheduler::new();
    let tracker = sched.add(ScreenTracker::new(spot));
    sched.play(&mut scene, boxed(RotateScreen::new(sid, TAU / 12.0)), 0.5, 0.1, |_, _| {});
    let frozen = scene.spotlight(spot).unwrap().shapes();
    assert!(sched.remove(tracker));
    assert!(!sched.is_active(tracker));
    sched.play(&mut scene, boxed(ShiftScreen::new(sid, vector![0.0, 2.0])), 0.5, 0.1, |_, _| {});
    assert_eq!(scene.spotlight(spot).unwrap().shapes(), frozen);
    assert_ne!(scene.spotlight(spot).unwrap().wedge(), Some(expected_wedge(&scene, spot)));
}

#[test]
fn tracker_is_idempotent_without_changes() {
    let (mut scene, spot, _) = spot_scene();
    let mut sched = Scheduler::new();
    sched.add(ScreenTracker::new(spot));
    sched.tick(&mut scene, 0.1);
    let first = scene.spotlight(spot).unwrap().shapes();
    sched.tick(&mut scene, 0.1);
    assert_eq!(scene.spotlight(spot).unwrap().shapes(), first);
    assert_eq!(sched.frames(), 2);
    assert!((sched.time() - 0.2).abs() < 1e-12);
}

#[test]
fn removed_or_detached_screen_keeps_last_geometry() {
    let (mut scene, spot, sid) = spot_scene();
    let mut sched = Scheduler::new();
    sched.add(ScreenTracker::new(spot));
    let before = scene.spotlight(spot).unwrap().shapes();
    assert!(scene.remove_screen(sid).is_some());
    sched.tick(&mut scene, 0.1);
    assert_eq!(scene.spotlight(spot).unwrap().shapes(), before);
    assert_eq!(scene.opening_angle(spot), 0.0);

    let sid2 = scene.add_screen(Screen::segment(vector![1.0, -3.0], vector![1.0, 3.0]));
    scene.attach_screen(spot, sid2);
    sched.tick(&mut scene, 0.1);
    assert_ne!(scene.spotlight(spot).unwrap().shapes(), before);
    assert_eq!(scene.detach_screen(spot), Some(sid2));
    assert!(!scene.recompute_spotlight(spot));
}

#[test]
fn angle_tracker_mirrors_wedge() {
    let (mut scene, spot, sid) = spot_scene();
    let arc = scene.add_arc(Arc {
        center: Vector2::zeros(),
        radius: 5.0,
        start_angle: 0.0,
        angle_span: 0.0,
        color: Color::WHITE,
    });
    let mut sched = Scheduler::new();
    sched.add(ScreenTracker::new(spot));
    sched.add(AngleTracker { spotlight: spot, arc });
    sched.play(&mut scene, boxed(RotateScreen::new(sid, TAU / 8.0)), 0.3, 0.1, |_, _| {});
    let a = scene.arc(arc).unwrap();
    assert_eq!(a.center, vector![-5.0, 0.0]);
    assert!((a.angle_span - scene.opening_angle(spot)).abs() < 1e-12);
    assert!((a.start_angle - scene.start_angle(spot)).abs() < 1e-12);
}

#[test]
fn indicator_tracker_reads_scene() {
    let mut scene = Scene::new();
    let light = scene.add_ambient(RadialLightField::new(LightCfg::ambient()).unwrap());
    let ind = scene.add_indicator(LightIndicator::new(vector![3.0, 3.0], 0.7, Color::YELLOW, 0.2));
    let mut sched = Scheduler::new();
    sched.add(IndicatorTracker::new(ind, move |s: &Scene| {
        s.ambient(light).map_or(0.0, |l| l.intensity_at(vector![1.0, 0.0]))
    }));
    let dim = boxed(DimLight::new(LightTarget::Ambient(light), 0.5));
    sched.play(&mut scene, dim, 1.0, 0.25, |_, _| {});
    let reading = scene.indicator(ind).unwrap().intensity();
    assert!((reading - 0.5 * 0.25).abs() < 1e-12);
    assert!((scene.ambient(light).unwrap().intensity() - 0.5).abs() < 1e-12);
}

#[test]
fn switch_on_restores_target_and_switch_off_clears() {
    let mut scene = Scene::new();
    let light = scene.add_ambient(RadialLightField::new(LightCfg::ambient()).unwrap());
    let target: Vec<f64> =
        scene.ambient(light).unwrap().annuli().iter().map(|a| a.fill_opacity).collect();
    let mut sched = Scheduler::new();
    let mut midway_inner_first = false;
    sched.play(
        &mut scene,
        boxed(SwitchOn::new(LightTarget::Ambient(light))),
        1.0,
        0.25,
        |s, t| {
            if (t - 0.25).abs() < 1e-9 {
                let a = s.ambient(light).unwrap().annuli();
                midway_inner_first = a[0].fill_opacity > 0.0 && a[9].fill_opacity == 0.0;
            }
        },
    );
    assert!(midway_inner_first);
    let after: Vec<f64> =
        scene.ambient(light).unwrap().annuli().iter().map(|a| a.fill_opacity).collect();
    assert_eq!(after, target);

    sched.play(&mut scene, boxed(SwitchOff::new(LightTarget::Ambient(light))), 1.0, 0.5, |_, _| {});
    assert!(scene.ambient(light).unwrap().annuli().iter().all(|a| a.fill_opacity == 0.0));
}

#[test]
fn move_spotlight_animation_recomputes() {
    let (mut scene, spot, _) = spot_scene();
    let before = scene.opening_angle(spot);
    let mut sched = Scheduler::new();
    let mv = boxed(MoveSpotlight::new(spot, vector![-2.0, 0.0]));
    sched.play(&mut scene, mv, 1.0, 0.5, |_, _| {});
    let light = scene.spotlight(spot).unwrap();
    assert_eq!(light.source(), vector![-2.0, 0.0]);
    assert!(scene.opening_angle(spot) > before);
    assert_eq!(light.wedge(), Some(expected_wedge(&scene, spot)));
}

#[test]
fn degenerate_play_runs_one_frame() {
    let (mut scene, _, sid) = spot_scene();
    let mut sched = Scheduler::new();
    let shift = boxed(ShiftScreen::new(sid, vector![1.0, 0.0]));
    let n = sched.play(&mut scene, shift, 0.0, 0.1, |_, _| {});
    assert_eq!(n, 1);
    let (a, _) = scene.screen(sid).unwrap().endpoints().unwrap();
    assert!(a.x > 0.0);
    assert_eq!(sched.wait(&mut scene, 0.3, 0.1, |_, _| {}), 3);
}

#[test]
fn scene_shapes_include_every_layer() {
    let (mut scene, _, _) = spot_scene();
    scene.add_ambient(RadialLightField::new(LightCfg::ambient()).unwrap());
    // 10 annuli, 10 sectors, 1 shadow, 1 screen
    assert_eq!(scene.shapes().len(), 22);
}

fn sector_opacities(scene: &Scene, spot: SpotlightId) -> Vec<f64> {
    let light = scene.spotlight(spot).unwrap();
    light.sectors().iter().map(|s| s.fill_opacity).collect()
}

#[test]
fn switches_survive_screen_tracking() {
    let (mut scene, spot, sid) = spot_scene();
    let lit = sector_opacities(&scene, spot);
    let mut sched = Scheduler::new();
    sched.add(ScreenTracker::new(spot));

    let anims: Vec<Box<dyn Animation>> = vec![
        Box::new(SwitchOff::new(LightTarget::Spot(spot))),
        Box::new(RotateScreen::new(sid, 0.3)),
    ];
    sched.play(&mut scene, anims, 1.0, 0.25, |_, _| {});
    assert!(sector_opacities(&scene, spot).iter().all(|&o| o == 0.0));
    let light = scene.spotlight(spot).unwrap();
    assert_eq!(light.wedge(), Some(expected_wedge(&scene, spot)));

    let mut frame = 0;
    let mut first_frame_inner_first = false;
    sched.play(
        &mut scene,
        boxed(SwitchOn::new(LightTarget::Spot(spot))),
        1.0,
        0.25,
        |s, _| {
            if frame == 0 {
                let o = sector_opacities(s, spot);
                first_frame_inner_first = o[0] > 0.0 && o[9] == 0.0;
            }
            frame += 1;
        },
    );
    assert!(first_frame_inner_first);
    assert_eq!(sector_opacities(&scene, spot), lit);
}

#[test]
fn update_indicator_tweens_reading() {
    let mut scene = Scene::new();
    let ind = scene.add_indicator(LightIndicator::new(vector![0.0, 0.0], 0.5, Color::YELLOW, 0.5));
    scene.indicator_mut(ind).unwrap().set_intensity(1.0);
    let mut sched = Scheduler::new();
    let mut midway = 0.0;
    sched.play(
        &mut scene,
        boxed(UpdateIndicator::new(ind, 3.0)),
        1.0,
        0.5,
        |s, t| {
            if (t - 0.5).abs() < 1e-9 {
                midway = s.indicator(ind).unwrap().intensity();
            }
        },
    );
    assert!((midway - 2.0).abs() < 1e-12);
    let done = scene.indicator(ind).unwrap();
    assert_eq!(done.intensity(), 3.0);
    assert_eq!(done.foreground_opacity(), 1.0);
    assert_eq!(done.reading(), "3.000");
}

#[test]
fn prelude_drives_indicator_scene() {
    use crate::prelude::{
        ArcId, IndicatorId, IndicatorTracker, LightTarget, Scene, Scheduler, UpdateIndicator,
    };

    let mut scene = Scene::new();
    let light = scene.add_ambient(RadialLightField::new(LightCfg::ambient()).unwrap());
    let ind: IndicatorId =
        scene.add_indicator(LightIndicator::new(vector![2.0, 0.0], 0.5, Color::YELLOW, 0.5));
    let arc: ArcId = scene.add_arc(Arc {
        center: vector![0.0, 0.0],
        radius: 1.0,
        start_angle: 0.0,
        angle_span: 1.0,
        color: Color::WHITE,
    });
    let target = LightTarget::Ambient(light);
    let mut sched = Scheduler::new();
    let tracker = sched.add(IndicatorTracker::new(ind, move |s: &Scene| {
        s.ambient(light).map_or(0.0, |l| l.intensity())
    }));
    sched.play(&mut scene, boxed(DimLight::new(target, 0.5)), 1.0, 0.5, |_, _| {});
    assert!((scene.indicator(ind).unwrap().intensity() - 0.5).abs() < 1e-12);

    assert!(sched.remove(tracker));
    sched.play(&mut scene, boxed(UpdateIndicator::new(ind, 2.0)), 1.0, 0.5, |_, _| {});
    assert_eq!(scene.indicator(ind).unwrap().intensity(), 2.0);
    assert!(scene.arc(arc).is_some());
}
