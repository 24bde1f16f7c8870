//! Tick loop: discrete animations and continual tasks.

use super::store::Scene;

/// Per-tick recomputation with no completion condition.
pub trait Continual {
    fn update(&mut self, scene: &mut Scene, dt: f64);

    fn name(&self) -> &'static str {
        "continual"
    }
}

/// Animation that runs once to completion.
///
/// `begin` captures the start state; `interpolate` is then called with
/// progress `alpha` in `[0, 1]` (non-decreasing, ending at exactly `1`).
pub trait Animation {
    fn begin(&mut self, _scene: &Scene) {}

    fn interpolate(&mut self, scene: &mut Scene, alpha: f64);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

/// Logical clock plus the active set of continual tasks.
///
/// Removal takes effect from the next tick; there is no mid-update
/// cancellation.
#[derive(Default)]
pub struct Scheduler {
    tasks: Vec<(TaskId, Box<dyn Continual>)>,
    next_id: u64,
    time: f64,
    frames: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn add<C: Continual + 'static>(&mut self, task: C) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        tracing::debug!(task = task.name(), id = id.0, "continual task added");
        self.tasks.push((id, Box::new(task)));
        id
    }

    pub fn remove(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|(tid, _)| *tid != id);
        let removed = self.tasks.len() != before;
        if removed {
            tracing::debug!(id = id.0, "continual task removed");
        }
        removed
    }

    pub fn is_active(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|(tid, _)| *tid == id)
    }

    /// Advance the clock by `dt` and run every continual task once.
    pub fn tick(&mut self, scene: &mut Scene, dt: f64) {
        self.time += dt;
        self.frames += 1;
        for (_, task) in &mut self.tasks {
            task.update(scene, dt);
        }
    }

    /// Run `anims` over `run_time` in steps of `dt`, ticking continual tasks
    /// after each interpolation step and handing every frame to `on_frame`.
    ///
    /// Progress is linear in time; the last frame is always at `alpha = 1`.
    /// A non-positive `dt` or `run_time` plays a single frame. Returns the
    /// number of frames produced.
    pub fn play<F>(
        &mut self,
        scene: &mut Scene,
        mut anims: Vec<Box<dyn Animation>>,
        run_time: f64,
        dt: f64,
        mut on_frame: F,
    ) -> usize
    where
        F: FnMut(&Scene, f64),
    {
        for a in &mut anims {
            a.begin(scene);
        }
        let (steps, step_dt) = if dt > 0.0 && run_time > 0.0 {
            (((run_time / dt) - 1e-9).ceil().max(1.0) as usize, dt)
        } else {
            (1, run_time.max(0.0))
        };
        for k in 1..=steps {
            let alpha = if k == steps {
                1.0
            } else {
                (k as f64 * step_dt / run_time).min(1.0)
            };
            for a in &mut anims {
                a.interpolate(scene, alpha);
            }
            self.tick(scene, step_dt);
            on_frame(scene, self.time);
        }
        tracing::trace!(frames = steps, run_time, "play finished");
        steps
    }

    /// Tick continual tasks only.
    pub fn wait<F>(&mut self, scene: &mut Scene, duration: f64, dt: f64, on_frame: F) -> usize
    where
        F: FnMut(&Scene, f64),
    {
        self.play(scene, Vec::new(), duration, dt, on_frame)
    }
}
