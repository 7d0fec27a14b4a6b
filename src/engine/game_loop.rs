/// Fixed-timestep runner
///
/// Decides how many physics steps to run for each rendered frame so the
/// simulation advances at a constant rate regardless of frame rate.
use std::time::{Duration, Instant};

/// Maximum number of physics steps per frame to prevent spiral of death
const MAX_PHYSICS_STEPS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Running,
    Paused,
    Stopped,
}

pub struct Runner {
    /// Length of one physics step
    timestep: Duration,

    /// Accumulated time for fixed timestep updates
    accumulator: Duration,

    last_frame_time: Instant,

    state: RunState,

    frame_count: u64,

    /// Total steps handed out
    step_count: u64,
}

impl Runner {
    /// Runner handing out steps of `timestep` seconds, the same step the
    /// physics world integrates with
    pub fn new(timestep: f32) -> Self {
        Self {
            timestep: Duration::from_secs_f32(timestep),
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            state: RunState::Running,
            frame_count: 0,
            step_count: 0,
        }
    }

    /// Begin a new frame, returns the number of fixed steps to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        if self.state != RunState::Running {
            return 0;
        }

        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= self.timestep && steps < MAX_PHYSICS_STEPS {
            self.accumulator -= self.timestep;
            steps += 1;
        }

        // Drop the backlog we refused to simulate
        if steps == MAX_PHYSICS_STEPS {
            self.accumulator = self.accumulator.min(self.timestep);
        }

        self.step_count += steps as u64;
        steps
    }

    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    pub fn pause(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Paused;
            log::info!("Runner paused");
        }
    }

    pub fn resume(&mut self) {
        if self.state == RunState::Paused {
            self.state = RunState::Running;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            self.last_frame_time = Instant::now();
            log::info!("Runner resumed");
        }
    }

    /// Stop handing out steps for good. Idempotent.
    pub fn stop(&mut self) {
        if self.state != RunState::Stopped {
            self.state = RunState::Stopped;
            self.accumulator = Duration::ZERO;
            log::info!(
                "Runner stopped after {} frames, {} steps",
                self.frame_count,
                self.step_count
            );
        }
    }
}
