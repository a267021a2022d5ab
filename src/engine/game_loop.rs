/// Game loop timing and control
///
/// Fixed timestep simulation with variable frame rate: physics always steps
/// at the same delta time regardless of how fast frames are produced.
use std::time::{Duration, Instant};

/// Target simulation rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of simulation steps per frame to prevent spiral of death
const MAX_SIM_STEPS: u32 = 5;

/// Smoothing factor for the FPS estimate
const FPS_SMOOTHING: f32 = 0.1;

/// Game loop timing state
pub struct GameLoop {
    /// Accumulated time waiting to be consumed by fixed updates
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Time when the loop started
    start_time: Instant,

    /// Whether the simulation is paused
    paused: bool,

    /// Exponentially smoothed frames-per-second estimate
    fps: f32,

    /// Total frames begun
    frame_count: u64,

    /// Total fixed updates executed
    update_count: u64,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: now,
            start_time: now,
            paused: false,
            fps: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Begin a new frame, returning the number of fixed updates to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        let frame_secs = frame_time.as_secs_f32();
        if frame_secs > 0.0 {
            let instant_fps = 1.0 / frame_secs;
            self.fps += (instant_fps - self.fps) * FPS_SMOOTHING;
        }

        // A paused loop produces frames but consumes no simulation time
        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut updates = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && updates < MAX_SIM_STEPS {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            updates += 1;
        }

        self.update_count += u64::from(updates);
        updates
    }

    /// Fixed timestep for simulation updates, in seconds
    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Smoothed frames-per-second estimate
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Total elapsed wall time since the loop started
    pub fn elapsed(&self) -> Duration {
        Instant::now().duration_since(self.start_time)
    }

    /// Total number of frames begun
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Total number of fixed updates executed
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Check if the simulation is paused
    #[allow(dead_code)]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the simulation
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Simulation paused");
        }
    }

    /// Resume the simulation
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Drop accumulated time so resuming doesn't burst updates
            self.accumulator = Duration::ZERO;
            log::info!("Simulation resumed");
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
