//! Pose Pop headless runner
//!
//! Replays a recorded pose script through the game world and logs what
//! happens. Without a script, a synthetic player waves a hand around.

#[cfg(not(target_arch = "wasm32"))]
mod replay {
    use std::cell::RefCell;
    use std::f32::consts::TAU;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    use clap::Parser;
    use glam::Vec2;
    use serde::Deserialize;

    use pose_pop::pose::{self, Keypoint, Skeleton};
    use pose_pop::sim::{EventLog, WorldEvent};
    use pose_pop::sound::SoundBoard;
    use pose_pop::{ConfigError, GameConfig, GameWorld, Scoreboard};

    /// Replay pose recordings through the Pose Pop world
    #[derive(Debug, Parser)]
    #[command(author, version, about, long_about = None)]
    pub struct Args {
        /// Enable verbose logging
        #[arg(short, long)]
        pub verbose: bool,

        /// Pose script (JSON); a synthetic wave is replayed when omitted
        pub script: Option<PathBuf>,
    }

    /// Poses seen at one timestamp
    #[derive(Debug, Clone, Deserialize)]
    pub struct Frame {
        pub time: f64,
        #[serde(default)]
        pub skeletons: Vec<Skeleton>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(untagged)]
    pub enum Script {
        Frames(Vec<Frame>),
        Session {
            #[serde(default)]
            config: GameConfig,
            frames: Vec<Frame>,
        },
    }

    impl Script {
        pub fn from_json(json: &str) -> Result<(GameConfig, Vec<Frame>), ConfigError> {
            let (config, frames) = match serde_json::from_str::<Script>(json)? {
                Script::Frames(frames) => (GameConfig::default(), frames),
                Script::Session { config, frames } => (config, frames),
            };
            config.validate()?;
            Ok((config, frames))
        }

        pub fn load(path: &Path) -> Result<(GameConfig, Vec<Frame>), ConfigError> {
            let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            })?;
            Self::from_json(&json)
        }
    }

    const WAVE_FPS: f64 = 30.0;
    const WAVE_DURATION_MS: f64 = 60_000.0;

    /// A player standing mid-screen, tracing a figure eight with the left hand
    pub fn synthetic_wave(config: &GameConfig) -> Vec<Frame> {
        let center = Vec2::new(config.width, config.height) / 2.0;
        let reach = Vec2::new(config.width, config.height) * 0.4;
        let step = 1000.0 / WAVE_FPS;
        let count = (WAVE_DURATION_MS / step) as usize;

        (0..=count)
            .map(|i| {
                let time = i as f64 * step;
                let phase = (time / 4_000.0) as f32 * TAU;
                let hand = center + reach * Vec2::new(phase.sin(), (2.0 * phase).sin());
                Frame {
                    time,
                    skeletons: vec![standing_body(center, hand)],
                }
            })
            .collect()
    }

    fn standing_body(center: Vec2, left_hand: Vec2) -> Skeleton {
        let at = |name: &str, offset: Vec2| Keypoint::at(name, center + offset, 0.9);
        let shoulder = center + Vec2::new(30.0, -40.0);
        Skeleton::new(vec![
            at(pose::NOSE, Vec2::new(0.0, -90.0)),
            at(pose::LEFT_EYE, Vec2::new(12.0, -100.0)),
            at(pose::RIGHT_EYE, Vec2::new(-12.0, -100.0)),
            at(pose::LEFT_SHOULDER, Vec2::new(30.0, -40.0)),
            at(pose::RIGHT_SHOULDER, Vec2::new(-30.0, -40.0)),
            Keypoint::at(pose::LEFT_ELBOW, shoulder.lerp(left_hand, 0.5), 0.9),
            Keypoint::at(pose::LEFT_WRIST, left_hand, 0.9),
            at(pose::RIGHT_ELBOW, Vec2::new(-40.0, 0.0)),
            at(pose::RIGHT_WRIST, Vec2::new(-40.0, 40.0)),
            at(pose::LEFT_HIP, Vec2::new(20.0, 50.0)),
            at(pose::RIGHT_HIP, Vec2::new(-20.0, 50.0)),
            at(pose::LEFT_KNEE, Vec2::new(22.0, 110.0)),
            at(pose::RIGHT_KNEE, Vec2::new(-22.0, 110.0)),
            at(pose::LEFT_ANKLE, Vec2::new(24.0, 170.0)),
            at(pose::RIGHT_ANKLE, Vec2::new(-24.0, 170.0)),
        ])
    }

    pub fn run(path: Option<&Path>) -> Result<(), ConfigError> {
        let (config, frames) = match path {
            Some(path) => {
                log::info!("Replaying {}", path.display());
                Script::load(path)?
            }
            None => {
                log::info!("No script given, replaying a synthetic wave");
                let config = GameConfig::default();
                let frames = synthetic_wave(&config);
                (config, frames)
            }
        };

        let mut world = GameWorld::with_seed(config, 0x5EED);
        let events = Rc::new(RefCell::new(EventLog::new()));
        let scores = Rc::new(RefCell::new(Scoreboard::new()));
        let sounds = Rc::new(RefCell::new(SoundBoard::with_seed(0x50D)));
        world.subscribe(Box::new(Rc::clone(&events)));
        world.subscribe(Box::new(Rc::clone(&scores)));
        world.subscribe(Box::new(Rc::clone(&sounds)));

        let mut cues = 0;
        for frame in &frames {
            world.update(frame.time, &frame.skeletons);
            for event in events.borrow_mut().drain() {
                match event {
                    WorldEvent::Created { target_id } => {
                        log::info!("[{:>8.0}] target {} appeared", frame.time, target_id)
                    }
                    WorldEvent::Destroyed {
                        target_id, player, ..
                    } => log::info!(
                        "[{:>8.0}] player {} popped target {}",
                        frame.time,
                        player,
                        target_id
                    ),
                    WorldEvent::DiedNaturally { target_id } => {
                        log::info!("[{:>8.0}] target {} faded away", frame.time, target_id)
                    }
                }
            }
            cues += sounds.borrow_mut().drain().len();
        }

        let difficulty = world.difficulty();
        log::info!(
            "{} frames, {} popped, {} still floating, {} sound cues",
            frames.len(),
            world.destroyed().len(),
            world.targets().len(),
            cues
        );
        log::info!(
            "Final difficulty: up to {} targets at speed {}",
            difficulty.max_targets,
            difficulty.speed
        );
        for (rank, entry) in scores.borrow().ranking().iter().enumerate() {
            log::info!(
                "#{} player {} ({}): {} popped",
                rank + 1,
                entry.player,
                entry.kind.as_str(),
                entry.popped
            );
        }
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use clap::Parser;

    let args = replay::Args::parse();
    pose_pop::logging::init(args.verbose);

    match replay::run(args.script.as_deref()) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `web::start`, this is just to satisfy the compiler
}
