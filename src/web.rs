//! Browser binding
//!
//! The page owns the camera, the pose detector and the canvas. Every animation
//! frame it passes the latest poses to `PosePop::update`, then paints
//! `strokes_json` with its sketch library and plays the queued sounds.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::pose::Skeleton;
use crate::renderer::{Projector, frame_strokes};
use crate::scoreboard::Scoreboard;
use crate::settings::{GameConfig, Settings};
use crate::sim::{GameWorld, SeededRandom};
use crate::sound::{AudioManager, SoundBoard};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Pose Pop loaded");
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// One game session
#[wasm_bindgen]
pub struct PosePop {
    world: GameWorld,
    settings: Settings,
    sounds: Rc<RefCell<SoundBoard>>,
    scores: Rc<RefCell<Scoreboard>>,
    audio: AudioManager,
    projector: Projector,
}

#[wasm_bindgen]
impl PosePop {
    /// New session for a camera of `width`×`height`; the seed defaults to the clock
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, seed: Option<f64>) -> Result<PosePop, JsValue> {
        Self::with_config(GameConfig::with_size(width, height), seed)
    }

    /// New session from a JSON `GameConfig`
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(config_json: &str, seed: Option<f64>) -> Result<PosePop, JsValue> {
        let config = GameConfig::from_json(config_json).map_err(to_js_error)?;
        Self::with_config(config, seed)
    }

    fn with_config(config: GameConfig, seed: Option<f64>) -> Result<PosePop, JsValue> {
        let seed = seed.unwrap_or_else(js_sys::Date::now) as u64;
        let settings = Settings::load();

        let mut world =
            GameWorld::try_new(config, SeededRandom::new(seed)).map_err(to_js_error)?;
        let sounds = Rc::new(RefCell::new(SoundBoard::with_seed(seed.wrapping_add(1))));
        sounds.borrow_mut().set_muted(!settings.sound_on);
        let scores = Rc::new(RefCell::new(Scoreboard::new()));
        world.subscribe(Box::new(Rc::clone(&sounds)));
        world.subscribe(Box::new(Rc::clone(&scores)));

        log::info!(
            "Game initialized: {}x{}, seed {}",
            world.size().width,
            world.size().height,
            seed
        );

        Ok(PosePop {
            world,
            settings,
            sounds,
            scores,
            audio: AudioManager::new(),
            projector: Projector::default(),
        })
    }

    /// Canvas offset of the camera image (letterboxing)
    pub fn set_projector(&mut self, horizontal: f32, vertical: f32) {
        self.projector = Projector::new(horizontal, vertical);
    }

    /// Advance to `now` (ms) with a JSON array of skeletons
    ///
    /// Unreadable poses are logged and treated as nobody in view.
    pub fn update(&mut self, now: f64, poses_json: &str) {
        let skeletons: Vec<Skeleton> = match serde_json::from_str(poses_json) {
            Ok(skeletons) => skeletons,
            Err(e) => {
                log::warn!("Ignoring malformed poses: {}", e);
                Vec::new()
            }
        };
        self.world.update(now, &skeletons);
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.world.snapshot()).map_err(to_js_error)
    }

    /// Strokes to paint this frame
    pub fn strokes_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&frame_strokes(&self.world, &self.projector)).map_err(to_js_error)
    }

    pub fn scores_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.scores.borrow().ranking()).map_err(to_js_error)
    }

    pub fn sound_on(&self) -> bool {
        self.settings.sound_on
    }

    /// Persisted across sessions
    pub fn set_sound_on(&mut self, on: bool) {
        self.settings.sound_on = on;
        self.settings.save();
        self.sounds.borrow_mut().set_muted(!on);
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.audio.set_volume(volume);
    }

    /// Queued cues for hosts that play their own samples
    pub fn drain_sound_cues_json(&mut self) -> Result<String, JsValue> {
        let cues = self.sounds.borrow_mut().drain();
        serde_json::to_string(&cues).map_err(to_js_error)
    }

    /// Play queued cues with the built-in synthesizer
    pub fn play_sounds(&mut self) {
        let cues = self.sounds.borrow_mut().drain();
        for cue in &cues {
            self.audio.play(cue);
        }
    }
}
