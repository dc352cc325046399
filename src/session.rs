//! Game session
//!
//! Glues the round engine to everything around it: fixed-timestep frame
//! pacing, the meta-game, audio cues and persisted player data. A host
//! (browser loop, headless driver, test) feeds it frame deltas and taps.

use crate::audio::{AudioManager, SoundService};
use crate::consts::*;
use crate::meta::{MetaEvent, MetaGame, wallet};
use crate::persistence::PreferenceStore;
use crate::settings::{PlayerProfile, Settings};
use crate::shop::{self, PurchaseError, ShopCategory, ShopItem};
use crate::sim::{PhysicsWorld, RoundController, RoundEvent, RoundState, TickInput};
use crate::tuning::GameConfig;

/// Longest frame delta accepted before clamping (seconds)
const MAX_FRAME_DT: f32 = 0.25;

/// One running game: a world, its round controller and the player's data
pub struct Session<W: PhysicsWorld> {
    world: W,
    controller: RoundController,
    store: Box<dyn PreferenceStore>,
    meta: MetaGame,
    audio: AudioManager,
    settings: Settings,
    profile: PlayerProfile,
    /// Commands for the next tick; cleared once a tick consumes them
    pub input: TickInput,
    accumulator: f32,
    ticks: u64,
    round_events: Vec<RoundEvent>,
    meta_events: Vec<MetaEvent>,
}

impl<W: PhysicsWorld> Session<W> {
    pub fn new(
        mut world: W,
        config: &GameConfig,
        mut store: Box<dyn PreferenceStore>,
        seed: u64,
    ) -> Self {
        shop::ensure_defaults(store.as_mut());
        let settings = Settings::load(store.as_ref());
        let profile = PlayerProfile::load(store.as_ref());
        let mut audio = AudioManager::from_settings(&settings);
        audio.play();

        let controller = RoundController::new(&mut world, config, seed);
        log::info!("Session started for {} with seed {}", profile.name, seed);

        let mut session = Self {
            world,
            controller,
            store,
            meta: MetaGame::new(config.achievement_bonus),
            audio,
            settings,
            profile,
            input: TickInput::default(),
            accumulator: 0.0,
            ticks: 0,
            round_events: Vec::new(),
            meta_events: Vec::new(),
        };
        // Level 1 load events
        session.dispatch();
        session
    }

    pub fn state(&self) -> &RoundState {
        self.controller.state()
    }

    pub fn controller(&self) -> &RoundController {
        &self.controller
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn store(&self) -> &dyn PreferenceStore {
        self.store.as_ref()
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    /// Simulation ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Banked coins
    pub fn balance(&self) -> i64 {
        wallet::balance(self.store.as_ref())
    }

    /// Round events since the last drain
    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.round_events)
    }

    /// Wallet and achievement changes since the last drain
    pub fn drain_meta_events(&mut self) -> Vec<MetaEvent> {
        std::mem::take(&mut self.meta_events)
    }

    /// Advance by a rendered frame's delta. Returns the ticks run.
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = std::mem::take(&mut self.input);
            self.step(&input);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Run exactly one tick with `input`, ignoring the frame accumulator
    pub fn step(&mut self, input: &TickInput) {
        self.controller.tick(&mut self.world, input, SIM_DT);
        self.ticks += 1;
        self.dispatch();
    }

    /// Hand freshly emitted round events to the meta-game and audio
    fn dispatch(&mut self) {
        let events = self.controller.drain_events();
        if events.is_empty() {
            return;
        }
        let meta = self.meta.apply(self.store.as_mut(), &events);
        self.audio.handle_events(&events);
        self.round_events.extend(events);
        self.meta_events.extend(meta);
    }

    /// Queue a tap on the board
    pub fn tap(&mut self) {
        self.input.launch = true;
    }

    /// Flip sound on/off and persist the choice
    pub fn toggle_sound(&mut self) -> bool {
        self.settings.sound_on = self.audio.toggle();
        self.settings.save(self.store.as_mut());
        self.settings.sound_on
    }

    pub fn set_profile(&mut self, profile: PlayerProfile) {
        profile.save(self.store.as_mut());
        self.profile = profile;
    }

    pub fn purchase(&mut self, item: ShopItem) -> Result<(), PurchaseError> {
        shop::purchase(self.store.as_mut(), item)
    }

    pub fn select_item(&mut self, item: ShopItem) -> bool {
        shop::select(self.store.as_mut(), item)
    }

    pub fn selected_item(&self, category: ShopCategory) -> ShopItem {
        shop::selected(self.store.as_ref(), category)
    }
}
