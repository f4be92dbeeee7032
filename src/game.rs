//! Frame loop driver
//!
//! Owns one match plus everything the simulation needs from outside:
//! held keys, the current field size and the chosen settings. The host
//! calls `frame` once per display refresh; scheduling the next call is the
//! host's job (`requestAnimationFrame` on the web).

use crate::audio::{SoundCue, SoundSink};
use crate::error::Result;
use crate::platform::KeyBindings;
use crate::renderer::{Surface, scene};
use crate::settings::Settings;
use crate::sim::{Field, GameEvent, GameState, InputState, tick};
use crate::tuning::Tuning;

pub struct Game {
    pub state: GameState,
    pub settings: Settings,
    pub input: InputState,
    pub keys: KeyBindings,
    tuning: Tuning,
    field: Field,
}

impl Game {
    /// Start a match. Hand-built tuning is checked here the same way
    /// `Tuning::from_json` checks parsed tuning.
    pub fn new(settings: Settings, tuning: Tuning, field: Field) -> Result<Self> {
        tuning.validate()?;
        Ok(Self {
            state: GameState::new(&settings, &tuning, field),
            settings,
            input: InputState::default(),
            keys: KeyBindings::default(),
            tuning,
            field,
        })
    }

    pub fn field(&self) -> Field {
        self.field
    }

    /// Refit the field to a new viewport. A degenerate viewport is
    /// rejected and the previous field kept.
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) -> Result<Field> {
        let field = Field::fit_viewport(viewport_width, viewport_height)?;
        self.field = field;
        log::debug!("Field resized to {}x{}", field.width(), field.height());
        Ok(field)
    }

    /// Key press/release from the host. Returns false for unbound keys.
    pub fn handle_key(&mut self, key: &str, pressed: bool) -> bool {
        self.keys.apply(&mut self.input, key, pressed)
    }

    /// Run one simulation step
    pub fn update(&mut self, now_ms: f64) -> Vec<GameEvent> {
        tick(&mut self.state, &self.input, self.field, now_ms)
    }

    /// Draw the current state
    pub fn render<S: Surface>(&self, surface: &mut S) {
        let commands = scene::build(&self.state, self.field, &self.settings);
        surface.draw(&commands);
    }

    /// Update, play the resulting cues, then render
    pub fn frame<S: Surface, A: SoundSink>(
        &mut self,
        now_ms: f64,
        surface: &mut S,
        audio: &mut A,
    ) -> Vec<GameEvent> {
        let events = self.update(now_ms);
        if self.settings.sound_enabled {
            for cue in events.iter().filter_map(SoundCue::from_event) {
                audio.play(cue);
            }
        }
        self.render(surface);
        events
    }

    /// Start a new match with the same settings
    pub fn restart(&mut self, seed: u64) {
        self.settings.seed = seed;
        self.state = GameState::new(&self.settings, &self.tuning, self.field);
        self.input = InputState::default();
    }
}
