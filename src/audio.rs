//! Audio playback for session cues
//!
//! Wraps the page's audio elements: a looping background track while a run
//! is active and a one-shot sting on death. Everything is fire-and-forget -
//! a missing element or a blocked `play()` disables the cue, never the game.

use crate::platform::AudioSink;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::HtmlAudioElement;

/// Audio manager for the game
#[cfg(target_arch = "wasm32")]
pub struct AudioManager {
    background: Option<HtmlAudioElement>,
    death: Option<HtmlAudioElement>,
}

#[cfg(target_arch = "wasm32")]
impl AudioManager {
    /// Resolve the page's audio elements. Either may be absent; playback
    /// calls on a missing element are silently skipped.
    pub fn new() -> Self {
        let document = web_sys::window().and_then(|w| w.document());
        let lookup = |id: &str| -> Option<HtmlAudioElement> {
            document
                .as_ref()?
                .get_element_by_id(id)?
                .dyn_into::<HtmlAudioElement>()
                .ok()
        };

        let background = lookup("bg-music");
        let death = lookup("death-music");
        if background.is_none() || death.is_none() {
            log::warn!("Audio elements missing - audio disabled");
        }

        Self { background, death }
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl AudioSink for AudioManager {
    fn play_background_loop(&mut self) {
        if let Some(el) = &self.background {
            el.set_loop(true);
            el.set_current_time(0.0);
            let _ = el.play();
        }
    }

    fn stop_background_loop(&mut self) {
        if let Some(el) = &self.background {
            let _ = el.pause();
        }
    }

    fn play_death_sound(&mut self) {
        if let Some(el) = &self.death {
            el.set_current_time(0.0);
            let _ = el.play();
        }
    }
}

/// Native stub - no audio device is wired up outside the browser
#[cfg(not(target_arch = "wasm32"))]
#[derive(Default)]
pub struct AudioManager;

#[cfg(not(target_arch = "wasm32"))]
impl AudioManager {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl AudioSink for AudioManager {
    fn play_background_loop(&mut self) {}
    fn stop_background_loop(&mut self) {}
    fn play_death_sound(&mut self) {}
}
