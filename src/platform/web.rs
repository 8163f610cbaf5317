//! Browser implementations of the platform boundary
//!
//! Rendering positions absolutely-placed DOM elements inside the play area;
//! the best score lives in LocalStorage; viewport queries read the live
//! layout. All failures degrade silently, matching the boundary contract.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, HtmlElement};

use super::{RenderSink, ScoreStore, Viewport};
use crate::consts::*;
use crate::score::BestScore;
use crate::sim::state::ShadowTint;

fn tint_class(tint: ShadowTint) -> &'static str {
    match tint {
        ShadowTint::Black => "bg-black",
        ShadowTint::Midnight => "bg-gray-950",
        ShadowTint::Charcoal => "bg-gray-900",
    }
}

fn set_px(el: &HtmlElement, property: &str, value: f32) {
    let _ = el.style().set_property(property, &format!("{value}px"));
}

/// Renders the game by absolutely positioning DOM elements in `#game`
pub struct DomRenderer {
    document: Document,
    game: HtmlElement,
    player: HtmlElement,
    shadows: HashMap<u32, HtmlElement>,
}

impl DomRenderer {
    /// Look up the play area and player elements. `None` when the page is
    /// missing either - the game cannot start without them.
    pub fn new(document: &Document) -> Option<Self> {
        let game: HtmlElement = document.get_element_by_id("game")?.dyn_into().ok()?;
        let player: HtmlElement = document.get_element_by_id("player")?.dyn_into().ok()?;
        Some(Self {
            document: document.clone(),
            game,
            player,
            shadows: HashMap::new(),
        })
    }
}

impl RenderSink for DomRenderer {
    fn set_player_position(&mut self, lane: u32) {
        set_px(&self.player, "top", lane as f32 * LANE_HEIGHT);
    }

    fn spawn_shadow(&mut self, id: u32, lane: u32, tint: ShadowTint) {
        let Ok(el) = self.document.create_element("div") else {
            return;
        };
        let Ok(el) = el.dyn_into::<HtmlElement>() else {
            return;
        };
        el.set_class_name(&format!(
            "w-10 h-10 absolute rounded {} border border-gray-800",
            tint_class(tint)
        ));
        set_px(&el, "left", SPAWN_X);
        set_px(&el, "top", lane as f32 * LANE_HEIGHT);
        let _ = self.game.append_child(&el);
        self.shadows.insert(id, el);
    }

    fn render_shadow(&mut self, id: u32, x: f32, _lane: u32) {
        if let Some(el) = self.shadows.get(&id) {
            set_px(el, "left", x);
        }
    }

    fn remove_shadow(&mut self, id: u32) {
        if let Some(el) = self.shadows.remove(&id) {
            el.remove();
        }
    }

    fn spawn_particles(&mut self, x: f32, y: f32) {
        let Some(window) = web_sys::window() else {
            return;
        };
        for _ in 0..PARTICLE_COUNT {
            let Ok(el) = self.document.create_element("div") else {
                continue;
            };
            let Ok(el) = el.dyn_into::<HtmlElement>() else {
                continue;
            };
            el.set_class_name("w-1 h-1 bg-white absolute");
            set_px(&el, "left", x);
            set_px(&el, "top", y);
            let _ = self.game.append_child(&el);

            let doomed = el.clone();
            let cb = Closure::once_into_js(move || doomed.remove());
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.unchecked_ref(),
                PARTICLE_LIFETIME_MS,
            );
        }
    }
}

/// Best score in LocalStorage, keyed per game
pub struct LocalStorageStore;

impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "shadow_dash_best_score";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

impl ScoreStore for LocalStorageStore {
    fn load_best(&self) -> Option<BestScore> {
        let raw = Self::storage()?.get_item(Self::STORAGE_KEY).ok()??;
        BestScore::from_stored(&raw)
    }

    fn save_best(&mut self, score: u32) {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable - best score not saved");
            return;
        };
        let record = BestScore {
            score,
            achieved_at_ms: js_sys::Date::now(),
        };
        if let Ok(json) = serde_json::to_string(&record) {
            let _ = storage.set_item(Self::STORAGE_KEY, &json);
            log::info!("Best score saved ({})", score);
        }
    }
}

/// Live measurements of the play area and browser window
pub struct BrowserViewport {
    game: HtmlElement,
}

impl BrowserViewport {
    pub fn new(document: &Document) -> Option<Self> {
        let game: HtmlElement = document.get_element_by_id("game")?.dyn_into().ok()?;
        Some(Self { game })
    }
}

impl Viewport for BrowserViewport {
    fn play_area_height(&self) -> f32 {
        self.game.offset_height() as f32
    }

    fn viewport_width(&self) -> f32 {
        web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32
    }
}
