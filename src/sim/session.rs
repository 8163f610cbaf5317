//! Session lifecycle
//!
//! The state machine behind the menu/run/summary flow:
//! `Idle -> Running -> Ended -> {Idle, Running}`. Every public entry point
//! guards on the running flag, so input or timer callbacks that arrive after
//! a session ended are absorbed as no-ops.

use crate::consts::*;
use crate::platform::{AudioSink, RenderSink, ScoreStore, Viewport};
use crate::score::ScoreBoard;

use super::lanes::LaneLayout;
use super::spawn::spawn_shadow;
use super::state::{Phase, SessionState};
use super::tick::{TickOutcome, tick};

/// Orchestrates the spawner, game loop, score tracker, and boundary sinks
/// for one player across many runs.
pub struct Session {
    state: SessionState,
    layout: LaneLayout,
    scores: ScoreBoard,
}

impl Session {
    /// New controller in the Idle phase, sized to the current viewport
    pub fn new(seed: u64, viewport: &impl Viewport, scores: ScoreBoard) -> Self {
        let layout =
            LaneLayout::from_viewport(viewport.play_area_height(), viewport.viewport_width());
        Self::with_layout(seed, layout, scores)
    }

    /// New controller with explicit lane bounds
    pub fn with_layout(seed: u64, layout: LaneLayout, scores: ScoreBoard) -> Self {
        Self {
            state: SessionState::new(seed, &layout),
            layout,
            scores,
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn layout(&self) -> &LaneLayout {
        &self.layout
    }

    /// Recompute lane bounds from the viewport, snapping the player back
    /// into range. Called at startup and whenever the play area resizes.
    pub fn relayout(&mut self, viewport: &impl Viewport, render: &mut impl RenderSink) {
        self.layout =
            LaneLayout::from_viewport(viewport.play_area_height(), viewport.viewport_width());
        let lane = self.state.player.lane();
        self.state.player.set_lane(lane as i64, &self.layout);
        render.set_player_position(self.state.player.lane());
    }

    /// Begin a run: clear leftover shadows, reset score and speed, place the
    /// player, start the background loop. The glue starts the spawn cadence
    /// and frame loop alongside.
    pub fn start(&mut self, render: &mut impl RenderSink, audio: &mut impl AudioSink) {
        for shadow in &self.state.shadows {
            render.remove_shadow(shadow.id);
        }
        self.state.reset(&self.layout);
        self.scores.reset_run();
        self.state.phase = Phase::Running;
        render.set_player_position(self.state.player.lane());
        audio.play_background_loop();
        log::info!("Session started (max lane {})", self.layout.max_lane());
    }

    /// End the run: stop the music, play the death sting, finalize the best
    /// score. No-op unless running, which makes a late collision or timer
    /// callback harmless.
    pub fn end(&mut self, store: &mut impl ScoreStore, audio: &mut impl AudioSink) {
        if !self.state.is_running() {
            return;
        }
        self.state.phase = Phase::Ended;
        audio.stop_background_loop();
        audio.play_death_sound();
        self.scores.on_session_end(self.state.score, store);
        log::info!("Session ended at score {}", self.state.score);
    }

    /// End the current run (if one is active) and immediately begin another
    pub fn restart(
        &mut self,
        render: &mut impl RenderSink,
        store: &mut impl ScoreStore,
        audio: &mut impl AudioSink,
    ) {
        self.end(store, audio);
        self.start(render, audio);
    }

    /// Back to the menu from Running or Ended. An abandonment, not an end:
    /// the best score is not finalized.
    pub fn return_to_menu(&mut self, audio: &mut impl AudioSink) {
        self.state.phase = Phase::Idle;
        audio.stop_background_loop();
    }

    /// Move the player one lane toward the top of the play area
    pub fn move_up(&mut self, render: &mut impl RenderSink) {
        if !self.state.is_running() {
            return;
        }
        self.state.player.move_up(&self.layout);
        render.set_player_position(self.state.player.lane());
    }

    /// Move the player one lane toward the bottom of the play area
    pub fn move_down(&mut self, render: &mut impl RenderSink) {
        if !self.state.is_running() {
            return;
        }
        self.state.player.move_down(&self.layout);
        render.set_player_position(self.state.player.lane());
    }

    /// One spawn-cadence callback. At most one shadow per call; a cycle with
    /// every lane blocked spawns nothing.
    pub fn spawn_tick(&mut self, render: &mut impl RenderSink) {
        if let Some(shadow) = spawn_shadow(&mut self.state, &self.layout, NEAR_SPAWN_X) {
            render.spawn_shadow(shadow.id, shadow.lane, shadow.tint);
        }
    }

    /// One frame callback: advance the simulation, push the results at the
    /// render sink, and end the run on collision. Returns the phase so the
    /// glue can react to the transition.
    pub fn frame(
        &mut self,
        dt_ms: f64,
        render: &mut impl RenderSink,
        store: &mut impl ScoreStore,
        audio: &mut impl AudioSink,
    ) -> Phase {
        if !self.state.is_running() {
            return self.state.phase;
        }

        let TickOutcome { cleared, collided } = tick(&mut self.state, &self.layout, dt_ms);

        for c in &cleared {
            render.remove_shadow(c.id);
            render.spawn_particles(c.x - DESPAWN_X, self.layout.lane_to_y(c.lane) + 5.0);
        }

        if collided {
            self.end(store, audio);
            return self.state.phase;
        }

        for shadow in &self.state.shadows {
            render.render_shadow(shadow.id, shadow.x, shadow.lane);
        }

        self.state.phase
    }

    /// Advance the visible score counter one step toward the real score
    pub fn step_display(&mut self) -> u32 {
        self.scores.step_display(self.state.score)
    }
}
