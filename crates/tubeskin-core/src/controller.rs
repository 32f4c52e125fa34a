//! Playback Controller - reconciles UI state with the embedded player
//!
//! Coordinates:
//! - Embed lifecycle callbacks (ready, state change, error)
//! - Transport actions (play/pause, mute, seek)
//! - Progress polling frames
//! - Hover-driven top bar visibility
//! - Mount/unmount teardown

use crate::{
    config::ViewConfig,
    control::PlayerControl,
    hover::HoverTracker,
    lifecycle::MountScope,
    seek::{seek_fraction, seek_target},
    types::*,
    Error, Result,
};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// One progress poll reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressFrame {
    pub current_time: f64,
    pub duration: f64,
    /// Progress bar fill, `0..=100`
    pub percent: f64,
}

/// What a state change asks the view to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateEffect {
    /// Start the progress polling loop (first time playback begins)
    pub start_polling: bool,
}

/// Controller for one mounted player view
pub struct PlaybackController<P: PlayerControl> {
    /// Current UI state
    session: PlaybackSession,
    /// View configuration
    config: ViewConfig,
    /// Embedded player, once constructed
    player: Option<P>,
    /// Top bar hover tracking
    hover: HoverTracker,
    /// Cancellation scope of this mount
    scope: MountScope,
    /// Token handed to the polling loop
    poll_token: Option<CancellationToken>,
}

impl<P: PlayerControl> PlaybackController<P> {
    /// Create a controller for a freshly mounted view
    pub fn new(video_id: VideoId, config: ViewConfig) -> Self {
        let session = PlaybackSession::new(video_id);
        info!(session_id = %session.id, video_id = %session.video_id, "Player view mounted");

        Self {
            hover: HoverTracker::new(config.hover_hide_delay()),
            session,
            config,
            player: None,
            scope: MountScope::new(),
            poll_token: None,
        }
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn player(&self) -> Option<&P> {
        self.player.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.scope.is_mounted()
    }

    /// Bind the constructed embed. Ignored after unmount.
    pub fn attach(&mut self, player: P) {
        if !self.scope.is_mounted() {
            debug!(session_id = %self.session.id, "Destroying player attached after unmount");
            player.destroy();
            return;
        }
        self.player = Some(player);
    }

    fn require_player(&self) -> Result<&P> {
        self.player.as_ref().ok_or(Error::PlayerNotReady)
    }

    // ------------------------------------------------------------------
    // Embed callbacks
    // ------------------------------------------------------------------

    /// Embed finished initializing
    #[instrument(skip(self), fields(session_id = %self.session.id))]
    pub fn on_ready(&mut self) -> Result<()> {
        let volume = self.config.initial_volume;
        self.require_player()?.set_volume(volume);

        self.session.loading = false;
        self.session.thumbnail_armed = true;
        info!(volume, "Player ready");
        Ok(())
    }

    /// Embed changed playback state
    pub fn on_state_change(&mut self, state: PlayerState) -> StateEffect {
        debug!(session_id = %self.session.id, state = %state, "State change");

        match state {
            PlayerState::Playing => {
                self.session.playing = true;
                self.session.buffering = false;
                self.session.loading = false;
                self.session.thumbnail_visible = false;
                self.session.error = None;

                let start_polling = !self.session.polling && self.scope.is_mounted();
                self.session.polling |= start_polling;
                StateEffect { start_polling }
            }
            PlayerState::Buffering => {
                self.session.buffering = true;
                StateEffect::default()
            }
            PlayerState::Unstarted | PlayerState::Ended | PlayerState::Paused | PlayerState::Cued => {
                self.session.playing = false;
                self.session.buffering = false;
                StateEffect::default()
            }
        }
    }

    /// Embed changed state with a raw numeric code
    pub fn on_state_code(&mut self, code: i32) -> StateEffect {
        match PlayerState::from_code(code) {
            Some(state) => self.on_state_change(state),
            None => {
                warn!(session_id = %self.session.id, code, "Unknown player state code");
                StateEffect::default()
            }
        }
    }

    /// Embed reported an error
    pub fn on_error(&mut self, error: EmbedError) {
        warn!(session_id = %self.session.id, error = %error, "Embedded player error");
        self.session.error = Some(error);
        self.session.loading = false;
        self.session.playing = false;
        self.session.buffering = false;
    }

    // ------------------------------------------------------------------
    // User actions
    // ------------------------------------------------------------------

    /// Click on the thumbnail overlay. Plays once; later clicks do nothing.
    pub fn click_thumbnail(&mut self) -> Result<bool> {
        if !self.session.thumbnail_armed {
            return Ok(false);
        }
        self.require_player()?.play();
        self.session.thumbnail_armed = false;
        self.session.thumbnail_visible = false;
        debug!(session_id = %self.session.id, "Thumbnail clicked");
        Ok(true)
    }

    /// Pause if playing, otherwise play. Flags follow the embed's callbacks.
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        let player = self.require_player()?;
        if self.session.playing {
            player.pause();
        } else {
            player.play();
        }
        Ok(())
    }

    /// Flip mute. Returns the new muted flag.
    pub fn toggle_mute(&mut self) -> Result<bool> {
        let player = self.require_player()?;
        if self.session.muted {
            player.unmute();
        } else {
            player.mute();
        }
        self.session.muted = !self.session.muted;
        debug!(session_id = %self.session.id, muted = self.session.muted, "Mute toggled");
        Ok(self.session.muted)
    }

    /// Seek to where the progress bar was clicked. Returns the target in seconds.
    pub fn seek_click(&mut self, offset_x: f64, bar_width: f64) -> Result<f64> {
        let player = self.require_player()?;
        let fraction = seek_fraction(offset_x, bar_width)?;
        let target = seek_target(fraction, player.duration());

        player.seek_to(target);
        info!(session_id = %self.session.id, fraction, target, "Seeking");
        Ok(target)
    }

    // ------------------------------------------------------------------
    // Progress polling
    // ------------------------------------------------------------------

    /// Cancellation token for the polling loop, created on first request
    pub fn poll_token(&mut self) -> CancellationToken {
        self.poll_token
            .get_or_insert_with(|| self.scope.child())
            .clone()
    }

    /// Read position and duration from the embed into the session.
    ///
    /// Returns `None` once unmounted or while no player is attached.
    pub fn poll_progress(&mut self) -> Option<ProgressFrame> {
        if !self.scope.is_mounted() {
            return None;
        }
        let player = self.player.as_ref()?;

        let current_time = player.current_time();
        let duration = player.duration();
        if !self.session.controls_revealed && player.loaded_fraction() > 0.0 {
            self.session.controls_revealed = true;
            debug!(session_id = %self.session.id, "Video data loaded, revealing controls");
        }

        self.session.current_time = current_time;
        self.session.duration = duration;

        Some(ProgressFrame {
            current_time,
            duration,
            percent: self.session.progress_percent(),
        })
    }

    // ------------------------------------------------------------------
    // Hover
    // ------------------------------------------------------------------

    pub fn hover_enter(&mut self) {
        self.hover.enter();
        self.session.hovering = true;
    }

    /// Pointer left at `now`. Returns the delay after which to call [`hover_tick`].
    ///
    /// [`hover_tick`]: PlaybackController::hover_tick
    pub fn hover_leave(&mut self, now: Duration) -> Duration {
        self.hover.leave(now)
    }

    /// Apply a due hide. Returns true if the hover flag changed.
    pub fn hover_tick(&mut self, now: Duration) -> bool {
        if !self.scope.is_mounted() {
            return false;
        }
        let changed = self.hover.tick(now);
        self.session.hovering = self.hover.is_hovering();
        changed
    }

    /// Time until a pending hide is due, if one is pending and the view is mounted
    pub fn hover_remaining(&self, now: Duration) -> Option<Duration> {
        if !self.scope.is_mounted() {
            return None;
        }
        self.hover.remaining(now)
    }

    /// Token for a hover-hide timer
    pub fn timer_token(&self) -> CancellationToken {
        self.scope.child()
    }

    /// Top bar shows while hovering or whenever playback is not running
    pub fn top_bar_visible(&self) -> bool {
        self.session.hovering || !self.session.playing
    }

    // ------------------------------------------------------------------
    // Teardown
    // ------------------------------------------------------------------

    /// Cancel background work and destroy the embed. Safe to call twice.
    #[instrument(skip(self), fields(session_id = %self.session.id))]
    pub fn unmount(&mut self) {
        if !self.scope.unmount() {
            return;
        }
        self.hover.cancel();
        self.session.polling = false;
        if let Some(player) = self.player.take() {
            player.destroy();
        }
        info!("Player view unmounted");
    }
}

impl<P: PlayerControl> Drop for PlaybackController<P> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::MockPlayerControl;
    use mockall::predicate::eq;

    fn controller() -> PlaybackController<MockPlayerControl> {
        PlaybackController::new(VideoId::new("abc123"), ViewConfig::default())
    }

    fn attached(player: MockPlayerControl) -> PlaybackController<MockPlayerControl> {
        let mut controller = controller();
        controller.attach(player);
        controller
    }

    fn destroyable() -> MockPlayerControl {
        let mut player = MockPlayerControl::new();
        player.expect_destroy().times(1).return_const(());
        player
    }

    #[test]
    fn test_ready_sets_volume_and_arms_thumbnail() {
        let mut player = destroyable();
        player.expect_set_volume().with(eq(100)).times(1).return_const(());

        let mut controller = attached(player);
        controller.on_ready().unwrap();

        assert!(!controller.session().loading);
        assert!(controller.session().thumbnail_armed);
    }

    #[test]
    fn test_ready_without_player() {
        let mut controller = controller();
        assert!(matches!(controller.on_ready(), Err(Error::PlayerNotReady)));
        assert!(controller.session().loading);
    }

    #[test]
    fn test_playing_clears_loading_and_buffering() {
        let mut controller = controller();
        controller.on_state_change(PlayerState::Buffering);

        let effect = controller.on_state_change(PlayerState::Playing);

        let session = controller.session();
        assert!(effect.start_polling);
        assert!(session.playing);
        assert!(!session.loading);
        assert!(!session.buffering);
        assert!(!session.thumbnail_visible);
    }

    #[test]
    fn test_polling_starts_once() {
        let mut controller = controller();
        assert!(controller.on_state_change(PlayerState::Playing).start_polling);
        controller.on_state_change(PlayerState::Paused);
        assert!(!controller.on_state_change(PlayerState::Playing).start_polling);
    }

    #[test]
    fn test_buffering_keeps_playing_flag() {
        let mut controller = controller();
        controller.on_state_change(PlayerState::Buffering);
        assert!(!controller.session().playing);
        assert!(controller.session().buffering);

        controller.on_state_change(PlayerState::Playing);
        controller.on_state_change(PlayerState::Buffering);
        assert!(controller.session().playing);
        assert!(controller.session().buffering);
    }

    #[test]
    fn test_other_states_clear_flags() {
        for state in [PlayerState::Paused, PlayerState::Ended, PlayerState::Unstarted, PlayerState::Cued] {
            let mut controller = controller();
            controller.on_state_change(PlayerState::Playing);
            controller.on_state_change(PlayerState::Buffering);
            controller.on_state_change(state);

            assert!(!controller.session().playing, "{state}");
            assert!(!controller.session().buffering, "{state}");
        }
    }

    #[test]
    fn test_unknown_state_code_ignored() {
        let mut controller = controller();
        controller.on_state_code(1);
        assert_eq!(controller.on_state_code(42), StateEffect::default());
        assert!(controller.session().playing);
    }

    #[test]
    fn test_toggle_play_pause() {
        let mut player = destroyable();
        player.expect_play().times(1).return_const(());
        player.expect_pause().times(1).return_const(());

        let mut controller = attached(player);
        controller.toggle_play_pause().unwrap();
        controller.on_state_change(PlayerState::Playing);
        controller.toggle_play_pause().unwrap();
    }

    #[test]
    fn test_toggle_mute() {
        let mut player = destroyable();
        player.expect_mute().times(1).return_const(());
        player.expect_unmute().times(1).return_const(());

        let mut controller = attached(player);
        assert!(controller.toggle_mute().unwrap());
        assert!(!controller.toggle_mute().unwrap());
    }

    #[test]
    fn test_actions_before_attach_fail() {
        let mut controller = controller();
        assert!(matches!(controller.toggle_play_pause(), Err(Error::PlayerNotReady)));
        assert!(matches!(controller.toggle_mute(), Err(Error::PlayerNotReady)));
        assert!(matches!(controller.seek_click(1.0, 2.0), Err(Error::PlayerNotReady)));
        assert!(!controller.session().muted);
    }

    #[test]
    fn test_seek_click_midpoint() {
        let mut player = destroyable();
        player.expect_duration().return_const(240.0);
        player.expect_seek_to().with(eq(120.0)).times(1).return_const(());

        let mut controller = attached(player);
        assert_eq!(controller.seek_click(300.0, 600.0).unwrap(), 120.0);
    }

    #[test]
    fn test_seek_click_zero_width() {
        let mut player = destroyable();
        player.expect_seek_to().never();

        let mut controller = attached(player);
        assert!(matches!(
            controller.seek_click(10.0, 0.0),
            Err(Error::InvalidSeek { .. })
        ));
    }

    #[test]
    fn test_thumbnail_click_is_one_shot() {
        let mut player = destroyable();
        player.expect_set_volume().return_const(());
        player.expect_play().times(1).return_const(());

        let mut controller = attached(player);
        assert!(!controller.click_thumbnail().unwrap());

        controller.on_ready().unwrap();
        assert!(controller.click_thumbnail().unwrap());
        assert!(!controller.session().thumbnail_visible);
        assert!(!controller.click_thumbnail().unwrap());
    }

    #[test]
    fn test_poll_progress() {
        let mut player = destroyable();
        player.expect_current_time().return_const(30.0);
        player.expect_duration().return_const(120.0);
        player.expect_loaded_fraction().return_const(0.1);

        let mut controller = attached(player);
        let frame = controller.poll_progress().unwrap();

        assert_eq!(frame.percent, 25.0);
        assert_eq!(controller.session().current_time, 30.0);
        assert_eq!(controller.session().duration, 120.0);
        assert!(controller.session().controls_revealed);
    }

    #[test]
    fn test_unmount_cancels_and_destroys_once() {
        let mut controller = attached(destroyable());
        let poll = controller.poll_token();
        let timer = controller.timer_token();

        controller.unmount();
        controller.unmount();

        assert!(poll.is_cancelled());
        assert!(timer.is_cancelled());
        assert!(controller.poll_progress().is_none());
        assert!(!controller.on_state_change(PlayerState::Playing).start_polling);
    }

    #[test]
    fn test_attach_after_unmount_destroys() {
        let mut controller = controller();
        controller.unmount();
        controller.attach(destroyable());
        assert!(controller.player().is_none());
    }

    #[test]
    fn test_hover_leave_hides_after_delay() {
        let mut controller = controller();
        controller.on_state_change(PlayerState::Playing);
        controller.hover_enter();
        assert!(controller.top_bar_visible());

        let delay = controller.hover_leave(Duration::ZERO);
        assert_eq!(delay, Duration::from_millis(2500));
        assert!(!controller.hover_tick(Duration::from_millis(2000)));
        assert!(controller.top_bar_visible());

        assert!(controller.hover_tick(delay));
        assert!(!controller.top_bar_visible());
    }

    #[test]
    fn test_hover_timer_firing_early_waits_again() {
        let mut controller = controller();
        controller.on_state_change(PlayerState::Playing);
        controller.hover_enter();
        let left_at = Duration::from_micros(1_000_100);
        let delay = controller.hover_leave(left_at);

        let early = left_at + delay - Duration::from_micros(200);
        assert!(!controller.hover_tick(early));
        assert!(controller.top_bar_visible());

        let wait = controller.hover_remaining(early).unwrap();
        assert_eq!(wait, Duration::from_micros(200));
        assert!(controller.hover_tick(early + wait));
        assert!(!controller.top_bar_visible());
        assert_eq!(controller.hover_remaining(early + wait), None);
    }

    #[test]
    fn test_hover_remaining_none_after_unmount() {
        let mut controller = controller();
        controller.hover_leave(Duration::ZERO);
        controller.unmount();
        assert_eq!(controller.hover_remaining(Duration::ZERO), None);
    }

    #[test]
    fn test_hover_enter_cancels_hide() {
        let mut controller = controller();
        controller.on_state_change(PlayerState::Playing);
        controller.hover_enter();
        controller.hover_leave(Duration::ZERO);
        controller.hover_enter();

        assert!(!controller.hover_tick(Duration::from_secs(10)));
        assert!(controller.top_bar_visible());
    }

    #[test]
    fn test_top_bar_visible_when_not_playing() {
        let controller = controller();
        assert!(!controller.session().hovering);
        assert!(controller.top_bar_visible());
    }

    #[test]
    fn test_error_clears_loading() {
        let mut controller = controller();
        controller.on_error(EmbedError::NotFound);
        assert!(!controller.session().loading);
        assert_eq!(controller.session().error, Some(EmbedError::NotFound));
    }
}
