//! Pure projection of session state onto what the player view displays

use crate::{control::PlayerControl, controller::PlaybackController, format::time_label};

/// Glyph on the play/pause button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayGlyph {
    Play,
    Pause,
    Buffering,
}

impl PlayGlyph {
    pub fn symbol(&self) -> &'static str {
        match self {
            PlayGlyph::Play => "\u{25B6}",
            PlayGlyph::Pause => "\u{275A}\u{275A}",
            PlayGlyph::Buffering => "\u{21BB}",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlayGlyph::Play => "Play",
            PlayGlyph::Pause => "Pause",
            PlayGlyph::Buffering => "Buffering",
        }
    }
}

/// Glyph on the mute button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeGlyph {
    On,
    Muted,
}

impl VolumeGlyph {
    pub fn symbol(&self) -> &'static str {
        match self {
            VolumeGlyph::On => "\u{1F50A}",
            VolumeGlyph::Muted => "\u{1F507}",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VolumeGlyph::On => "Mute",
            VolumeGlyph::Muted => "Unmute",
        }
    }
}

/// Everything the player view renders, derived from one controller snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub spinner_visible: bool,
    pub play_button_visible: bool,
    pub thumbnail_visible: bool,
    /// Gradient overlay over the embed; removed once video data has loaded
    pub overlay_visible: bool,
    pub top_bar_visible: bool,
    /// Control bar is faded out while loading
    pub controls_visible: bool,
    pub play_glyph: PlayGlyph,
    pub volume_glyph: VolumeGlyph,
    pub progress_percent: f64,
    pub time_label: String,
    pub error_message: Option<&'static str>,
}

impl ViewModel {
    pub fn from_controller<P: PlayerControl>(controller: &PlaybackController<P>) -> Self {
        let session = controller.session();

        let play_glyph = if session.buffering {
            PlayGlyph::Buffering
        } else if session.playing {
            PlayGlyph::Pause
        } else {
            PlayGlyph::Play
        };

        Self {
            spinner_visible: session.loading,
            play_button_visible: !session.playing && !session.loading && session.error.is_none(),
            thumbnail_visible: session.thumbnail_visible && session.error.is_none(),
            overlay_visible: !session.controls_revealed,
            top_bar_visible: controller.top_bar_visible(),
            controls_visible: !session.loading,
            play_glyph,
            volume_glyph: if session.muted {
                VolumeGlyph::Muted
            } else {
                VolumeGlyph::On
            },
            progress_percent: session.progress_percent(),
            time_label: time_label(session.current_time, session.duration),
            error_message: session.error.map(|e| e.user_message()),
        }
    }

    /// Inline width for the progress fill
    pub fn progress_width(&self) -> String {
        format!("{}%", self.progress_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::ViewConfig,
        control::MockPlayerControl,
        types::{EmbedError, PlayerState, VideoId},
    };

    fn controller() -> PlaybackController<MockPlayerControl> {
        PlaybackController::new(VideoId::new("abc123"), ViewConfig::default())
    }

    #[test]
    fn test_initial_view() {
        let view = ViewModel::from_controller(&controller());

        assert!(view.spinner_visible);
        assert!(!view.play_button_visible);
        assert!(!view.controls_visible);
        assert!(view.top_bar_visible);
        assert!(view.overlay_visible);
        assert_eq!(view.play_glyph, PlayGlyph::Play);
        assert_eq!(view.time_label, "0:00 / 0:00");
        assert_eq!(view.progress_width(), "0%");
    }

    #[test]
    fn test_buffering_glyph_wins() {
        let mut controller = controller();
        controller.on_state_change(PlayerState::Playing);
        assert_eq!(ViewModel::from_controller(&controller).play_glyph, PlayGlyph::Pause);

        controller.on_state_change(PlayerState::Buffering);
        assert_eq!(
            ViewModel::from_controller(&controller).play_glyph,
            PlayGlyph::Buffering
        );
    }

    #[test]
    fn test_playing_hides_play_button_and_top_bar() {
        let mut controller = controller();
        controller.on_state_change(PlayerState::Playing);
        let view = ViewModel::from_controller(&controller);

        assert!(!view.play_button_visible);
        assert!(!view.thumbnail_visible);
        assert!(!view.top_bar_visible);
        assert!(view.controls_visible);
    }

    #[test]
    fn test_error_message() {
        let mut controller = controller();
        controller.on_error(EmbedError::EmbeddingDisabled);
        let view = ViewModel::from_controller(&controller);

        assert_eq!(view.error_message, Some("This video can't be embedded"));
        assert!(!view.spinner_visible);
        assert!(!view.play_button_visible);
    }

    #[test]
    fn test_glyph_symbols() {
        assert_eq!(PlayGlyph::Play.symbol(), "▶");
        assert_eq!(VolumeGlyph::Muted.label(), "Unmute");
    }
}
