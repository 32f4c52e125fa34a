//! Tubeskin Theme - color palette and generated stylesheet
//!
//! Single source of truth for the skin's colors and the CSS class names the
//! front end puts on its elements.
//!
//! # Usage
//!
//! ```rust
//! use tubeskin_core::theme::SkinTheme;
//!
//! let css = SkinTheme::default().to_css();
//! assert!(css.contains("--ts-primary"));
//! ```

/// CSS class names shared by the stylesheet and the DOM builder
pub mod classes {
    pub const HOME: &str = "ts-home";
    pub const FORM: &str = "ts-form";
    pub const LABEL: &str = "ts-label";
    pub const INPUT: &str = "ts-input";
    pub const SUBMIT: &str = "ts-submit";
    pub const PAGE: &str = "ts-page";
    pub const CONTAINER: &str = "ts-container";
    pub const EMBED: &str = "ts-embed";
    pub const TOP_BAR: &str = "ts-topbar";
    pub const OVERLAY: &str = "ts-overlay";
    pub const THUMBNAIL: &str = "ts-thumbnail";
    pub const CENTER: &str = "ts-center";
    pub const SPINNER: &str = "ts-spinner";
    pub const PLAY: &str = "ts-play";
    pub const CONTROLS: &str = "ts-controls";
    pub const BUTTON: &str = "ts-btn";
    pub const PROGRESS: &str = "ts-progress";
    pub const PROGRESS_FILL: &str = "ts-progress-fill";
    pub const TIME: &str = "ts-time";
    pub const MESSAGE: &str = "ts-message";
    pub const HIDDEN: &str = "ts-hidden";
    pub const FADED: &str = "ts-faded";
}

/// Stacking order of the player layers, bottom to top.
///
/// The thumbnail sits above the gradient overlay so its one-shot click
/// reaches it while the overlay is still shown.
pub mod layers {
    pub const OVERLAY: u8 = 1;
    pub const THUMBNAIL: u8 = 2;
    pub const CENTER: u8 = 3;
    pub const CONTROLS: u8 = 40;
    pub const TOP_BAR: u8 = 50;
}

/// Skin color palette
#[derive(Debug, Clone)]
pub struct SkinColors {
    /// Accent for buttons and the top bar - #0ea5e9
    pub primary: &'static str,
    /// Focus ring on the intake input - #0284c7
    pub primary_dark: &'static str,
    /// Control bar background - #27272a
    pub surface: &'static str,
    /// Progress track - #52525b
    pub track: &'static str,
    /// Placeholder behind the thumbnail overlay - #bae6fd
    pub placeholder: &'static str,
    /// Text on dark surfaces - #ffffff
    pub text: &'static str,
    /// Body text on the page - #27272a
    pub text_soft: &'static str,
    /// Error text - #ef4444
    pub error: &'static str,
}

impl Default for SkinColors {
    fn default() -> Self {
        Self {
            primary: "#0ea5e9",
            primary_dark: "#0284c7",
            surface: "#27272a",
            track: "#52525b",
            placeholder: "#bae6fd",
            text: "#ffffff",
            text_soft: "#27272a",
            error: "#ef4444",
        }
    }
}

/// Complete skin configuration
#[derive(Debug, Clone)]
pub struct SkinTheme {
    /// Color palette
    pub colors: SkinColors,
    /// Border radius for buttons and the container (px)
    pub border_radius: u8,
}

impl Default for SkinTheme {
    fn default() -> Self {
        Self {
            colors: SkinColors::default(),
            border_radius: 6,
        }
    }
}

impl SkinTheme {
    /// CSS custom properties for the palette
    pub fn variables(&self) -> String {
        let c = &self.colors;
        format!(
            r#":root {{
  --ts-primary: {};
  --ts-primary-dark: {};
  --ts-surface: {};
  --ts-track: {};
  --ts-placeholder: {};
  --ts-text: {};
  --ts-text-soft: {};
  --ts-error: {};
  --ts-radius: {}px;
}}"#,
            c.primary,
            c.primary_dark,
            c.surface,
            c.track,
            c.placeholder,
            c.text,
            c.text_soft,
            c.error,
            self.border_radius,
        )
    }

    /// Layout and component rules
    pub fn component_css() -> String {
        use classes::*;
        let (z_overlay, z_thumbnail, z_center, z_controls, z_top_bar) = (
            layers::OVERLAY,
            layers::THUMBNAIL,
            layers::CENTER,
            layers::CONTROLS,
            layers::TOP_BAR,
        );
        format!(
            r#"
body {{ margin: 0; font-family: system-ui, -apple-system, sans-serif; color: var(--ts-text-soft); }}
.{HOME}, .{PAGE} {{ min-height: 100vh; display: flex; align-items: center; justify-content: center; padding: 1rem; box-sizing: border-box; }}
.{FORM} {{ width: 100%; max-width: 24rem; display: flex; flex-direction: column; gap: .75rem; }}
.{LABEL} {{ font-size: 1.125rem; font-weight: 600; }}
.{INPUT} {{ padding: .75rem; font-size: .875rem; border: 1px solid #d4d4d8; border-radius: var(--ts-radius); outline: none; }}
.{INPUT}:focus {{ border-color: var(--ts-primary-dark); }}
.{SUBMIT}, .{BUTTON}, .{PLAY} {{ background: var(--ts-primary); color: var(--ts-text); border: none; border-radius: var(--ts-radius); cursor: pointer; font-weight: 700; transition: transform .2s; }}
.{SUBMIT} {{ padding: .5rem 1rem; }}
.{BUTTON} {{ padding: 5px 7px; line-height: 1; }}
.{PLAY} {{ padding: .75rem 1.5rem; font-size: 1.25rem; }}
.{BUTTON}:hover, .{PLAY}:hover {{ transform: scale(1.1); }}
.{CONTAINER} {{ position: relative; width: 95vw; height: calc(95vw * 9 / 16); overflow: hidden; border-radius: var(--ts-radius); border: 1px solid #e4e4e7; box-shadow: 0 20px 25px -5px rgba(0, 0, 0, .2); }}
@media (min-width: 768px) {{ .{CONTAINER} {{ width: 85vw; height: calc(85vw * 9 / 16); }} }}
.{EMBED}, .{OVERLAY}, .{THUMBNAIL}, .{CENTER} {{ position: absolute; inset: 0; width: 100%; height: 100%; }}
.{OVERLAY} {{ z-index: {z_overlay}; }}
.{THUMBNAIL} {{ z-index: {z_thumbnail}; }}
.{CENTER} {{ z-index: {z_center}; }}
.{CONTROLS} {{ z-index: {z_controls}; }}
.{CENTER} {{ display: flex; align-items: center; justify-content: center; pointer-events: none; }}
.{THUMBNAIL} {{ background: var(--ts-placeholder); cursor: pointer; }}
.{OVERLAY} {{ display: flex; align-items: center; justify-content: center; cursor: pointer; background: linear-gradient(rgba(0, 0, 0, .1), transparent, rgba(0, 0, 0, .1)); }}
.{TOP_BAR} {{ position: absolute; top: 0; left: 0; right: 0; z-index: {z_top_bar}; padding: 1rem; background: var(--ts-primary); color: var(--ts-text); font-weight: 600; transition: opacity .1s ease-in; }}
.{CONTROLS} {{ position: absolute; bottom: 0; left: 0; right: 0; display: flex; align-items: center; gap: .75rem; padding: .75rem; background: var(--ts-surface); transition: opacity .3s; }}
.{PROGRESS} {{ flex: 1; height: 6px; background: var(--ts-track); border-radius: 9999px; overflow: hidden; cursor: pointer; }}
.{PROGRESS_FILL} {{ height: 100%; width: 0; background: var(--ts-text); }}
.{PROGRESS}:hover .{PROGRESS_FILL} {{ background: var(--ts-primary); }}
.{TIME} {{ color: var(--ts-text); font-size: .875rem; font-variant-numeric: tabular-nums; }}
.{SPINNER} {{ width: 2rem; height: 2rem; border: 3px solid rgba(255, 255, 255, .4); border-top-color: var(--ts-text); border-radius: 50%; animation: ts-spin 1s linear infinite; }}
.{MESSAGE} {{ color: var(--ts-error); font-weight: 600; }}
.{HIDDEN} {{ display: none !important; }}
.{FADED} {{ opacity: 0; pointer-events: none; }}
@keyframes ts-spin {{ to {{ transform: rotate(360deg); }} }}
"#
        )
    }

    /// Complete stylesheet
    pub fn to_css(&self) -> String {
        format!("{}\n{}", self.variables(), Self::component_css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_colors() {
        let colors = SkinColors::default();
        assert_eq!(colors.primary, "#0ea5e9");
        assert_eq!(colors.surface, "#27272a");
    }

    #[test]
    fn test_css_generation() {
        let css = SkinTheme::default().to_css();
        assert!(css.contains("--ts-primary: #0ea5e9"));
        assert!(css.contains("--ts-radius: 6px"));
        assert!(css.contains(".ts-hidden { display: none !important; }"));
        assert!(css.contains("@keyframes ts-spin"));
    }

    #[test]
    fn test_thumbnail_stacks_above_overlay() {
        assert!(layers::THUMBNAIL > layers::OVERLAY);
        assert!(layers::CENTER > layers::THUMBNAIL);
        assert!(layers::TOP_BAR > layers::CONTROLS);

        let css = SkinTheme::component_css();
        assert!(css.contains(".ts-overlay { z-index: 1; }"));
        assert!(css.contains(".ts-thumbnail { z-index: 2; }"));
        assert!(css.contains("z-index: 50; padding: 1rem;"));
    }
}
