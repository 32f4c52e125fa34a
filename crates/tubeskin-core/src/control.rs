//! Capability interface over the embedded player
//!
//! The reconciliation controller talks to the embed only through
//! [`PlayerControl`], so it can run against a fake in tests. The browser
//! front end implements it on top of the embed's JavaScript object.

/// Control and query surface of an embedded player
#[cfg_attr(test, mockall::automock)]
pub trait PlayerControl {
    fn play(&self);

    fn pause(&self);

    fn mute(&self);

    fn unmute(&self);

    /// Volume in `0..=100`
    fn set_volume(&self, volume: u8);

    /// Seek to an absolute position in seconds
    fn seek_to(&self, seconds: f64);

    /// Current position in seconds
    fn current_time(&self) -> f64;

    /// Total duration in seconds, 0 while unknown
    fn duration(&self) -> f64;

    /// Fraction of the video the player has buffered, `0.0..=1.0`
    fn loaded_fraction(&self) -> f64;

    /// Tear down the embed and its iframe
    fn destroy(&self);
}
