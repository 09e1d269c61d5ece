use log::Level;

/// Delay before the second trigger re-measure after mount, for images that
/// finish decoding after the `load` event.
pub const REFRESH_SETTLE_MS: u32 = 500;

/// Image `load` events within this window collapse into one re-measure.
pub const IMAGE_REFRESH_DEBOUNCE_MS: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothScrollOptions {
    /// Fraction of the remaining distance covered per 60Hz frame.
    pub lerp: f64,
    pub wheel_multiplier: f64,
}

impl Default for SmoothScrollOptions {
    fn default() -> Self {
        Self {
            lerp: 0.1,
            wheel_multiplier: 1.0,
        }
    }
}

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Log every trigger crossing at debug level.
#[cfg(debug_assertions)]
pub fn trace_triggers() -> bool {
    true
}

#[cfg(not(debug_assertions))]
pub fn trace_triggers() -> bool {
    false
}
