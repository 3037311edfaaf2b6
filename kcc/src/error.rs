/// Construction-time failures.
///
/// Nothing past construction returns an error: degenerate input at runtime
/// (zero velocity, near-vertical movement, iteration cap exhaustion) is policy.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ControllerError {
    #[error("no shape sweeper was provided; the controller cannot run without collision")]
    MissingSweeper,
    #[error("invalid capsule (radius: {radius}, height: {height}); need radius > 0 and height >= 2 * radius")]
    InvalidCapsule { radius: f32, height: f32 },
    #[error("invalid controller setting `{field}`: {reason}")]
    InvalidSettings {
        field: &'static str,
        reason: &'static str,
    },
}
