/// Pointer input, already decoded from window events.
///
/// The camera consumes these, never raw window events, so any windowing
/// backend can drive it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    /// Drag by a delta in pixels.
    Rotate { dx: f32, dy: f32 },
    /// Scroll wheel steps; positive moves the camera closer.
    Zoom(f32),
    /// Back to the framing set by the last `OrbitCamera::frame`.
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_carries_both_deltas() {
        let a = PointerAction::Rotate { dx: 3.0, dy: -2.0 };
        assert!(matches!(a, PointerAction::Rotate { dx, dy } if dx == 3.0 && dy == -2.0));
    }

    #[test]
    fn zoom_and_reset() {
        assert_eq!(PointerAction::Zoom(1.0), PointerAction::Zoom(1.0));
        assert_ne!(PointerAction::Reset, PointerAction::Zoom(0.0));
    }
}
