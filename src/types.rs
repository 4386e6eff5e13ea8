use serde::Serialize;

/// Sub-pixel image coordinate, origin at the top-left pixel center.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Per-frame tracking result.
///
/// `z` is `None` when the height lookup could not be trusted: the best ZLUT
/// match sat at a table boundary, or the local quadratic fit was inconsistent
/// with the matched window. Callers decide whether to skip or flag such
/// frames; a `None` never aborts a sequence.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct PositionEstimate {
    /// Frame identifier, used only for result ordering upstream.
    pub frame: u64,
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}
