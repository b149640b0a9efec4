use crate::foundation::core::{BezPath, Point, Rgb8};
use crate::tool::state::{ToolKind, ToolState};

/// Pressure assumed when the input device reports none.
pub const DEFAULT_PRESSURE: f32 = 0.5;
/// Pencil alpha at full pressure.
pub const PENCIL_ALPHA_MAX: f32 = 0.4;
/// Eraser width as a multiple of the base width.
pub const ERASER_WIDTH_FACTOR: f64 = 2.0;

/// Map a raw device pressure into `(0, 1]`.
///
/// Missing, zero, negative or non-finite readings fall back to [`DEFAULT_PRESSURE`]; mice and
/// some pens report `0` for "unknown" while a button is held.
pub fn normalize_pressure(raw: Option<f32>) -> f32 {
    match raw {
        Some(p) if p.is_finite() && p > 0.0 => p.min(1.0),
        _ => DEFAULT_PRESSURE,
    }
}

/// One pointer sample of an active stroke.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sample {
    /// Horizontal position in canvas pixels.
    pub x: f64,
    /// Vertical position in canvas pixels.
    pub y: f64,
    /// Normalized pressure in `(0, 1]`.
    pub pressure: f32,
}

impl Sample {
    /// Build a sample, normalizing the device pressure.
    pub fn new(x: f64, y: f64, pressure: Option<f32>) -> Self {
        Self {
            x,
            y,
            pressure: normalize_pressure(pressure),
        }
    }

    /// Position as a point.
    pub fn point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Paint parameters of one segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentStyle {
    /// Straight RGB color.
    pub color: Rgb8,
    /// Straight alpha in `[0, 1]`.
    pub alpha: f32,
    /// Stroke width in pixels.
    pub width: f64,
}

impl SegmentStyle {
    /// Alpha quantized to 8 bits.
    pub fn alpha_u8(self) -> u8 {
        (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

/// Style for a segment whose control sample has `pressure`.
pub fn segment_style(tool: &ToolState, background: Rgb8, pressure: f32) -> SegmentStyle {
    let pressure = pressure.clamp(0.0, 1.0);
    match tool.tool {
        ToolKind::Pencil => SegmentStyle {
            color: tool.color,
            alpha: pressure * PENCIL_ALPHA_MAX,
            width: tool.base_width * f64::from(pressure),
        },
        ToolKind::Eraser => SegmentStyle {
            color: background,
            alpha: 1.0,
            width: tool.base_width * ERASER_WIDTH_FACTOR,
        },
    }
}

/// A quadratic curve between two sample midpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Midpoint of the previous and control samples.
    pub from: Point,
    /// The control sample.
    pub ctrl: Point,
    /// Midpoint of the control and next samples.
    pub to: Point,
    /// Paint for this segment.
    pub style: SegmentStyle,
}

impl Segment {
    /// Open path `M from Q ctrl to`.
    pub fn to_path(&self) -> BezPath {
        let mut p = BezPath::new();
        p.move_to(self.from);
        p.quad_to(self.ctrl, self.to);
        p
    }
}

/// Midpoint-quadratic smoothing of `samples`.
///
/// Emits nothing below three samples, otherwise exactly `samples.len() - 2` segments: for each
/// interior sample `i`, a curve from `mid(i-1, i)` to `mid(i, i+1)` controlled by sample `i` and
/// styled from sample `i`'s pressure.
pub fn smooth_segments(samples: &[Sample], tool: &ToolState, background: Rgb8) -> Vec<Segment> {
    if samples.len() < 3 {
        return Vec::new();
    }
    samples
        .windows(3)
        .map(|w| {
            let (prev, cur, next) = (w[0].point(), w[1].point(), w[2].point());
            Segment {
                from: prev.midpoint(cur),
                ctrl: cur,
                to: cur.midpoint(next),
                style: segment_style(tool, background, w[1].pressure),
            }
        })
        .collect()
}

/// The single in-progress stroke, from pointer-down to pointer-up.
///
/// Captures the tool context at pointer-down; shortcut changes made mid-stroke apply to the
/// next stroke.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    samples: Vec<Sample>,
    tool: ToolState,
}

impl Stroke {
    /// Start a stroke at `first`.
    pub fn begin(first: Sample, tool: ToolState) -> Self {
        Self {
            samples: vec![first],
            tool,
        }
    }

    /// Append a sample.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Samples in arrival order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Tool context captured at pointer-down.
    pub fn tool(&self) -> &ToolState {
        &self.tool
    }

    /// Whether the stroke has enough samples to leave a mark.
    pub fn is_visible(&self) -> bool {
        self.samples.len() >= 3
    }

    /// Full segment set for the stroke so far.
    pub fn segments(&self, background: Rgb8) -> Vec<Segment> {
        smooth_segments(&self.samples, &self.tool, background)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/smooth.rs"]
mod tests;
