use crate::stroke::smooth::Sample;

/// Pointer down/move payload in canvas pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointerEvent {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Device pressure in `[0, 1]`, if the device reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f32>,
}

impl PointerEvent {
    /// Event without pressure information.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            pressure: None,
        }
    }

    /// Event with a pressure reading.
    pub fn with_pressure(x: f64, y: f64, pressure: f32) -> Self {
        Self {
            x,
            y,
            pressure: Some(pressure),
        }
    }

    /// Stroke sample with normalized pressure.
    pub fn sample(self) -> Sample {
        Sample::new(self.x, self.y, self.pressure)
    }
}
