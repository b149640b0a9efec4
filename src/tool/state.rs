use crate::foundation::core::Rgb8;

/// Smallest brush width reachable through [`ToolState::narrow`].
pub const MIN_BASE_WIDTH: f64 = 1.0;
/// Largest brush width reachable through [`ToolState::widen`].
pub const MAX_BASE_WIDTH: f64 = 100.0;
/// Width change applied by one bracket-key press.
pub const BASE_WIDTH_STEP: f64 = 2.0;
/// Brush width at startup.
pub const DEFAULT_BASE_WIDTH: f64 = 10.0;

/// Which tool the next stroke paints with.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Translucent, pressure-sensitive graphite.
    #[default]
    Pencil,
    /// Opaque background-colored brush at twice the base width.
    Eraser,
}

impl ToolKind {
    /// Label shown in the status display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pencil => "Pencil",
            Self::Eraser => "Eraser",
        }
    }
}

/// Preset grayscale pencil tones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// rgb(40, 40, 40)
    Dark,
    /// rgb(120, 120, 120)
    Medium,
    /// rgb(200, 200, 200)
    Light,
}

impl Tone {
    /// Pencil color for this tone.
    pub fn color(self) -> Rgb8 {
        match self {
            Self::Dark => Rgb8::gray(40),
            Self::Medium => Rgb8::gray(120),
            Self::Light => Rgb8::gray(200),
        }
    }

    /// Label shown in the status display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Medium => "Medium",
            Self::Light => "Light",
        }
    }
}

/// Current tool, brush width and pencil color.
///
/// Owned by the dispatch layer and passed by reference into the smoother; only shortcut or UI
/// handlers mutate it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolState {
    /// Active tool.
    pub tool: ToolKind,
    /// Brush width before pressure/tool scaling, within `[1, 100]`.
    pub base_width: f64,
    /// Pencil color. The eraser ignores it.
    pub color: Rgb8,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: ToolKind::Pencil,
            base_width: DEFAULT_BASE_WIDTH,
            color: Tone::Dark.color(),
        }
    }
}

impl ToolState {
    /// Tool state with a custom starting width, clamped into the valid range.
    pub fn with_base_width(base_width: f64) -> Self {
        Self {
            base_width: base_width.clamp(MIN_BASE_WIDTH, MAX_BASE_WIDTH),
            ..Self::default()
        }
    }

    /// Switch tools, keeping width and color.
    pub fn select(&mut self, tool: ToolKind) {
        self.tool = tool;
    }

    /// Load a preset tone and switch to the pencil.
    pub fn select_tone(&mut self, tone: Tone) {
        self.color = tone.color();
        self.tool = ToolKind::Pencil;
    }

    /// Grow the brush by one step, saturating at [`MAX_BASE_WIDTH`]. Returns the new width.
    pub fn widen(&mut self) -> f64 {
        self.base_width = (self.base_width + BASE_WIDTH_STEP).min(MAX_BASE_WIDTH);
        self.base_width
    }

    /// Shrink the brush by one step, saturating at [`MIN_BASE_WIDTH`]. Returns the new width.
    pub fn narrow(&mut self) -> f64 {
        self.base_width = (self.base_width - BASE_WIDTH_STEP).max(MIN_BASE_WIDTH);
        self.base_width
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tool/state.rs"]
mod tests;
