//! Plot configuration shared across visualization modules
//!
//! [`PlotConfig`] drives every static chart; [`AnimationConfig`] drives the
//! GIF renderers. Presets set the title and axis labels of each chart kind.

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// # Example: Trajectories with custom colors
///
/// ```rust,ignore
/// use simviz_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::trajectories("Billiard, 16 balls");
/// config.entity_colors = Some(vec![RED, BLUE, GREEN]);
/// config.width = 1920;
/// config.height = 1080;
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Plot")
    pub title: String,

    /// X-axis label (default: set by preset)
    pub xlabel: String,

    /// Y-axis label (default: set by preset)
    pub ylabel: String,

    /// Color for single-series plots (default: BLUE)
    pub line_color: RGBColor,

    /// Optional colors for multi-entity plots (one per entity)
    ///
    /// If None, uses the default palette. Missing entries fall back to it too.
    pub entity_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Marker radius in pixels for scatter plots (default: 2)
    pub marker_size: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,

    /// Maximum number of entities drawn on one chart (default: 20)
    pub max_series: usize,

    /// Legend is drawn only up to this many series (default: 10)
    pub legend_limit: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: String::new(),
            ylabel: String::new(),
            line_color: BLUE,
            entity_colors: None,
            background: WHITE,
            line_width: 2,
            marker_size: 2,
            show_grid: true,
            max_series: 20,
            legend_limit: 10,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
///
/// # Example
///
/// ```rust,ignore
/// let config = PlotConfig::spectrum(NO_TITLE);
/// ```
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    fn preset(title: impl IntoOptionalTitle, default_title: &str, xlabel: &str, ylabel: &str) -> Self {
        Self {
            title: title.into_optional_title().unwrap_or_else(|| default_title.to_string()),
            xlabel: xlabel.to_string(),
            ylabel: ylabel.to_string(),
            ..Self::default()
        }
    }

    /// Particle paths in the box, `x` vs `y`
    pub fn trajectories(title: impl IntoOptionalTitle) -> Self {
        Self::preset(title, "Particle Trajectories", "x", "y")
    }

    /// Speed distribution, density vs `|v|`
    pub fn histogram(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::preset(title, "Speed Distribution", "|v|", "Probability density");
        config.line_color = RGBColor(128, 0, 128);
        config
    }

    /// Signals against time
    pub fn time_series(title: impl IntoOptionalTitle) -> Self {
        Self::preset(title, "Time Series", "t", "x")
    }

    /// Total kinetic energy against time
    pub fn energy(title: impl IntoOptionalTitle) -> Self {
        Self::preset(title, "Kinetic Energy", "t", "Total kinetic energy")
    }

    /// One signal against another (Lissajous figure, `x`–`v` portrait)
    pub fn phase_portrait(title: impl IntoOptionalTitle) -> Self {
        Self::preset(title, "Phase Portrait", "x", "v")
    }

    /// Poincaré section scatter
    pub fn poincare(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::preset(title, "Poincare Section", "x", "v");
        config.line_color = RED;
        config.marker_size = 3;
        config
    }

    /// Amplitude spectrum
    pub fn spectrum(title: impl IntoOptionalTitle) -> Self {
        Self::preset(title, "Frequency Spectrum", "Frequency (1/t)", "|X(f)|")
    }

    /// Lyapunov exponent estimate against time
    pub fn lyapunov(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::preset(title, "Lyapunov Exponent", "t", "lambda");
        config.line_color = RGBColor(0, 128, 0);
        config
    }

    /// Create config with custom entity colors
    pub fn entity_colors(colors: Vec<RGBColor>) -> Self {
        Self {
            entity_colors: Some(colors),
            ..Self::default()
        }
    }

    /// Get color for entity at index i
    ///
    /// Uses custom colors if provided, otherwise falls back to default palette
    pub(crate) fn get_entity_color(&self, entity_index: usize) -> RGBColor {
        if let Some(ref colors) = self.entity_colors {
            if entity_index < colors.len() {
                return colors[entity_index];
            }
        }

        // Default palette (tab10)
        let default_colors = [
            RGBColor(31, 119, 180),
            RGBColor(255, 127, 14),
            RGBColor(44, 160, 44),
            RGBColor(214, 39, 40),
            RGBColor(148, 103, 189),
            RGBColor(140, 86, 75),
            RGBColor(227, 119, 194),
            RGBColor(127, 127, 127),
            RGBColor(188, 189, 34),
            RGBColor(23, 190, 207),
        ];

        default_colors[entity_index % default_colors.len()]
    }
}

/// Configuration for GIF animations
#[derive(Clone)]
pub struct AnimationConfig {
    /// Frame width in pixels (default: 800)
    pub width: u32,

    /// Frame height in pixels (default: 600)
    pub height: u32,

    /// Caption prefix (default: "Simulation")
    pub title: String,

    pub xlabel: String,
    pub ylabel: String,

    /// Playback rate (default: 20 fps)
    pub fps: u32,

    /// Marker radius in pixels (default: 6)
    pub marker_size: u32,

    /// Frame budget used to pick the sampling stride (default: 300)
    pub max_frames: usize,

    pub marker_color: RGBColor,
    pub trail_color: RGBColor,
    pub background: RGBColor,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Simulation".to_string(),
            xlabel: "x".to_string(),
            ylabel: "y".to_string(),
            fps: 20,
            marker_size: 6,
            max_frames: 300,
            marker_color: BLUE,
            trail_color: BLUE,
            background: WHITE,
        }
    }
}

impl AnimationConfig {
    /// Particles moving in their box
    pub fn particles(title: impl IntoOptionalTitle) -> Self {
        Self {
            title: title.into_optional_title().unwrap_or_else(|| "Particles".to_string()),
            ..Self::default()
        }
    }

    /// Growing phase-space curve with the current state marked
    pub fn phase_trace(title: impl IntoOptionalTitle, xlabel: &str, ylabel: &str) -> Self {
        Self {
            width: 800,
            height: 800,
            title: title.into_optional_title().unwrap_or_else(|| "Phase Space".to_string()),
            xlabel: xlabel.to_string(),
            ylabel: ylabel.to_string(),
            fps: 25,
            marker_size: 4,
            marker_color: RED,
            ..Self::default()
        }
    }

    /// Delay between frames in milliseconds
    pub fn frame_delay_ms(&self) -> u32 {
        1000 / self.fps.max(1)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_config_default() {
        let config = PlotConfig::default();
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 768);
        assert!(config.show_grid);
        assert_eq!(config.max_series, 20);
    }

    #[test]
    fn test_trajectories_config_default() {
        let config = PlotConfig::trajectories(NO_TITLE);
        assert_eq!(config.xlabel, "x");
        assert_eq!(config.ylabel, "y");
        assert_eq!(config.title, "Particle Trajectories");
    }

    #[test]
    fn test_config_with_str_and_string() {
        let config = PlotConfig::spectrum("Oscillator 1");
        assert_eq!(config.title, "Oscillator 1");

        let config = PlotConfig::lyapunov(format!("k = {}", 0.5));
        assert_eq!(config.title, "k = 0.5");
        assert_eq!(config.xlabel, "t");
    }

    #[test]
    fn test_get_entity_color_default_palette() {
        let config = PlotConfig::default();
        assert_eq!(config.get_entity_color(0), RGBColor(31, 119, 180));
        assert_eq!(config.get_entity_color(10), config.get_entity_color(0)); // Wraparound
    }

    #[test]
    fn test_get_entity_color_custom() {
        let config = PlotConfig::entity_colors(vec![RED, GREEN]);
        assert_eq!(config.get_entity_color(0), RED);
        assert_eq!(config.get_entity_color(1), GREEN);
        // Falls back to the palette past the custom list
        assert_eq!(config.get_entity_color(2), RGBColor(44, 160, 44));
    }

    #[test]
    fn test_animation_frame_delay() {
        assert_eq!(AnimationConfig::default().frame_delay_ms(), 50);
        assert_eq!(AnimationConfig::phase_trace(NO_TITLE, "x1", "x2").frame_delay_ms(), 40);

        let mut config = AnimationConfig::default();
        config.fps = 0;
        assert_eq!(config.frame_delay_ms(), 1000);
    }
}
