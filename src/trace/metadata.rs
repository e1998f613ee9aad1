//! Scalar metadata carried by trace comment lines
//!
//! Simulators write a few `# key: value` lines ahead of the data, e.g.
//!
//! ```text
//! # W: 10
//! # H: 5
//! # R_BOLA: 0.2
//! #         t             x0             y0            vx0            vy0
//! ```
//!
//! Comment lines without a colon are treated as column-name headers.

/// Marker that starts a comment line
pub const COMMENT_MARKER: char = '#';

/// Default box width when the trace carries no `W` entry
pub const DEFAULT_BOX_WIDTH: f64 = 1.0;

/// Default box height when the trace carries no `H` entry
pub const DEFAULT_BOX_HEIGHT: f64 = 1.0;

/// Default particle radius when the trace carries no `R_BOLA` entry
pub const DEFAULT_PARTICLE_RADIUS: f64 = 0.2;

const WIDTH_KEYS: [&str; 2] = ["W", "width"];
const HEIGHT_KEYS: [&str; 2] = ["H", "height"];
const RADIUS_KEYS: [&str; 2] = ["R_BOLA", "radius"];

/// Metadata parsed from the comment header of a trace
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceMetadata {
    /// Scalar parameters in file order
    entries: Vec<(String, f64)>,

    /// Column names, when the file carries a header line
    columns: Option<Vec<String>>,
}

/// One classified comment line
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CommentLine {
    /// `# key: value`
    Parameter(String, f64),

    /// `# t x1 v1 ...`
    Header(Vec<String>),

    /// Anything else (blank comment, unparseable value)
    Other,
}

impl TraceMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a parameter by exact key (later entries win)
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }

    /// First value found among several equivalent keys
    pub fn get_any(&self, keys: &[&str]) -> Option<f64> {
        keys.iter().find_map(|key| self.get(key))
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.entries.push((key.into(), value));
    }

    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn columns(&self) -> Option<&[String]> {
        self.columns.as_deref()
    }

    pub(crate) fn set_columns(&mut self, columns: Vec<String>) {
        self.columns = Some(columns);
    }

    /// Box geometry, if the trace declares at least its width or height
    pub fn geometry(&self) -> Option<BoxGeometry> {
        let width = self.get_any(&WIDTH_KEYS);
        let height = self.get_any(&HEIGHT_KEYS);

        if width.is_none() && height.is_none() {
            return None;
        }

        Some(BoxGeometry {
            width: width.unwrap_or(DEFAULT_BOX_WIDTH),
            height: height.unwrap_or(DEFAULT_BOX_HEIGHT),
            radius: self.get_any(&RADIUS_KEYS).unwrap_or(DEFAULT_PARTICLE_RADIUS),
        })
    }
}

/// Classify a comment line (the leading marker must already be present)
pub(crate) fn parse_comment(line: &str) -> CommentLine {
    let body = line.trim_start_matches(COMMENT_MARKER).trim();
    if body.is_empty() {
        return CommentLine::Other;
    }

    if let Some((key, value)) = body.split_once(':') {
        let key = key.trim();
        let value = value.split_whitespace().next().and_then(|v| v.parse::<f64>().ok());
        return match value {
            Some(v) if !key.is_empty() => CommentLine::Parameter(key.to_string(), v),
            _ => CommentLine::Other,
        };
    }

    let tokens: Vec<String> = body.split_whitespace().map(str::to_string).collect();
    if tokens.len() >= 2 && tokens.iter().all(|t| t.parse::<f64>().is_err()) {
        CommentLine::Header(tokens)
    } else {
        CommentLine::Other
    }
}

/// Rectangular simulation box the particles live in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxGeometry {
    pub width: f64,
    pub height: f64,
    pub radius: f64,
}

impl Default for BoxGeometry {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOX_WIDTH,
            height: DEFAULT_BOX_HEIGHT,
            radius: DEFAULT_PARTICLE_RADIUS,
        }
    }
}
