//! Per-entity column layouts
//!
//! A trace row is `t` followed by one fixed-width column group per entity.
//! The layout names the components of a group and therefore its stride.

use std::fmt;

/// Column grouping used by every entity of a trace
///
/// | Layout      | Group           | Stride |
/// |-------------|-----------------|--------|
/// | `Planar`    | `x y`           | 2      |
/// | `Kinematic` | `x y vx vy`     | 4      |
/// | `Oscillator`| `x v`           | 2      |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityLayout {
    /// Position only: `(x, y)`
    Planar,

    /// Position and velocity in the plane: `(x, y, vx, vy)`
    Kinematic,

    /// One-dimensional oscillator: displacement and velocity `(x, v)`
    Oscillator,
}

impl EntityLayout {
    /// Number of columns per entity
    pub fn stride(&self) -> usize {
        match self {
            EntityLayout::Planar => 2,
            EntityLayout::Kinematic => 4,
            EntityLayout::Oscillator => 2,
        }
    }

    /// Component names of one column group, in file order
    pub fn components(&self) -> &'static [&'static str] {
        match self {
            EntityLayout::Planar => &["x", "y"],
            EntityLayout::Kinematic => &["x", "y", "vx", "vy"],
            EntityLayout::Oscillator => &["x", "v"],
        }
    }

    /// Whether the layout carries velocity columns
    pub fn has_velocity(&self) -> bool {
        !matches!(self, EntityLayout::Planar)
    }

    /// Column offsets of the planar position inside a group, if any
    pub(crate) fn position_offsets(&self) -> Option<(usize, usize)> {
        match self {
            EntityLayout::Planar | EntityLayout::Kinematic => Some((0, 1)),
            EntityLayout::Oscillator => None,
        }
    }

    /// Default column names for `n_entities`, as written by the simulators
    ///
    /// Particles are numbered from 0 (`x0 y0 vx0 vy0 ...`), oscillators from 1
    /// (`x1 v1 x2 v2 ...`).
    pub fn default_column_names(&self, n_entities: usize) -> Vec<String> {
        let first = match self {
            EntityLayout::Oscillator => 1,
            _ => 0,
        };

        let mut names = vec!["t".to_string()];
        for entity in 0..n_entities {
            for component in self.components() {
                names.push(format!("{}{}", component, entity + first));
            }
        }
        names
    }
}

impl fmt::Display for EntityLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityLayout::Planar => "planar (x, y)",
            EntityLayout::Kinematic => "kinematic (x, y, vx, vy)",
            EntityLayout::Oscillator => "oscillator (x, v)",
        };
        write!(f, "{}", name)
    }
}
