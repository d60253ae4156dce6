/*!
 * Cross-era comparison of structure maps.
 *
 * Aligns every field path seen in any era into one row, renders each era's
 * tag set per path, and keeps the rows where the eras disagree.
 */

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

use crate::structure::{render_types, StructureMap};

/// Sentinel for a path that an era never produced
pub const MISSING_SENTINEL: &str = "N/A";

/// A labeled season used to stand in for a tracking era
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Era {
    /// Column label in the report
    pub label: String,

    /// Season year to sample a game from
    pub year: i32,
}

impl Era {
    pub fn new(label: impl Into<String>, year: i32) -> Self {
        Self {
            label: label.into(),
            year,
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.year)
    }
}

/// Structure observed for one era
#[derive(Debug, Clone, PartialEq)]
pub struct EraStructure {
    pub era: Era,
    pub structure: StructureMap,
}

/// One era's view of a path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Rendered tag set, e.g. `NoneType, int`
    Types(String),
    /// Path not observed in this era
    Missing,
}

impl Cell {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Types(rendered) => rendered.as_str(),
            Self::Missing => MISSING_SENTINEL,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field path and one cell per era, in era order
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub path: String,
    pub cells: Vec<Cell>,
}

impl ComparisonRow {
    /// True when at least two cells render differently
    pub fn differs(&self) -> bool {
        let distinct: HashSet<&str> = self.cells.iter().map(Cell::as_str).collect();
        distinct.len() > 1
    }
}

/// Rows sorted by path, with era labels as column headers
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComparisonTable {
    pub eras: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    /// One row per distinct path across all eras, nothing filtered
    pub fn align(eras: &[EraStructure]) -> Self {
        let paths: BTreeSet<&String> = eras
            .iter()
            .flat_map(|era| era.structure.keys())
            .collect();

        let rows = paths
            .into_iter()
            .map(|path| ComparisonRow {
                path: path.clone(),
                cells: eras
                    .iter()
                    .map(|era| match era.structure.get(path) {
                        Some(types) if !types.is_empty() => Cell::Types(render_types(types)),
                        _ => Cell::Missing,
                    })
                    .collect(),
            })
            .collect();

        Self {
            eras: eras.iter().map(|era| era.era.label.clone()).collect(),
            rows,
        }
    }

    /// Only the rows whose cells disagree
    pub fn differences(self) -> Self {
        Self {
            eras: self.eras,
            rows: self.rows.into_iter().filter(ComparisonRow::differs).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Paths whose rendered tag sets differ across eras, sorted by path
pub fn compare(eras: &[EraStructure]) -> ComparisonTable {
    ComparisonTable::align(eras).differences()
}
