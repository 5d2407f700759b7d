//! Container specifications, active placements and yard coordinates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::errors::{DomainError, DomainResult};

/// Container length class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerSize {
    Twenty,
    Forty,
}

impl ContainerSize {
    pub const fn from_feet(feet: u32) -> Option<Self> {
        match feet {
            20 => Some(Self::Twenty),
            40 => Some(Self::Forty),
            _ => None,
        }
    }

    pub const fn feet(self) -> u32 {
        match self {
            Self::Twenty => 20,
            Self::Forty => 40,
        }
    }

    /// Number of adjacent slots the container covers.
    pub const fn span(self) -> u32 {
        match self {
            Self::Twenty => 1,
            Self::Forty => 2,
        }
    }
}

/// Container height class, in feet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerHeight {
    /// 8'6"
    Standard,
    /// 9'6"
    HighCube,
}

impl ContainerHeight {
    const TOLERANCE: f64 = 1e-6;

    pub fn from_feet(feet: f64) -> Option<Self> {
        if (feet - 8.6).abs() < Self::TOLERANCE {
            Some(Self::Standard)
        } else if (feet - 9.6).abs() < Self::TOLERANCE {
            Some(Self::HighCube)
        } else {
            None
        }
    }

    pub const fn feet(self) -> f64 {
        match self {
            Self::Standard => 8.6,
            Self::HighCube => 9.6,
        }
    }
}

/// Container type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerType {
    Dry,
    Reefer,
    OpenTop,
}

impl ContainerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dry => "DRY",
            Self::Reefer => "REEFER",
            Self::OpenTop => "OPEN_TOP",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "DRY" => Some(Self::Dry),
            "REEFER" => Some(Self::Reefer),
            "OPEN_TOP" => Some(Self::OpenTop),
            _ => None,
        }
    }
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated `(size, height, type)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerSpec {
    pub size: ContainerSize,
    pub height: ContainerHeight,
    pub container_type: ContainerType,
}

impl ContainerSpec {
    pub const fn new(size: ContainerSize, height: ContainerHeight, container_type: ContainerType) -> Self {
        Self {
            size,
            height,
            container_type,
        }
    }

    /// Spec assumed by placement, which does not take the caller's spec.
    pub const fn reference() -> Self {
        Self::new(ContainerSize::Twenty, ContainerHeight::Standard, ContainerType::Dry)
    }

    /// Validate raw request values against the supported combinations.
    pub fn parse(size: u32, height: f64, container_type: &str) -> DomainResult<Self> {
        let size = ContainerSize::from_feet(size)
            .ok_or_else(|| DomainError::InvalidSpec("container size must be 20 or 40".to_string()))?;
        let height = ContainerHeight::from_feet(height).ok_or_else(|| {
            DomainError::InvalidSpec("container height must be 8.6 or 9.6".to_string())
        })?;
        let container_type = ContainerType::from_str(container_type).ok_or_else(|| {
            DomainError::InvalidSpec("container type must be DRY, REEFER, or OPEN_TOP".to_string())
        })?;
        Ok(Self::new(size, height, container_type))
    }
}

impl fmt::Display for ContainerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "size={} height={:.1} type={}",
            self.size.feet(),
            self.height.feet(),
            self.container_type
        )
    }
}

/// A single `(slot, row, tier)` cell inside a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub slot: u32,
    pub row: u32,
    pub tier: u32,
}

impl Cell {
    pub const fn new(slot: u32, row: u32, tier: u32) -> Self {
        Self { slot, row, tier }
    }

    /// The cell directly underneath, or `None` on the ground tier.
    pub const fn below(self) -> Option<Self> {
        if self.tier > 1 {
            Some(Self::new(self.slot, self.row, self.tier - 1))
        } else {
            None
        }
    }

    /// Cells covered by a container of `size` anchored at this cell.
    pub fn footprint(self, size: ContainerSize) -> impl Iterator<Item = Cell> {
        (0..size.span()).map(move |offset| Self::new(self.slot + offset, self.row, self.tier))
    }
}

/// An active physical placement.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerRecord {
    pub id: i64,
    pub number: String,
    pub yard_id: i64,
    pub block_id: i64,
    pub slot: u32,
    pub row: u32,
    pub tier: u32,
    pub spec: ContainerSpec,
    pub placed_at: DateTime<Utc>,
}

impl ContainerRecord {
    pub const fn cell(&self) -> Cell {
        Cell::new(self.slot, self.row, self.tier)
    }

    pub fn footprint(&self) -> impl Iterator<Item = Cell> {
        self.cell().footprint(self.spec.size)
    }
}

/// A placement about to be persisted; the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContainer {
    pub number: String,
    pub yard_id: i64,
    pub block_id: i64,
    pub cell: Cell,
    pub spec: ContainerSpec,
}

/// A placement result, addressed by block code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub block: String,
    pub slot: u32,
    pub row: u32,
    pub tier: u32,
}

impl Position {
    pub fn new(block: impl Into<String>, cell: Cell) -> Self {
        Self {
            block: block.into(),
            slot: cell.slot,
            row: cell.row,
            tier: cell.tier,
        }
    }

    pub const fn cell(&self) -> Cell {
        Cell::new(self.slot, self.row, self.tier)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}/{}", self.block, self.slot, self.row, self.tier)
    }
}

/// Where a placed container currently sits, kept as a cache side record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerLocation {
    pub yard: String,
    pub block: String,
    pub slot: u32,
    pub row: u32,
    pub tier: u32,
}
