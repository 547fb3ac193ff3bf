//! Fixed table of clinically-defined tissue intensity ranges.
//!
//! Values are Hounsfield-unit ranges; each tissue carries a fixed display
//! color. Shading a tissue selection rebuilds the transfer-function tables
//! from scratch, two boundary entries per selected tissue, in table order.

use std::str::FromStr;

use crate::color::{self, RGB};
use crate::common::ValueRange;
use crate::error::UnknownName;
use crate::transfer::{ColorStop, OpacityPoint};

/// Tissue classes of the fixed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tissue {
    Lung,
    SoftTissue,
    Vessel,
    Bone,
}

impl Tissue {
    /// Table order, ascending by range start.
    pub const ALL: [Tissue; 4] = [Tissue::Lung, Tissue::SoftTissue, Tissue::Vessel, Tissue::Bone];

    /// Scalar range of the tissue, in Hounsfield units.
    pub fn range(&self) -> ValueRange {
        match self {
            Tissue::Lung => ValueRange::new(-1000.0, -100.0),
            Tissue::SoftTissue => ValueRange::new(-100.0, 200.0),
            Tissue::Vessel => ValueRange::new(100.0, 400.0),
            Tissue::Bone => ValueRange::new(200.0, 2000.0),
        }
    }

    /// Fixed display color of the tissue.
    pub fn color(&self) -> RGB {
        match self {
            Tissue::Lung => color::new(0.45, 0.55, 0.65),
            Tissue::SoftTissue => color::new(0.80, 0.55, 0.45),
            Tissue::Vessel => color::new(0.75, 0.15, 0.15),
            Tissue::Bone => color::new(0.89, 0.85, 0.79),
        }
    }
}

impl FromStr for Tissue {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lung" => Ok(Tissue::Lung),
            "softtissue" | "soft_tissue" | "soft tissue" => Ok(Tissue::SoftTissue),
            "vessel" => Ok(Tissue::Vessel),
            "bone" => Ok(Tissue::Bone),
            _ => Err(UnknownName::new("tissue", s)),
        }
    }
}

/// Requested opacity per tissue. Tissues absent from the map are not shaded.
pub type TissueOpacityMap = [(Tissue, f32)];

/// Build full transfer-function tables for a tissue selection.
///
/// Iterates the fixed table in order and emits, per selected tissue, its two
/// range boundaries tagged with the tissue color and the requested opacity.
/// Overlapping tissue selections produce overlapping entries; interpolation
/// over those is undefined, same as any out-of-order stop list.
pub fn tissue_tables(opacities: &TissueOpacityMap) -> (Vec<ColorStop>, Vec<OpacityPoint>) {
    let mut stops = Vec::new();
    let mut points = Vec::new();

    for tissue in Tissue::ALL {
        let requested = opacities
            .iter()
            .find(|(t, _)| *t == tissue)
            .map(|(_, o)| o.clamp(0.0, 1.0));

        let opacity = match requested {
            Some(o) => o,
            None => continue,
        };

        let range = tissue.range();
        let color = tissue.color();

        stops.push(ColorStop::new(range.low, color));
        stops.push(ColorStop::new(range.high, color));
        points.push(OpacityPoint::new(range.low, opacity));
        points.push(OpacityPoint::new(range.high, opacity));
    }

    (stops, points)
}
