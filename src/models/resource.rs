use serde::{Deserialize, Serialize};

/// Broad class of resource a conflict is reported against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKind {
    Station,
    Track,
}

/// Key of a physical capacity-constrained resource, compared structurally.
///
/// Segment keys are direction-agnostic: they identify the unordered station
/// pair, not an individual edge, so parallel and reverse edges between the
/// same stations share one key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ResourceKey {
    /// A single platform track at a station; holds one train at a time
    StationTrack { station: String, track: String },
    /// A station as a whole, bounded by its platform count
    Station { station: String },
    /// The physical tracks between two adjacent stations
    Segment { a: String, b: String },
}

impl ResourceKey {
    #[must_use]
    pub fn station_track(station: impl Into<String>, track: impl Into<String>) -> Self {
        Self::StationTrack {
            station: station.into(),
            track: track.into(),
        }
    }

    #[must_use]
    pub fn station(station: impl Into<String>) -> Self {
        Self::Station {
            station: station.into(),
        }
    }

    /// Build a segment key; the station pair is canonicalized so A→B and B→A
    /// produce the same key.
    #[must_use]
    pub fn segment(x: impl Into<String>, y: impl Into<String>) -> Self {
        let (x, y) = (x.into(), y.into());
        if x <= y {
            Self::Segment { a: x, b: y }
        } else {
            Self::Segment { a: y, b: x }
        }
    }

    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::StationTrack { .. } | Self::Station { .. } => ResourceKind::Station,
            Self::Segment { .. } => ResourceKind::Track,
        }
    }

    #[must_use]
    pub fn is_segment(&self) -> bool {
        matches!(self, Self::Segment { .. })
    }
}
