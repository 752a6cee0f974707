use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackClass {
    Single,
    Double,
    Regional,
    HighSpeed,
}

/// Physical track between two stations. Multiple segments may exist between
/// the same pair of stations (parallel infrastructure).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackSegment {
    pub from: String,
    pub to: String,
    /// Length in kilometres, > 0
    pub distance: f64,
    pub class: TrackClass,
    pub max_speed: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

impl TrackSegment {
    #[must_use]
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        distance: f64,
        class: TrackClass,
        max_speed: f64,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            distance,
            class,
            max_speed,
            capacity: None,
        }
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Single track is worked in both directions; every other class is one-way
    /// per segment record.
    #[must_use]
    pub fn is_reversible(&self) -> bool {
        matches!(self.class, TrackClass::Single)
    }

    /// Whether this segment alone lets two trains pass each other
    #[must_use]
    pub fn is_double_capacity(&self) -> bool {
        matches!(self.class, TrackClass::Double | TrackClass::HighSpeed)
    }
}
