use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::constants::DEFAULT_STOP_TRACK;

/// One scheduled call in a train's run. Arrival and departure are both
/// optional: origin stops have no arrival, terminal stops no departure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stop {
    pub station: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
}

impl Stop {
    #[must_use]
    pub fn new(station: impl Into<String>) -> Self {
        Self {
            station: station.into(),
            arrival: None,
            departure: None,
            track: None,
        }
    }

    #[must_use]
    pub fn arriving(mut self, arrival: NaiveDateTime) -> Self {
        self.arrival = Some(arrival);
        self
    }

    #[must_use]
    pub fn departing(mut self, departure: NaiveDateTime) -> Self {
        self.departure = Some(departure);
        self
    }

    #[must_use]
    pub fn on_track(mut self, track: impl Into<String>) -> Self {
        self.track = Some(track.into());
        self
    }

    /// Assigned platform track, falling back to the default
    #[must_use]
    pub fn track_or_default(&self) -> &str {
        self.track.as_deref().unwrap_or(DEFAULT_STOP_TRACK)
    }

    /// Timestamp at which the train leaves this stop toward the next one
    #[must_use]
    pub fn leaves_at(&self) -> Option<NaiveDateTime> {
        self.departure.or(self.arrival)
    }

    /// Timestamp at which the train reaches this stop
    #[must_use]
    pub fn arrives_at(&self) -> Option<NaiveDateTime> {
        self.arrival.or(self.departure)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Train {
    pub id: String,
    pub name: String,
    pub stops: Vec<Stop>,
}

impl Train {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, stops: Vec<Stop>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stops,
        }
    }
}
