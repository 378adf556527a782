//! Sensor reading types for the weather station.
//!
//! This crate defines the small vocabulary shared between the ingest path
//! and the streaming layer: which sensors exist and what a single submitted
//! reading looks like.
//!
//! It has no dependencies on other internal crates, avoiding circular
//! dependencies between the web layer (producer side) and the `sse` crate
//! (consumer side).

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The closed set of sensors the station reports on.
///
/// Each kind carries a fixed wire label used as the SSE `event:` field, which
/// is what browser-side `EventSource` listeners subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    LocalTemperature,
    LocalHumidity,
    OutdoorTemperature,
}

impl SensorKind {
    /// All sensor kinds, in the order they appear in a weather submission.
    pub const ALL: [SensorKind; 3] = [
        SensorKind::LocalTemperature,
        SensorKind::LocalHumidity,
        SensorKind::OutdoorTemperature,
    ];

    /// The event type label written on the wire for this kind.
    pub fn event_label(&self) -> &'static str {
        match self {
            SensorKind::LocalTemperature => "localtemp",
            SensorKind::LocalHumidity => "localhumi",
            SensorKind::OutdoorTemperature => "outtemp",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.event_label())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct SensorKindParseError;

impl FromStr for SensorKind {
    type Err = SensorKindParseError;

    fn from_str(label: &str) -> Result<SensorKind, Self::Err> {
        match label {
            "localtemp" => Ok(SensorKind::LocalTemperature),
            "localhumi" => Ok(SensorKind::LocalHumidity),
            "outtemp" => Ok(SensorKind::OutdoorTemperature),
            _ => Err(SensorKindParseError),
        }
    }
}

/// One submitted sensor value.
///
/// The value is an opaque string: the station firmware posts whatever it
/// measured and the core does not validate or parse it. Rendering for
/// display happens in the web layer at stream time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorReading {
    pub kind: SensorKind,
    pub value: String,
}

impl SensorReading {
    pub fn new(kind: SensorKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
