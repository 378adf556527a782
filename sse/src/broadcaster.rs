//! Single-slot update channels shared by the ingest path and every stream.

use events::{SensorKind, SensorReading};
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::sync::Mutex;

/// Each per-sensor slot holds at most one pending value. A publish to a full
/// slot suspends the publisher until a stream drains it, which is the only
/// backpressure between producers and consumers.
const SLOT_CAPACITY: usize = 1;

struct Slot {
    tx: Sender<String>,
    /// Receivers are single-consumer, so concurrent streams take turns
    /// holding the lock; whichever holds it when a value lands gets that
    /// value.
    rx: Mutex<Receiver<String>>,
}

impl Slot {
    fn new() -> Self {
        let (tx, rx) = mpsc::channel(SLOT_CAPACITY);
        Self {
            tx,
            rx: Mutex::new(rx),
        }
    }

    async fn drain(&self) -> Option<String> {
        self.rx.lock().await.recv().await
    }
}

/// One single-slot conduit per sensor kind.
///
/// Constructed once at startup and handed by `Arc` to the ingest controller
/// and every connection task; there is no other shared mutable state in the
/// system. When several streams are connected they compete for each slot:
/// any given published reading is delivered to exactly one of them, and the
/// rest keep waiting for the next one.
pub struct Broadcaster {
    local_temperature: Slot,
    local_humidity: Slot,
    outdoor_temperature: Slot,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self {
            local_temperature: Slot::new(),
            local_humidity: Slot::new(),
            outdoor_temperature: Slot::new(),
        }
    }

    fn slot(&self, kind: SensorKind) -> &Slot {
        match kind {
            SensorKind::LocalTemperature => &self.local_temperature,
            SensorKind::LocalHumidity => &self.local_humidity,
            SensorKind::OutdoorTemperature => &self.outdoor_temperature,
        }
    }

    /// Publishes a reading onto its kind's slot.
    ///
    /// Completes immediately when the slot is free and suspends until a
    /// drain otherwise. The value is not validated here; callers filter out
    /// empty submissions before publishing.
    pub async fn publish(&self, reading: SensorReading) {
        // The receiver half lives in the same struct, so the slot cannot
        // close while `self` is borrowed for this call.
        let _ = self.slot(reading.kind).tx.send(reading.value).await;
    }

    /// Waits on all three slots simultaneously and returns the first reading
    /// to arrive. Selection among simultaneously ready slots is arbitrary.
    ///
    /// Returns `None` only once the broadcaster is closing down and no
    /// further value can arrive.
    pub async fn recv(&self) -> Option<SensorReading> {
        tokio::select! {
            value = self.local_temperature.drain() => {
                value.map(|v| SensorReading::new(SensorKind::LocalTemperature, v))
            }
            value = self.local_humidity.drain() => {
                value.map(|v| SensorReading::new(SensorKind::LocalHumidity, v))
            }
            value = self.outdoor_temperature.drain() => {
                value.map(|v| SensorReading::new(SensorKind::OutdoorTemperature, v))
            }
        }
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}
