use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;

use publisher::SensorHub;
use sensor_common::buffers::CircularReader;
use sensor_common::SensorSample;

/// Starts a background task replaying `samples` into `hub`.
///
/// Samples sharing a timestamp form one row and are published back to back; the task sleeps
/// `period` between rows. The trace is replayed `laps` times, shifting timestamps on every
/// lap so they keep increasing.
///
/// Returns a `tokio::task::JoinHandle` resolving to the number of samples published, or an
/// error if `samples` is empty.
pub fn run_replay_service(
    hub: Arc<SensorHub>,
    samples: Vec<SensorSample>,
    period: Duration,
    laps: usize,
) -> Result<tokio::task::JoinHandle<usize>, String> {
    let lap_span = lap_span(&samples);
    let total = samples.len() * laps;
    let mut reader = CircularReader::new(samples)?;

    let handle = tokio::spawn(async move {
        info!("Replaying {} samples over {} laps", reader.len(), laps);
        let mut previous_timestamp = None;
        for _ in 0..total {
            let (sample, lap) = reader.next_element();
            let timestamp = sample.get_timestamp_secs() + lap as f64 * lap_span;
            if previous_timestamp.is_some_and(|previous| previous != timestamp) {
                tokio::time::sleep(period).await;
            }
            previous_timestamp = Some(timestamp);

            let delivered = hub.publish(sample.with_timestamp(timestamp));
            debug!(
                "{} sample at {:.3}s delivered to {} listeners",
                sample.get_sensor_type(),
                timestamp,
                delivered
            );
        }
        info!("Replay finished");
        total
    });
    Ok(handle)
}

// Trace duration plus one row step.
fn lap_span(samples: &[SensorSample]) -> f64 {
    let timestamps: Vec<f64> = samples.iter().map(|s| s.get_timestamp_secs()).collect();
    let (Some(first), Some(last)) = (timestamps.first(), timestamps.last()) else {
        return 0.0;
    };
    let step = timestamps
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .find(|gap| *gap > 0.0)
        .unwrap_or(0.0);
    last - first + step
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensor_common::{Sensor, SensorEventListener, SensorManagerPort, SensorType};
    use std::sync::Mutex;

    struct Timestamps(Mutex<Vec<f64>>);

    impl SensorEventListener for Timestamps {
        fn on_sensor_changed(&self, sample: &SensorSample) {
            self.0.lock().unwrap().push(sample.get_timestamp_secs());
        }
    }

    fn light(timestamp: f64) -> SensorSample {
        SensorSample::new(SensorType::Light, timestamp, &[10.0]).unwrap()
    }

    #[test]
    fn test_lap_span() {
        assert_eq!(lap_span(&[light(0.0), light(0.5), light(1.0)]), 1.5);
        assert_eq!(lap_span(&[light(2.0)]), 0.0);
    }

    #[test]
    fn test_empty_trace_is_rejected() {
        let hub = Arc::new(SensorHub::new());
        assert!(run_replay_service(hub, vec![], Duration::from_millis(1), 1).is_err());
    }

    #[tokio::test]
    async fn test_replay_laps_keep_timestamps_increasing() {
        let sensor = Sensor::new(SensorType::Light, "light", 1000.0);
        let hub = Arc::new(SensorHub::with_sensors(vec![sensor.clone()]));
        let listener = Arc::new(Timestamps(Mutex::new(vec![])));
        hub.register_listener(listener.clone(), &sensor, Default::default())
            .unwrap();

        let handle = run_replay_service(
            hub.clone(),
            vec![light(0.0), light(0.1)],
            Duration::from_millis(1),
            2,
        )
        .unwrap();

        assert_eq!(handle.await.unwrap(), 4);
        let timestamps = listener.0.lock().unwrap().clone();
        assert_eq!(timestamps.len(), 4);
        assert!(timestamps.windows(2).all(|pair| pair[1] > pair[0]));
    }
}
