use std::sync::Arc;
use tokio::time::Duration;

use publisher::SensorHub;
use sensey_rs::{DetectionEvent, Listener, Sensey, ShakeConfig};
use sensor_common::{Sensor, SensorType};
use test_utils::{load_sensor_trace, run_replay_service, test_data_path};

fn print_event(event: DetectionEvent) {
    println!("{:?} ({})", event, event.kind());
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let hub = Arc::new(SensorHub::with_sensors(vec![
        Sensor::new(SensorType::Accelerometer, "accelerometer", 78.4),
        Sensor::new(SensorType::MagneticField, "magnetometer", 4900.0),
        Sensor::new(SensorType::Light, "light", 10000.0),
        Sensor::new(SensorType::Proximity, "proximity", 5.0),
    ]));

    let sensey = Sensey::default();
    sensey.init(hub.clone());

    let listener = Arc::new(Listener::new(print_event));
    let shake = ShakeConfig::new(250.0, Duration::from_millis(800));
    sensey
        .start_shake_detection(Some(shake), listener.clone())
        .unwrap();
    sensey.start_flip_detection(listener.clone()).unwrap();
    sensey.start_orientation_detection(None, listener.clone()).unwrap();
    sensey.start_light_detection(None, listener.clone()).unwrap();
    sensey.start_proximity_detection(listener.clone()).unwrap();
    sensey.start_wave_detection(None, listener.clone()).unwrap();

    let samples = load_sensor_trace(&test_data_path("sensor_trace.csv"), &SensorType::ALL).unwrap();
    let handle = run_replay_service(hub.clone(), samples, Duration::from_millis(100), 2).unwrap();
    let published = handle.await.unwrap();

    println!("Replayed {} samples", published);
    sensey.stop_all();
}
