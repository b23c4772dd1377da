//! Helpers shared by the workspace tests: recorded sensor traces and a service replaying
//! them into a `SensorHub`.

pub mod csv_loader;
pub mod replay;

pub use csv_loader::{load_sensor_trace, test_data_path, CsvColumnMapper, CsvFileColumn};
pub use replay::run_replay_service;
