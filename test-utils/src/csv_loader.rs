use std::error::Error;

use csv::Reader;
use num_enum::TryFromPrimitive;

use sensor_common::{SensorSample, SensorType};

/// Columns of a recorded sensor trace.
#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
pub enum CsvFileColumn {
    Timestamp,
    XAccel,
    YAccel,
    ZAccel,
    XMag,
    YMag,
    ZMag,
    Light,
    Proximity,
}

impl From<CsvFileColumn> for usize {
    fn from(value: CsvFileColumn) -> Self {
        value as usize
    }
}

impl CsvFileColumn {
    /// Value columns holding the readings of `sensor_type`.
    pub fn for_sensor(sensor_type: SensorType) -> Vec<CsvFileColumn> {
        match sensor_type {
            SensorType::Accelerometer => vec![Self::XAccel, Self::YAccel, Self::ZAccel],
            SensorType::MagneticField => vec![Self::XMag, Self::YMag, Self::ZMag],
            SensorType::Light => vec![Self::Light],
            SensorType::Proximity => vec![Self::Proximity],
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CsvColumnMapper {
    columns: Vec<usize>,
}

impl CsvColumnMapper {
    pub fn new() -> Self {
        Self { columns: vec![] }
    }

    /// Builds a mapper from raw column indices, rejecting indices past the last column.
    pub fn from_indices(indices: &[usize]) -> Result<Self, String> {
        let columns = indices
            .iter()
            .map(|&index| {
                CsvFileColumn::try_from_primitive(index)
                    .map(usize::from)
                    .map_err(|_| format!("Unknown column index {}", index))
            })
            .collect::<Result<Vec<usize>, String>>()?;
        Ok(Self { columns })
    }

    pub fn columns(&self) -> Vec<usize> {
        self.columns.clone()
    }

    pub fn add_timestamp(&mut self) -> &mut Self {
        self.columns.push(CsvFileColumn::Timestamp.into());
        self
    }

    /// Adds the value columns of `sensor_type`.
    pub fn add_sensor(&mut self, sensor_type: SensorType) -> &mut Self {
        self.columns.extend(
            CsvFileColumn::for_sensor(sensor_type)
                .into_iter()
                .map(usize::from),
        );
        self
    }

    pub fn add_accel(&mut self) -> &mut Self {
        self.add_sensor(SensorType::Accelerometer)
    }

    pub fn add_mag(&mut self) -> &mut Self {
        self.add_sensor(SensorType::MagneticField)
    }

    pub fn add_light(&mut self) -> &mut Self {
        self.add_sensor(SensorType::Light)
    }

    pub fn add_proximity(&mut self) -> &mut Self {
        self.add_sensor(SensorType::Proximity)
    }
}

/// Absolute path of a file in this crate's `test_data` directory.
pub fn test_data_path(file_name: &str) -> String {
    format!("{}/test_data/{}", env!("CARGO_MANIFEST_DIR"), file_name)
}

pub fn load_csv(file_path: &str) -> Result<Vec<Vec<f64>>, Box<dyn Error>> {
    let mut rdr = Reader::from_path(file_path)?;
    let mut data = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let row: Vec<f64> = record
            .iter()
            .filter_map(|s| s.trim().parse::<f64>().ok())
            .collect();
        data.push(row);
    }

    Ok(data)
}

pub fn load_csv_columns<T: TryFrom<Vec<f64>>>(
    file_path: &str,
    columns: &[usize],
) -> Result<Vec<T>, Box<dyn Error>> {
    if columns.is_empty() {
        return Err("No columns provided".into());
    }

    load_csv(file_path)?
        .into_iter()
        .map(|row| -> Result<T, Box<dyn Error>> {
            let values = columns
                .iter()
                .map(|&i| {
                    row.get(i)
                        .copied()
                        .ok_or_else(|| format!("Column index {} out of bounds", i))
                })
                .collect::<Result<Vec<f64>, String>>()?;
            T::try_from(values).map_err(|_| "Failed to convert to T".into())
        })
        .collect()
}

/// Loads a trace as samples of `sensor_types`, interleaved row by row in the given order.
pub fn load_sensor_trace(
    file_path: &str,
    sensor_types: &[SensorType],
) -> Result<Vec<SensorSample>, Box<dyn Error>> {
    let rows = load_csv(file_path)?;
    let mut samples = Vec::with_capacity(rows.len() * sensor_types.len());

    for row in rows {
        for &sensor_type in sensor_types {
            let mut mapper = CsvColumnMapper::new();
            mapper.add_timestamp().add_sensor(sensor_type);
            let values = mapper
                .columns()
                .iter()
                .map(|&i| {
                    row.get(i)
                        .copied()
                        .ok_or_else(|| format!("Column index {} out of bounds", i))
                })
                .collect::<Result<Vec<f64>, String>>()?;
            samples.push(SensorSample::try_from((sensor_type, values))?);
        }
    }

    Ok(samples)
}
