/// Cyclic reader over a non-empty sequence. Besides the element, each read reports how
/// many full passes over the data were completed before it.
///
/// # Examples
///
/// ```
/// use sensor_common::buffers::CircularReader;
///
/// let mut reader = CircularReader::new(vec![10, 20]).unwrap();
/// assert_eq!(reader.next_element(), (10, 0));
/// assert_eq!(reader.next_element(), (20, 0));
/// assert_eq!(reader.next_element(), (10, 1));
/// ```
#[derive(Clone, Debug)]
pub struct CircularReader<T: Clone> {
    buffer: Vec<T>,
    index: usize,
    laps: usize,
}

impl<T: Clone> CircularReader<T> {
    /// Creates a new CircularReader with preloaded data.
    pub fn new(data: Vec<T>) -> Result<Self, String> {
        if data.is_empty() {
            return Err("Buffer cannot be empty".to_string());
        }
        Ok(Self {
            buffer: data,
            index: 0,
            laps: 0,
        })
    }

    /// Reads the next element and the lap it belongs to.
    pub fn next_element(&mut self) -> (T, usize) {
        let elem = self.buffer[self.index].clone();
        let lap = self.laps;
        self.index += 1;
        if self.index == self.buffer.len() {
            self.index = 0;
            self.laps += 1;
        }
        (elem, lap)
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of completed passes.
    pub fn laps(&self) -> usize {
        self.laps
    }
}

impl<T: Clone> TryFrom<Vec<T>> for CircularReader<T> {
    type Error = String;
    fn try_from(value: Vec<T>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycles_and_counts_laps() {
        let data = vec![10, 20, 30];
        let mut reader = CircularReader::new(data.clone()).unwrap();

        for i in 0..7 {
            assert_eq!(reader.next_element(), (data[i % data.len()], i / data.len()));
        }
        assert_eq!(reader.laps(), 2);
    }

    #[test]
    fn test_empty_data_is_rejected() {
        assert!(CircularReader::<i32>::try_from(vec![]).is_err());
    }
}
