use crate::traits::BasicArithmetic;
use crate::types::buffers::CircularBuffer;

/// Moving average over the last `window_size` values.
///
/// Until the window fills up, the average is taken over the values received so far.
/// A window of one returns its input unchanged.
///
/// ## Example
///
/// ```rust
/// use sensor_common::filters::MovingAverage;
/// use sensor_common::XYZ;
///
/// let mut ma = MovingAverage::<XYZ>::new(2);
/// assert_eq!(ma.filter(XYZ::new([2.0, 2.0, 2.0])).inner(), [2.0, 2.0, 2.0]);
/// assert_eq!(ma.filter(XYZ::new([4.0, 4.0, 4.0])).inner(), [3.0, 3.0, 3.0]);
/// assert_eq!(ma.filter(XYZ::new([8.0, 8.0, 8.0])).inner(), [6.0, 6.0, 6.0]);
/// ```
#[derive(Clone, Debug)]
pub struct MovingAverage<T> {
    buffer: CircularBuffer<T>,
    aggregate: T,
}

impl<T: BasicArithmetic> MovingAverage<T> {
    /// Initializes new `MovingAverage` filter with `window_size` elements.
    pub fn new(window_size: usize) -> Self {
        Self {
            buffer: CircularBuffer::new(window_size),
            aggregate: T::default(),
        }
    }

    /// Pushes `value` and returns the current average.
    pub fn filter(&mut self, value: T) -> T {
        if let Some(out) = self.buffer.push(value.clone()) {
            self.aggregate -= out;
        }
        self.aggregate += value;
        self.aggregate.clone() / self.buffer.len() as f64
    }

    pub fn window_size(&self) -> usize {
        self.buffer.capacity()
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
        self.aggregate = T::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::XYZ;

    #[test]
    fn test_window_of_one_is_identity() {
        let mut ma = MovingAverage::<f64>::new(1);
        assert_eq!(ma.filter(3.0), 3.0);
        assert_eq!(ma.filter(-7.0), -7.0);
    }

    #[test]
    fn test_average_over_partial_window() {
        let mut ma = MovingAverage::<f64>::new(4);
        assert_eq!(ma.filter(4.0), 4.0);
        assert_eq!(ma.filter(8.0), 6.0);
    }

    #[test]
    fn test_oldest_value_leaves_window() {
        let mut ma = MovingAverage::<f64>::new(3);
        ma.filter(3.0);
        ma.filter(3.0);
        ma.filter(3.0);
        assert_eq!(ma.filter(9.0), 5.0);
        assert_eq!(ma.window_size(), 3);
    }

    #[test]
    fn test_xyz_average_and_reset() {
        let mut ma = MovingAverage::<XYZ>::new(2);
        ma.filter(XYZ::new([1.0, 1.0, 1.0]));
        let avg = ma.filter(XYZ::new([3.0, 5.0, 7.0]));
        assert_eq!(avg.inner(), [2.0, 3.0, 4.0]);

        ma.reset();
        let avg = ma.filter(XYZ::new([1.0, 0.0, 0.0]));
        assert_eq!(avg.inner(), [1.0, 0.0, 0.0]);
    }
}
