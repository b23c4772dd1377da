pub mod circular_buffer;
pub mod circular_reader;

pub use circular_buffer::CircularBuffer;
pub use circular_reader::CircularReader;
