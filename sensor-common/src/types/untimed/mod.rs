pub mod xyz;

pub use xyz::XYZ;
