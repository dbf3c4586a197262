//! Hardware abstraction traits
//!
//! These traits define the interface between the control logic
//! and hardware-specific implementations.

pub mod encoder;
pub mod motor;
pub mod source;

pub use encoder::EncoderCounter;
pub use motor::{Drive, MotorOutput};
pub use source::ByteSource;
