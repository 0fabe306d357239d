//! QR/PIN attendance capture, independent of any page.

#[cfg(target_arch = "wasm32")]
mod browser;
pub mod camera;
pub mod machine;
pub mod pin;

pub use camera::{platform_camera, Camera, CameraError, CameraStream, DecodeSink, READER_ELEMENT_ID};
pub use machine::{ScanMachine, ScanOutcome, ScanStatus, ScanTransitionError, SubscriptionId};
pub use pin::{sanitize_pin_input, validate_pin};
