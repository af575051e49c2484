//! Getting images into the archive.
//!
//! Camera capture and file upload both end in the same place: a
//! self-contained `data:` reference that is stored as the card's `url`.

pub mod camera;
pub mod encode;
pub mod upload;

pub use camera::{Camera, CaptureSession, StillCamera};
pub use encode::{describe, ImageSource, DEFAULT_JPEG_QUALITY};
pub use upload::{read_image_file, UploadedImage};
