//! Still capture from a camera-like source.
//!
//! A [`CaptureSession`] owns an open stream for as long as it lives. The
//! stream is stopped exactly once: after a capture, on cancel, or when the
//! session is dropped. A capture that races a cancellation yields nothing.

use super::encode;
use crate::error::{ArchiveError, Result};
use image::DynamicImage;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub trait Camera {
    type Stream;

    /// Acquire a stream. Failing here must not leave anything open.
    fn open(&mut self) -> Result<Self::Stream>;

    /// Grab one frame from an open stream.
    fn capture(&mut self, stream: &mut Self::Stream) -> Result<DynamicImage>;

    /// Release the stream.
    fn stop(&mut self, stream: Self::Stream);
}

pub struct CaptureSession<'a, C: Camera> {
    camera: &'a mut C,
    stream: Option<C::Stream>,
    cancel: CancellationToken,
}

impl<'a, C: Camera> CaptureSession<'a, C> {
    pub fn open(camera: &'a mut C) -> Result<Self> {
        Self::open_with_token(camera, CancellationToken::new())
    }

    /// Open a session that can be cancelled from outside through `cancel`.
    pub fn open_with_token(camera: &'a mut C, cancel: CancellationToken) -> Result<Self> {
        let stream = camera.open().map_err(|e| match e {
            ArchiveError::Camera(_) => e,
            other => ArchiveError::Camera(other.to_string()),
        })?;
        debug!("camera stream opened");
        Ok(Self {
            camera,
            stream: Some(stream),
            cancel,
        })
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Grab a frame and encode it as an embedded JPEG reference.
    /// Returns `Ok(None)` if the session was cancelled.
    pub fn capture(mut self, quality: u8) -> Result<Option<String>> {
        let Some(mut stream) = self.stream.take() else {
            return Ok(None);
        };
        if self.cancel.is_cancelled() {
            self.camera.stop(stream);
            return Ok(None);
        }

        let frame = self.camera.capture(&mut stream);
        self.camera.stop(stream);
        debug!("camera stream stopped after capture");

        if self.cancel.is_cancelled() {
            debug!("capture cancelled, discarding frame");
            return Ok(None);
        }
        encode::jpeg_data_url(&frame?, quality).map(Some)
    }

    pub fn cancel(self) {
        self.cancel.cancel();
    }
}

impl<C: Camera> Drop for CaptureSession<'_, C> {
    fn drop(&mut self) {
        if let Some(stream) = self.stream.take() {
            self.camera.stop(stream);
            debug!("camera stream released");
        }
    }
}

/// A camera that serves a still image from a file or device node.
pub struct StillCamera {
    source: PathBuf,
}

pub struct StillStream {
    frame: DynamicImage,
}

impl StillCamera {
    pub fn new(source: PathBuf) -> Self {
        Self { source }
    }
}

impl Camera for StillCamera {
    type Stream = StillStream;

    fn open(&mut self) -> Result<StillStream> {
        if !self.source.exists() {
            return Err(ArchiveError::Camera(format!(
                "no capture source at {}",
                self.source.display()
            )));
        }
        let frame = image::open(&self.source).map_err(|e| {
            ArchiveError::Camera(format!("cannot read {}: {}", self.source.display(), e))
        })?;
        Ok(StillStream { frame })
    }

    fn capture(&mut self, stream: &mut StillStream) -> Result<DynamicImage> {
        Ok(stream.frame.clone())
    }

    fn stop(&mut self, stream: StillStream) {
        drop(stream);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[derive(Default)]
    struct FakeCamera {
        deny: bool,
        opened: usize,
        stopped: usize,
        cancel_during_capture: Option<CancellationToken>,
    }

    impl Camera for FakeCamera {
        type Stream = ();

        fn open(&mut self) -> Result<()> {
            if self.deny {
                return Err(ArchiveError::Store("permission denied".into()));
            }
            self.opened += 1;
            Ok(())
        }

        fn capture(&mut self, _: &mut ()) -> Result<DynamicImage> {
            if let Some(token) = &self.cancel_during_capture {
                token.cancel();
            }
            Ok(DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]))))
        }

        fn stop(&mut self, _: ()) {
            self.stopped += 1;
        }
    }

    #[test]
    fn capture_encodes_and_releases() {
        let mut camera = FakeCamera::default();
        let url = CaptureSession::open(&mut camera)
            .unwrap()
            .capture(80)
            .unwrap()
            .unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,"));
        assert_eq!((camera.opened, camera.stopped), (1, 1));
    }

    #[test]
    fn denied_open_is_a_camera_error() {
        let mut camera = FakeCamera {
            deny: true,
            ..Default::default()
        };
        let err = CaptureSession::open(&mut camera).err().unwrap();
        assert!(matches!(err, ArchiveError::Camera(_)));
        assert_eq!(camera.stopped, 0);
    }

    #[test]
    fn drop_releases_stream() {
        let mut camera = FakeCamera::default();
        {
            let _session = CaptureSession::open(&mut camera).unwrap();
        }
        assert_eq!(camera.stopped, 1);
    }

    #[test]
    fn cancel_releases_stream() {
        let mut camera = FakeCamera::default();
        CaptureSession::open(&mut camera).unwrap().cancel();
        assert_eq!(camera.stopped, 1);
    }

    #[test]
    fn cancellation_mid_capture_yields_nothing() {
        let token = CancellationToken::new();
        let mut camera = FakeCamera {
            cancel_during_capture: Some(token.clone()),
            ..Default::default()
        };
        let session = CaptureSession::open_with_token(&mut camera, token).unwrap();
        assert!(session.capture(80).unwrap().is_none());
        assert_eq!(camera.stopped, 1);
    }

    #[test]
    fn cancelled_before_capture_never_grabs() {
        let token = CancellationToken::new();
        let mut camera = FakeCamera::default();
        let session = CaptureSession::open_with_token(&mut camera, token.clone()).unwrap();
        token.cancel();
        assert!(session.capture(80).unwrap().is_none());
        assert_eq!(camera.stopped, 1);
    }

    #[test]
    fn still_camera_without_source_fails() {
        let mut camera = StillCamera::new(PathBuf::from("/definitely/not/here.png"));
        assert!(matches!(
            CaptureSession::open(&mut camera),
            Err(ArchiveError::Camera(_))
        ));
    }
}
