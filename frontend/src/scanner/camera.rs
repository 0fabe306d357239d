use std::{future::Future, pin::Pin, rc::Rc};
use thiserror::Error;

/// Element the live preview is mounted into.
pub const READER_ELEMENT_ID: &str = "qr-reader";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    #[error("No se pudo acceder a la cámara. Verifica los permisos.")]
    PermissionDenied,
    #[error("Tu navegador no permite escanear códigos QR. Usa el PIN de la sesión.")]
    Unsupported,
    #[error("No se encontró ninguna cámara en este dispositivo.")]
    Unavailable,
    #[error("La cámara está siendo usada por otra aplicación.")]
    Busy,
    #[error("Error de la cámara: {0}")]
    Stream(String),
}

impl CameraError {
    /// Maps a `getUserMedia` DOMException name.
    pub fn from_dom_name(name: &str, message: &str) -> Self {
        match name {
            "NotAllowedError" | "SecurityError" | "PermissionDeniedError" => {
                CameraError::PermissionDenied
            }
            "NotFoundError" | "OverconstrainedError" | "DevicesNotFoundError" => {
                CameraError::Unavailable
            }
            "NotReadableError" | "AbortError" | "TrackStartError" => CameraError::Busy,
            "NotSupportedError" | "TypeError" => CameraError::Unsupported,
            _ => CameraError::Stream(message.to_string()),
        }
    }
}

pub type DecodeSink = Rc<dyn Fn(String)>;
pub type CameraFuture = Pin<Box<dyn Future<Output = Result<CameraStream, CameraError>>>>;

/// Source of decoded QR payloads.
pub trait Camera {
    fn open(&self, container_id: &str, on_decode: DecodeSink) -> CameraFuture;
}

/// Live camera handle. Dropping it releases the device.
pub struct CameraStream {
    release: Option<Box<dyn FnOnce()>>,
}

impl CameraStream {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn stop(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for CameraStream {
    fn drop(&mut self) {
        self.release_now();
    }
}

#[cfg(not(target_arch = "wasm32"))]
struct NoCamera;

#[cfg(not(target_arch = "wasm32"))]
impl Camera for NoCamera {
    fn open(&self, _container_id: &str, _on_decode: DecodeSink) -> CameraFuture {
        Box::pin(async { Err(CameraError::Unsupported) })
    }
}

#[cfg(target_arch = "wasm32")]
pub fn platform_camera() -> Rc<dyn Camera> {
    Rc::new(super::browser::BrowserCamera)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn platform_camera() -> Rc<dyn Camera> {
    Rc::new(NoCamera)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn stream_releases_once_on_stop_or_drop() {
        let released = Rc::new(Cell::new(0));
        let counter = Rc::clone(&released);
        let stream = CameraStream::new(move || counter.set(counter.get() + 1));
        stream.stop();
        assert_eq!(released.get(), 1);

        let counter = Rc::clone(&released);
        {
            let _stream = CameraStream::new(move || counter.set(counter.get() + 1));
        }
        assert_eq!(released.get(), 2);
    }

    #[test]
    fn dom_errors_map_to_camera_errors() {
        assert_eq!(
            CameraError::from_dom_name("NotAllowedError", "denied"),
            CameraError::PermissionDenied
        );
        assert_eq!(
            CameraError::from_dom_name("NotFoundError", ""),
            CameraError::Unavailable
        );
        assert_eq!(
            CameraError::from_dom_name("NotReadableError", ""),
            CameraError::Busy
        );
        assert_eq!(
            CameraError::from_dom_name("Weird", "boom"),
            CameraError::Stream("boom".into())
        );
    }

    #[test]
    fn permission_message_is_user_facing() {
        assert_eq!(
            CameraError::PermissionDenied.to_string(),
            "No se pudo acceder a la cámara. Verifica los permisos."
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn host_camera_is_unsupported() {
        let camera = platform_camera();
        let opening = camera.open(READER_ELEMENT_ID, Rc::new(|_: String| {}));
        let result = futures::executor::block_on(opening);
        assert!(matches!(result, Err(CameraError::Unsupported)));
    }
}
