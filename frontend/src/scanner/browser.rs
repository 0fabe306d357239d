//! Camera backed by `getUserMedia` and the browser `BarcodeDetector`.

use std::{cell::Cell, rc::Rc};

use gloo_timers::future::TimeoutFuture;
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlVideoElement, MediaStream, MediaStreamConstraints, MediaStreamTrack};

use super::camera::{Camera, CameraError, CameraFuture, CameraStream, DecodeSink};

const DECODE_INTERVAL_MS: u32 = 100;

pub struct BrowserCamera;

impl Camera for BrowserCamera {
    fn open(&self, container_id: &str, on_decode: DecodeSink) -> CameraFuture {
        let container_id = container_id.to_string();
        Box::pin(async move { start(&container_id, on_decode).await })
    }
}

fn dom_error(err: JsValue) -> CameraError {
    let field = |name: &str| {
        Reflect::get(&err, &name.into())
            .ok()
            .and_then(|value| value.as_string())
            .unwrap_or_default()
    };
    CameraError::from_dom_name(&field("name"), &field("message"))
}

fn barcode_detector() -> Result<JsValue, CameraError> {
    let window = web_sys::window().ok_or(CameraError::Unsupported)?;
    let ctor = Reflect::get(&window, &"BarcodeDetector".into())
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
        .ok_or(CameraError::Unsupported)?;
    let options = Object::new();
    let formats = Array::of1(&"qr_code".into());
    Reflect::set(&options, &"formats".into(), &formats).map_err(dom_error)?;
    Reflect::construct(&ctor, &Array::of1(&options)).map_err(dom_error)
}

async fn user_media() -> Result<MediaStream, CameraError> {
    let devices = web_sys::window()
        .ok_or(CameraError::Unsupported)?
        .navigator()
        .media_devices()
        .map_err(|_| CameraError::Unsupported)?;
    let video = Object::new();
    Reflect::set(&video, &"facingMode".into(), &"environment".into()).map_err(dom_error)?;
    let constraints = MediaStreamConstraints::new();
    Reflect::set(&constraints, &"video".into(), &video).map_err(dom_error)?;
    Reflect::set(&constraints, &"audio".into(), &JsValue::FALSE).map_err(dom_error)?;
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(dom_error)?;
    let stream = JsFuture::from(promise).await.map_err(dom_error)?;
    stream
        .dyn_into::<MediaStream>()
        .map_err(|_| CameraError::Stream("stream inválido".into()))
}

fn stop_tracks(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
}

fn mount_preview(container_id: &str, stream: &MediaStream) -> Result<HtmlVideoElement, CameraError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or(CameraError::Unsupported)?;
    let container = document
        .get_element_by_id(container_id)
        .ok_or_else(|| CameraError::Stream(format!("#{} no existe", container_id)))?;
    let video = document
        .create_element("video")
        .map_err(dom_error)?
        .dyn_into::<HtmlVideoElement>()
        .map_err(|_| CameraError::Unsupported)?;
    video.set_attribute("playsinline", "true").map_err(dom_error)?;
    video.set_attribute("class", "w-full rounded-xl").map_err(dom_error)?;
    video.set_muted(true);
    video.set_src_object(Some(stream));
    container.append_child(&video).map_err(dom_error)?;
    Ok(video)
}

async fn detect_once(detector: &JsValue, video: &HtmlVideoElement) -> Option<String> {
    let detect = Reflect::get(detector, &"detect".into())
        .ok()?
        .dyn_into::<Function>()
        .ok()?;
    let promise = detect.call1(detector, video).ok()?;
    let found = JsFuture::from(js_sys::Promise::from(promise)).await.ok()?;
    Array::from(&found).iter().find_map(|barcode| {
        Reflect::get(&barcode, &"rawValue".into())
            .ok()
            .and_then(|value| value.as_string())
            .filter(|value| !value.trim().is_empty())
    })
}

async fn start(container_id: &str, on_decode: DecodeSink) -> Result<CameraStream, CameraError> {
    let detector = barcode_detector()?;
    let stream = user_media().await?;
    let video = match mount_preview(container_id, &stream) {
        Ok(video) => video,
        Err(err) => {
            stop_tracks(&stream);
            return Err(err);
        }
    };
    if let Ok(playing) = video.play() {
        if let Err(err) = JsFuture::from(playing).await {
            stop_tracks(&stream);
            video.remove();
            return Err(dom_error(err));
        }
    }

    let active = Rc::new(Cell::new(true));
    let loop_active = Rc::clone(&active);
    let loop_video = video.clone();
    wasm_bindgen_futures::spawn_local(async move {
        while loop_active.get() {
            TimeoutFuture::new(DECODE_INTERVAL_MS).await;
            if !loop_active.get() {
                break;
            }
            if let Some(code) = detect_once(&detector, &loop_video).await {
                if loop_active.get() {
                    on_decode(code);
                }
            }
        }
    });

    log::debug!("camera started in #{}", container_id);
    Ok(CameraStream::new(move || {
        active.set(false);
        stop_tracks(&stream);
        video.set_src_object(None);
        video.remove();
        log::debug!("camera released");
    }))
}
