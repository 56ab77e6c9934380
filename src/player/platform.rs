//! Browser bindings: media element commands, the fullscreen API and the
//! listener subscriptions the player holds for its lifetime.
//!
//! Every listener is a `gloo_events::EventListener`, removed from its
//! target when dropped, so owning a subscription is owning the
//! registration.

use gloo_events::{EventListener, EventListenerOptions};
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlMediaElement, HtmlVideoElement, KeyboardEvent, MouseEvent};
use yew::{Callback, NodeRef};

use super::intent::{shortcut_for, Intent};
use super::mapper::TrackRect;
use super::state::MediaEvent;
use crate::error::{FullscreenAction, PlayerError};

#[wasm_bindgen(inline_js = r#"
export async function requestFullscreen(element) {
  await element.requestFullscreen();
}

export async function exitFullscreen() {
  if (document.fullscreenElement) {
    await document.exitFullscreen();
  }
}
"#)]
extern "C" {
    #[wasm_bindgen(catch, js_name = requestFullscreen)]
    async fn request_fullscreen_js(element: &Element) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = exitFullscreen)]
    async fn exit_fullscreen_js() -> Result<JsValue, JsValue>;
}

pub fn document() -> Result<Document, PlayerError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or(PlayerError::NoDocument)
}

fn describe_js_error(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

pub fn is_fullscreen(document: &Document) -> bool {
    document.fullscreen_element().is_some()
}

/// Requests or leaves fullscreen on `container`. The outcome is observed
/// through `fullscreenchange`, never assumed here.
pub async fn set_fullscreen(container: &Element, enter: bool) -> Result<(), PlayerError> {
    let (action, result) = if enter {
        (FullscreenAction::Request, request_fullscreen_js(container).await)
    } else {
        (FullscreenAction::Exit, exit_fullscreen_js().await)
    };
    result.map(|_| ()).map_err(|err| PlayerError::Fullscreen {
        action,
        reason: describe_js_error(&err),
    })
}

/// Asks the element to play or pause. `play`/`pause` events report back.
pub fn toggle_playback(media: &HtmlMediaElement) {
    if media.paused() {
        match media.play() {
            Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = wasm_bindgen_futures::JsFuture::from(promise).await {
                    warn!("play() rejected: {}", describe_js_error(&err));
                }
            }),
            Err(err) => warn!("play() failed: {}", describe_js_error(&err)),
        }
    } else if let Err(err) = media.pause() {
        warn!("pause() failed: {}", describe_js_error(&err));
    }
}

/// End of the last buffered range, or 0 when nothing is buffered.
pub fn buffered_end(media: &HtmlMediaElement) -> f64 {
    let ranges = media.buffered();
    match ranges.length() {
        0 => 0.0,
        n => ranges.end(n - 1).unwrap_or(0.0),
    }
}

pub fn track_rect(node: &NodeRef) -> Option<TrackRect> {
    node.cast::<Element>()
        .map(|el| TrackRect::from(&el.get_bounding_client_rect()))
}

type MediaReader = fn(&HtmlMediaElement) -> MediaEvent;

const MEDIA_EVENTS: [(&str, MediaReader); 7] = [
    ("loadstart", |_| MediaEvent::LoadStart),
    ("canplay", |_| MediaEvent::CanPlay),
    ("play", |_| MediaEvent::Play),
    ("pause", |_| MediaEvent::Pause),
    ("timeupdate", |m| MediaEvent::TimeUpdate(m.current_time())),
    ("loadedmetadata", |m| MediaEvent::LoadedMetadata(m.duration())),
    ("progress", |m| MediaEvent::Progress(buffered_end(m))),
];

/// Listeners owned by a mounted player. Dropping it unregisters all of them.
#[derive(Default)]
pub struct Subscriptions {
    listeners: Vec<EventListener>,
}

impl Subscriptions {
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Forwards the standard media events of `video` as [`MediaEvent`]s.
    pub fn media(mut self, video: &HtmlVideoElement, sink: Callback<MediaEvent>) -> Self {
        for (name, read) in MEDIA_EVENTS {
            let media: HtmlMediaElement = video.clone().into();
            let sink = sink.clone();
            self.listeners.push(EventListener::new(video, name, move |_| {
                sink.emit(read(&media));
            }));
        }
        self
    }

    /// Global keyboard shortcuts. Matched keys have their default action
    /// suppressed, so the listener must not be passive.
    pub fn shortcuts(mut self, document: &Document, sink: Callback<Intent>) -> Self {
        let options = EventListenerOptions::enable_prevent_default();
        self.listeners.push(EventListener::new_with_options(
            document,
            "keydown",
            options,
            move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if let Some(intent) = shortcut_for(&event.code()) {
                    event.prevent_default();
                    sink.emit(intent);
                }
            },
        ));
        self
    }

    pub fn fullscreen_changes(mut self, document: &Document, sink: Callback<bool>) -> Self {
        let doc = document.clone();
        self.listeners.push(EventListener::new(document, "fullscreenchange", move |_| {
            sink.emit(is_fullscreen(&doc));
        }));
        self
    }
}

/// Window-level move/up listeners alive for the duration of one slider drag.
pub struct DragSubscription {
    _move: EventListener,
    _up: EventListener,
}

impl DragSubscription {
    pub fn start<M, U>(mut on_move: M, mut on_up: U) -> Result<Self, PlayerError>
    where
        M: FnMut(&MouseEvent) + 'static,
        U: FnMut(&MouseEvent) + 'static,
    {
        let window = web_sys::window().ok_or(PlayerError::NoDocument)?;
        let move_listener = EventListener::new(&window, "mousemove", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                on_move(event);
            }
        });
        let up_listener = EventListener::new(&window, "mouseup", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                on_up(event);
            }
        });
        debug!("slider drag listeners attached");
        Ok(Self { _move: move_listener, _up: up_listener })
    }
}
