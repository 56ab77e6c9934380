use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use yew::prelude::*;

use super::interaction::{PointerInput, SliderState};
use super::mapper::{format_time, percent, position_to_time};
use super::platform::{track_rect, DragSubscription};

#[derive(Properties, PartialEq, Clone)]
pub struct ProgressBarProps {
    pub current_time: f64,
    pub duration: f64,
    pub buffered: f64,
    pub on_seek: Callback<f64>,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(ProgressBar)]
pub fn progress_bar(props: &ProgressBarProps) -> Html {
    let track_ref = use_node_ref();
    // Listener closures read the ref; the state copy drives rendering.
    let slider_ref: Rc<RefCell<SliderState>> = use_mut_ref(SliderState::default);
    let slider = use_state(SliderState::default);
    let duration_ref = use_mut_ref(|| props.duration);
    let drag: Rc<RefCell<Option<DragSubscription>>> = use_mut_ref(|| None);

    *duration_ref.borrow_mut() = props.duration;

    // Release window listeners if unmounted mid-drag
    {
        let drag = drag.clone();
        use_effect_with((), move |_| {
            move || {
                drag.borrow_mut().take();
            }
        });
    }

    // clientX -> time, or None while the duration is unknown.
    let map_x: Rc<dyn Fn(f64) -> Option<f64>> = {
        let track_ref = track_ref.clone();
        let duration_ref = duration_ref.clone();
        Rc::new(move |client_x: f64| {
            let duration = *duration_ref.borrow();
            if !(duration > 0.0) {
                return None;
            }
            track_rect(&track_ref).map(|rect| position_to_time(client_x, &rect, duration))
        })
    };

    let drive: Rc<dyn Fn(PointerInput)> = {
        let slider_ref = slider_ref.clone();
        let slider = slider.clone();
        let on_seek = props.on_seek.clone();
        Rc::new(move |input: PointerInput| {
            let step = slider_ref.borrow().step(input);
            *slider_ref.borrow_mut() = step.next;
            slider.set(step.next);
            if let Some(time) = step.emit {
                on_seek.emit(time);
            }
        })
    };

    let on_mouse_down = {
        let drive = drive.clone();
        let map_x = map_x.clone();
        let slider_ref = slider_ref.clone();
        let drag = drag.clone();
        let track_ref = track_ref.clone();
        Callback::from(move |e: MouseEvent| {
            if e.button() != 0 {
                return;
            }
            e.prevent_default();
            drive(PointerInput::Down(map_x(e.client_x() as f64)));
            if !slider_ref.borrow().is_dragging() {
                return;
            }

            let on_move = {
                let drive = drive.clone();
                let map_x = map_x.clone();
                move |e: &MouseEvent| drive(PointerInput::Move(map_x(e.client_x() as f64)))
            };
            let on_up = {
                let drive = drive.clone();
                let map_x = map_x.clone();
                let slider_ref = slider_ref.clone();
                let drag = drag.clone();
                let track_ref = track_ref.clone();
                move |e: &MouseEvent| {
                    let (x, y) = (e.client_x() as f64, e.client_y() as f64);
                    let over_track = track_rect(&track_ref).is_some_and(|r| r.contains(x, y));
                    let moved = matches!(*slider_ref.borrow(), SliderState::Dragging { moved: true, .. });
                    drive(PointerInput::Up(if over_track { map_x(x) } else { None }));
                    debug!("seek drag ended (moved: {moved})");
                    let finished = drag.borrow_mut().take();
                    drop(finished);
                }
            };
            match DragSubscription::start(on_move, on_up) {
                Ok(sub) => *drag.borrow_mut() = Some(sub),
                Err(err) => warn!("seek drag unavailable: {err}"),
            }
        })
    };

    let on_mouse_move = {
        let drive = drive.clone();
        let map_x = map_x.clone();
        let slider_ref = slider_ref.clone();
        Callback::from(move |e: MouseEvent| {
            // Window listeners own the pointer while dragging.
            if slider_ref.borrow().is_dragging() {
                return;
            }
            drive(PointerInput::Move(map_x(e.client_x() as f64)));
        })
    };

    let on_mouse_leave = {
        let drive = drive.clone();
        Callback::from(move |_: MouseEvent| drive(PointerInput::Leave))
    };

    let duration = props.duration;
    let played = percent(props.current_time, duration);
    let buffered = percent(props.buffered, duration);
    let dragging = slider.is_dragging();
    let preview = slider.preview().filter(|_| duration > 0.0);

    let handle_style = format!("left: calc({played:.3}% - 8px);");

    html! {
        <div class={classes!("progress-bar", props.class.clone())}>
            if let Some(time) = preview {
                <div class="progress-tooltip" style={format!("left: {:.3}%;", percent(time, duration))}>
                    {format_time(time)}
                </div>
            }
            <div
                ref={track_ref}
                class={classes!("progress-track", dragging.then_some("dragging"))}
                onmousedown={on_mouse_down}
                onmousemove={on_mouse_move}
                onmouseleave={on_mouse_leave}
            >
                <div class="progress-buffered" style={format!("width: {buffered:.3}%;")}></div>
                <div class="progress-played" style={format!("width: {played:.3}%;")}></div>
                <div class={classes!("progress-handle", dragging.then_some("active"))} style={handle_style}></div>
                if let Some(time) = preview.filter(|_| !dragging) {
                    <div class="progress-hover" style={format!("left: {:.3}%;", percent(time, duration))}></div>
                }
            </div>
        </div>
    }
}
