use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::JsCast;
use yew::prelude::*;
use yew_icons::{Icon, IconId};

use super::interaction::{PointerInput, SliderState};
use super::mapper::position_to_level;
use super::platform::{track_rect, DragSubscription};

#[derive(Properties, PartialEq, Clone)]
pub struct VolumeControlProps {
    pub volume: f64,
    pub is_muted: bool,
    /// Relative change; the owner clamps and decides on mute.
    pub on_volume_change: Callback<f64>,
    pub on_toggle_mute: Callback<()>,
}

fn volume_icon(volume: f64, muted: bool) -> IconId {
    if muted || volume == 0.0 {
        IconId::LucideVolumeX
    } else if volume < 0.5 {
        IconId::LucideVolume1
    } else {
        IconId::LucideVolume2
    }
}

fn pointer_within(node: &NodeRef, e: &MouseEvent) -> bool {
    let Some(wrapper) = node.cast::<web_sys::Node>() else {
        return false;
    };
    e.target()
        .and_then(|t| t.dyn_into::<web_sys::Node>().ok())
        .is_some_and(|target| wrapper.contains(Some(&target)))
}

#[function_component(VolumeControl)]
pub fn volume_control(props: &VolumeControlProps) -> Html {
    let wrapper_ref = use_node_ref();
    let track_ref = use_node_ref();
    let slider_ref: Rc<RefCell<SliderState>> = use_mut_ref(SliderState::default);
    let slider = use_state(SliderState::default);
    let show_slider = use_state(|| false);
    let drag: Rc<RefCell<Option<DragSubscription>>> = use_mut_ref(|| None);

    // Latest volume for listeners created at drag start
    let volume_ref = use_mut_ref(|| props.volume);
    *volume_ref.borrow_mut() = props.volume;

    {
        let drag = drag.clone();
        use_effect_with((), move |_| {
            move || {
                drag.borrow_mut().take();
            }
        });
    }

    let map_y: Rc<dyn Fn(f64) -> Option<f64>> = {
        let node = track_ref.clone();
        Rc::new(move |client_y: f64| track_rect(&node).map(|rect| position_to_level(client_y, &rect)))
    };

    // Each emitted target becomes a delta against the latest known volume.
    let drive: Rc<dyn Fn(PointerInput)> = {
        let slider_ref = slider_ref.clone();
        let slider = slider.clone();
        let volume_ref = volume_ref.clone();
        let on_volume_change = props.on_volume_change.clone();
        Rc::new(move |input: PointerInput| {
            let step = slider_ref.borrow().step(input);
            *slider_ref.borrow_mut() = step.next;
            slider.set(step.next);
            if let Some(target) = step.emit {
                let current = *volume_ref.borrow();
                on_volume_change.emit(target - current);
            }
        })
    };

    let on_mouse_down = {
        let drive = drive.clone();
        let map_y = map_y.clone();
        let slider_ref = slider_ref.clone();
        let drag = drag.clone();
        let show_slider = show_slider.clone();
        let wrapper_ref = wrapper_ref.clone();
        Callback::from(move |e: MouseEvent| {
            if e.button() != 0 {
                return;
            }
            e.prevent_default();
            drive(PointerInput::Down(map_y(e.client_y() as f64)));
            if !slider_ref.borrow().is_dragging() {
                return;
            }
            debug!("volume drag started");

            let on_move = {
                let drive = drive.clone();
                let map_y = map_y.clone();
                move |e: &MouseEvent| drive(PointerInput::Move(map_y(e.client_y() as f64)))
            };
            let on_up = {
                let drive = drive.clone();
                let drag = drag.clone();
                let show_slider = show_slider.clone();
                let wrapper_ref = wrapper_ref.clone();
                move |e: &MouseEvent| {
                    drive(PointerInput::Up(None));
                    if !pointer_within(&wrapper_ref, e) {
                        show_slider.set(false);
                    }
                    let finished = drag.borrow_mut().take();
                    drop(finished);
                }
            };
            match DragSubscription::start(on_move, on_up) {
                Ok(sub) => *drag.borrow_mut() = Some(sub),
                Err(err) => warn!("volume drag unavailable: {err}"),
            }
        })
    };

    let on_mouse_enter = {
        let show_slider = show_slider.clone();
        Callback::from(move |_: MouseEvent| show_slider.set(true))
    };

    let on_mouse_leave = {
        let show_slider = show_slider.clone();
        let slider_ref = slider_ref.clone();
        Callback::from(move |_: MouseEvent| {
            if !slider_ref.borrow().is_dragging() {
                show_slider.set(false);
            }
        })
    };

    let on_mute_click = props.on_toggle_mute.reform(|_: MouseEvent| ());

    let display_volume = if props.is_muted { 0.0 } else { props.volume };
    let display_pct = display_volume * 100.0;
    let dragging = slider.is_dragging();
    let popover_class = classes!("volume-popover", (*show_slider || dragging).then_some("open"));

    html! {
        <div ref={wrapper_ref} class="volume-control" onmouseenter={on_mouse_enter} onmouseleave={on_mouse_leave}>
            <button class="ctrl-btn" type="button" onclick={on_mute_click} title={if props.is_muted { "Unmute" } else { "Mute" }}>
                <Icon icon_id={volume_icon(props.volume, props.is_muted)} width={"20"} height={"20"} />
            </button>
            <div class={popover_class}>
                <div ref={track_ref} class="volume-track" onmousedown={on_mouse_down}>
                    <div class="volume-fill" style={format!("height: {display_pct:.1}%;")}></div>
                    <div
                        class={classes!("volume-handle", dragging.then_some("active"))}
                        style={format!("bottom: calc({display_pct:.1}% - 6px);")}
                    ></div>
                </div>
                <div class="volume-label">{format!("{}%", display_pct.round() as i64)}</div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_follows_level_and_mute() {
        assert!(volume_icon(0.8, true) == IconId::LucideVolumeX);
        assert!(volume_icon(0.0, false) == IconId::LucideVolumeX);
        assert!(volume_icon(0.3, false) == IconId::LucideVolume1);
        assert!(volume_icon(0.5, false) == IconId::LucideVolume2);
    }
}
