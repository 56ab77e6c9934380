use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, info, warn};
use web_sys::{Element, HtmlMediaElement, HtmlVideoElement};
use yew::prelude::*;
use yew_icons::{Icon, IconId};

use super::auto_hide::{ControlsVisibility, TimerCommand};
use super::intent::{Intent, SKIP_SECONDS};
use super::mapper::format_time;
use super::platform::{self, Subscriptions};
use super::progress_bar::ProgressBar;
use super::settings_menu::SettingsMenu;
use super::state::{MediaEvent, PlaybackState, PlayerAction};
use super::video_controls::VideoControls;
use super::volume_control::VolumeControl;

/// `HTMLMediaElement.HAVE_METADATA`
const HAVE_METADATA: u16 = 1;
/// `HTMLMediaElement.HAVE_FUTURE_DATA`
const HAVE_FUTURE_DATA: u16 = 3;

#[derive(Properties, PartialEq, Clone)]
pub struct VideoPlayerProps {
    pub src: AttrValue,
    #[prop_or_default]
    pub poster: Option<AttrValue>,
    #[prop_or_default]
    pub class: Classes,
}

fn toggle_fullscreen(container_ref: &NodeRef) {
    let Some(container) = container_ref.cast::<Element>() else {
        return;
    };
    let document = match platform::document() {
        Ok(document) => document,
        Err(err) => {
            warn!("fullscreen toggle skipped: {err}");
            return;
        }
    };
    let enter = !platform::is_fullscreen(&document);
    wasm_bindgen_futures::spawn_local(async move {
        // State follows `fullscreenchange`; a rejection leaves it untouched.
        if let Err(err) = platform::set_fullscreen(&container, enter).await {
            warn!("{err}");
        }
    });
}

/// Events the element fired before the listeners were attached.
fn replayed_events(ready_state: u16, duration: f64) -> Vec<MediaEvent> {
    let mut events = Vec::new();
    if ready_state >= HAVE_METADATA {
        events.push(MediaEvent::LoadedMetadata(duration));
    }
    if ready_state >= HAVE_FUTURE_DATA {
        events.push(MediaEvent::CanPlay);
    }
    events
}

#[function_component(VideoPlayer)]
pub fn video_player(props: &VideoPlayerProps) -> Html {
    let container_ref = use_node_ref();
    let video_ref = use_node_ref();
    let state = use_reducer(PlaybackState::default);
    let show_settings = use_state(|| false);

    // Overlay visibility: the machine lives in a RefCell so the timeout can
    // reach it; the bool copy triggers re-renders.
    let visibility: Rc<RefCell<ControlsVisibility>> = use_mut_ref(ControlsVisibility::default);
    let controls_visible = use_state(|| true);
    let hide_timer: Rc<RefCell<Option<Timeout>>> = use_mut_ref(|| None);

    let run_visibility: Rc<dyn Fn(&dyn Fn(&mut ControlsVisibility) -> TimerCommand)> = {
        let visibility = visibility.clone();
        let controls_visible = controls_visible.clone();
        let hide_timer = hide_timer.clone();
        Rc::new(move |update: &dyn Fn(&mut ControlsVisibility) -> TimerCommand| {
            let command = update(&mut visibility.borrow_mut());
            controls_visible.set(visibility.borrow().is_visible());
            match command {
                TimerCommand::Cancel => {
                    hide_timer.borrow_mut().take();
                }
                TimerCommand::Arm(ms) => {
                    let visibility = visibility.clone();
                    let controls_visible = controls_visible.clone();
                    let timeout = Timeout::new(ms, move || {
                        visibility.borrow_mut().timer_elapsed();
                        controls_visible.set(visibility.borrow().is_visible());
                    });
                    // Replacing the handle drops, and so clears, the old timer.
                    *hide_timer.borrow_mut() = Some(timeout);
                }
            }
        })
    };

    let perform = {
        let dispatcher = state.dispatcher();
        let video_ref = video_ref.clone();
        let container_ref = container_ref.clone();
        Callback::from(move |intent: Intent| match intent {
            Intent::TogglePlay => {
                if let Some(media) = video_ref.cast::<HtmlMediaElement>() {
                    platform::toggle_playback(&media);
                }
            }
            Intent::ToggleFullscreen => toggle_fullscreen(&container_ref),
            other => {
                if let Some(action) = other.as_action() {
                    dispatcher.dispatch(action);
                }
            }
        })
    };

    // Media, keyboard and fullscreen listeners live exactly as long as the player.
    {
        let video_ref = video_ref.clone();
        let dispatcher = state.dispatcher();
        let perform = perform.clone();
        use_effect_with((), move |_| {
            let media_sink = {
                let dispatcher = dispatcher.clone();
                Callback::from(move |event: MediaEvent| {
                    if let MediaEvent::LoadedMetadata(duration) = event {
                        debug!("metadata loaded, duration {duration:.2}s");
                    }
                    dispatcher.dispatch(PlayerAction::Media(event));
                })
            };
            let fullscreen_sink = {
                let dispatcher = dispatcher.clone();
                Callback::from(move |active: bool| {
                    dispatcher.dispatch(PlayerAction::Media(MediaEvent::FullscreenChange(active)));
                })
            };

            let mut subscriptions = Subscriptions::default();
            if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                for event in replayed_events(video.ready_state(), video.duration()) {
                    media_sink.emit(event);
                }
                subscriptions = subscriptions.media(&video, media_sink);
            }
            match platform::document() {
                Ok(document) => {
                    subscriptions = subscriptions
                        .shortcuts(&document, perform)
                        .fullscreen_changes(&document, fullscreen_sink);
                }
                Err(err) => warn!("keyboard shortcuts unavailable: {err}"),
            }
            info!("video player mounted with {} listeners", subscriptions.len());

            move || {
                drop(subscriptions);
                info!("video player unmounted");
            }
        });
    }

    // Auto-hide reacts to play/pause
    {
        let run_visibility = run_visibility.clone();
        use_effect_with(state.is_playing, move |playing| {
            let playing = *playing;
            run_visibility(&move |v: &mut ControlsVisibility| v.playing_changed(playing));
            || ()
        });
    }

    {
        let hide_timer = hide_timer.clone();
        use_effect_with((), move |_| {
            move || {
                hide_timer.borrow_mut().take();
            }
        });
    }

    // Push canonical state into the element
    {
        let video_ref = video_ref.clone();
        use_effect_with(state.pending_seek, move |seek| {
            if let (Some(seek), Some(media)) = (seek, video_ref.cast::<HtmlMediaElement>()) {
                media.set_current_time(seek.target);
            }
            || ()
        });
    }

    {
        let video_ref = video_ref.clone();
        use_effect_with((state.volume, state.is_muted), move |(volume, muted)| {
            if let Some(media) = video_ref.cast::<HtmlMediaElement>() {
                media.set_volume(*volume);
                media.set_muted(*muted);
            }
            || ()
        });
    }

    {
        let video_ref = video_ref.clone();
        use_effect_with(state.playback_rate, move |rate| {
            if let Some(media) = video_ref.cast::<HtmlMediaElement>() {
                media.set_playback_rate(rate.as_f64());
            }
            || ()
        });
    }

    let on_pointer_activity = {
        let run_visibility = run_visibility.clone();
        Callback::from(move |_: MouseEvent| run_visibility(&|v: &mut ControlsVisibility| v.pointer_activity()))
    };

    let on_pointer_leave = {
        let run_visibility = run_visibility.clone();
        Callback::from(move |_: MouseEvent| run_visibility(&|v: &mut ControlsVisibility| v.pointer_left()))
    };

    let on_toggle_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_: ()| show_settings.set(!*show_settings))
    };

    let on_surface_click = perform.reform(|_: MouseEvent| Intent::TogglePlay);

    let container_class = classes!(
        "video-player",
        state.is_fullscreen.then_some("fullscreen"),
        props.class.clone()
    );
    let controls_class = classes!("controls-overlay", (!*controls_visible).then_some("hidden"));

    html! {
        <div
            ref={container_ref}
            class={container_class}
            onmouseenter={on_pointer_activity.clone()}
            onmousemove={on_pointer_activity}
            onmouseleave={on_pointer_leave}
        >
            <video
                ref={video_ref}
                class="video-surface"
                src={props.src.clone()}
                poster={props.poster.clone()}
                preload="metadata"
                playsinline=true
            />

            <div class="click-layer" onclick={on_surface_click.clone()}></div>

            if state.is_loading {
                <div class="player-spinner">
                    <Icon icon_id={IconId::LucideLoader2} width={"48"} height={"48"} />
                </div>
            } else if !state.is_playing {
                <div class="play-overlay" onclick={on_surface_click}>
                    <div class="play-overlay-button">
                        <Icon icon_id={IconId::LucidePlay} width={"64"} height={"64"} />
                    </div>
                </div>
            }

            <div class={controls_class}>
                <ProgressBar
                    current_time={state.current_time}
                    duration={state.duration}
                    buffered={state.buffered_end}
                    on_seek={perform.reform(Intent::SeekTo)}
                    class={classes!("mb-4")}
                />
                <VideoControls
                    is_playing={state.is_playing}
                    is_fullscreen={state.is_fullscreen}
                    on_toggle_play={perform.reform(|_: ()| Intent::TogglePlay)}
                    on_skip_backward={perform.reform(|_: ()| Intent::Skip(-SKIP_SECONDS))}
                    on_skip_forward={perform.reform(|_: ()| Intent::Skip(SKIP_SECONDS))}
                    on_toggle_fullscreen={perform.reform(|_: ()| Intent::ToggleFullscreen)}
                >
                    <VolumeControl
                        volume={state.volume}
                        is_muted={state.is_muted}
                        on_volume_change={perform.reform(Intent::ChangeVolume)}
                        on_toggle_mute={perform.reform(|_: ()| Intent::ToggleMute)}
                    />
                    <span class="time-display">
                        {format!("{} / {}", format_time(state.current_time), format_time(state.duration))}
                    </span>
                    <div style="flex: 1;"></div>
                    <SettingsMenu
                        playback_rate={state.playback_rate}
                        quality={state.quality}
                        on_playback_rate_change={perform.reform(Intent::ChangePlaybackRate)}
                        on_quality_change={perform.reform(Intent::ChangeQuality)}
                        is_open={*show_settings}
                        on_toggle={on_toggle_settings}
                    />
                </VideoControls>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_ready_before_mount_clears_loading() {
        let state = replayed_events(4, 90.0)
            .into_iter()
            .fold(PlaybackState::default(), |state, event| state.apply(PlayerAction::Media(event)));
        assert_eq!(state.duration, 90.0);
        assert!(!state.is_loading);
    }

    #[test]
    fn metadata_only_keeps_spinner() {
        assert_eq!(replayed_events(1, 30.0), vec![MediaEvent::LoadedMetadata(30.0)]);
        assert!(replayed_events(0, f64::NAN).is_empty());
    }
}
