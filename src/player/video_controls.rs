use yew::prelude::*;
use yew_icons::{Icon, IconId};

#[derive(Properties, PartialEq, Clone)]
pub struct VideoControlsProps {
    pub is_playing: bool,
    pub is_fullscreen: bool,
    pub on_toggle_play: Callback<()>,
    pub on_skip_backward: Callback<()>,
    pub on_skip_forward: Callback<()>,
    pub on_toggle_fullscreen: Callback<()>,
    #[prop_or_default]
    pub class: Classes,
    /// Rendered between the skip buttons and the fullscreen button.
    #[prop_or_default]
    pub children: Children,
}

/// Transport button row. Holds no state of its own.
#[function_component(VideoControls)]
pub fn video_controls(props: &VideoControlsProps) -> Html {
    let on_play = props.on_toggle_play.reform(|_: MouseEvent| ());
    let on_back = props.on_skip_backward.reform(|_: MouseEvent| ());
    let on_forward = props.on_skip_forward.reform(|_: MouseEvent| ());
    let on_fullscreen = props.on_toggle_fullscreen.reform(|_: MouseEvent| ());

    let play_icon = if props.is_playing { IconId::LucidePause } else { IconId::LucidePlay };
    let fullscreen_icon = if props.is_fullscreen { IconId::LucideMinimize } else { IconId::LucideMaximize };

    html! {
        <div class={classes!("control-row", props.class.clone())}>
            <div class="control-group">
                <button id="play-pause-btn" class="ctrl-btn play-btn" type="button" onclick={on_play} title={if props.is_playing { "Pause" } else { "Play" }}>
                    <Icon icon_id={play_icon} width={"24"} height={"24"} />
                </button>
                <button id="skip-backward-btn" class="ctrl-btn" type="button" onclick={on_back} title="Back 10s">
                    <Icon icon_id={IconId::LucideSkipBack} width={"20"} height={"20"} />
                </button>
                <button id="skip-forward-btn" class="ctrl-btn" type="button" onclick={on_forward} title="Forward 10s">
                    <Icon icon_id={IconId::LucideSkipForward} width={"20"} height={"20"} />
                </button>
            </div>
            { for props.children.iter() }
            <button id="fullscreen-btn" class="ctrl-btn" type="button" onclick={on_fullscreen} title={if props.is_fullscreen { "Exit fullscreen" } else { "Fullscreen" }}>
                <Icon icon_id={fullscreen_icon} width={"20"} height={"20"} />
            </button>
        </div>
    }
}
