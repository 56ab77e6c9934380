use yew::prelude::*;
use yew_icons::{Icon, IconId};

use super::state::{PlaybackRate, Quality};

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsMenuProps {
    pub playback_rate: PlaybackRate,
    pub quality: Quality,
    pub on_playback_rate_change: Callback<PlaybackRate>,
    pub on_quality_change: Callback<Quality>,
    pub is_open: bool,
    pub on_toggle: Callback<()>,
}

#[function_component(SettingsMenu)]
pub fn settings_menu(props: &SettingsMenuProps) -> Html {
    let on_toggle = props.on_toggle.reform(|_: MouseEvent| ());

    let rate_items = PlaybackRate::ALL.iter().map(|&rate| {
        let selected = rate == props.playback_rate;
        let onclick = props.on_playback_rate_change.reform(move |_: MouseEvent| rate);
        html! {
            <button key={rate.label()} type="button" class={classes!("settings-item", selected.then_some("selected"))} {onclick}>
                <span>{rate.label()}</span>
                if selected {
                    <Icon icon_id={IconId::LucideCheck} width={"16"} height={"16"} />
                }
            </button>
        }
    });

    let quality_items = Quality::ALL.iter().map(|&quality| {
        let selected = quality == props.quality;
        let onclick = props.on_quality_change.reform(move |_: MouseEvent| quality);
        html! {
            <button key={quality.label()} type="button" class={classes!("settings-item", selected.then_some("selected"))} {onclick}>
                <span class="capitalize">{quality.label()}</span>
                if selected {
                    <Icon icon_id={IconId::LucideCheck} width={"16"} height={"16"} />
                }
            </button>
        }
    });

    html! {
        <div class="settings">
            <button class="ctrl-btn" type="button" onclick={on_toggle.clone()} title="Settings">
                <Icon icon_id={IconId::LucideSettings} width={"20"} height={"20"} />
            </button>
            if props.is_open {
                // Transparent full-viewport layer: clicking outside closes the menu.
                <div class="settings-backdrop" onclick={on_toggle}></div>
                <div class="settings-menu">
                    <div class="settings-section">
                        <div class="settings-heading">{"Playback Speed"}</div>
                        { for rate_items }
                    </div>
                    <div class="settings-section">
                        <div class="settings-heading">{"Quality"}</div>
                        { for quality_items }
                    </div>
                </div>
            }
        </div>
    }
}
