use crate::config::PageConfig;
use crate::player::VideoPlayer;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AppProps {
    #[prop_or_default]
    pub config: PageConfig,
}

const SHORTCUTS: [(&str, &str); 5] = [
    ("Space", "Play/Pause"),
    ("←/→", "Skip 10s"),
    ("↑/↓", "Volume"),
    ("F", "Fullscreen"),
    ("M", "Mute"),
];

const PERFORMANCE: [&str; 5] = [
    "Progressive loading",
    "Native buffering",
    "Smooth seeking",
    "Memory efficient",
    "Fast startup",
];

const FEATURES: [&str; 5] = [
    "Custom playback speeds",
    "Volume control with slider",
    "Progress bar with preview",
    "Fullscreen support",
    "Auto-hiding controls",
];

fn feature_card(title: &str, items: &[&str]) -> Html {
    html! {
        <div class="card">
            <h3>{title}</h3>
            <ul>
                { for items.iter().map(|item| html! { <li>{*item}</li> }) }
            </ul>
        </div>
    }
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let config = &props.config;

    html! {
        <main class="container">
            <header class="page-header">
                <h1>{config.title.clone()}</h1>
                <p>{config.subtitle.clone()}</p>
            </header>

            <section class="player-section">
                <VideoPlayer
                    src={AttrValue::from(config.src.clone())}
                    poster={config.poster.clone().map(AttrValue::from)}
                />
            </section>

            <section class="card-grid">
                <div class="card">
                    <h3>{"Keyboard Controls"}</h3>
                    <ul>
                        { for SHORTCUTS.iter().map(|(key, action)| html! {
                            <li><kbd>{*key}</kbd>{format!(" - {action}")}</li>
                        }) }
                    </ul>
                </div>
                { feature_card("Performance", &PERFORMANCE) }
                { feature_card("Features", &FEATURES) }
            </section>
        </main>
    }
}
