//! In-race screen plus the completed and failed end cards.

use yew::prelude::*;

use crate::components::{ArticleView, Stats, Timer};
use crate::game::{RaceState, RaceStatus, format_duration};

#[derive(Properties, PartialEq, Clone)]
pub struct PlayerScreenProps {
    pub state: RaceState,
    /// True while a navigation is resolving; the viewer ignores clicks.
    #[prop_or_default]
    pub nav_busy: bool,
    /// Receives the classified title of each legal link activation.
    pub on_link_click: Callback<String>,
    pub on_give_up: Callback<()>,
    pub on_play_again: Callback<()>,
}

#[function_component(PlayerScreen)]
pub fn player_screen(props: &PlayerScreenProps) -> Html {
    let state = &props.state;
    let start_title = state
        .start_article
        .as_ref()
        .map(|article| article.title.clone())
        .unwrap_or_default();
    let end_title = state
        .end_article
        .as_ref()
        .map(|article| article.title.clone())
        .unwrap_or_default();

    let play_again = {
        let on_play_again = props.on_play_again.clone();
        Callback::from(move |_| on_play_again.emit(()))
    };

    match state.status {
        RaceStatus::Completed => {
            let duration = state.elapsed_ms(state.end_time.unwrap_or_default());
            html! {
              <section class="end-card completed" aria-labelledby="end-title">
                <h1 id="end-title">{ "You made it!" }</h1>
                <p class="end-summary">
                  { format!("\u{201C}{start_title}\u{201D} to \u{201C}{end_title}\u{201D}") }
                </p>
                <div class="end-figures">
                  <div class="end-figure">
                    <span class="end-value">{ format_duration(duration) }</span>
                    <span class="end-label">{ "Time" }</span>
                  </div>
                  <div class="end-figure">
                    <span class="end-value">{ state.click_count }</span>
                    <span class="end-label">{ "Clicks" }</span>
                  </div>
                  <div class="end-figure">
                    <span class="end-value">{ state.path.len() }</span>
                    <span class="end-label">{ "Articles Visited" }</span>
                  </div>
                </div>
                <div class="end-path">
                  <h3>{ "Your path" }</h3>
                  <ol class="end-path-list">
                    { for state.path.iter().map(|article| html! {
                        <li key={article.pageid.to_string()} class="end-path-step">
                          { article.title.clone() }
                        </li>
                    }) }
                  </ol>
                </div>
                <button class="end-again" onclick={play_again}>{ "Play Again" }</button>
              </section>
            }
        }
        RaceStatus::Failed => html! {
          <section class="end-card failed" aria-labelledby="end-title">
            <h1 id="end-title">{ "Race abandoned" }</h1>
            <p class="end-summary">
              { format!("The run from \u{201C}{start_title}\u{201D} to \u{201C}{end_title}\u{201D} goes unrecorded.") }
            </p>
            <button class="end-again" onclick={play_again}>{ "Try Again" }</button>
          </section>
        },
        RaceStatus::Setup | RaceStatus::Playing => {
            let give_up = {
                let on_give_up = props.on_give_up.clone();
                Callback::from(move |_| on_give_up.emit(()))
            };
            let current_title = state
                .current_article
                .as_ref()
                .map(|article| article.title.clone())
                .unwrap_or_default();
            html! {
              <div class="race-screen">
                <header class="race-head">
                  <div class="race-route">
                    <span class="race-from">
                      <span class="race-route-label">{ "From:" }</span>
                      { start_title }
                    </span>
                    <span class="race-to">
                      <span class="race-route-label">{ "To:" }</span>
                      { end_title }
                    </span>
                  </div>
                  <div class="race-meters">
                    <Timer start_time={state.start_time} end_time={state.end_time} />
                    <Stats click_count={state.click_count} path_length={state.path.len()} />
                    <button class="race-give-up" onclick={give_up}>{ "Give Up" }</button>
                  </div>
                </header>
                <ArticleView title={current_title}
                             on_link_click={props.on_link_click.clone()}
                             locked={props.nav_busy} />
              </div>
            }
        }
    }
}
