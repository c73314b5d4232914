//! Ranked best-times panel.

use yew::prelude::*;

use crate::game::{LeaderboardEntry, format_duration};

#[derive(Properties, PartialEq, Clone)]
pub struct LeaderboardPanelProps {
    /// Already ranked fastest-first by the store.
    pub entries: Vec<LeaderboardEntry>,
    pub on_clear: Callback<()>,
    #[prop_or(AttrValue::Static("Best Times"))]
    pub title: AttrValue,
}

#[function_component(LeaderboardPanel)]
pub fn leaderboard_panel(props: &LeaderboardPanelProps) -> Html {
    let on_clear = {
        let on_clear = props.on_clear.clone();
        Callback::from(move |_| on_clear.emit(()))
    };

    html! {
      <section class="board-panel" aria-labelledby="board-title">
        <div class="board-head">
          <h2 id="board-title">{ props.title.clone() }</h2>
          if !props.entries.is_empty() {
            <button class="board-clear" onclick={on_clear}>{ "Clear" }</button>
          }
        </div>
        if props.entries.is_empty() {
          <p class="board-empty">{ "No completed races yet. Finish one to claim the board." }</p>
        } else {
          <ol class="board-rows">
            { for props.entries.iter().map(|entry| html! {
                <li class="board-row" key={entry.id.clone()}>
                  <span class="board-pair">
                    { entry.start_article.clone() }
                    <span class="board-arrow" aria-hidden="true">{ "\u{2192}" }</span>
                    { entry.end_article.clone() }
                  </span>
                  <span class="board-time">{ format_duration(entry.stats.duration_ms) }</span>
                  <span class="board-clicks">{ format!("{} clicks", entry.stats.click_count) }</span>
                </li>
            }) }
          </ol>
        }
      </section>
    }
}
