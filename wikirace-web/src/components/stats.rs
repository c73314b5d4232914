//! Click and path counters for the race header.

use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatsProps {
    pub click_count: u32,
    pub path_length: usize,
}

#[function_component(Stats)]
pub fn stats(props: &StatsProps) -> Html {
    html! {
      <div class="race-stats">
        <span class="race-stat">
          <span class="race-stat-label">{ "Clicks:" }</span>
          <span class="race-stat-value">{ props.click_count }</span>
        </span>
        <span class="race-stat">
          <span class="race-stat-label">{ "Articles:" }</span>
          <span class="race-stat-value">{ props.path_length }</span>
        </span>
      </div>
    }
}
