//! Elapsed-time display for the race header.

use yew::prelude::*;

use crate::dom;
use crate::game::{Clock, WebClock, format_duration};

#[derive(Properties, PartialEq, Clone)]
pub struct TimerProps {
    #[prop_or_default]
    pub start_time: Option<u64>,
    #[prop_or_default]
    pub end_time: Option<u64>,
}

/// Ticks once per second while the race is live; freezes at the end time.
#[function_component(Timer)]
pub fn timer(props: &TimerProps) -> Html {
    let now_ms = use_state(|| 0_u64);

    {
        let now_ms = now_ms.clone();
        use_effect_with((props.start_time, props.end_time), move |(start, end)| {
            let mut handle = None;
            if start.is_some() && end.is_none() {
                now_ms.set(WebClock.now_ms());
                handle = dom::set_interval(1_000, move || now_ms.set(WebClock.now_ms()))
                    .map_err(|err| dom::console_error(&dom::js_error_message(&err)))
                    .ok();
            }
            move || drop(handle)
        });
    }

    let elapsed = match (props.start_time, props.end_time) {
        (Some(start), Some(end)) => end.saturating_sub(start),
        (Some(start), None) => now_ms.saturating_sub(start),
        _ => 0,
    };

    html! {
      <div class="race-timer">
        <span class="race-timer-label">{ "Time:" }</span>
        <span class="race-timer-value">{ format_duration(elapsed) }</span>
      </div>
    }
}
