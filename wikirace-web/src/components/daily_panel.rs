//! Daily challenge panel: today's shared pair and the player's best.

use yew::prelude::*;

use crate::game::{Article, DailyChallenge, UserCompletion, format_duration};

#[derive(Properties, PartialEq, Clone)]
pub struct DailyPanelProps {
    #[prop_or_default]
    pub challenge: Option<DailyChallenge>,
    pub loading: bool,
    /// The signed-in player's standing, when there is one.
    #[prop_or_default]
    pub completion: Option<UserCompletion>,
    pub signed_in: bool,
    pub on_play: Callback<(Article, Article)>,
    pub on_refresh: Callback<()>,
}

#[function_component(DailyPanel)]
pub fn daily_panel(props: &DailyPanelProps) -> Html {
    if props.loading {
        return html! {
          <section class="daily-panel">
            <p class="daily-status">{ "Generating today's challenge..." }</p>
          </section>
        };
    }

    let Some(challenge) = props.challenge.clone() else {
        // A day without a challenge is a valid state, not an error page.
        let retry = {
            let on_refresh = props.on_refresh.clone();
            Callback::from(move |_| on_refresh.emit(()))
        };
        return html! {
          <section class="daily-panel">
            <p class="daily-status">{ "Unable to load the daily challenge." }</p>
            <button class="daily-retry" onclick={retry}>{ "Try Again" }</button>
          </section>
        };
    };

    let play = {
        let on_play = props.on_play.clone();
        let start = challenge.start_article.clone();
        let end = challenge.end_article.clone();
        Callback::from(move |_| on_play.emit((start.clone(), end.clone())))
    };

    let best = props.completion.as_ref().and_then(|completion| {
        completion
            .best_time
            .map(|time| (time, completion.best_clicks.unwrap_or_default()))
    });

    html! {
      <section class="daily-panel" aria-labelledby="daily-title">
        <header class="daily-head">
          <h1 id="daily-title">{ "Daily Challenge" }</h1>
          <p class="daily-date">{ challenge.date.clone() }</p>
        </header>
        <div class="daily-pair">
          <div class="daily-slot start">
            <h2>{ "Start" }</h2>
            <h3>{ challenge.start_article.title.clone() }</h3>
            if let Some(extract) = &challenge.start_article.extract {
              <p class="daily-extract">{ extract.clone() }</p>
            }
          </div>
          <div class="daily-slot end">
            <h2>{ "Goal" }</h2>
            <h3>{ challenge.end_article.title.clone() }</h3>
            if let Some(extract) = &challenge.end_article.extract {
              <p class="daily-extract">{ extract.clone() }</p>
            }
          </div>
        </div>
        {
          match best {
            Some((time, clicks)) => html! {
              <p class="daily-best">
                { format!("Your best today: {} in {} clicks", format_duration(time), clicks) }
              </p>
            },
            None if props.signed_in => html! {
              <p class="daily-best muted">{ "Not completed yet today." }</p>
            },
            None => html! {
              <p class="daily-best muted">{ "Sign in to record your daily best." }</p>
            },
          }
        }
        <button class="daily-play" onclick={play}>{ "Race This Pair" }</button>
      </section>
    }
}
