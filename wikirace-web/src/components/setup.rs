//! Race setup screen: pick a start and a goal, then go.

use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::game::{Article, ContentProvider, SearchHit};
use crate::wiki::{WikiClient, article_url};

const SEARCH_LIMIT: u32 = 10;

/// Which slot the search box is currently filling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Start,
    End,
}

impl Slot {
    const fn label(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct SetupScreenProps {
    pub on_start: Callback<(Article, Article)>,
}

#[function_component(SetupScreen)]
pub fn setup_screen(props: &SetupScreenProps) -> Html {
    let start_article = use_state(|| None::<Article>);
    let end_article = use_state(|| None::<Article>);
    let query = use_state(String::new);
    let results = use_state(Vec::<SearchHit>::new);
    let slot = use_state(|| Slot::Start);
    let loading = use_state(|| false);

    let run_search = {
        let query = query.clone();
        let results = results.clone();
        let loading = loading.clone();
        Callback::from(move |()| {
            let text = query.trim().to_string();
            if text.is_empty() {
                return;
            }
            let results = results.clone();
            let loading = loading.clone();
            loading.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match WikiClient::new().search(&text, SEARCH_LIMIT).await {
                    Ok(hits) => results.set(hits),
                    Err(err) => {
                        log::warn!("search failed: {err}");
                        results.set(Vec::new());
                    }
                }
                loading.set(false);
            });
        })
    };

    let pick_random = |target: UseStateHandle<Option<Article>>| {
        let loading = loading.clone();
        Callback::from(move |_: MouseEvent| {
            let target = target.clone();
            let loading = loading.clone();
            loading.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let client = WikiClient::new();
                match client.random_article().await {
                    Ok(article) => {
                        // Enrich when possible; the bare pick is fine too.
                        let enriched = client.summary(&article.title).await.unwrap_or(article);
                        target.set(Some(enriched));
                    }
                    Err(err) => log::warn!("random pick failed: {err}"),
                }
                loading.set(false);
            });
        })
    };

    let select_hit = {
        let start_article = start_article.clone();
        let end_article = end_article.clone();
        let slot = slot.clone();
        let results = results.clone();
        let query = query.clone();
        Callback::from(move |hit: SearchHit| {
            let mut article = hit.into_article();
            article.url = Some(article_url(&article.title));
            match *slot {
                Slot::Start => start_article.set(Some(article)),
                Slot::End => end_article.set(Some(article)),
            }
            results.set(Vec::new());
            query.set(String::new());
        })
    };

    let oninput = {
        let query = query.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                query.set(input.value());
            }
        })
    };

    let onkeydown = {
        let run_search = run_search.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() == "Enter" {
                event.prevent_default();
                run_search.emit(());
            }
        })
    };

    let can_start = match (&*start_article, &*end_article) {
        (Some(start), Some(end)) => start.pageid != end.pageid,
        _ => false,
    };
    let start_race = {
        let start_article = start_article.clone();
        let end_article = end_article.clone();
        let on_start = props.on_start.clone();
        Callback::from(move |_| {
            if let (Some(start), Some(end)) = ((*start_article).clone(), (*end_article).clone()) {
                if start.pageid != end.pageid {
                    on_start.emit((start, end));
                }
            }
        })
    };

    let render_slot = |which: Slot, state: &UseStateHandle<Option<Article>>| -> Html {
        let heading = match which {
            Slot::Start => "Start Article",
            Slot::End => "Goal Article",
        };
        match &**state {
            Some(article) => {
                let clear = {
                    let state = state.clone();
                    Callback::from(move |_| state.set(None))
                };
                html! {
                  <div class={classes!("setup-slot", "filled", which.label())}>
                    <h2>{ heading }</h2>
                    <h3>{ article.title.clone() }</h3>
                    if let Some(extract) = &article.extract {
                      <p class="setup-extract">{ extract.clone() }</p>
                    }
                    <button class="setup-change" onclick={clear}>{ "Change article" }</button>
                  </div>
                }
            }
            None => {
                let focus_slot = {
                    let slot = slot.clone();
                    Callback::from(move |_: FocusEvent| slot.set(which))
                };
                html! {
                  <div class={classes!("setup-slot", which.label())}>
                    <h2>{ heading }</h2>
                    <button class="setup-random"
                            disabled={*loading}
                            onclick={pick_random(state.clone())}>
                      { if *loading { "Loading..." } else { "Random Article" } }
                    </button>
                    <div class="setup-or">{ "or" }</div>
                    <input type="text"
                           value={(*query).clone()}
                           placeholder={format!("Search for {} article...", which.label())}
                           onfocus={focus_slot}
                           oninput={oninput.clone()}
                           onkeydown={onkeydown.clone()} />
                  </div>
                }
            }
        }
    };

    let search_click = {
        let run_search = run_search.clone();
        Callback::from(move |_: MouseEvent| run_search.emit(()))
    };

    html! {
      <section class="setup-screen" aria-labelledby="setup-title">
        <h1 id="setup-title">{ "Wikirace" }</h1>
        <p class="setup-tagline">
          { "Race from one article to another using only the links inside the pages." }
        </p>
        <div class="setup-slots">
          { render_slot(Slot::Start, &start_article) }
          { render_slot(Slot::End, &end_article) }
        </div>
        <div class="setup-search-bar">
          <button onclick={search_click} disabled={*loading || query.trim().is_empty()}>
            { "Search" }
          </button>
        </div>
        if !results.is_empty() {
          <div class="setup-results">
            <h3>{ format!("Select {} article:", slot.label()) }</h3>
            <ul>
              { for results.iter().map(|hit| {
                  let select_hit = select_hit.clone();
                  let chosen = hit.clone();
                  let choose = Callback::from(move |_: MouseEvent| select_hit.emit(chosen.clone()));
                  html! {
                    <li key={hit.pageid.to_string()}>
                      <button class="setup-result" onclick={choose}>
                        <span class="setup-result-title">{ hit.title.clone() }</span>
                        <span class="setup-result-extract">{ hit.extract.clone() }</span>
                      </button>
                    </li>
                  }
              }) }
            </ul>
          </div>
        }
        <div class="setup-go">
          <button class="setup-start" disabled={!can_start} onclick={start_race}>
            { "Start Race!" }
          </button>
          if can_start {
            if let (Some(start), Some(end)) = (&*start_article, &*end_article) {
              <p class="setup-hint">
                { format!("Navigate from \u{201C}{}\u{201D} to \u{201C}{}\u{201D} using only in-article links.",
                          start.title, end.title) }
              </p>
            }
          }
        </div>
      </section>
    }
}
