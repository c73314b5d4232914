//! Application root: owns the engine and fans state out to the screens.
//!
//! The engine value lives in a single `use_state` handle; handlers clone
//! it, apply a transition and set the result back, so every mutation flows
//! through the core state machine and nothing lives in module globals.

use yew::prelude::*;

use crate::components::{DailyPanel, LeaderboardPanel, LoginModal, PlayerScreen, SetupScreen};
use crate::game::{Article, RaceStatus, create_web_engine};

const BOARD_DISPLAY_LIMIT: usize = 20;

/// Which panel fills the setup screen.
#[derive(Clone, Copy, PartialEq, Eq)]
enum SetupPanel {
    Race,
    Daily,
    Leaderboard,
}

#[function_component(App)]
pub fn app() -> Html {
    let engine = use_state(create_web_engine);
    let panel = use_state(|| SetupPanel::Race);
    let show_login = use_state(|| false);
    let daily_loading = use_state(|| false);
    let nav_busy = use_state(|| false);

    // Have today's challenge ready before the panel is opened.
    {
        let engine = engine.clone();
        let daily_loading = daily_loading.clone();
        use_effect_with((), move |()| {
            daily_loading.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let mut next = (*engine).clone();
                next.refresh_daily().await;
                engine.set(next);
                daily_loading.set(false);
            });
        });
    }

    let on_start = {
        let engine = engine.clone();
        Callback::from(move |(start, end): (Article, Article)| {
            let engine = engine.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let mut next = (*engine).clone();
                if let Err(err) = next.start_race(start, end).await {
                    log::warn!("race not started: {err}");
                }
                engine.set(next);
            });
        })
    };

    let on_link_click = {
        let engine = engine.clone();
        let nav_busy = nav_busy.clone();
        Callback::from(move |title: String| {
            if *nav_busy {
                return;
            }
            nav_busy.set(true);
            let engine = engine.clone();
            let nav_busy = nav_busy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let mut next = (*engine).clone();
                let _ = next.navigate_to(&title).await;
                engine.set(next);
                nav_busy.set(false);
            });
        })
    };

    let on_give_up = {
        let engine = engine.clone();
        Callback::from(move |()| {
            let mut next = (*engine).clone();
            next.give_up();
            engine.set(next);
        })
    };

    let on_play_again = {
        let engine = engine.clone();
        let panel = panel.clone();
        Callback::from(move |()| {
            let mut next = (*engine).clone();
            next.play_again();
            engine.set(next);
            panel.set(SetupPanel::Race);
        })
    };

    let on_clear_board = {
        let engine = engine.clone();
        Callback::from(move |()| {
            let mut next = (*engine).clone();
            next.clear_leaderboard();
            engine.set(next);
        })
    };

    let on_register = {
        let engine = engine.clone();
        Callback::from(move |username: String| {
            let mut next = (*engine).clone();
            next.register(&username);
            engine.set(next);
        })
    };

    let on_logout = {
        let engine = engine.clone();
        Callback::from(move |()| {
            let mut next = (*engine).clone();
            next.logout();
            engine.set(next);
        })
    };

    let on_refresh_daily = {
        let engine = engine.clone();
        let daily_loading = daily_loading.clone();
        Callback::from(move |()| {
            let engine = engine.clone();
            let daily_loading = daily_loading.clone();
            daily_loading.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let mut next = (*engine).clone();
                next.refresh_daily().await;
                engine.set(next);
                daily_loading.set(false);
            });
        })
    };

    let toggle_login = {
        let show_login = show_login.clone();
        Callback::from(move |_| show_login.set(!*show_login))
    };
    let close_login = {
        let show_login = show_login.clone();
        Callback::from(move |()| show_login.set(false))
    };
    let toggle_panel = |target: SetupPanel| {
        let panel = panel.clone();
        Callback::from(move |_: MouseEvent| {
            let next = if *panel == target {
                SetupPanel::Race
            } else {
                target
            };
            panel.set(next);
        })
    };

    let current_user = engine.users().current().cloned();
    let login_label = current_user
        .as_ref()
        .map_or_else(|| "Sign in".to_string(), |user| user.username.clone());

    let setup_view = {
        let challenge = engine.daily().active().cloned();
        let completion = current_user
            .as_ref()
            .and_then(|user| engine.daily().completion_for(&user.id))
            .cloned();
        match *panel {
            SetupPanel::Leaderboard => html! {
              <LeaderboardPanel entries={engine.leaderboard().top(BOARD_DISPLAY_LIMIT).to_vec()}
                                on_clear={on_clear_board.clone()} />
            },
            SetupPanel::Daily => html! {
              <DailyPanel {challenge}
                          loading={*daily_loading}
                          {completion}
                          signed_in={current_user.is_some()}
                          on_play={on_start.clone()}
                          on_refresh={on_refresh_daily.clone()} />
            },
            SetupPanel::Race => html! { <SetupScreen on_start={on_start.clone()} /> },
        }
    };

    html! {
      <div class="app-shell">
        {
          if engine.status() == RaceStatus::Setup {
            html! {
              <div class="setup-shell">
                <nav class="top-bar" aria-label="Game menu">
                  <button class="top-login" onclick={toggle_login.clone()}>{ login_label }</button>
                  <button class="top-daily" onclick={toggle_panel(SetupPanel::Daily)}>
                    { if *panel == SetupPanel::Daily { "Custom Race" } else { "Daily Race" } }
                  </button>
                  <button class="top-board" onclick={toggle_panel(SetupPanel::Leaderboard)}>
                    { if *panel == SetupPanel::Leaderboard { "Hide Leaderboard" } else { "Leaderboard" } }
                  </button>
                </nav>
                { setup_view }
              </div>
            }
          } else {
            html! {
              <PlayerScreen state={engine.state().clone()}
                            nav_busy={*nav_busy}
                            on_link_click={on_link_click.clone()}
                            on_give_up={on_give_up.clone()}
                            on_play_again={on_play_again.clone()} />
            }
          }
        }
        <LoginModal open={*show_login}
                    current={current_user}
                    on_register={on_register.clone()}
                    on_logout={on_logout.clone()}
                    on_close={close_login} />
      </div>
    }
}
