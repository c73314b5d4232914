//! Display-name sign-in dialog.
//!
//! Registration doubles as login; the registry decides which. No password,
//! the name is a local label only.

use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::game::User;

#[derive(Properties, PartialEq, Clone)]
pub struct LoginModalProps {
    pub open: bool,
    #[prop_or_default]
    pub current: Option<User>,
    pub on_register: Callback<String>,
    pub on_logout: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(LoginModal)]
pub fn login_modal(props: &LoginModalProps) -> Html {
    let name = use_state(String::new);

    if !props.open {
        return Html::default();
    }

    let oninput = {
        let name = name.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                name.set(input.value());
            }
        })
    };

    let submit = {
        let name = name.clone();
        let on_register = props.on_register.clone();
        Callback::from(move |_| {
            on_register.emit((*name).clone());
            name.set(String::new());
        })
    };

    let onkeydown = {
        let name = name.clone();
        let on_register = props.on_register.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() == "Enter" {
                event.prevent_default();
                on_register.emit((*name).clone());
                name.set(String::new());
            }
        })
    };

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };
    let logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_| on_logout.emit(()))
    };

    html! {
      <div class="modal-backdrop">
        <div class="modal login-modal" role="dialog" aria-modal="true" aria-labelledby="login-title">
          <div class="modal-head">
            <h2 id="login-title">{ "Player" }</h2>
            <button class="modal-close" aria-label="Close" onclick={close}>{ "\u{00D7}" }</button>
          </div>
          {
            if let Some(user) = &props.current {
              html! {
                <div class="login-signed-in">
                  <p>{ format!("Signed in as {}", user.username) }</p>
                  <button class="login-logout" onclick={logout}>{ "Log out" }</button>
                </div>
              }
            } else {
              html! {
                <div class="login-form">
                  <label for="login-name">{ "Display name" }</label>
                  <input id="login-name"
                         type="text"
                         value={(*name).clone()}
                         placeholder="Enter a name to track daily bests"
                         {oninput}
                         {onkeydown} />
                  <button class="login-submit"
                          disabled={name.trim().is_empty()}
                          onclick={submit}>
                    { "Sign in" }
                  </button>
                </div>
              }
            }
          }
        </div>
      </div>
    }
}
