//! Article viewer
//!
//! Renders provider HTML and turns in-content anchors into race moves.
//! Legality is decided exclusively by the core classifier; this component
//! only styles the verdict and forwards the recovered title. Every anchor
//! click is swallowed so the browser never leaves the race.

use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::game::{ContentProvider, PageContent, classify};
use crate::wiki::WikiClient;

#[derive(Properties, PartialEq, Clone)]
pub struct ArticleViewProps {
    /// Canonical title of the article to show.
    pub title: AttrValue,
    /// Receives the classified title of each legal link activation.
    pub on_link_click: Callback<String>,
    /// Ignore clicks while a navigation is resolving.
    #[prop_or_default]
    pub locked: bool,
}

#[function_component(ArticleView)]
pub fn article_view(props: &ArticleViewProps) -> Html {
    let content = use_state(|| None::<PageContent>);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);
    let body_ref = use_node_ref();

    {
        let content = content.clone();
        let error = error.clone();
        let loading = loading.clone();
        use_effect_with(props.title.clone(), move |title| {
            let title = title.to_string();
            loading.set(true);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match WikiClient::new().content(&title).await {
                    Ok(page) => content.set(Some(page)),
                    Err(err) => {
                        log::warn!("article load failed: {err}");
                        error.set(Some("Failed to load article".to_string()));
                        content.set(None);
                    }
                }
                loading.set(false);
            });
        });
    }

    // Post-process the injected markup: mark anchors with their verdict and
    // drop edit/reference chrome, mirroring what the provider's own site
    // renders without.
    {
        let body_ref = body_ref.clone();
        use_effect_with((*content).clone(), move |_| {
            if let Some(root) = body_ref.cast::<web_sys::Element>() {
                decorate_anchors(&root);
                scrub(&root, ".mw-editsection");
                scrub(&root, "sup.reference");
                root.set_scroll_top(0);
            }
        });
    }

    let onclick = {
        let on_link_click = props.on_link_click.clone();
        let locked = props.locked;
        Callback::from(move |event: MouseEvent| {
            let Some(target) = event.target() else {
                return;
            };
            let Ok(element) = target.dyn_into::<web_sys::Element>() else {
                return;
            };
            let Ok(Some(anchor)) = element.closest("a") else {
                return;
            };
            // The race never follows a link natively, legal or not.
            event.prevent_default();
            if locked {
                return;
            }
            let Some(href) = anchor.get_attribute("href") else {
                return;
            };
            if let Some(title) = classify(&href).title {
                on_link_click.emit(title);
            }
        })
    };

    if *loading {
        return html! { <div class="viewer-status">{ "Loading article..." }</div> };
    }
    if let Some(message) = (*error).clone() {
        return html! { <div class="viewer-status viewer-error">{ message }</div> };
    }
    let Some(page) = (*content).clone() else {
        return html! { <div class="viewer-status">{ "No article loaded" }</div> };
    };

    let markup = Html::from_html_unchecked(AttrValue::from(page.html));
    html! {
      <article class="viewer">
        <header class="viewer-head">
          <h1>{ page.title.clone() }</h1>
        </header>
        <div class="viewer-body" ref={body_ref} {onclick}>
          { markup }
        </div>
      </article>
    }
}

fn decorate_anchors(root: &web_sys::Element) {
    let Ok(anchors) = root.query_selector_all("a") else {
        return;
    };
    for index in 0..anchors.length() {
        let Some(node) = anchors.item(index) else {
            continue;
        };
        let Ok(anchor) = node.dyn_into::<web_sys::Element>() else {
            continue;
        };
        let legal = anchor
            .get_attribute("href")
            .is_some_and(|href| classify(&href).legal);
        let class = if legal { "race-link" } else { "blocked-link" };
        let _ = anchor.set_attribute("class", class);
    }
}

fn scrub(root: &web_sys::Element, selector: &str) {
    let Ok(nodes) = root.query_selector_all(selector) else {
        return;
    };
    for index in 0..nodes.length() {
        if let Some(node) = nodes.item(index) {
            if let Ok(element) = node.dyn_into::<web_sys::Element>() {
                element.remove();
            }
        }
    }
}
