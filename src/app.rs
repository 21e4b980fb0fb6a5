use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiConfig};
use crate::session::{FetchRequest, SessionState, CATEGORIES};

#[component]
pub fn App() -> impl IntoView {
    let state = RwSignal::new(SessionState::new());
    let config = StoredValue::new(ApiConfig::from_env());

    // Issue the request a trigger produced and feed the outcome back into
    // the session, tagged with the request's sequence number.
    let dispatch = move |request: Option<FetchRequest>| {
        let Some(request) = request else { return };
        match config.get_value() {
            Ok(cfg) => {
                spawn_local(async move {
                    match api::search_photos(&cfg, &request.query, request.page).await {
                        Ok(response) => {
                            state.update(|s| s.apply_success(request.seq, response));
                        }
                        Err(err) => {
                            logging::error!("image search failed: {err}");
                            state.update(|s| s.apply_failure(request.seq, err.to_string()));
                        }
                    }
                });
            }
            Err(err) => {
                logging::error!("{err}");
                state.update(|s| s.apply_failure(request.seq, err.to_string()));
            }
        }
    };

    // Initial fetch on load; the blank-query guard makes this a no-op until
    // the user submits something.
    Effect::new(move |_| {
        dispatch(state.try_update(|s| s.submit_input()).flatten());
    });

    view! {
        <div class="app">
            <header>
                <h1>"Image Search"</h1>
            </header>

            <div class="search-section">
                <form on:submit=move |ev: web_sys::SubmitEvent| {
                    ev.prevent_default();
                    dispatch(state.try_update(|s| s.submit_input()).flatten());
                }>
                    <input
                        type="text"
                        class="search-input"
                        placeholder="Search for images"
                        prop:value=move || state.with(|s| s.input.clone())
                        on:input=move |ev| {
                            state.update(|s| s.set_input(event_target_value(&ev)));
                        }
                    />
                </form>
                {move || {
                    state.with(|s| {
                        (!s.query.is_empty())
                            .then(|| format!("You searched for: {}", s.query))
                    })
                }}
            </div>

            <div class="filters">
                {CATEGORIES.iter().map(|label| {
                    view! {
                        <button
                            class="category"
                            on:click=move |_| {
                                dispatch(state.try_update(|s| s.select_category(label)).flatten());
                            }
                        >
                            {*label}
                        </button>
                    }
                }).collect::<Vec<_>>()}
            </div>

            {move || state.with(|s| s.error().map(str::to_owned)).map(|message| view! {
                <div class="error">
                    <strong>"Something went wrong: "</strong>
                    {message}
                    <button
                        class="dismiss"
                        on:click=move |_| state.update(|s| s.dismiss_error())
                    >
                        "Dismiss"
                    </button>
                </div>
            })}

            {move || state.with(|s| s.is_loading()).then(|| view! {
                <div class="loading">"Loading images..."</div>
            })}

            <div class="images">
                {move || state.with(|s| s.images.clone()).into_iter().map(|image| {
                    view! {
                        <img
                            class="image"
                            src=image.urls.small
                            alt=image.alt_description.unwrap_or_default()
                        />
                    }
                }).collect::<Vec<_>>()}
            </div>

            {move || (state.with(|s| s.total_pages > 0)).then(|| view! {
                <div class="buttons">
                    <button
                        disabled=move || !state.with(|s| s.has_previous())
                        on:click=move |_| {
                            dispatch(state.try_update(|s| s.previous_page()).flatten());
                        }
                    >
                        "Previous"
                    </button>
                    <span class="page-label">
                        {move || state.with(|s| format!("Page {} of {}", s.page, s.total_pages))}
                    </span>
                    <button
                        disabled=move || !state.with(|s| s.has_next())
                        on:click=move |_| {
                            dispatch(state.try_update(|s| s.next_page()).flatten());
                        }
                    >
                        "Next"
                    </button>
                    <label class="page-jump">
                        "Go to page"
                        <input
                            type="number"
                            min="1"
                            max=move || state.with(|s| s.total_pages.to_string())
                            prop:value=move || state.with(|s| s.page.to_string())
                            on:change=move |ev| {
                                if let Ok(n) = event_target_value(&ev).parse::<u32>() {
                                    dispatch(state.try_update(|s| s.go_to_page(n)).flatten());
                                }
                            }
                        />
                    </label>
                </div>
            })}

            <footer>
                <p>"Powered by the Unsplash API | Built with Rust + Leptos"</p>
            </footer>
        </div>
    }
}
