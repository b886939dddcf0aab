use super::*;

#[component]
pub(super) fn SearchOverlay() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let query = create_rw_signal(String::new());

    // Each opening starts from a blank query.
    create_effect(move |_| {
        if !state.with(|s| s.search_open) {
            query.set(String::new());
        }
    });

    let results = move || {
        query.with(|query| {
            runtime.catalog.with_value(|catalog| {
                catalog
                    .search(query)
                    .into_iter()
                    .map(|app| app.app_summary())
                    .collect::<Vec<_>>()
            })
        })
    };

    view! {
        <Show when=move || state.with(|s| s.search_open) fallback=|| ()>
            <section
                class="search-overlay"
                aria-label="Search apps"
                on:mousedown=move |ev: web_sys::MouseEvent| ev.stop_propagation()
            >
                <input
                    class="search-input"
                    type="search"
                    placeholder="Search apps"
                    autofocus=true
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Escape" {
                            runtime.dispatch_action(DesktopAction::CloseSearch);
                        }
                    }
                />
                <ul class="search-results" role="listbox">
                    {move || {
                        let results = results();
                        if results.is_empty() {
                            return view! { <li class="search-empty">"No apps found"</li> }
                                .into_view();
                        }
                        results
                            .into_iter()
                            .map(|app| {
                                let name = app.name.clone();
                                let icon = app.icon.render();
                                view! {
                                    <li role="none">
                                        <button
                                            class="search-result"
                                            role="option"
                                            on:mouseenter=move |_| runtime.play_sound(SoundKind::Hover)
                                            on:click=move |_| {
                                                runtime.play_sound(SoundKind::Click);
                                                runtime
                                                    .dispatch_action(DesktopAction::OpenApp {
                                                        app: app.clone(),
                                                        viewport: runtime.desktop_viewport(),
                                                    });
                                            }
                                        >
                                            {icon}
                                            <span class="search-result-name">{name}</span>
                                        </button>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </section>
        </Show>
    }
}
