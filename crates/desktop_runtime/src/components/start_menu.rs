use super::*;

#[component]
pub(super) fn StartMenu() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let apps = runtime.catalog.with_value(|catalog| {
        catalog
            .apps()
            .iter()
            .map(|app| (app.app_summary(), app.summary.clone()))
            .collect::<Vec<_>>()
    });

    view! {
        <Show when=move || state.with(|s| s.start_menu_open) fallback=|| ()>
            <nav
                class="start-menu"
                aria-label="Start menu"
                on:mousedown=move |ev: web_sys::MouseEvent| ev.stop_propagation()
            >
                <header class="start-menu-header">
                    <span class="start-menu-user">
                        {move || state.with(|s| s.session.user_name.clone())}
                    </span>
                    <button
                        class="start-menu-logout"
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(DesktopAction::Logout);
                        }
                    >
                        "Log out"
                    </button>
                </header>
                <ul class="start-menu-apps" role="menu">
                    {apps
                        .clone()
                        .into_iter()
                        .map(|(app, summary)| {
                            let name = app.name.clone();
                            let icon = app.icon.render();
                            view! {
                                <li role="none">
                                    <button
                                        class="start-menu-item"
                                        role="menuitem"
                                        on:mouseenter=move |_| runtime.play_sound(SoundKind::Hover)
                                        on:click=move |_| {
                                            runtime
                                                .dispatch_action(DesktopAction::OpenApp {
                                                    app: app.clone(),
                                                    viewport: runtime.desktop_viewport(),
                                                });
                                        }
                                    >
                                        {icon}
                                        <span class="start-menu-item-text">
                                            <span class="start-menu-item-name">{name}</span>
                                            <span class="start-menu-item-summary">{summary}</span>
                                        </span>
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </nav>
        </Show>
    }
}
