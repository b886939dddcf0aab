use super::*;

#[component]
pub(super) fn LoginScreen() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let user_name = create_rw_signal(String::new());

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        runtime.dispatch_action(DesktopAction::Login {
            user_name: user_name.get_untracked(),
        });
    };

    view! {
        <main class="login-screen">
            <form class="login-card" on:submit=submit>
                <h1 class="login-title">"Welcome"</h1>
                <label class="login-field">
                    <span>"User name"</span>
                    <input
                        type="text"
                        autocomplete="username"
                        placeholder="user"
                        prop:value=move || user_name.get()
                        on:input=move |ev| user_name.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" class="login-submit">
                    "Sign in"
                </button>
            </form>
        </main>
    }
}
