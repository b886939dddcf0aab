use desktop_runtime::{DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Web Desktop" />
        <Meta
            name="description"
            content="A browser desktop with draggable windows and synthesized UI sounds."
        />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=DesktopEntry />
                    <Route path="/*any" view=UnknownRoute />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    view! {
        <DesktopProvider>
            <DesktopShell />
        </DesktopProvider>
    }
}

#[component]
fn UnknownRoute() -> impl IntoView {
    view! {
        <section class="unknown-route">
            <h1>"Nothing here"</h1>
            <A href="/">"Back to the desktop"</A>
        </section>
    }
}
