mod contact;
mod footer;
mod hero;
mod navbar;
mod page;
#[cfg(feature = "hydrate")]
pub mod scene;
mod services;
mod works;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{components::*, path};

use crate::content;
use page::HomePage;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <meta name="color-scheme" content="dark" />
                <link rel="stylesheet" id="leptos" href="/pkg/talyawy-site.css" />
                <MetaTags />
            </head>
            <body class="antialiased min-h-screen flex flex-col bg-black">
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();
    let site = content::site();
    let title = site.title.clone();

    view! {
        <Title formatter=move |page: String| format!("{title} | {page}") />
        <Meta name="description" content=site.description.clone() />

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=path!("/") view=HomePage />
            </Routes>
        </Router>
    }
}
