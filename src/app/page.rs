use leptos::prelude::*;
use leptos_meta::Title;

use super::contact::CallToAction;
use super::footer::Footer;
use super::hero::Hero;
use super::navbar::Navbar;
use super::services::Services;
use super::works::SelectedWorks;

/// The one-page site. Owns the motion scene every section binds to.
#[component]
pub fn HomePage() -> impl IntoView {
    #[cfg(feature = "hydrate")]
    crate::app::scene::MotionScene::provide(crate::content::site());

    view! {
        <Title text="Portfolio" />
        <Navbar />
        <main class="relative">
            <div class="sticky top-0 h-screen">
                <Hero />
            </div>
            <Services />
            <SelectedWorks />
            <CallToAction />
        </main>
        <Footer />
    }
}
