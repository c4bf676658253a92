use leptos::prelude::*;

use crate::content;

#[component]
pub fn Footer() -> impl IntoView {
    let site = content::site();
    let link_class = "text-lg font-bold text-brand-beige/80 hover:text-brand-beige transition-colors duration-300";

    view! {
        <footer class="relative z-10 w-full bg-black text-brand-beige px-4 sm:px-6 md:px-8 lg:px-10 py-8">
            <div class="max-w-screen-xl mx-auto">
                <div class="flex flex-col md:flex-row justify-between items-center space-y-4 md:space-y-0">
                    <div class="space-y-2">
                        <h2 class="text-2xl font-semibold">"Get In Touch"</h2>
                        <div class="flex flex-col space-y-2">
                            <a href=site.mailto() class=link_class>
                                {site.email.clone()}
                            </a>
                            <a href=site.tel() class=link_class>
                                {site.phone.clone()}
                            </a>
                        </div>
                    </div>
                    <div class="flex flex-col items-center space-y-2">
                        {site
                            .socials
                            .iter()
                            .map(|social| {
                                view! {
                                    <a
                                        href=social.href.clone()
                                        target="_blank"
                                        rel="noopener noreferrer"
                                        class=link_class
                                    >
                                        {format!("{} ↗", social.label)}
                                    </a>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
                <div class="flex flex-col md:flex-row justify-between items-center mt-8 pt-8 border-t border-brand-beige/10">
                    <p class="text-sm text-brand-beige/60">
                        {format!("© {} {}", content::build_year(), site.full_name)}
                    </p>
                    <p class="text-sm text-brand-beige/60">{site.location.clone()}</p>
                </div>
            </div>
        </footer>
    }
}
