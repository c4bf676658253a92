use leptos::{html, prelude::*};

use crate::interaction::SectionId;

#[component]
pub fn Navbar() -> impl IntoView {
    let nav_ref = NodeRef::<html::Div>::new();
    let pill_ref = NodeRef::<html::Div>::new();
    let link_refs: [NodeRef<html::A>; 4] = std::array::from_fn(|_| NodeRef::new());
    let active = RwSignal::new(Some(SectionId::Home));

    #[cfg(feature = "hydrate")]
    {
        use leptos::ev;
        use leptos_use::{use_event_listener, use_window};

        use crate::app::scene::{client_rect, document_rect, target, window_metrics};
        use crate::content;
        use crate::interaction::nav::{active_section, pill_geometry, pill_tween, PILL_PADDING};
        use crate::motion::{Animation, TargetRef};

        let threshold = content::site().nav_threshold;
        let update_active = move || {
            let Some((scroll, height)) = window_metrics() else {
                return;
            };
            let sections: Vec<_> = SectionId::ALL
                .iter()
                .filter_map(|id| {
                    let el = document().get_element_by_id(id.anchor())?;
                    let el = wasm_bindgen::JsCast::dyn_into::<web_sys::HtmlElement>(el).ok()?;
                    Some((*id, document_rect(&el)?))
                })
                .collect();
            let next = active_section(scroll, height, &sections, threshold);
            if active.get_untracked() != next {
                active.set(next);
            }
        };
        let _ = use_event_listener(use_window(), ev::scroll, move |_| update_active());
        let _ = use_event_listener(use_window(), ev::resize, move |_| update_active());
        request_animation_frame(update_active);

        let pill = StoredValue::new_local(None::<TargetRef>);
        let running = StoredValue::new_local(None::<Animation>);
        Effect::new(move |_| {
            let current = active.get();
            let (Some(nav), Some(pill_el)) = (nav_ref.get(), pill_ref.get()) else {
                return;
            };
            let link = current
                .and_then(|id| SectionId::ALL.iter().position(|s| *s == id))
                .and_then(|i| link_refs[i].get_untracked());
            let Some(link) = link else {
                return;
            };
            if pill.with_value(Option::is_none) {
                pill.set_value(Some(target(pill_el)));
            }
            let geometry = pill_geometry(client_rect(&link), client_rect(&nav), PILL_PADDING);
            let Some(anim) = pill.with_value(|p| p.as_ref().map(|p| pill_tween(p, geometry))) else {
                return;
            };
            running.update_value(|r| {
                if let Some(previous) = r.replace(anim.clone()) {
                    previous.pause();
                }
            });
            anim.play();
        });
    }

    #[cfg(feature = "hydrate")]
    let go_to = {
        let scene = crate::app::scene::use_scene();
        move |id: SectionId| {
            // the hero is sticky; its box follows the viewport
            if id == SectionId::Home {
                scene.scroll_to(0.0);
                return true;
            }
            let el = document()
                .get_element_by_id(id.anchor())
                .and_then(|el| wasm_bindgen::JsCast::dyn_into::<web_sys::HtmlElement>(el).ok());
            let Some(el) = el else {
                return false;
            };
            scene.scroll_to_element(&el);
            true
        }
    };
    #[cfg(not(feature = "hydrate"))]
    let go_to = |_: SectionId| false;

    view! {
        <nav class="fixed top-5 left-1/2 -translate-x-1/2 z-50">
            <div
                node_ref=nav_ref
                class="relative bg-white/5 backdrop-blur-2xl border border-white/10 rounded-full flex space-x-4 shadow-lg items-center px-4 py-1 text-xs sm:px-8 sm:py-2 sm:text-sm lg:text-base"
            >
                <div
                    node_ref=pill_ref
                    class="absolute left-0 inset-y-0 my-auto h-6 sm:h-8 bg-white/10 rounded-full pointer-events-none z-0"
                    style="width: 0px"
                />
                {SectionId::ALL
                    .into_iter()
                    .zip(link_refs)
                    .map(|(id, link_ref)| {
                        view! {
                            <a
                                node_ref=link_ref
                                href=id.href()
                                class="relative px-4 py-2 font-medium transition-colors duration-200 z-10"
                                class=("text-white", move || active.get() == Some(id))
                                class=("text-white/70", move || active.get() != Some(id))
                                on:click=move |e| {
                                    if go_to(id) {
                                        e.prevent_default();
                                    }
                                }
                            >
                                {id.label()}
                            </a>
                        }
                    })
                    .collect_view()}
            </div>
        </nav>
    }
}
