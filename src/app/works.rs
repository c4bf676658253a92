use leptos::{html, prelude::*};

use crate::content::{self, Project};
use crate::interaction::split_words;

const HEADING: &str = "SELECTED WORKS";

#[component]
pub fn SelectedWorks() -> impl IntoView {
    let projects = content::projects();
    let section_ref = NodeRef::<html::Section>::new();
    let digit_ref = NodeRef::<html::Span>::new();
    let words: Vec<(&'static str, NodeRef<html::Span>)> = split_words(HEADING)
        .into_iter()
        .map(|w| (w, NodeRef::new()))
        .collect();
    let card_refs: Vec<NodeRef<html::Div>> = projects.iter().map(|_| NodeRef::new()).collect();
    let digit = RwSignal::new('1');
    let hovered = RwSignal::new(None::<usize>);

    #[cfg(feature = "hydrate")]
    {
        let words = words.clone();
        let card_refs = card_refs.clone();
        Effect::new(move |_| {
            use std::cell::RefCell;
            use std::rc::Rc;

            use crate::app::scene::{measure, use_scene, SectionScope};
            use crate::interaction::counter::{roll_timeline, RollQueue};
            use crate::interaction::{DigitCounter, RollDirection};
            use crate::motion::{build_reveal, Band, Edge, RevealOptions, TargetRef, TriggerSpec, Vars};

            let scene = use_scene();
            let tier = scene.tier();
            let (Some(section), Some(digit_el)) = (section_ref.get(), digit_ref.get()) else {
                log::debug!("works not mounted, skipping");
                return;
            };
            let config = content::animation_config();
            let scope = SectionScope::new();

            let spans = words.iter().filter_map(|(_, r)| r.get_untracked());
            let heading = build_reveal(
                &scope.targets(spans),
                &RevealOptions::default()
                    .from(Vars::new().y(config.travel(tier, 100.0)))
                    .duration(config.duration.extra_slow)
                    .stagger(0.1)
                    .ease(config.ease.bounce),
                tier,
                config,
            );
            scope.bind(
                &scene,
                measure(section),
                TriggerSpec::new(Band::new(Edge::Top, Edge::Center).plus(0.4))
                    .toggle(scope.track(heading)),
            );

            let digit_target: TargetRef = scope.target(digit_el);
            let counter = Rc::new(RefCell::new(DigitCounter::new()));
            let queue = Rc::new(RefCell::new(RollQueue::new()));
            let roll_to = move |index: usize, direction: RollDirection| {
                let (counter, queue, digit_target) =
                    (counter.clone(), queue.clone(), digit_target.clone());
                move || {
                    let Some(roll) = counter.borrow_mut().update(index, direction) else {
                        return;
                    };
                    let anim = roll_timeline(&digit_target, roll, move |c| digit.set(c));
                    queue.borrow_mut().start(anim);
                }
            };
            for (index, card) in card_refs.iter().enumerate() {
                let Some(card) = card.get_untracked() else {
                    continue;
                };
                scope.bind(
                    &scene,
                    measure(card),
                    TriggerSpec::new(Band::new(Edge::Top, Edge::Center))
                        .end(Band::new(Edge::Bottom, Edge::Center))
                        .on_enter(roll_to(index, RollDirection::Down))
                        .on_enter_back(roll_to(index, RollDirection::Up)),
                );
            }
        });
    }

    view! {
        <section
            id="work"
            node_ref=section_ref
            class="relative z-10 min-h-screen bg-[#001000] text-brand-beige px-10 py-20"
        >
            <h2 class="text-4xl md:text-5xl lg:text-7xl text-brand-beige mb-20">
                {words
                    .iter()
                    .enumerate()
                    .map(|(i, (word, word_ref))| {
                        let spacing = if i + 1 < words.len() { "mr-[0.25em]" } else { "" };
                        view! {
                            <span class=format!("inline-block overflow-hidden {spacing}")>
                                <span node_ref=*word_ref class="inline-block">
                                    {*word}
                                </span>
                            </span>
                        }
                    })
                    .collect_view()}
            </h2>
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-10 relative">
                <div class="lg:sticky lg:top-20 h-fit">
                    <div class="flex text-[200px] lg:text-[300px] font-semibold leading-none">
                        <span class="block">"0"</span>
                        <span class="block overflow-hidden">
                            <span node_ref=digit_ref class="block">
                                {move || digit.get().to_string()}
                            </span>
                        </span>
                    </div>
                </div>
                <div class="space-y-40">
                    {projects
                        .iter()
                        .zip(card_refs)
                        .enumerate()
                        .map(|(index, (project, card_ref))| {
                            view! { <ProjectCard project=project index=index card_ref=card_ref hovered=hovered /> }
                        })
                        .collect_view()}
                </div>
            </div>
            <ProjectCursor visible=Signal::derive(move || hovered.get().is_some()) />
        </section>
    }
}

#[component]
fn ProjectCard(
    project: &'static Project,
    index: usize,
    card_ref: NodeRef<html::Div>,
    hovered: RwSignal<Option<usize>>,
) -> impl IntoView {
    let loaded = RwSignal::new(false);
    let title = project.title.clone();
    let video = project.video.clone();

    view! {
        <div node_ref=card_ref class="space-y-6">
            <div
                class="aspect-video overflow-hidden bg-black/20 relative cursor-none"
                on:mouseenter=move |_| hovered.set(Some(index))
                on:mouseleave=move |_| hovered.set(None)
            >
                <video
                    src=video
                    autoplay=true
                    loop=true
                    muted=true
                    playsinline=true
                    class="w-full h-full object-cover"
                    on:loadeddata=move |_| loaded.set(true)
                    on:error=move |_| log::warn!("video for {title} failed to load")
                />
                {project
                    .placeholder
                    .clone()
                    .map(|src| {
                        view! {
                            <img
                                src=src
                                alt=""
                                class=("opacity-0", move || loaded.get())
                                class="absolute inset-0 w-full h-full object-cover transition-opacity duration-500 pointer-events-none"
                            />
                        }
                    })}
            </div>
            <div class="space-y-4">
                <div class="space-y-2">
                    <p class="text-sm opacity-80">{project.category.clone()}</p>
                    <h3 class="text-4xl font-light">{project.title.clone()}</h3>
                </div>
                <p class="text-lg opacity-90">{project.brief.clone()}</p>
                <div class="flex flex-wrap gap-2">
                    {project
                        .tags
                        .iter()
                        .map(|tag| {
                            view! {
                                <span class="px-3 py-1 text-sm border border-brand-beige/20 rounded-full">
                                    {tag.clone()}
                                </span>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </div>
    }
}

/// "View" pill that follows the pointer over project media.
#[component]
fn ProjectCursor(visible: Signal<bool>) -> impl IntoView {
    let position = RwSignal::new((0.0, 0.0));

    #[cfg(feature = "hydrate")]
    {
        use leptos::ev;
        use leptos_use::{use_event_listener, use_window};

        let _ = use_event_listener(use_window(), ev::mousemove, move |e| {
            position.set((e.client_x() as f64, e.client_y() as f64));
        });
    }

    view! {
        <div
            class="fixed top-0 left-0 z-[9999] pointer-events-none flex items-center justify-center transition-opacity duration-200"
            class=("opacity-0", move || !visible.get())
            style:transform=move || {
                let (x, y) = position.get();
                format!("translate3d({x}px, {y}px, 0) translate(-50%, -50%)")
            }
        >
            <div class="bg-brand-beige/90 text-brand-olive px-6 py-3 rounded-full font-medium text-sm tracking-wider backdrop-blur-sm shadow-lg">
                "View"
            </div>
        </div>
    }
}
