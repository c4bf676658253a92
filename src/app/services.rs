use leptos::{html, prelude::*};

use crate::content::{self, Service};
use crate::interaction::Accordion;

#[component]
pub fn Services() -> impl IntoView {
    let section_ref = NodeRef::<html::Section>::new();
    let heading_ref = NodeRef::<html::H2>::new();
    let text_ref = NodeRef::<html::P>::new();

    #[cfg(feature = "hydrate")]
    Effect::new(move |_| {
        use crate::app::scene::{measure, use_scene, SectionScope};
        use crate::motion::{
            build_reveal, Animation, Band, Ease, Edge, Position, RevealOptions, Timeline,
            TriggerSpec, TweenParams, Vars,
        };

        let scene = use_scene();
        let tier = scene.tier();
        let (Some(section), Some(heading), Some(text)) =
            (section_ref.get(), heading_ref.get(), text_ref.get())
        else {
            log::debug!("services not mounted, skipping");
            return;
        };
        let config = content::animation_config();
        let scope = SectionScope::new();

        let overlay = Animation::new(Timeline::new().from_to(
            &[scope.target(section.clone())],
            Vars::new().y_percent(100.0).top_radius(32.0),
            Vars::new().y_percent(0.0).top_radius(0.0),
            TweenParams::new(1.0, Ease::Linear),
            Position::At(0.0),
        ));
        scope.bind(
            &scene,
            measure(section.clone()),
            TriggerSpec::new(Band::new(Edge::Top, Edge::Bottom))
                .end(Band::new(Edge::Top, Edge::Top))
                .scrub(scope.track(overlay), 1.0),
        );

        let phase = scene.phase;
        scope.bind(
            &scene,
            measure(section.clone()),
            TriggerSpec::new(Band::new(Edge::Top, Edge::Bottom))
                .end(Band::new(Edge::Top, Edge::Center))
                .on_update(move |p| phase.set(p)),
        );

        let opts = RevealOptions::default()
            .from(Vars::new().y(config.travel(tier, 50.0)))
            .duration(1.0)
            .without_blur();
        let heading = build_reveal(&[scope.target(heading)], &opts, tier, config);
        scope.bind(
            &scene,
            measure(section.clone()),
            TriggerSpec::new(Band::new(Edge::Top, Edge::Center).plus(0.4))
                .toggle(scope.track(heading)),
        );
        let text = build_reveal(&[scope.target(text)], &opts, tier, config);
        scope.bind(
            &scene,
            measure(section),
            TriggerSpec::new(Band::reveal(tier)).toggle(scope.track(text)),
        );
    });

    view! {
        <section
            id="services"
            node_ref=section_ref
            class="relative z-10 w-full min-h-screen bg-brand-beige p-10"
        >
            <h2 node_ref=heading_ref class="text-4xl md:text-5xl lg:text-7xl text-brand-olive mb-6">
                "HOW I CAN HELP YOU /"
            </h2>
            <p node_ref=text_ref class="max-w-2xl text-base md:text-lg text-brand-olive/80 mb-12">
                "From the first wireframe to launch day, I design and build websites that load fast, rank well and keep visitors around."
            </p>
            <ServiceCards />
        </section>
    }
}

#[component]
fn ServiceCards() -> impl IntoView {
    let services = content::services();
    let default_open = services
        .iter()
        .find(|s| s.id == "web-development")
        .or(services.first())
        .map(|s| s.id.clone());
    let accordion = RwSignal::new(Accordion::new(default_open));

    view! {
        <div class="max-w-[95%] mx-auto px-4 sm:px-6 lg:px-8">
            <div class="space-y-12">
                {services
                    .iter()
                    .map(|service| view! { <ServiceCard service=service accordion=accordion /> })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
fn ServiceCard(service: &'static Service, accordion: RwSignal<Accordion>) -> impl IntoView {
    let id = service.id.as_str();
    let panel_ref = NodeRef::<html::Div>::new();
    let feature_refs: Vec<NodeRef<html::Div>> =
        service.features.iter().map(|_| NodeRef::new()).collect();
    let initially_open = accordion.with_untracked(|a| a.is_open(id));
    let is_open = move || accordion.with(|a| a.is_open(id));

    #[cfg(feature = "hydrate")]
    {
        use crate::app::scene::{target, use_scene, ElementTarget};
        use crate::interaction::accordion::panel_transition;
        use crate::motion::{Animation, TargetRef, VisualState};

        struct Card {
            panel: TargetRef,
            features: Vec<TargetRef>,
        }

        let scene = use_scene();
        let card = StoredValue::new_local(None::<Card>);
        let running = StoredValue::new_local(None::<Animation>);
        let feature_refs = feature_refs.clone();

        Effect::new(move |prev: Option<bool>| {
            let open = is_open();
            match prev {
                Some(prev) if prev != open => {}
                _ => return open,
            }
            let Some(panel) = panel_ref.get_untracked() else {
                return open;
            };
            if card.with_value(Option::is_none) {
                let state = VisualState {
                    height: (!prev.unwrap_or(initially_open)).then_some(0.0),
                    ..VisualState::default()
                };
                let features = feature_refs
                    .iter()
                    .filter_map(|r| r.get_untracked())
                    .map(target)
                    .collect();
                card.set_value(Some(Card {
                    panel: ElementTarget::with_state(panel, state),
                    features,
                }));
            }

            let tier = scene.tier_untracked();
            let config = content::animation_config();
            let Some(anim) = card.with_value(|c| {
                c.as_ref()
                    .map(|c| panel_transition(&c.panel, &c.features, open, tier, config))
            }) else {
                return open;
            };
            running.update_value(|r| {
                if let Some(previous) = r.replace(anim.clone()) {
                    previous.pause();
                }
            });
            anim.play();
            open
        });
    }

    let number = service.number.clone();
    let title = service.title.clone();
    let description = service.description.clone();

    view! {
        <div class="border-b border-brand-olive pb-8">
            <button
                class="w-full flex flex-col md:flex-row items-start gap-6 text-left cursor-pointer"
                aria-expanded=move || is_open().to_string()
                on:click=move |_| {
                    let change = accordion.try_update(|a| a.toggle(id));
                    log::debug!("accordion changed: {change:?}");
                }
            >
                <span class="text-4xl md:text-5xl font-semibold text-brand-olive">
                    {format!("({number})")}
                </span>
                <span class="flex-grow text-2xl md:text-4xl font-bold text-brand-olive">{title}</span>
                <span class="text-3xl text-brand-olive">{move || if is_open() { "−" } else { "+" }}</span>
            </button>
            <div
                node_ref=panel_ref
                class="overflow-hidden md:pl-24"
                style=(!initially_open).then_some("height: 0px")
            >
                <div class="space-y-4 pt-4">
                    <p class="text-base md:text-lg leading-relaxed text-brand-olive">{description}</p>
                    <div class="space-y-2">
                        {service
                            .features
                            .iter()
                            .zip(feature_refs)
                            .enumerate()
                            .map(|(index, (feature, feature_ref))| {
                                view! {
                                    <div node_ref=feature_ref class="flex items-center gap-2 md:gap-4">
                                        <span class="text-sm md:text-base text-brand-olive opacity-70">
                                            {format!("{:02}", index + 1)}
                                        </span>
                                        <span class="text-base md:text-lg font-semibold text-brand-olive">
                                            {feature.name.clone()}
                                        </span>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
            </div>
        </div>
    }
}
