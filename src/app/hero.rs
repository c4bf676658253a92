use leptos::{html, prelude::*};

use crate::content;

const INTRO_LINES: [&str; 3] = [
    "I craft pixel-perfect web experiences for creators,",
    "startups, and entrepreneurs to boost revenue and",
    "stand out in a crowded market.",
];

#[component]
pub fn Hero() -> impl IntoView {
    let site = content::site();
    let section_ref = NodeRef::<html::Section>::new();
    let circle_ref = NodeRef::<html::Div>::new();
    let name_ref = NodeRef::<html::H1>::new();
    let role_ref = NodeRef::<html::P>::new();
    let location_ref = NodeRef::<html::P>::new();
    let line_refs: [NodeRef<html::P>; 3] = std::array::from_fn(|_| NodeRef::new());

    #[cfg(feature = "hydrate")]
    Effect::new(move |_| {
        use crate::app::scene::{use_scene, SectionScope};
        use crate::motion::{
            build_reveal, phase_blur, Animation, Ease, Position, RevealOptions, Timeline,
            TweenParams, Vars,
        };

        let (Some(section), Some(circle), Some(name), Some(role), Some(location)) = (
            section_ref.get(),
            circle_ref.get(),
            name_ref.get(),
            role_ref.get(),
            location_ref.get(),
        ) else {
            log::debug!("hero not mounted, skipping intro");
            return;
        };
        let Some(lines) = line_refs
            .iter()
            .map(|r| r.get_untracked())
            .collect::<Option<Vec<_>>>()
        else {
            return;
        };

        let scene = use_scene();
        // The intro runs once. The tier is already settled here because the
        // scene seeds it from matchMedia before the first render.
        let tier = scene.tier_untracked();
        let config = content::animation_config();
        let scope = SectionScope::new();

        let circle = Animation::new(Timeline::new().from_to(
            &[scope.target(circle)],
            Vars::new().scale(0.2).opacity(0.0),
            Vars::new().scale(1.0).opacity(1.0),
            TweenParams::new(config.scaled_duration(tier, 1.8), config.ease.smooth),
            Position::At(0.0),
        ));
        let hidden = Vars::new().y(config.travel(tier, 100.0));
        let name = build_reveal(
            &[scope.target(name)],
            &RevealOptions::default()
                .from(hidden)
                .duration(1.2)
                .ease(Ease::SNAPPY),
            tier,
            config,
        );
        let details = build_reveal(
            &[scope.target(role), scope.target(location)],
            &RevealOptions::default()
                .from(hidden)
                .duration(config.duration.extra_slow)
                .stagger(0.1)
                .ease(Ease::SNAPPY),
            tier,
            config,
        );
        let lines = build_reveal(
            &scope.targets(lines),
            &RevealOptions::default()
                .from(hidden)
                .duration(1.0)
                .stagger(0.15)
                .ease(config.ease.text_reveal),
            tier,
            config,
        );
        let intro = Timeline::new()
            .add(&name, Position::At(0.0))
            .add(&details, Position::Offset(-0.7))
            .add(&lines, Position::Offset(-0.4))
            .add(&circle, Position::At(0.0));
        scope.track(Animation::new(intro)).play();

        // the page blurs away as the services overlay slides over it
        if let Some(blur) = phase_blur(&scope.target(section), 10.0, tier) {
            let blur = StoredValue::new_local(scope.track(blur));
            Effect::watch(
                move || scene.phase.get(),
                move |phase, _, _| {
                    blur.with_value(|b| b.seek(*phase));
                },
                true,
            );
        }
    });

    view! {
        <section
            id="home"
            node_ref=section_ref
            class="relative h-screen w-full bg-black overflow-hidden"
        >
            <div
                node_ref=circle_ref
                class="absolute bottom-0 left-0 w-96 h-96 lg:w-[400px] lg:h-[400px] rounded-full bg-brand-olive/60 blur-[120px] origin-bottom-left"
            />
            <div class="absolute bottom-24 w-full px-10">
                <div class="flex flex-col lg:flex-row lg:items-center lg:justify-between">
                    <div>
                        <div class="overflow-hidden">
                            <h1
                                node_ref=name_ref
                                class="text-5xl md:text-7xl lg:text-9xl font-semibold text-brand-beige"
                            >
                                {site.name.clone()}
                            </h1>
                        </div>
                        <div class="-space-y-1.5">
                            <div class="overflow-hidden">
                                <p node_ref=role_ref class="text-brand-beige text-base lg:text-lg">
                                    {site
                                        .role
                                        .iter()
                                        .enumerate()
                                        .map(|(i, part)| {
                                            let weight = if i == 0 { "font-light" } else { "font-normal" };
                                            view! { <span class=weight>{part.clone()}</span> }
                                        })
                                        .collect_view()}
                                </p>
                            </div>
                            <div class="overflow-hidden">
                                <p node_ref=location_ref class="text-brand-beige text-base lg:text-lg">
                                    <span class="font-light">"Based In "</span>
                                    <span class="font-normal">{site.location.clone()}</span>
                                </p>
                            </div>
                        </div>
                    </div>
                    <div class="lg:max-w-lg lg:mr-10">
                        <div class="flex flex-col gap-1 lg:gap-2">
                            {INTRO_LINES
                                .iter()
                                .zip(line_refs)
                                .map(|(line, line_ref)| {
                                    view! {
                                        <div class="overflow-hidden">
                                            <p
                                                node_ref=line_ref
                                                class="text-2xl text-left lg:text-right text-brand-beige"
                                            >
                                                {*line}
                                            </p>
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </div>
                </div>
            </div>
        </section>
    }
}
