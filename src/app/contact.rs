use leptos::{html, prelude::*};

use crate::content;

const LINES: [&str; 2] = ["LET'S WORK", "TOGETHER"];

#[component]
pub fn CallToAction() -> impl IntoView {
    let site = content::site();
    let section_ref = NodeRef::<html::Section>::new();
    let circle_ref = NodeRef::<html::Div>::new();
    let line_refs: [NodeRef<html::Div>; 2] = std::array::from_fn(|_| NodeRef::new());
    let button_refs: [NodeRef<html::Div>; 2] = std::array::from_fn(|_| NodeRef::new());

    #[cfg(feature = "hydrate")]
    let glow = {
        use crate::app::scene::{measure, use_scene, SectionScope};
        use crate::interaction::glow::GlowDriver;
        use crate::motion::{
            build_reveal, Animation, Band, Edge, Position, RevealOptions, Timeline, TriggerSpec,
            TweenParams, Vars,
        };

        let glow = StoredValue::new_local(None::<std::rc::Rc<GlowDriver>>);
        Effect::new(move |_| {
            let scene = use_scene();
            let tier = scene.tier();
            let (Some(section), Some(circle)) = (section_ref.get(), circle_ref.get()) else {
                log::debug!("call to action not mounted, skipping");
                return;
            };
            let lines = line_refs.iter().filter_map(|r| r.get_untracked());
            let buttons = button_refs.iter().filter_map(|r| r.get_untracked());
            let config = content::animation_config();
            let scope = SectionScope::new();

            let circle = scope.target(circle);
            let hidden = Vars::new().y(config.travel(tier, 100.0));
            let lines = build_reveal(
                &scope.targets(lines),
                &RevealOptions::default()
                    .from(hidden)
                    .duration(1.2)
                    .stagger(0.08)
                    .ease(config.ease.snappy),
                tier,
                config,
            );
            let buttons = build_reveal(
                &scope.targets(buttons),
                &RevealOptions::default()
                    .from(hidden)
                    .duration(0.9)
                    .stagger(0.04)
                    .ease(config.ease.snappy),
                tier,
                config,
            );
            let timeline = Timeline::new()
                .add(&lines, Position::At(0.0))
                .from_to(
                    &[circle.clone()],
                    Vars::new().scale(1.5).opacity(0.0),
                    Vars::new().scale(1.0).opacity(0.7),
                    TweenParams::new(config.scaled_duration(tier, 1.8), config.ease.gentle),
                    Position::Offset(-1.0),
                )
                .add(&buttons, Position::Offset(-1.4));
            scope.bind(
                &scene,
                measure(section),
                TriggerSpec::new(Band::reveal(tier))
                    .end(Band::new(Edge::Bottom, Edge::Center))
                    .toggle(scope.track(Animation::new(timeline))),
            );

            glow.set_value(Some(std::rc::Rc::new(GlowDriver::new(circle))));
        });
        glow
    };

    #[cfg(feature = "hydrate")]
    let on_move = move |e: leptos::ev::MouseEvent| {
        use crate::app::scene::{client_rect, schedule};

        let Some(section) = section_ref.get_untracked() else {
            return;
        };
        let rect = client_rect(&section);
        glow.with_value(|g| {
            if let Some(g) = g {
                g.point(e.client_x() as f64, e.client_y() as f64, rect);
                schedule(g);
            }
        });
    };
    #[cfg(not(feature = "hydrate"))]
    let on_move = |_: leptos::ev::MouseEvent| {};

    #[cfg(feature = "hydrate")]
    let on_leave = move |_: leptos::ev::MouseEvent| {
        glow.with_value(|g| {
            if let Some(g) = g {
                g.leave();
                crate::app::scene::schedule(g);
            }
        });
    };
    #[cfg(not(feature = "hydrate"))]
    let on_leave = |_: leptos::ev::MouseEvent| {};

    let [icon_ref, label_ref] = button_refs;

    view! {
        <section
            id="contact"
            node_ref=section_ref
            class="relative z-10 min-h-screen bg-black text-brand-beige flex items-center overflow-hidden px-4 sm:px-8 md:px-12 lg:px-16"
            on:mousemove=on_move
            on:mouseleave=on_leave
        >
            <div
                node_ref=circle_ref
                class="absolute w-[280px] h-[280px] sm:w-[400px] sm:h-[400px] md:w-[600px] md:h-[600px] lg:w-[800px] lg:h-[800px] bg-gradient-to-br from-brand-olive/60 to-brand-olive/40 rounded-full blur-[100px] sm:blur-[120px] md:blur-[140px] pointer-events-none"
            />
            <div class="relative z-10 w-full max-w-7xl mx-auto">
                <div class="flex flex-col gap-12 sm:gap-16 md:gap-20">
                    <div class="text-[13vw] sm:text-[11vw] md:text-[9vw] lg:text-[7vw] font-bold leading-[0.95] tracking-tight text-center md:text-left uppercase">
                        {LINES
                            .iter()
                            .zip(line_refs)
                            .map(|(line, line_ref)| {
                                view! {
                                    <div class="overflow-hidden">
                                        <div node_ref=line_ref>{*line}</div>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                    <div class="flex justify-center md:justify-start px-4 overflow-hidden">
                        <a
                            href=site.mailto()
                            class="group inline-flex items-center gap-4 sm:gap-6 p-4 sm:p-6 rounded-2xl w-full max-w-[800px] md:max-w-none hover:bg-brand-beige/5 transition-colors duration-300"
                        >
                            <div node_ref=icon_ref class="flex-shrink-0 overflow-hidden">
                                <div class="w-14 h-14 sm:w-16 sm:h-16 flex items-center justify-center bg-brand-beige/5 rounded-xl text-2xl">
                                    "✉"
                                </div>
                            </div>
                            <div node_ref=label_ref class="flex flex-col overflow-hidden flex-grow">
                                <span class="text-xs sm:text-sm uppercase tracking-widest text-brand-beige/60 mb-1">
                                    "Available for new projects"
                                </span>
                                <span class="text-2xl sm:text-3xl md:text-4xl font-medium tracking-tight truncate text-brand-beige text-left">
                                    {site.email.clone()}
                                </span>
                            </div>
                        </a>
                    </div>
                </div>
            </div>
        </section>
    }
}
