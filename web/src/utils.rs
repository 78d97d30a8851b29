use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct BodyPortalProps {
    #[prop_or_default]
    pub children: Html,
}

/// Renders its children straight under `<body>`, so the round-over dialog sits above the grid.
#[function_component]
pub(crate) fn BodyPortal(props: &BodyPortalProps) -> Html {
    create_portal(props.children.clone(), gloo::utils::body().into())
}

/// Packs two draws from `[0, 1)` into a seed, each filling one 32-bit half.
fn seed_from_draws(high: f64, low: f64) -> u64 {
    let half = |draw: f64| (draw * 4_294_967_296.0) as u32;
    (u64::from(half(high)) << 32) | u64::from(half(low))
}

/// Fresh deal seed from the browser's `Math.random`.
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    seed_from_draws(random(), random())
}
