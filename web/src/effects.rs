//! Flying-money effect shown when a cash card pays out.
//!
//! The payout itself is applied to the session immediately, these sprites only decide when the
//! balance readout catches up.

use rand::Rng;

pub(crate) const SPRITES_PER_PAYOUT: u32 = 15;
pub(crate) const SPRITE_STAGGER_MS: u32 = 100;
pub(crate) const SPRITE_FLIGHT_MS: u32 = 800;
/// Wait after the last sprite launches before the readout shows the new balance.
pub(crate) const SETTLE_DELAY_MS: u32 = 1000;

const SPREAD_X: f64 = 60.;
const SPREAD_Y: f64 = 120.;
const LANDING_SCALE_X: f64 = 0.2;
const LANDING_SCALE_Y: f64 = 0.1;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub(crate) const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub(crate) fn center_of(rect: &web_sys::DomRect) -> Self {
        Self::new(rect.x() + rect.width() / 2., rect.y() + rect.height() / 2.)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct FlyingMoney {
    pub id: u32,
    pub from: Point,
    pub to: Point,
}

impl FlyingMoney {
    /// Inline style for a `position: fixed` sprite, the CSS animation reads the travel vector.
    pub(crate) fn style(&self) -> String {
        format!(
            "left: {:.1}px; top: {:.1}px; --fly-x: {:.1}px; --fly-y: {:.1}px; animation-duration: {}ms;",
            self.from.x,
            self.from.y,
            self.to.x - self.from.x,
            self.to.y - self.from.y,
            SPRITE_FLIGHT_MS,
        )
    }
}

/// Scatters one payout's worth of sprites around `from`, each aimed near `to`.
pub(crate) fn plan_burst<R: Rng + ?Sized>(
    rng: &mut R,
    first_id: u32,
    from: Point,
    to: Point,
) -> Vec<FlyingMoney> {
    (0..SPRITES_PER_PAYOUT)
        .map(|i| {
            let dx = (rng.random::<f64>() - 0.5) * SPREAD_X;
            let dy = (rng.random::<f64>() - 0.5) * SPREAD_Y;
            FlyingMoney {
                id: first_id.wrapping_add(i),
                from: Point::new(from.x + dx, from.y + dy),
                to: Point::new(to.x + dx * LANDING_SCALE_X, to.y + dy * LANDING_SCALE_Y),
            }
        })
        .collect()
}

pub(crate) const fn launch_delay_ms(sprite_number: u32) -> u32 {
    sprite_number * SPRITE_STAGGER_MS
}

pub(crate) const fn settle_delay_ms() -> u32 {
    launch_delay_ms(SPRITES_PER_PAYOUT - 1) + SETTLE_DELAY_MS
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn burst_scatters_within_spread() {
        let mut rng = SmallRng::seed_from_u64(3);
        let from = Point::new(100., 200.);
        let to = Point::new(500., 20.);

        let sprites = plan_burst(&mut rng, 40, from, to);

        assert_eq!(sprites.len(), SPRITES_PER_PAYOUT as usize);
        for (i, sprite) in sprites.iter().enumerate() {
            assert_eq!(sprite.id, 40 + i as u32);
            assert!((sprite.from.x - from.x).abs() <= SPREAD_X / 2.);
            assert!((sprite.from.y - from.y).abs() <= SPREAD_Y / 2.);
            assert!((sprite.to.x - to.x).abs() <= SPREAD_X / 2. * LANDING_SCALE_X);
            assert!((sprite.to.y - to.y).abs() <= SPREAD_Y / 2. * LANDING_SCALE_Y);
        }
    }

    #[test]
    fn readout_settles_a_second_after_last_launch() {
        assert_eq!(launch_delay_ms(0), 0);
        assert_eq!(launch_delay_ms(SPRITES_PER_PAYOUT - 1), 1400);
        assert_eq!(settle_delay_ms(), 2400);
    }

    #[test]
    fn style_carries_travel_vector() {
        let sprite = FlyingMoney {
            id: 0,
            from: Point::new(10., 20.),
            to: Point::new(110., 0.),
        };

        assert_eq!(
            sprite.style(),
            "left: 10.0px; top: 20.0px; --fly-x: 100.0px; --fly-y: -20.0px; animation-duration: 800ms;"
        );
    }
}
