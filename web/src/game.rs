use crate::effects::{self, FlyingMoney, Point};
use crate::utils::*;
use bitflags::bitflags;
use clap::Args;
use gloo::timers::callback::Timeout;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rollcraft_core as game;
use serde::{Deserialize, Serialize};
use web_sys::Element;
use yew::prelude::*;

const CARD_BACK: &str = "/static/image/image.png";
const MONEY_ICON: &str = "/static/image/money.png";
const STOP_ICON: &str = "/static/image/stop.png";

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewCellState {
    Hidden,
    Revealed(game::CellContent),
    /// The bomb the player turned, as opposed to bombs shown at the end of the round
    TriggeredBomb,
}

impl ViewCellState {
    fn at(session: &game::Session, index: game::CellIndex) -> Self {
        match session.cell_at(index) {
            Some(cell) if cell.is_revealed() => {
                if session.triggered_bomb() == Some(index) {
                    Self::TriggeredBomb
                } else {
                    Self::Revealed(cell.content())
                }
            }
            _ => Self::Hidden,
        }
    }
}

/// Text of the end-of-round dialog.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Overlay {
    id: &'static str,
    heading: &'static str,
    text: &'static str,
    image: &'static str,
    footer: &'static str,
}

impl Overlay {
    const BUSTED: Self = Self {
        id: "gameover",
        heading: "Danger ahead!",
        text: "You're on a Bomb Square! You hit a bomb and lose all rewards from this field...",
        image: game::CellKind::Bomb.asset(),
        footer: "...or defuse it and save your run!",
    };

    const CLAIMED: Self = Self {
        id: "gamevictory",
        heading: "Game Over!",
        text: "You've reached the end of this run...",
        image: STOP_ICON,
        footer: "...claim and return to the main board",
    };

    fn for_session(session: &game::Session) -> Option<Self> {
        use game::SessionState::*;
        match session.state() {
            Ready | Active => None,
            Busted => Some(Self::BUSTED),
            Claimed => Some(Self::CLAIMED),
        }
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct MouseButtons: u16 {
        const LEFT    = 1;
        const RIGHT   = 1 << 1;
        const MIDDLE  = 1 << 2;
        const BACK    = 1 << 3;
        const FORWARD = 1 << 4;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct CellPointerState {
    index: game::CellIndex,
    buttons: MouseButtons,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum CellMsg {
    Update(CellPointerState),
    Leave,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CellEvent(CellMsg),
    Claim,
    NewGame,
    LaunchSprite { round: u32, sprite: FlyingMoney },
    SpriteLanded { round: u32, id: u32 },
    PayoutLanded { round: u32 },
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    index: game::CellIndex,
    cell_state: ViewCellState,
    #[prop_or_default]
    pressed: bool,
    #[prop_or_default]
    locked: bool,
    node_ref: NodeRef,
    callback: Callback<CellMsg>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    use ViewCellState::*;

    let CellProps {
        index,
        cell_state,
        pressed,
        locked,
        node_ref,
        callback,
    } = props.clone();

    let mut class = classes!(
        "cell",
        match cell_state {
            Hidden => classes!(),
            Revealed(_) => classes!("open"),
            TriggeredBomb => classes!("open", "oops"),
        }
    );
    if pressed {
        class.push("pressed");
    }
    if locked {
        class.push("locked");
    }

    let pointer_callback = |action: &'static str| {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            let buttons = MouseButtons::from_bits_truncate(e.buttons());
            callback.emit(CellMsg::Update(CellPointerState { index, buttons }));
            log::trace!("{} mouse {} ({:?})", index, action, buttons);
        })
    };
    let onmousedown = pointer_callback("down");
    let onmouseup = pointer_callback("up");
    let onmouseenter = pointer_callback("enter");

    let onmouseleave = {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| {
            callback.emit(CellMsg::Leave);
            log::trace!("{} mouse leave", index);
        })
    };

    let face = match cell_state {
        Hidden => html! {
            <img class="card-back" src={CARD_BACK} alt="back"/>
        },
        Revealed(content) => card_front(content),
        TriggeredBomb => card_front(game::CellContent::Bomb),
    };

    html! {
        <div ref={node_ref} {class} {onmousedown} {onmouseup} {onmouseenter} {onmouseleave}>
            {face}
        </div>
    }
}

fn card_front(content: game::CellContent) -> Html {
    let style = format!("background-image: url({});", content.kind().asset());
    let label = match content {
        game::CellContent::Cash(cash) => cash.value().to_string(),
        _ => String::new(),
    };
    html! {
        <div class="card-front" {style}>
            <p>{label}</p>
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct GameOverProps {
    overlay: Overlay,
    balance: game::Amount,
    on_restart: Callback<MouseEvent>,
}

#[function_component(GameOverView)]
fn game_over_component(props: &GameOverProps) -> Html {
    let GameOverProps {
        overlay,
        balance,
        on_restart,
    } = props.clone();

    html! {
        <div class="modal">
            <h2 class="header-text" id={overlay.id}>{overlay.heading}</h2>
            <p class="text">{overlay.text}</p>
            <img src={overlay.image} alt=""/>
            <div>
                <img src={MONEY_ICON} width="48" height="48" alt="money"/>
                <p class="text-balance">{format!("${}", balance)}</p>
            </div>
            <p class="text">{overlay.footer}</p>
            <button class="button" onclick={on_restart}>{"Claim"}</button>
        </div>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed for the first grid instead of random
    #[arg(short, long)]
    #[prop_or_default]
    pub seed: Option<u64>,
}

/// Readout state that trails the session balance while payouts are in flight.
#[derive(Clone, Debug, Default, PartialEq)]
struct BalanceReadout {
    shown: game::Amount,
    payouts_in_flight: usize,
}

impl BalanceReadout {
    fn is_animating(&self) -> bool {
        self.payouts_in_flight > 0
    }

    fn start_payout(&mut self) {
        self.payouts_in_flight += 1;
    }

    /// Returns whether the readout changed.
    fn land_payout(&mut self, balance: game::Amount) -> bool {
        self.payouts_in_flight = self.payouts_in_flight.saturating_sub(1);
        self.sync(balance)
    }

    /// Shows `balance` unless a payout is still flying towards the readout.
    fn sync(&mut self, balance: game::Amount) -> bool {
        if self.is_animating() || self.shown == balance {
            return false;
        }
        self.shown = balance;
        true
    }
}

#[derive(Debug)]
pub(crate) struct GameView {
    session: game::Session,
    /// Bumped on every reset so timers from an old round are dropped
    round: u32,
    readout: BalanceReadout,
    flying: Vec<FlyingMoney>,
    next_sprite_id: u32,
    rng: SmallRng,
    current_cell_state: Option<CellPointerState>,
    balance_ref: NodeRef,
    cell_refs: [NodeRef; game::GRID_LEN],
}

impl GameView {
    fn reveal_cell(&mut self, ctx: &Context<Self>, index: game::CellIndex) -> bool {
        use game::RevealOutcome::*;

        let outcome = match self.session.reveal(index) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::warn!("reveal {} rejected: {}", index, err);
                return false;
            }
        };
        log::debug!("reveal {}: {:?}", index, outcome);

        match outcome {
            NoChange => return false,
            Paid(_) => {
                if !self.launch_payout_effect(ctx, index) {
                    self.readout.sync(self.session.balance());
                }
            }
            Blank | Doubled | Exploded => {
                self.readout.sync(self.session.balance());
            }
        }
        true
    }

    fn claim(&mut self) -> bool {
        let outcome = self.session.claim();
        log::debug!("claim: {:?}", outcome);
        if outcome.has_update() {
            self.readout.sync(self.session.balance());
        }
        outcome.has_update()
    }

    fn new_game(&mut self) {
        self.session
            .reset(game::RandomGridGenerator::new(js_random_seed()));
        self.round = self.round.wrapping_add(1);
        self.readout = BalanceReadout::default();
        self.flying.clear();
        self.current_cell_state = None;
    }

    /// Schedules the sprites for a cash payout, returns `false` when there is nothing to animate
    /// between (before first render).
    fn launch_payout_effect(&mut self, ctx: &Context<Self>, index: game::CellIndex) -> bool {
        let cell = self.cell_refs[usize::from(index)].cast::<Element>();
        let readout = self.balance_ref.cast::<Element>();
        let (Some(cell), Some(readout)) = (cell, readout) else {
            log::debug!("no elements to animate payout from {}", index);
            return false;
        };

        let from = Point::center_of(&cell.get_bounding_client_rect());
        let to = Point::center_of(&readout.get_bounding_client_rect());
        let sprites = effects::plan_burst(&mut self.rng, self.next_sprite_id, from, to);
        self.next_sprite_id = self
            .next_sprite_id
            .wrapping_add(effects::SPRITES_PER_PAYOUT);

        let round = self.round;
        for (number, sprite) in (0..).zip(sprites) {
            let link = ctx.link().clone();
            Timeout::new(effects::launch_delay_ms(number), move || {
                link.send_message(Msg::LaunchSprite { round, sprite })
            })
            .forget();
        }

        let link = ctx.link().clone();
        Timeout::new(effects::settle_delay_ms(), move || {
            link.send_message(Msg::PayoutLanded { round })
        })
        .forget();

        self.readout.start_payout();
        true
    }

    fn is_pressed(&self, index: game::CellIndex, cell_state: ViewCellState) -> bool {
        matches!(
            (self.current_cell_state, cell_state),
            (
                Some(CellPointerState {
                    index: pressed,
                    buttons: MouseButtons::LEFT,
                }),
                ViewCellState::Hidden,
            ) if pressed == index && !self.session.is_game_over()
        )
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        log::debug!("first grid seed: {}", seed);

        Self {
            session: game::Session::from_seed(seed),
            round: 0,
            readout: BalanceReadout::default(),
            flying: Vec::new(),
            next_sprite_id: 0,
            rng: SmallRng::seed_from_u64(js_random_seed()),
            current_cell_state: None,
            balance_ref: NodeRef::default(),
            cell_refs: core::array::from_fn(|_| NodeRef::default()),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use CellMsg::*;
        use Msg::*;

        match msg {
            CellEvent(Leave) => {
                log::trace!("cell leave");
                self.current_cell_state.take().is_some()
            }
            CellEvent(Update(cell_state)) => {
                log::trace!("cell update: {:?}", cell_state);
                if cell_state.buttons.is_empty() {
                    match self.current_cell_state.take() {
                        None => false,
                        Some(CellPointerState {
                            index,
                            buttons: MouseButtons::LEFT,
                        }) if index == cell_state.index => {
                            self.reveal_cell(ctx, index);
                            true
                        }
                        Some(_) => true,
                    }
                } else {
                    self.current_cell_state.replace(cell_state) != Some(cell_state)
                }
            }
            Claim => self.claim(),
            NewGame => {
                self.new_game();
                true
            }
            LaunchSprite { round, sprite } if round == self.round => {
                let link = ctx.link().clone();
                Timeout::new(effects::SPRITE_FLIGHT_MS, move || {
                    link.send_message(SpriteLanded { round, id: sprite.id })
                })
                .forget();
                self.flying.push(sprite);
                true
            }
            SpriteLanded { round, id } if round == self.round => {
                let before = self.flying.len();
                self.flying.retain(|sprite| sprite.id != id);
                self.flying.len() != before
            }
            PayoutLanded { round } if round == self.round => {
                self.readout.land_payout(self.session.balance());
                true
            }
            LaunchSprite { .. } | SpriteLanded { .. } | PayoutLanded { .. } => {
                log::trace!("dropping effect from an earlier round");
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let is_playable = !self.session.is_game_over();
        let readout_class = classes!(
            "balance-text",
            if self.readout.is_animating() {
                "balance-animated"
            } else {
                "balance-text-1"
            }
        );

        let (cols, _) = game::GRID_SIZE;
        let grid_style = format!("grid-template-columns: repeat({}, var(--cell-size));", cols);

        let cb_claim = ctx.link().callback(|_: MouseEvent| Claim);
        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            NewGame
        });

        let game_over = Overlay::for_session(&self.session).map(|overlay| {
            html! {
                <BodyPortal>
                    <GameOverView
                        {overlay}
                        balance={self.session.balance()}
                        on_restart={cb_new_game.clone()}
                    />
                </BodyPortal>
            }
        });

        html! {
            <div class="main-container" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <h1>{"Roll Craft"}</h1>
                <div class="balance" ref={self.balance_ref.clone()}>
                    {
                        for self.flying.iter().map(|sprite| html! {
                            <img key={sprite.id} src={MONEY_ICON} class="flying-money" style={sprite.style()} alt=""/>
                        })
                    }
                    <img src={MONEY_ICON} alt="money" width="40" height="40"/>
                    <p class={readout_class}>{self.readout.shown.to_string()}</p>
                </div>
                <div class={classes!("grid", is_playable.then_some("playable"))} style={grid_style}>
                    {
                        for (0..game::GRID_LEN as game::CellIndex).map(|index| {
                            let cell_state = ViewCellState::at(&self.session, index);
                            let locked = !self.session.can_reveal_at(index);
                            let pressed = self.is_pressed(index, cell_state);
                            let node_ref = self.cell_refs[usize::from(index)].clone();
                            let callback = ctx.link().callback(Msg::CellEvent);
                            html! {
                                <CellView {index} {cell_state} {pressed} {locked} {node_ref} {callback}/>
                            }
                        })
                    }
                </div>
                <button class="button" onclick={cb_claim}>{"Claim"}</button>
                {game_over}
            </div>
        }
    }
}
