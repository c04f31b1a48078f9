//! The hold'em phase machine: dealing, board progression, showdown, and
//! view projection on top of the cardless betting engine (spec §4.D).
//!
//! [`module::HoldemModule`] implements `htc_contract::GameModule`; that's
//! the only thing a table mediator needs to import from this crate.

mod dealing;
mod module;
mod options;
mod position;
mod showdown;
mod state;
mod views;

pub use htc_contract::{GameModule, RawAction};
pub use module::HoldemModule;
pub use options::HoldemOptions;
pub use position::PositionName;
pub use state::{HoldemState, Phase, Seat, ShowdownResult};
pub use views::{PlayerView, PublicSeatView, PublicView};
