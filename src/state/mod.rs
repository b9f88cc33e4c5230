// SPDX-License-Identifier: MPL-2.0

mod in_flight;
pub mod reactions;
mod settings;

pub use in_flight::{InFlight, InFlightTicket};
pub use reactions::{ReactionChange, ReactionError, Reconciled, reconcile};
pub use settings::{AppSettings, SettingsError};
