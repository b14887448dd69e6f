//! # datebox
//!
//! datebox is a synchronized month/day/year date selector. Three selectable
//! lists are kept consistent with each other: the day list always holds
//! exactly the days of the selected month and year, and a chosen day is
//! clamped when the month gets shorter.
//!
//! ## Features
//!
//! - **Date selector core**: toolkit-agnostic [`DateSelectorGroup`] driving any
//!   [`SelectableField`] implementation, with silent rebuilds
//! - **Terminal User Interface**: three side-by-side lists, arrow-key
//!   navigation and a confirmation popup
//! - **Presets**: named selector settings saved in `~/.datebox/config.json`
//! - **Validators**: integer and alphabet checks for form input
//!
//! ## Modules
//!
//! - `selector`: the date selector, field contract and calendar sources
//! - `validate`: string validators
//! - `config`: preset storage
//! - `tui`: TUI rendering and interaction logic
//! - `logging`: file logging setup

pub mod config;
pub mod logging;
pub mod selector;
pub mod tui;
pub mod validate;

pub use config::Config;
pub use selector::{DateSelectorConfig, DateSelectorGroup, ListField, SelectableField};
