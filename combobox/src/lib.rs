//! A searchable, optionally multi-select combobox for terminal forms.
//!
//! The widget owns its open/closed state, search text, keyboard focus and
//! selection. Hosts feed it options and an initial value, forward input
//! events, and receive committed values through `on_change`.
//!
//! ```ignore
//! let customer = Combobox::new(
//!     ComboboxConfig::new("customer")
//!         .options(contacts)
//!         .searchable(true)
//!         .placeholder("Choose a customer")
//!         .on_change(|value| log::info!("customer = {:?}", value)),
//! )?;
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod option;
pub mod position;
pub mod selection;
pub mod signals;
pub mod theme;
pub mod value;
pub mod widget;

pub use config::{ActionHandler, ChangeHandler, ComboboxConfig, DEFAULT_MENU_HEIGHT};
pub use error::ConfigError;
pub use filter::{FilterMode, filter_options};
pub use option::SelectOption;
pub use position::{MenuPosition, OpenDirection, compute_menu_position};
pub use selection::{Selection, display_label};
pub use signals::{Signal, SignalRegistry};
pub use theme::ComboboxTheme;
pub use value::SelectValue;
pub use widget::{ComboState, Combobox, EventResult, InteractionMode, MENU_Z};
