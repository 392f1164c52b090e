//! # Cursive-stateful
//!
//! Placeholder views for the Cursive TUI.
//!
//! A screen registers a set of named placeholder views (typically
//! `"loading"`, `"empty"` and `"error"`) and then toggles between showing
//! one of them or showing its own content. Transitions fade views in and
//! out, and are executed strictly one after the other: a transition
//! requested while another one is running waits for its turn.
//!
//! The main entry points are:
//!
//! * [`StatefulView`], a wrapper around the content view of a screen.
//! * [`ViewStateMachine`], the state machine owned by a `StatefulView`.
//! * [`StateHandle`], a cloneable handle to request transitions from any
//!   thread.
//! * [`StatefulController`], the policy deciding which placeholder to show
//!   from "is loading / has content / has error" conditions.
//!
//! # Examples
//!
//! ```rust
//! use cursive_stateful::views::{EmptyView, ErrorView, LoadingView};
//! use cursive_stateful::{StatefulController, StatefulView};
//! use cursive_core::views::TextView;
//!
//! let view = StatefulView::new(TextView::new("Content"))
//!     .with_loading_view(LoadingView::new())
//!     .with_empty_view(EmptyView::new())
//!     .with_error_view(ErrorView::new());
//!
//! let controller: StatefulController =
//!     StatefulController::new(view.handle(), || false);
//! controller.start_loading(true);
//! ```
#![deny(missing_docs)]
#![cfg_attr(feature = "doc-cfg", feature(doc_cfg))]

macro_rules! new_default(
    ($c:ident<$t:ident>) => {
        impl<$t> Default for $c<$t> {
            fn default() -> Self {
                Self::new()
            }
        }
    };
    ($c:ty) => {
        impl Default for $c {
            fn default() -> Self {
                Self::new()
            }
        }
    }
);

pub mod container;
pub mod controller;
pub mod fade;
pub mod machine;
pub mod placeholder;
pub mod queue;
pub mod registry;
pub mod settings;
pub mod state;
pub mod views;

mod stateful_view;

pub use self::container::ContainerView;
pub use self::controller::StatefulController;
pub use self::machine::{Completion, StateHandle, Transition, ViewStateMachine};
pub use self::placeholder::{Inset, PlaceholderHandle, PlaceholderView};
pub use self::registry::ViewRegistry;
pub use self::settings::Settings;
pub use self::state::{DisplayState, ViewState};
pub use self::stateful_view::StatefulView;
