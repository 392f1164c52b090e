//! Ready-made placeholder views.
//!
//! * [`LoadingView`] shows a spinner while loading.
//! * [`EmptyView`] shows a message when there is no content.
//! * [`ErrorView`] shows an error message, and can trigger a reload.
//!
//! All three are built on [`BasicPlaceholderView`], an opaque view
//! showing a few centered lines of text.

mod basic;
mod empty;
mod error;
mod loading;

pub use self::basic::BasicPlaceholderView;
pub use self::empty::EmptyView;
pub use self::error::ErrorView;
pub use self::loading::LoadingView;
