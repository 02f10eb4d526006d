//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, auto-play, history
//! - **[`panes`]**: stateless render functions for each visible pane (grid,
//!   registers, memory, output, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with an [`Engine`] and
//! call [`App::run`] to start the event loop.
//!
//! [`Engine`]: crate::interpreter::engine::Engine
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::{App, AppConfig};
