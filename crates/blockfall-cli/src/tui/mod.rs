//! Small terminal runtime on top of `ratatui` and `crossterm`.
//!
//! An [`App`] is driven by three kinds of events: timer ticks, render
//! requests and terminal input. The tick interval can be changed from any
//! callback and takes effect from the last tick.

pub use self::{app::App, event_loop::RenderMode, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
