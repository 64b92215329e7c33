use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// When the screen is redrawn.
#[derive(Debug, Clone, Copy, Default)]
pub enum RenderMode {
    /// After every tick or input event.
    #[default]
    OnDirty,
    /// After a tick or input event, at most once per interval.
    Throttled(Duration),
}

impl RenderMode {
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }

    fn min_gap(self) -> Duration {
        match self {
            Self::OnDirty => Duration::ZERO,
            Self::Throttled(interval) => interval,
        }
    }
}

/// Decides which event comes next and blocks until it is due.
///
/// Ticks take priority over rendering, and rendering over input. Any tick or
/// input marks the screen dirty.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Instant,
    last_render: Option<Instant>,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            last_tick: Instant::now(),
            last_render: None,
            dirty: true,
        }
    }
}

impl EventLoop {
    /// A changed interval counts from the previous tick. When ticking
    /// resumes after being stopped, it counts from now.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        if self.tick_interval.is_none() && interval.is_some() {
            self.last_tick = Instant::now();
        }
        self.tick_interval = interval;
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if self.tick_due(now) {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }
            if self.render_due(now) {
                self.last_render = Some(now);
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            let has_input = match self.next_deadline() {
                Some(deadline) => event::poll(deadline.saturating_duration_since(now))?,
                None => true,
            };
            if has_input {
                self.dirty = true;
                return Ok(event::read()?.into());
            }
        }
    }

    fn tick_due(&self, now: Instant) -> bool {
        self.next_tick_at().is_some_and(|at| at <= now)
    }

    fn render_due(&self, now: Instant) -> bool {
        self.next_render_at().is_some_and(|at| at <= now)
    }

    fn next_tick_at(&self) -> Option<Instant> {
        self.tick_interval.map(|interval| self.last_tick + interval)
    }

    fn next_render_at(&self) -> Option<Instant> {
        if !self.dirty {
            return None;
        }
        Some(match self.last_render {
            Some(last) => last + self.render_mode.min_gap(),
            None => self.last_tick,
        })
    }

    /// Earliest instant a tick or render is due, or `None` to wait for input
    /// indefinitely.
    fn next_deadline(&self) -> Option<Instant> {
        [self.next_tick_at(), self.next_render_at()]
            .into_iter()
            .flatten()
            .min()
    }
}
