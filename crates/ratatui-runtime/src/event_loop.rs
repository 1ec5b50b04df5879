use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::event::TuiEvent;

/// When the screen is redrawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Redraw after every tick or terminal event.
    #[default]
    OnDirty,
    /// Redraw after state changes, at most once per interval.
    ///
    /// Changes arriving faster than the interval are batched into one redraw.
    Throttled(Duration),
}

impl RenderMode {
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Timing decisions of the loop, kept free of I/O.
#[derive(Debug)]
struct Schedule {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Instant,
    last_render: Option<Instant>,
    dirty: bool,
}

impl Schedule {
    fn new(now: Instant) -> Self {
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            last_tick: now,
            last_render: None,
            // the first frame is always drawn
            dirty: true,
        }
    }

    /// Forgets time spent before the loop started.
    fn restart(&mut self, now: Instant) {
        self.last_tick = now;
    }

    /// Returns the measured time since the previous tick if a tick is due.
    fn poll_tick(&mut self, now: Instant) -> Option<Duration> {
        let interval = self.tick_interval?;
        let elapsed = now.saturating_duration_since(self.last_tick);
        if elapsed < interval {
            return None;
        }
        self.last_tick = now;
        self.dirty = true;
        Some(elapsed)
    }

    fn poll_render(&mut self, now: Instant) -> bool {
        if !self.dirty {
            return false;
        }
        if let (RenderMode::Throttled(interval), Some(last)) = (self.render_mode, self.last_render)
            && now.saturating_duration_since(last) < interval
        {
            return false;
        }
        self.last_render = Some(now);
        self.dirty = false;
        true
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// How long to wait for terminal input before the next tick or render.
    ///
    /// `None` means nothing is scheduled and the loop may block indefinitely.
    fn timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick = self.tick_interval.map(|interval| self.last_tick + interval);
        let next_render = match (self.dirty, self.render_mode, self.last_render) {
            (false, _, _) => None,
            (true, RenderMode::Throttled(interval), Some(last)) => Some(last + interval),
            (true, _, _) => Some(now),
        };
        let deadline = [next_tick, next_render].into_iter().flatten().min()?;
        Some(deadline.saturating_duration_since(now))
    }
}

#[derive(Debug)]
pub(super) struct EventLoop {
    schedule: Schedule,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Creates a loop with ticks disabled and `OnDirty` rendering.
    pub fn new() -> Self {
        Self {
            schedule: Schedule::new(Instant::now()),
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.schedule.tick_interval = interval;
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.schedule.render_mode = render_mode;
    }

    pub(super) fn start(&mut self) {
        self.schedule.restart(Instant::now());
    }

    /// Blocks until a tick or render is due, or a terminal event arrives.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(dt) = self.schedule.poll_tick(now) {
                return Ok(TuiEvent::Tick(dt));
            }
            if self.schedule.poll_render(now) {
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.schedule.timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.schedule.mark_dirty();
            return Ok(event::read()?.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn schedule(start: Instant) -> Schedule {
        let mut schedule = Schedule::new(start);
        schedule.tick_interval = Some(FRAME);
        schedule.render_mode = RenderMode::Throttled(FRAME);
        schedule
    }

    #[test]
    fn test_tick_reports_measured_elapsed_time() {
        let start = Instant::now();
        let mut schedule = schedule(start);

        assert_eq!(schedule.poll_tick(start + Duration::from_millis(10)), None);
        assert_eq!(
            schedule.poll_tick(start + Duration::from_millis(25)),
            Some(Duration::from_millis(25))
        );
        assert_eq!(
            schedule.poll_tick(start + Duration::from_millis(45)),
            Some(Duration::from_millis(20))
        );
    }

    #[test]
    fn test_no_ticks_without_interval() {
        let start = Instant::now();
        let mut schedule = Schedule::new(start);
        assert_eq!(schedule.poll_tick(start + Duration::from_secs(60)), None);
    }

    #[test]
    fn test_restart_discards_setup_time() {
        let start = Instant::now();
        let mut schedule = schedule(start);
        schedule.restart(start + Duration::from_secs(2));
        assert_eq!(
            schedule.poll_tick(start + Duration::from_secs(2) + FRAME),
            Some(FRAME)
        );
    }

    #[test]
    fn test_throttled_render() {
        let start = Instant::now();
        let mut schedule = schedule(start);

        assert!(schedule.poll_render(start));
        assert!(!schedule.poll_render(start + Duration::from_millis(1)));

        schedule.mark_dirty();
        assert!(!schedule.poll_render(start + Duration::from_millis(10)));
        assert!(schedule.poll_render(start + FRAME));
    }

    #[test]
    fn test_on_dirty_render() {
        let start = Instant::now();
        let mut schedule = Schedule::new(start);

        assert!(schedule.poll_render(start));
        assert!(!schedule.poll_render(start));
        schedule.mark_dirty();
        assert!(schedule.poll_render(start));
    }

    #[test]
    fn test_timeout_picks_nearest_deadline() {
        let start = Instant::now();
        let mut schedule = schedule(start);
        assert_eq!(schedule.timeout(start), Some(Duration::ZERO));

        schedule.poll_render(start);
        assert_eq!(
            schedule.timeout(start + Duration::from_millis(6)),
            Some(Duration::from_millis(10))
        );

        let mut idle = Schedule::new(start);
        idle.poll_render(start);
        assert_eq!(idle.timeout(start), None);
    }
}
