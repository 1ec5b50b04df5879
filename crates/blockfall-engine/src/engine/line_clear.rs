use std::time::Duration;

/// Timed clear animation for completed rows.
///
/// Full rows are not removed when detected. They stay on the playfield
/// while the animation clock runs, and [`advance`](Self::advance) hands
/// them back once the animation duration has elapsed so the caller can
/// compact the grid.
///
/// ```text
/// Idle ──begin(rows)──▶ Clearing ──elapsed ≥ duration──▶ Idle
/// ```
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use blockfall_engine::LineClear;
///
/// let mut clear = LineClear::new(Duration::from_millis(800));
/// clear.begin(vec![18, 19]);
/// assert_eq!(clear.advance(Duration::from_millis(500)), None);
/// assert_eq!(clear.advance(Duration::from_millis(300)), Some(vec![18, 19]));
/// assert!(clear.is_idle());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClear {
    duration: Duration,
    state: LineClearState,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, derive_more::IsVariant)]
pub enum LineClearState {
    #[default]
    Idle,
    Clearing {
        rows: Vec<usize>,
        elapsed: Duration,
    },
}

impl LineClear {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            state: LineClearState::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> &LineClearState {
        &self.state
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    /// Rows waiting for removal; empty while idle.
    #[must_use]
    pub fn clearing_rows(&self) -> &[usize] {
        match &self.state {
            LineClearState::Idle => &[],
            LineClearState::Clearing { rows, .. } => rows,
        }
    }

    /// Fraction of the animation that has elapsed, in `[0.0, 1.0]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        match &self.state {
            LineClearState::Idle => 0.0,
            LineClearState::Clearing { .. } if self.duration.is_zero() => 1.0,
            LineClearState::Clearing { elapsed, .. } => {
                (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
            }
        }
    }

    /// Starts the animation for `rows`, restarting the clock.
    pub fn begin(&mut self, rows: Vec<usize>) {
        debug_assert!(!rows.is_empty());
        self.state = LineClearState::Clearing {
            rows,
            elapsed: Duration::ZERO,
        };
    }

    /// Advances the clock and returns the rows to remove once the animation ends.
    pub fn advance(&mut self, dt: Duration) -> Option<Vec<usize>> {
        let LineClearState::Clearing { elapsed, .. } = &mut self.state else {
            return None;
        };
        *elapsed += dt;
        if *elapsed < self.duration {
            return None;
        }
        match std::mem::take(&mut self.state) {
            LineClearState::Clearing { rows, .. } => Some(rows),
            LineClearState::Idle => None,
        }
    }
}
