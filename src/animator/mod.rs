//! Timed playback of a search.
//!
//! The [`Animator`] turns a [`SolveResult`] into a sequence of grid snapshots on a virtual clock:
//! visited cells first, then a path head that walks from start to end with a growing trail, then a
//! short pause before the head is demoted and a summary is reported. It never sleeps; a host asks
//! for [`Animator::next_deadline`], waits however it likes, and calls [`Animator::advance_to`].

mod step;
mod timeline;

use std::{cell::Cell, fmt, rc::Rc, sync::mpsc::Sender};

pub use step::Step;
use timeline::Timeline;

use crate::{
    maze::{Grid, Position},
    solvers::{Algorithm, SolveResult},
};

/// Playback speed presets, each a base delay in clock units between steps.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Speed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl Speed {
    pub const ALL: [Speed; 3] = [Speed::Slow, Speed::Normal, Speed::Fast];

    pub fn base_delay(self) -> u64 {
        match self {
            Speed::Slow => 40,
            Speed::Normal => 20,
            Speed::Fast => 5,
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speed::Slow => write!(f, "slow"),
            Speed::Normal => write!(f, "normal"),
            Speed::Fast => write!(f, "fast"),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    #[default]
    Idle,
    VisitedPlayback,
    PathPlayback,
    Finalizing,
}

/// Reported once an animation has played to the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSummary {
    pub algorithm: Algorithm,
    /// Cells on the path, `None` when the end was unreachable.
    pub path_length: Option<usize>,
    pub visited_count: usize,
}

/// Messages for hosts that consume playback through a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationEvent {
    Snapshot(Grid),
    Completed(AnimationSummary),
}

/// Receiver of playback output.
pub trait AnimationSink {
    /// Called once per fired step with the new snapshot.
    fn snapshot(&mut self, grid: &Grid);
    /// Called when the finalize step has fired.
    fn completed(&mut self, summary: AnimationSummary);
}

impl AnimationSink for Sender<AnimationEvent> {
    fn snapshot(&mut self, grid: &Grid) {
        // Error only happens if the receiver is dropped, which means nobody renders anymore
        self.send(AnimationEvent::Snapshot(grid.clone())).ok();
    }

    fn completed(&mut self, summary: AnimationSummary) {
        self.send(AnimationEvent::Completed(summary)).ok();
    }
}

/// Adapts a pair of closures into a sink.
pub struct Callbacks<M, C> {
    pub on_mutation: M,
    pub on_complete: C,
}

impl<M, C> AnimationSink for Callbacks<M, C>
where
    M: FnMut(&Grid),
    C: FnMut(AnimationSummary),
{
    fn snapshot(&mut self, grid: &Grid) {
        (self.on_mutation)(grid);
    }

    fn completed(&mut self, summary: AnimationSummary) {
        (self.on_complete)(summary);
    }
}

/// Cancels every step scheduled so far, from anywhere that holds a clone.
///
/// Bumping the shared epoch is enough: the animator drops any step whose epoch is stale before
/// applying it, so a step already being applied completes and nothing after it fires.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    epoch: Rc<Cell<u64>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.epoch.set(self.epoch.get() + 1);
    }

    fn current(&self) -> u64 {
        self.epoch.get()
    }
}

/// The path and summary of the animation currently playing.
struct Playback {
    path: Vec<Position>,
    summary: AnimationSummary,
}

pub struct Animator {
    /// Working copy of the grid, owned by the animator while it plays.
    grid: Grid,
    /// Virtual clock, only moves forward.
    now: u64,
    cancel: CancelHandle,
    /// Epoch the current timeline was scheduled under.
    epoch: u64,
    timeline: Timeline,
    playback: Option<Playback>,
    state: AnimationState,
    sink: Box<dyn AnimationSink>,
}

impl Animator {
    pub fn new(grid: Grid, sink: impl AnimationSink + 'static) -> Self {
        Animator {
            grid,
            now: 0,
            cancel: CancelHandle::default(),
            epoch: 0,
            timeline: Timeline::default(),
            playback: None,
            state: AnimationState::Idle,
            sink: Box::new(sink),
        }
    }

    /// The current working snapshot.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Whether a cancel has been requested since the timeline was scheduled.
    fn is_stale(&self) -> bool {
        self.epoch != self.cancel.current()
    }

    pub fn state(&self) -> AnimationState {
        if self.is_stale() {
            AnimationState::Idle
        } else {
            self.state
        }
    }

    pub fn is_animating(&self) -> bool {
        self.state() != AnimationState::Idle
    }

    /// Number of steps still waiting to fire.
    pub fn pending_steps(&self) -> usize {
        if self.is_stale() { 0 } else { self.timeline.len() }
    }

    /// Replace the working grid. Rejected while animating.
    pub fn load(&mut self, grid: Grid) -> bool {
        if self.is_animating() {
            tracing::warn!("[animator] refusing to load a new grid while animating");
            return false;
        }
        self.grid = grid;
        true
    }

    /// Discard every step not yet fired. Safe to call at any time, including when idle.
    pub fn cancel_all(&mut self) {
        self.cancel.cancel();
        self.sync_epoch();
    }

    /// Drop the timeline if a cancel happened since it was scheduled.
    fn sync_epoch(&mut self) {
        if self.is_stale() {
            if !self.timeline.is_empty() {
                tracing::debug!(
                    "[animator] cancelled with {} steps pending",
                    self.timeline.len()
                );
            }
            self.timeline.clear();
            self.playback = None;
            self.state = AnimationState::Idle;
            self.epoch = self.cancel.current();
        }
    }

    /// Schedule playback of `result` on the working grid, starting at the current clock.
    ///
    /// Returns `false` and changes nothing if an animation is already running.
    pub fn start(&mut self, result: &SolveResult, speed: Speed) -> bool {
        self.sync_epoch();
        if self.is_animating() {
            tracing::warn!("[animator] start rejected, animation already in progress");
            return false;
        }
        // Invalidate anything that might still be around before scheduling new steps
        self.cancel_all();

        let delay = speed.base_delay();
        let base = self.now;
        let path = result.path.clone().unwrap_or_default();
        let visited = result.visited_order.len() as u64;

        for (i, &pos) in result.visited_order.iter().enumerate() {
            self.timeline
                .schedule(base + i as u64 * delay, self.epoch, Step::Visit(pos));
        }
        for i in 0..path.len() {
            self.timeline.schedule(
                base + (visited + i as u64) * delay,
                self.epoch,
                Step::Path(i),
            );
        }
        let last_step = (visited + path.len() as u64).saturating_sub(1) * delay;
        self.timeline
            .schedule(base + last_step + 2 * delay, self.epoch, Step::Finalize);

        self.playback = Some(Playback {
            path,
            summary: AnimationSummary {
                algorithm: result.algorithm,
                path_length: result.path_len(),
                visited_count: result.visited_order.len(),
            },
        });
        self.update_state();
        tracing::debug!(
            "[animator] scheduled {} steps at {} per step, starting {:?}",
            self.timeline.len(),
            delay,
            self.state
        );
        true
    }

    /// Phase follows whatever step is due next.
    fn update_state(&mut self) {
        self.state = match self.timeline.peek().map(|s| s.step) {
            Some(Step::Visit(_)) => AnimationState::VisitedPlayback,
            Some(Step::Path(_)) => AnimationState::PathPlayback,
            Some(Step::Finalize) => AnimationState::Finalizing,
            None => AnimationState::Idle,
        };
    }

    /// Clock time of the next step, if anything is scheduled.
    pub fn next_deadline(&self) -> Option<u64> {
        if self.is_stale() {
            None
        } else {
            self.timeline.next_due()
        }
    }

    /// Move the clock to `now` and fire every step due by then, in order.
    ///
    /// Returns the number of steps fired. A clock value in the past is ignored.
    pub fn advance_to(&mut self, now: u64) -> usize {
        self.now = self.now.max(now);
        let mut fired = 0;
        loop {
            // Re-checked before every step so a cancel from inside a sink takes effect at once
            self.sync_epoch();
            let Some(scheduled) = self.timeline.pop_due(self.now) else {
                break;
            };
            if scheduled.epoch != self.epoch {
                continue;
            }
            let Some(playback) = self.playback.as_ref() else {
                break;
            };

            let next = scheduled.step.apply(&self.grid, &playback.path);
            let summary = playback.summary;
            self.grid = next;
            tracing::trace!("[animator] t={} {:?}", scheduled.at, scheduled.step);
            self.sink.snapshot(&self.grid);
            fired += 1;

            if scheduled.step == Step::Finalize {
                self.timeline.clear();
                self.playback = None;
                self.state = AnimationState::Idle;
                tracing::debug!("[animator] finished at t={}: {:?}", scheduled.at, summary);
                self.sink.completed(summary);
            } else {
                self.update_state();
            }
        }
        fired
    }

    /// Fire everything left on the timeline. Returns the clock time of the last step.
    pub fn run_to_completion(&mut self) -> u64 {
        while let Some(deadline) = self.next_deadline() {
            self.advance_to(deadline);
        }
        self.now
    }
}
