//! Native host for mounted behaviors.
//!
//! [`Site`] owns a [`Page`] and the behaviors mounted on it, and plays the
//! browser's part for everything the behaviors subscribed to:
//!
//! - **Bubbling.** An event starts at the element it happened on and walks up
//!   through its ancestors; at each element, listeners run in the order they
//!   were registered. Document listeners run last.
//! - **Default actions.** Every entry point returns the combined [`Outcome`]
//!   so callers can see whether a browser would have followed the link or
//!   submitted the form.
//! - **Timers.** Time only moves when [`Site::advance`] is called, so interval
//!   behavior is deterministic.
//!
//! ```rust
//! use sitewire::config::SiteConfig;
//! use sitewire::dom::{ElementSpec, MemoryPage, Page};
//! use sitewire::site::Site;
//! use std::time::Duration;
//!
//! let mut page = MemoryPage::new();
//! let body = page.body().unwrap();
//! let hero = page.append(&body, ElementSpec::new("section"));
//! let first = page.append(&hero, ElementSpec::new("div").class("hero-slide"));
//! let second = page.append(&hero, ElementSpec::new("div").class("hero-slide"));
//!
//! let mut site = Site::mount(page, &SiteConfig::default());
//! site.advance(Duration::from_secs(5));
//! assert!(!site.page().has_class(&first, "active"));
//! assert!(site.page().has_class(&second, "active"));
//! ```

use crate::behaviors::{self, BoxedBehavior};
use crate::config::SiteConfig;
use crate::dom::Page;
use crate::event::{Event, EventKind, Outcome, Target, Trigger};
use std::time::Duration;

/// Most ticks one timer fires in a single [`Site::advance`].
pub const MAX_CATCH_UP_TICKS: u32 = 10_000;

struct Listener<N> {
    behavior: usize,
    target: Target<N>,
    kind: EventKind,
}

struct Timer {
    behavior: usize,
    period: Duration,
    elapsed: Duration,
}

/// A page with its behaviors attached.
pub struct Site<P: Page> {
    page: P,
    behaviors: Vec<BoxedBehavior<P>>,
    listeners: Vec<Listener<P::Node>>,
    timers: Vec<Timer>,
}

impl<P: Page + 'static> Site<P> {
    /// Mount every behavior the page supports.
    pub fn mount(mut page: P, config: &SiteConfig) -> Self {
        let behaviors = behaviors::mount_all(&mut page, config);
        Self::with_behaviors(page, behaviors)
    }
}

impl<P: Page> Site<P> {
    /// Attach already-mounted behaviors, registering their triggers in order.
    pub fn with_behaviors(page: P, behaviors: Vec<BoxedBehavior<P>>) -> Self {
        let mut listeners = Vec::new();
        let mut timers = Vec::new();
        for (index, behavior) in behaviors.iter().enumerate() {
            for trigger in behavior.triggers() {
                match trigger {
                    Trigger::Listen { target, kind } => listeners.push(Listener {
                        behavior: index,
                        target,
                        kind,
                    }),
                    Trigger::Every(period) if period.is_zero() => {
                        tracing::warn!(behavior = behavior.name(), "ignoring zero-length interval");
                    }
                    Trigger::Every(period) => timers.push(Timer {
                        behavior: index,
                        period,
                        elapsed: Duration::ZERO,
                    }),
                }
            }
        }
        tracing::debug!(
            behaviors = behaviors.len(),
            listeners = listeners.len(),
            timers = timers.len(),
            "site ready"
        );
        Self {
            page,
            behaviors,
            listeners,
            timers,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Mutate the page directly, as a visitor typing into a field would.
    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    /// Names of the mounted behaviors, in mount order.
    pub fn behavior_names(&self) -> Vec<&'static str> {
        self.behaviors.iter().map(|b| b.name()).collect()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    /// Click on `target`.
    pub fn click(&mut self, target: &P::Node) -> Outcome {
        let clicked = target.clone();
        self.dispatch(EventKind::Click, Some(target), |current| Event::Click {
            current,
            target: clicked.clone(),
        })
    }

    /// Press a key with nothing in particular focused.
    pub fn key_down(&mut self, key: &str) -> Outcome {
        self.dispatch(EventKind::KeyDown, None, |_| Event::KeyDown {
            key: key.to_string(),
        })
    }

    /// Submit `form`.
    pub fn submit(&mut self, form: &P::Node) -> Outcome {
        let submitted = form.clone();
        self.dispatch(EventKind::Submit, Some(form), |_| Event::Submit {
            form: submitted.clone(),
        })
    }

    /// Let `by` pass, firing every interval that comes due.
    ///
    /// Each timer fires once per whole period elapsed; the remainder carries
    /// over to the next call. A timer more than [`MAX_CATCH_UP_TICKS`] behind
    /// fires that many times and drops the rest of its backlog.
    pub fn advance(&mut self, by: Duration) {
        for timer in &mut self.timers {
            timer.elapsed = timer.elapsed.saturating_add(by);
            let mut fired = 0;
            while timer.elapsed >= timer.period {
                if fired == MAX_CATCH_UP_TICKS {
                    tracing::warn!(
                        behavior = self.behaviors[timer.behavior].name(),
                        backlog = ?timer.elapsed,
                        "timer fell behind, dropping backlog"
                    );
                    timer.elapsed = Duration::ZERO;
                    break;
                }
                timer.elapsed -= timer.period;
                self.behaviors[timer.behavior].handle(&mut self.page, &Event::Tick);
                fired += 1;
            }
        }
    }

    /// Deliver one event along its propagation path.
    fn dispatch<F>(&mut self, kind: EventKind, origin: Option<&P::Node>, make: F) -> Outcome
    where
        F: Fn(Target<P::Node>) -> Event<P::Node>,
    {
        let mut path: Vec<Target<P::Node>> =
            std::iter::successors(origin.cloned(), |node| self.page.parent(node))
                .map(Target::Element)
                .collect();
        path.push(Target::Document);

        let mut outcome = Outcome::Proceed;
        for current in path {
            let listening: Vec<usize> = self
                .listeners
                .iter()
                .filter(|l| l.kind == kind && l.target == current)
                .map(|l| l.behavior)
                .collect();
            if listening.is_empty() {
                continue;
            }
            let event = make(current);
            for index in listening {
                let behavior = &mut self.behaviors[index];
                tracing::trace!(behavior = behavior.name(), event = kind.dom_name(), "dispatch");
                outcome = outcome.and(behavior.handle(&mut self.page, &event));
            }
        }
        outcome
    }
}
