//! Auto-advancing hero slideshow.

use super::Behavior;
use crate::config::SlideshowConfig;
use crate::dom::Page;
use crate::event::{Event, Outcome, Trigger};
use std::time::Duration;

/// Cycles the active marker through the slides, in document order.
///
/// Mounting marks the first slide active and clears the rest, so exactly one
/// slide is active from then on. Each tick moves the cursor one slide forward,
/// wrapping at the end. The interval is never cancelled while mounted.
pub struct Slideshow<N> {
    slides: Vec<N>,
    cursor: usize,
    interval: Duration,
    active_class: String,
}

impl<N: Clone + PartialEq> Slideshow<N> {
    pub fn mount<P: Page<Node = N>>(page: &mut P, config: &SlideshowConfig) -> Option<Self> {
        let slides = page.query_all(&config.slides);
        if slides.is_empty() {
            tracing::debug!(selector = %config.slides, "no slides, no timer");
            return None;
        }
        let slideshow = Self {
            slides,
            cursor: 0,
            interval: config.interval(),
            active_class: config.active_class.clone(),
        };
        slideshow.show(page);
        Some(slideshow)
    }

    /// Index of the active slide.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    fn show<P: Page<Node = N>>(&self, page: &mut P) {
        for (i, slide) in self.slides.iter().enumerate() {
            page.set_class(slide, &self.active_class, i == self.cursor);
        }
    }

    fn advance<P: Page<Node = N>>(&mut self, page: &mut P) {
        self.cursor = (self.cursor + 1) % self.slides.len();
        self.show(page);
    }
}

impl<P: Page> Behavior<P> for Slideshow<P::Node> {
    fn name(&self) -> &'static str {
        "slideshow"
    }

    fn triggers(&self) -> Vec<Trigger<P::Node>> {
        vec![Trigger::Every(self.interval)]
    }

    fn handle(&mut self, page: &mut P, event: &Event<P::Node>) -> Outcome {
        if let Event::Tick = event {
            self.advance(page);
        }
        Outcome::Proceed
    }
}
