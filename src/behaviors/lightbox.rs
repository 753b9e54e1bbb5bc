//! Full-size image overlay.
//!
//! Clicking a gallery thumbnail copies its `src` and `alt` into the overlay's
//! single shared image, shows the overlay and locks page scrolling. Three
//! paths close it again: the close control (when the page has one), a click
//! on the overlay backdrop itself, and the cancel key. Opening and closing
//! always change the visible marker and the scroll lock together.

use super::Behavior;
use crate::config::LightboxConfig;
use crate::dom::{Page, StyleProperty};
use crate::event::{Event, EventKind, Outcome, Target, Trigger};

pub struct Lightbox<N> {
    overlay: N,
    image: N,
    close: Option<N>,
    thumbnails: Vec<N>,
    body: Option<N>,
    cancel_key: String,
    open_class: String,
}

impl<N: Clone + PartialEq> Lightbox<N> {
    pub fn mount<P: Page<Node = N>>(page: &P, config: &LightboxConfig) -> Option<Self> {
        let Some(overlay) = page.query(&config.overlay) else {
            tracing::debug!(selector = %config.overlay, "no lightbox overlay, skipping");
            return None;
        };
        let Some(image) = page.query(&config.image) else {
            tracing::warn!(selector = %config.image, "lightbox overlay has no image, skipping");
            return None;
        };
        Some(Self {
            overlay,
            image,
            close: page.query(&config.close),
            thumbnails: page.query_all(&config.thumbnails),
            body: page.body(),
            cancel_key: config.cancel_key.clone(),
            open_class: config.open_class.clone(),
        })
    }

    pub fn is_open<P: Page<Node = N>>(&self, page: &P) -> bool {
        page.has_class(&self.overlay, &self.open_class)
    }

    fn open<P: Page<Node = N>>(&self, page: &mut P, thumbnail: &N) {
        let src = page.attribute(thumbnail, "src").unwrap_or_default();
        let alt = page.attribute(thumbnail, "alt").unwrap_or_default();
        page.set_attribute(&self.image, "src", &src);
        page.set_attribute(&self.image, "alt", &alt);
        page.add_class(&self.overlay, &self.open_class);
        if let Some(body) = &self.body {
            page.set_style(body, StyleProperty::Overflow, "hidden");
        }
    }

    fn close<P: Page<Node = N>>(&self, page: &mut P) {
        if !self.is_open(page) {
            return;
        }
        page.remove_class(&self.overlay, &self.open_class);
        if let Some(body) = &self.body {
            page.set_style(body, StyleProperty::Overflow, "");
        }
    }
}

impl<P: Page> Behavior<P> for Lightbox<P::Node> {
    fn name(&self) -> &'static str {
        "lightbox"
    }

    fn triggers(&self) -> Vec<Trigger<P::Node>> {
        let mut triggers: Vec<_> = self.thumbnails.iter().cloned().map(Trigger::click).collect();
        if let Some(close) = &self.close {
            triggers.push(Trigger::click(close.clone()));
        }
        triggers.push(Trigger::click(self.overlay.clone()));
        triggers.push(Trigger::document(EventKind::KeyDown));
        triggers
    }

    fn handle(&mut self, page: &mut P, event: &Event<P::Node>) -> Outcome {
        match event {
            Event::Click {
                current: Target::Element(node),
                target,
            } => {
                if self.thumbnails.contains(node) {
                    self.open(page, node);
                } else if self.close.as_ref() == Some(node) {
                    self.close(page);
                } else if *node == self.overlay && *target == self.overlay {
                    self.close(page);
                }
            }
            Event::KeyDown { key } if *key == self.cancel_key => self.close(page),
            _ => {}
        }
        Outcome::Proceed
    }
}
