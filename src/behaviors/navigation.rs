//! Mobile navigation toggle.
//!
//! Clicking the toggle flips the menu's open marker and mirrors it in the
//! toggle's `aria-expanded`. Any click outside both the toggle and the menu
//! closes an open menu.
//!
//! The toggle's own listener always runs before the document listener for the
//! same click, and the document listener ignores clicks landing inside the
//! toggle, so opening the menu is never undone by the click that opened it.

use super::Behavior;
use crate::config::NavigationConfig;
use crate::dom::Page;
use crate::event::{Event, EventKind, Outcome, Target, Trigger};

pub const ARIA_EXPANDED: &str = "aria-expanded";

pub struct Navigation<N> {
    toggle: N,
    menu: N,
    open_class: String,
}

impl<N: Clone + PartialEq> Navigation<N> {
    pub fn mount<P: Page<Node = N>>(page: &P, config: &NavigationConfig) -> Option<Self> {
        let (Some(toggle), Some(menu)) = (page.query(&config.toggle), page.query(&config.menu))
        else {
            tracing::debug!(
                toggle = %config.toggle,
                menu = %config.menu,
                "navigation toggle or menu missing, skipping"
            );
            return None;
        };
        Some(Self {
            toggle,
            menu,
            open_class: config.open_class.clone(),
        })
    }

    pub fn is_open<P: Page<Node = N>>(&self, page: &P) -> bool {
        page.has_class(&self.menu, &self.open_class)
    }

    fn toggle<P: Page<Node = N>>(&self, page: &mut P) {
        let open = page.toggle_class(&self.menu, &self.open_class);
        page.set_attribute(&self.toggle, ARIA_EXPANDED, if open { "true" } else { "false" });
    }

    fn dismiss<P: Page<Node = N>>(&self, page: &mut P, clicked: &N) {
        if page.contains(&self.toggle, clicked) || page.contains(&self.menu, clicked) {
            return;
        }
        if self.is_open(page) {
            page.remove_class(&self.menu, &self.open_class);
            page.set_attribute(&self.toggle, ARIA_EXPANDED, "false");
        }
    }
}

impl<P: Page> Behavior<P> for Navigation<P::Node> {
    fn name(&self) -> &'static str {
        "navigation"
    }

    fn triggers(&self) -> Vec<Trigger<P::Node>> {
        vec![
            Trigger::click(self.toggle.clone()),
            Trigger::document(EventKind::Click),
        ]
    }

    fn handle(&mut self, page: &mut P, event: &Event<P::Node>) -> Outcome {
        match event {
            Event::Click {
                current: Target::Element(node),
                ..
            } if *node == self.toggle => self.toggle(page),
            Event::Click {
                current: Target::Document,
                target,
            } => self.dismiss(page, target),
            _ => {}
        }
        Outcome::Proceed
    }
}
