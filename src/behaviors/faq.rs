//! FAQ accordion: at most one expanded item.

use super::Behavior;
use crate::config::FaqConfig;
use crate::dom::Page;
use crate::event::{Event, Outcome, Target, Trigger};

struct Entry<N> {
    item: N,
    question: N,
}

/// Expands one FAQ item at a time.
///
/// Only items holding both a question and an answer take part. A question
/// click collapses every other item, then toggles its own, so clicking the
/// open item's question leaves the whole accordion collapsed.
pub struct FaqAccordion<N> {
    items: Vec<N>,
    entries: Vec<Entry<N>>,
    open_class: String,
}

impl<N: Clone + PartialEq> FaqAccordion<N> {
    pub fn mount<P: Page<Node = N>>(page: &P, config: &FaqConfig) -> Option<Self> {
        let items = page.query_all(&config.items);
        let entries: Vec<_> = items
            .iter()
            .filter_map(|item| {
                let question = page.query_within(item, &config.question)?;
                page.query_within(item, &config.answer)?;
                Some(Entry {
                    item: item.clone(),
                    question,
                })
            })
            .collect();
        if entries.is_empty() {
            tracing::debug!(selector = %config.items, "no FAQ questions, skipping");
            return None;
        }
        if entries.len() < items.len() {
            tracing::debug!(
                skipped = items.len() - entries.len(),
                "FAQ items without question or answer"
            );
        }
        Some(Self {
            items,
            entries,
            open_class: config.open_class.clone(),
        })
    }

    /// Items currently carrying the expanded marker.
    pub fn expanded<P: Page<Node = N>>(&self, page: &P) -> Vec<N> {
        self.items
            .iter()
            .filter(|item| page.has_class(item, &self.open_class))
            .cloned()
            .collect()
    }

    fn select<P: Page<Node = N>>(&self, page: &mut P, index: usize) {
        let chosen = &self.entries[index].item;
        for item in self.items.iter().filter(|item| *item != chosen) {
            page.remove_class(item, &self.open_class);
        }
        page.toggle_class(chosen, &self.open_class);
    }
}

impl<P: Page> Behavior<P> for FaqAccordion<P::Node> {
    fn name(&self) -> &'static str {
        "faq"
    }

    fn triggers(&self) -> Vec<Trigger<P::Node>> {
        self.entries
            .iter()
            .map(|entry| Trigger::click(entry.question.clone()))
            .collect()
    }

    fn handle(&mut self, page: &mut P, event: &Event<P::Node>) -> Outcome {
        if let Event::Click {
            current: Target::Element(node),
            ..
        } = event
        {
            if let Some(index) = self.entries.iter().position(|e| e.question == *node) {
                self.select(page, index);
            }
        }
        Outcome::Proceed
    }
}
