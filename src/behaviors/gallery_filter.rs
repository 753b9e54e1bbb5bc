//! Gallery category filter.
//!
//! A filter control carries a tag in `data-filter`; a gallery entry carries
//! its category in `data-category`. Clicking a control makes it the only
//! active control and shows exactly the entries whose category equals the
//! tag, or every entry when the tag is the show-all value.

use super::Behavior;
use crate::config::GalleryConfig;
use crate::dom::{Page, StyleProperty};
use crate::event::{Event, Outcome, Target, Trigger};

/// Whether an entry with `category` is visible under `tag`.
///
/// Missing attributes compare as absent on both sides, so a control without
/// a tag shows exactly the entries without a category.
pub fn is_visible(tag: Option<&str>, category: Option<&str>, show_all: &str) -> bool {
    tag == Some(show_all) || category == tag
}

pub struct GalleryFilter<N> {
    filters: Vec<N>,
    items: Vec<N>,
    config: GalleryConfig,
    active_tag: String,
}

impl<N: Clone + PartialEq> GalleryFilter<N> {
    pub fn mount<P: Page<Node = N>>(page: &P, config: &GalleryConfig) -> Option<Self> {
        let filters = page.query_all(&config.filters);
        if filters.is_empty() {
            tracing::debug!(selector = %config.filters, "no filter controls, skipping");
            return None;
        }
        Some(Self {
            filters,
            items: page.query_all(&config.items),
            active_tag: config.show_all.clone(),
            config: config.clone(),
        })
    }

    /// Tag of the most recently clicked control; the show-all value until then.
    pub fn active_tag(&self) -> &str {
        &self.active_tag
    }

    fn apply<P: Page<Node = N>>(&mut self, page: &mut P, control: &N) {
        let tag = page.attribute(control, &self.config.filter_attribute);

        for filter in &self.filters {
            page.remove_class(filter, &self.config.active_class);
        }
        page.add_class(control, &self.config.active_class);

        for item in &self.items {
            let category = page.attribute(item, &self.config.category_attribute);
            let shown = is_visible(tag.as_deref(), category.as_deref(), &self.config.show_all);
            page.set_style(item, StyleProperty::Display, if shown { "block" } else { "none" });
        }

        self.active_tag = tag.unwrap_or_default();
    }
}

impl<P: Page> Behavior<P> for GalleryFilter<P::Node> {
    fn name(&self) -> &'static str {
        "gallery-filter"
    }

    fn triggers(&self) -> Vec<Trigger<P::Node>> {
        self.filters.iter().cloned().map(Trigger::click).collect()
    }

    fn handle(&mut self, page: &mut P, event: &Event<P::Node>) -> Outcome {
        if let Event::Click {
            current: Target::Element(control),
            ..
        } = event
        {
            if self.filters.contains(control) {
                self.apply(page, control);
            }
        }
        Outcome::Proceed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{ElementSpec, MemoryPage, NodeId};

    struct Gallery {
        page: MemoryPage,
        filters: Vec<NodeId>,
        items: Vec<NodeId>,
        filter: GalleryFilter<NodeId>,
    }

    const CATEGORIES: [&str; 5] = ["driveway", "patio", "driveway", "walkway", "patio"];

    fn setup() -> Gallery {
        let mut page = MemoryPage::new();
        let body = page.body().unwrap();
        let bar = page.append(&body, ElementSpec::new("div").class("gallery-filters"));
        let filters = ["all", "driveway", "patio", "walkway"]
            .iter()
            .map(|tag| {
                let mut spec = ElementSpec::new("button")
                    .class("filter-btn")
                    .attr("data-filter", tag);
                if *tag == "all" {
                    spec = spec.class("active");
                }
                page.append(&bar, spec)
            })
            .collect();
        let grid = page.append(&body, ElementSpec::new("div").class("gallery-grid"));
        let items = CATEGORIES
            .iter()
            .map(|cat| {
                page.append(
                    &grid,
                    ElementSpec::new("div").class("gallery-item").attr("data-category", cat),
                )
            })
            .collect();
        let filter = GalleryFilter::mount(&page, &GalleryConfig::default()).unwrap();
        Gallery {
            page,
            filters,
            items,
            filter,
        }
    }

    fn click(g: &mut Gallery, index: usize) {
        let control = g.filters[index];
        g.filter.handle(
            &mut g.page,
            &Event::Click {
                current: Target::Element(control),
                target: control,
            },
        );
    }

    fn display(g: &Gallery) -> Vec<&str> {
        g.items
            .iter()
            .map(|i| g.page.style(i, StyleProperty::Display).unwrap_or("unset"))
            .collect()
    }

    fn active_filters(g: &Gallery) -> Vec<usize> {
        (0..g.filters.len())
            .filter(|&i| g.page.has_class(&g.filters[i], "active"))
            .collect()
    }

    #[test]
    fn category_click_shows_matching_entries() {
        let mut g = setup();
        click(&mut g, 2);
        assert_eq!(display(&g), ["none", "block", "none", "none", "block"]);
        assert_eq!(active_filters(&g), [2]);
        assert_eq!(g.filter.active_tag(), "patio");
    }

    #[test]
    fn all_shows_everything() {
        let mut g = setup();
        click(&mut g, 3);
        click(&mut g, 0);
        assert_eq!(display(&g), ["block"; 5]);
        assert_eq!(active_filters(&g), [0]);
        assert_eq!(g.filter.active_tag(), "all");
    }

    #[test]
    fn exactly_one_active_control_after_any_click() {
        let mut g = setup();
        for sequence in [[1, 2, 3], [3, 3, 0], [2, 0, 1]] {
            for index in sequence {
                click(&mut g, index);
                assert_eq!(active_filters(&g), [index]);
                let tag = g.page.attribute(&g.filters[index], "data-filter").unwrap();
                for (item, cat) in g.items.iter().zip(CATEGORIES) {
                    let expected = if tag == "all" || tag == cat { "block" } else { "none" };
                    assert_eq!(g.page.style(item, StyleProperty::Display), Some(expected));
                }
            }
        }
    }

    #[test]
    fn nothing_changes_before_first_click() {
        let g = setup();
        assert_eq!(display(&g), ["unset"; 5]);
        assert_eq!(g.filter.active_tag(), "all");
    }

    #[test]
    fn no_controls_no_mount() {
        let mut page = MemoryPage::new();
        let body = page.body().unwrap();
        page.append(&body, ElementSpec::new("div").class("gallery-item"));
        assert!(GalleryFilter::mount(&page, &GalleryConfig::default()).is_none());
    }

    #[test]
    fn visibility_rule() {
        assert!(is_visible(Some("all"), Some("patio"), "all"));
        assert!(is_visible(Some("all"), None, "all"));
        assert!(is_visible(Some("patio"), Some("patio"), "all"));
        assert!(!is_visible(Some("patio"), Some("driveway"), "all"));
        assert!(!is_visible(Some("patio"), None, "all"));
        assert!(is_visible(None, None, "all"));
        assert!(!is_visible(None, Some("patio"), "all"));
    }
}
