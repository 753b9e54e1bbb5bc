//! Smooth scrolling for in-page links.

use super::Behavior;
use crate::config::AnchorsConfig;
use crate::dom::Page;
use crate::event::{Event, Outcome, Target, Trigger};

/// Fragment id of an in-page `href`: `"#services"` gives `Some("services")`.
///
/// A bare `"#"` and anything not starting with `#` give `None`.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Intercepts clicks on same-page links and scrolls to their target.
///
/// A bare `#` link keeps its default behavior. Any other fragment link has
/// its navigation cancelled; the element with the matching id, if there is
/// one, is scrolled to the top of the viewport.
pub struct AnchorScroll<N> {
    links: Vec<N>,
}

impl<N: Clone + PartialEq> AnchorScroll<N> {
    pub fn mount<P: Page<Node = N>>(page: &P, config: &AnchorsConfig) -> Option<Self> {
        let links = page.query_all(&config.links);
        if links.is_empty() {
            tracing::debug!(selector = %config.links, "no in-page links, skipping");
            return None;
        }
        Some(Self { links })
    }

    fn follow<P: Page<Node = N>>(&self, page: &mut P, link: &N) -> Outcome {
        let href = page.attribute(link, "href").unwrap_or_default();
        let Some(id) = fragment_id(&href) else {
            return Outcome::Proceed;
        };
        match page.element_by_id(id) {
            Some(target) => page.scroll_into_view(&target),
            None => tracing::debug!(%href, "anchor target not found"),
        }
        Outcome::PreventDefault
    }
}

impl<P: Page> Behavior<P> for AnchorScroll<P::Node> {
    fn name(&self) -> &'static str {
        "anchors"
    }

    fn triggers(&self) -> Vec<Trigger<P::Node>> {
        self.links.iter().cloned().map(Trigger::click).collect()
    }

    fn handle(&mut self, page: &mut P, event: &Event<P::Node>) -> Outcome {
        match event {
            Event::Click {
                current: Target::Element(link),
                ..
            } if self.links.contains(link) => self.follow(page, link),
            _ => Outcome::Proceed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{ElementSpec, MemoryPage, NodeId};

    fn page_with_links(hrefs: &[&str]) -> (MemoryPage, Vec<NodeId>, NodeId) {
        let mut page = MemoryPage::new();
        let body = page.body().unwrap();
        let nav = page.append(&body, ElementSpec::new("nav"));
        let links = hrefs
            .iter()
            .map(|href| page.append(&nav, ElementSpec::new("a").attr("href", href)))
            .collect();
        let services = page.append(&body, ElementSpec::new("section").id("services"));
        (page, links, services)
    }

    fn click(page: &mut MemoryPage, anchors: &mut AnchorScroll<NodeId>, link: NodeId) -> Outcome {
        anchors.handle(
            page,
            &Event::Click {
                current: Target::Element(link),
                target: link,
            },
        )
    }

    #[test]
    fn scrolls_to_fragment_target() {
        let (mut page, links, services) = page_with_links(&["#services"]);
        let mut anchors = AnchorScroll::mount(&page, &AnchorsConfig::default()).unwrap();
        assert_eq!(click(&mut page, &mut anchors, links[0]), Outcome::PreventDefault);
        assert_eq!(page.scrolled(), [services]);
    }

    #[test]
    fn bare_hash_is_not_intercepted() {
        let (mut page, links, _) = page_with_links(&["#"]);
        let mut anchors = AnchorScroll::mount(&page, &AnchorsConfig::default()).unwrap();
        assert_eq!(click(&mut page, &mut anchors, links[0]), Outcome::Proceed);
        assert!(page.scrolled().is_empty());
    }

    #[test]
    fn missing_target_prevents_default_without_scrolling() {
        let (mut page, links, _) = page_with_links(&["#missing"]);
        let mut anchors = AnchorScroll::mount(&page, &AnchorsConfig::default()).unwrap();
        assert_eq!(click(&mut page, &mut anchors, links[0]), Outcome::PreventDefault);
        assert!(page.scrolled().is_empty());
    }

    #[test]
    fn only_fragment_links_are_mounted() {
        let (page, links, _) = page_with_links(&["/about.html", "#services", "https://example.com"]);
        let anchors = AnchorScroll::mount(&page, &AnchorsConfig::default()).unwrap();
        assert_eq!(
            Behavior::<MemoryPage>::triggers(&anchors),
            vec![Trigger::click(links[1])]
        );
    }

    #[test]
    fn href_rewritten_after_mount_is_followed_as_is() {
        let (mut page, links, _) = page_with_links(&["#services"]);
        let mut anchors = AnchorScroll::mount(&page, &AnchorsConfig::default()).unwrap();
        page.set_attribute(&links[0], "href", "/elsewhere");
        assert_eq!(click(&mut page, &mut anchors, links[0]), Outcome::Proceed);
    }

    #[test]
    fn no_links_no_mount() {
        let (page, _, _) = page_with_links(&["/about.html"]);
        assert!(AnchorScroll::mount(&page, &AnchorsConfig::default()).is_none());
    }

    #[test]
    fn fragment_ids() {
        assert_eq!(fragment_id("#services"), Some("services"));
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id("services"), None);
        assert_eq!(fragment_id(""), None);
    }
}
