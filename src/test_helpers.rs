//! Shared test utilities for the sitewire test suite.
//!
//! Builds the stock marketing page in a [`MemoryPage`]: navigation, hero
//! slideshow, filterable gallery with lightbox, FAQ, contact form and
//! in-page anchors, all using the selectors from `SiteConfig::default()`.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let (mut page, f) = fixture_page();
//! type_into(&mut page, &f, Field::Email, "a@b.com");
//! assert_eq!(active_indices(&page, &f.slides), Vec::<usize>::new());
//! ```

use crate::behaviors::Field;
use crate::dom::{ElementSpec, MemoryPage, NodeId, Page};

/// Gallery categories, one per entry, in document order.
pub const CATEGORIES: [&str; 6] = ["driveway", "patio", "walkway", "driveway", "patio", "walkway"];

/// Filter tags, one per control, in document order.
pub const FILTER_TAGS: [&str; 4] = ["all", "driveway", "patio", "walkway"];

/// Section ids targeted by the navigation links, in link order.
pub const SECTION_IDS: [&str; 4] = ["services", "gallery", "faq", "contact"];

/// Handles to the interesting elements of [`fixture_page`].
#[derive(Debug, Clone)]
pub struct Fixture {
    pub nav_toggle: NodeId,
    /// Icon span inside the toggle button.
    pub nav_toggle_icon: NodeId,
    pub nav_menu: NodeId,
    /// `#services`, `#gallery`, `#faq`, `#contact`, then a bare `#`.
    pub nav_links: Vec<NodeId>,
    pub hero: NodeId,
    pub slides: Vec<NodeId>,
    pub sections: Vec<NodeId>,
    pub filters: Vec<NodeId>,
    pub gallery_items: Vec<NodeId>,
    pub thumbnails: Vec<NodeId>,
    pub lightbox: NodeId,
    pub lightbox_close: NodeId,
    pub lightbox_image: NodeId,
    pub faq_items: Vec<NodeId>,
    pub faq_questions: Vec<NodeId>,
    pub form: NodeId,
    /// One control per [`Field::ALL`] entry, same order.
    pub fields: Vec<NodeId>,
}

impl Fixture {
    pub fn field(&self, field: Field) -> NodeId {
        let index = Field::ALL.iter().position(|f| *f == field).unwrap();
        self.fields[index]
    }
}

// =========================================================================
// Fixture setup
// =========================================================================

/// The full stock page.
pub fn fixture_page() -> (MemoryPage, Fixture) {
    let mut page = MemoryPage::new();
    let body = page.body().unwrap();

    // Navigation
    let header = page.append(&body, ElementSpec::new("header"));
    let nav = page.append(&header, ElementSpec::new("nav"));
    let nav_toggle = page.append(
        &nav,
        ElementSpec::new("button")
            .class("menu-toggle")
            .attr("aria-expanded", "false"),
    );
    let nav_toggle_icon = page.append(&nav_toggle, ElementSpec::new("span").class("bar"));
    let nav_menu = page.append(&nav, ElementSpec::new("ul").class("nav-menu"));
    let mut nav_links = Vec::new();
    for href in SECTION_IDS.iter().map(|id| format!("#{id}")).chain(["#".to_string()]) {
        let li = page.append(&nav_menu, ElementSpec::new("li"));
        nav_links.push(page.append(&li, ElementSpec::new("a").attr("href", &href)));
    }
    let li = page.append(&nav_menu, ElementSpec::new("li"));
    page.append(&li, ElementSpec::new("a").attr("href", "/careers.html"));

    // Hero
    let hero = page.append(&body, ElementSpec::new("section").class("hero"));
    let slides = (0..3)
        .map(|i| {
            page.append(
                &hero,
                ElementSpec::new("div")
                    .class("hero-slide")
                    .attr("data-index", &i.to_string()),
            )
        })
        .collect();

    let mut sections = Vec::new();

    // Services
    let services = page.append(&body, ElementSpec::new("section").id("services"));
    page.append(&services, ElementSpec::new("h2"));
    sections.push(services);

    // Gallery
    let gallery = page.append(&body, ElementSpec::new("section").id("gallery"));
    sections.push(gallery);
    let bar = page.append(&gallery, ElementSpec::new("div").class("gallery-filters"));
    let filters = FILTER_TAGS
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
    let grid = page.append(&gallery, ElementSpec::new("div").class("gallery-grid"));
    let mut gallery_items = Vec::new();
    let mut thumbnails = Vec::new();
    for (i, category) in CATEGORIES.iter().enumerate() {
        let item = page.append(
            &grid,
            ElementSpec::new("div")
                .class("gallery-item")
                .attr("data-category", category),
        );
        thumbnails.push(page.append(
            &item,
            ElementSpec::new("img")
                .attr("src", &format!("images/{category}-{i}.jpg"))
                .attr("alt", &format!("{category} project {i}")),
        ));
        gallery_items.push(item);
    }

    // Lightbox
    let lightbox = page.append(&body, ElementSpec::new("div").class("lightbox"));
    let lightbox_close = page.append(&lightbox, ElementSpec::new("span").class("lightbox-close"));
    let lightbox_image = page.append(&lightbox, ElementSpec::new("img"));

    // FAQ
    let faq = page.append(&body, ElementSpec::new("section").id("faq"));
    sections.push(faq);
    let mut faq_items = Vec::new();
    let mut faq_questions = Vec::new();
    for _ in 0..3 {
        let item = page.append(&faq, ElementSpec::new("div").class("faq-item"));
        faq_questions.push(page.append(&item, ElementSpec::new("button").class("faq-question")));
        page.append(&item, ElementSpec::new("div").class("faq-answer"));
        faq_items.push(item);
    }

    // Contact
    let contact = page.append(
        &body,
        ElementSpec::new("section").id("contact").class("contact-form"),
    );
    sections.push(contact);
    let form = page.append(&contact, ElementSpec::new("form"));
    let fields = Field::ALL
        .into_iter()
        .map(|field| {
            let spec = match field {
                Field::Message => ElementSpec::new("textarea"),
                Field::Email => ElementSpec::new("input").attr("type", "email"),
                Field::Phone => ElementSpec::new("input").attr("type", "tel"),
                Field::Name => ElementSpec::new("input").attr("type", "text"),
            };
            page.append(&form, spec.attr("name", field.name()))
        })
        .collect();
    page.append(&form, ElementSpec::new("button").attr("type", "submit"));

    let fixture = Fixture {
        nav_toggle,
        nav_toggle_icon,
        nav_menu,
        nav_links,
        hero,
        slides,
        sections,
        filters,
        gallery_items,
        thumbnails,
        lightbox,
        lightbox_close,
        lightbox_image,
        faq_items,
        faq_questions,
        form,
        fields,
    };
    (page, fixture)
}

// =========================================================================
// Interaction helpers
// =========================================================================

pub fn type_into(page: &mut MemoryPage, fixture: &Fixture, field: Field, value: &str) {
    page.set_value(&fixture.field(field), value);
}

/// Fill every contact field, in [`Field::ALL`] order.
pub fn fill_form(page: &mut MemoryPage, fixture: &Fixture, values: [&str; 4]) {
    for (field, value) in Field::ALL.into_iter().zip(values) {
        type_into(page, fixture, field, value);
    }
}

// =========================================================================
// Extractors
// =========================================================================

/// Indices of `nodes` carrying the `active` marker.
pub fn active_indices(page: &MemoryPage, nodes: &[NodeId]) -> Vec<usize> {
    nodes
        .iter()
        .enumerate()
        .filter(|(_, n)| page.has_class(n, "active"))
        .map(|(i, _)| i)
        .collect()
}

/// Current contact field values, in [`Field::ALL`] order.
pub fn form_values(page: &MemoryPage, fixture: &Fixture) -> Vec<String> {
    fixture.fields.iter().map(|n| page.value(n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_matches_default_selectors() {
        let (page, f) = fixture_page();
        assert_eq!(page.query(".menu-toggle"), Some(f.nav_toggle));
        assert_eq!(page.query(".nav-menu"), Some(f.nav_menu));
        assert_eq!(page.query_all(".hero-slide"), f.slides);
        assert_eq!(page.query_all(".filter-btn"), f.filters);
        assert_eq!(page.query_all(".gallery-item img"), f.thumbnails);
        assert_eq!(page.query(".lightbox img"), Some(f.lightbox_image));
        assert_eq!(page.query(".contact-form form"), Some(f.form));
        assert_eq!(page.query_all(r##"a[href^="#"]"##), f.nav_links);
    }

    #[test]
    fn fill_form_sets_values_in_field_order() {
        let (mut page, f) = fixture_page();
        fill_form(&mut page, &f, ["A", "a@b.com", "1", "hi"]);
        assert_eq!(form_values(&page, &f), ["A", "a@b.com", "1", "hi"]);
        assert_eq!(page.value(&f.field(Field::Phone)), "1");
    }
}
