//! The seven page behaviors.
//!
//! Each behavior is mounted once against a [`Page`]. Mounting looks up the
//! elements the behavior needs; when a required element is missing the mount
//! returns `None` and the behavior simply does not exist for that page. A
//! mounted behavior declares its [`Trigger`]s and reacts to the matching
//! [`Event`]s. Behaviors never talk to each other.
//!
//! | Behavior | Requires | Reacts to |
//! |---|---|---|
//! | [`Navigation`] | toggle + menu | toggle click, any document click |
//! | [`Slideshow`] | ≥ 1 slide | interval tick |
//! | [`GalleryFilter`] | ≥ 1 filter control | filter click |
//! | [`Lightbox`] | overlay + overlay image | thumbnail/close/overlay click, cancel key |
//! | [`FaqAccordion`] | ≥ 1 item with question and answer | question click |
//! | [`ContactForm`] | the form | submit |
//! | [`AnchorScroll`] | ≥ 1 in-page link | link click |

pub mod anchors;
pub mod contact_form;
pub mod faq;
pub mod gallery_filter;
pub mod lightbox;
pub mod navigation;
pub mod slideshow;

pub use anchors::AnchorScroll;
pub use contact_form::{ContactForm, ContactSubmission, Field, Validation};
pub use faq::FaqAccordion;
pub use gallery_filter::GalleryFilter;
pub use lightbox::Lightbox;
pub use navigation::Navigation;
pub use slideshow::Slideshow;

use crate::config::SiteConfig;
use crate::dom::Page;
use crate::event::{Event, Outcome, Trigger};

/// A mounted page behavior.
pub trait Behavior<P: Page> {
    /// Short stable name, used in logs.
    fn name(&self) -> &'static str;

    /// Subscriptions the host must register for this behavior.
    fn triggers(&self) -> Vec<Trigger<P::Node>>;

    /// React to one event. Only events matching a declared trigger arrive here.
    fn handle(&mut self, page: &mut P, event: &Event<P::Node>) -> Outcome;
}

pub type BoxedBehavior<P> = Box<dyn Behavior<P>>;

fn keep<P, B>(mounted: &mut Vec<BoxedBehavior<P>>, behavior: Option<B>)
where
    P: Page,
    B: Behavior<P> + 'static,
{
    if let Some(behavior) = behavior {
        tracing::debug!(behavior = behavior.name(), "mounted");
        mounted.push(Box::new(behavior));
    }
}

/// Run the six ready-time initializers, in page order.
pub fn mount_initializers<P: Page + 'static>(
    page: &mut P,
    config: &SiteConfig,
) -> Vec<BoxedBehavior<P>> {
    let mut mounted = Vec::new();
    keep(&mut mounted, Navigation::mount(page, &config.navigation));
    keep(&mut mounted, Slideshow::mount(page, &config.slideshow));
    keep(&mut mounted, GalleryFilter::mount(page, &config.gallery));
    keep(&mut mounted, Lightbox::mount(page, &config.lightbox));
    keep(&mut mounted, FaqAccordion::mount(page, &config.faq));
    keep(&mut mounted, ContactForm::mount(page, &config.contact));
    mounted
}

/// Mount the anchor smooth-scroll behavior on its own.
///
/// In the browser this runs as soon as the module loads, before the document
/// is ready; everything else waits for [`mount_initializers`].
pub fn mount_anchors<P: Page + 'static>(page: &mut P, config: &SiteConfig) -> Vec<BoxedBehavior<P>> {
    let mut mounted = Vec::new();
    keep(&mut mounted, AnchorScroll::mount(page, &config.anchors));
    mounted
}

/// Every behavior the page supports.
pub fn mount_all<P: Page + 'static>(page: &mut P, config: &SiteConfig) -> Vec<BoxedBehavior<P>> {
    let mut mounted = mount_initializers(page, config);
    mounted.extend(mount_anchors(page, config));
    mounted
}
