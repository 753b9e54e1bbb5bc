//! # Sitewire
//!
//! Client-side behaviors for a small-business marketing site, compiled to
//! WebAssembly. A single static page gets a collapsible mobile menu, an
//! auto-advancing hero slideshow, a filterable project gallery with a
//! full-size lightbox, an FAQ accordion, a validated contact form and smooth
//! in-page scrolling. No server round trips: everything happens against the
//! page already loaded.
//!
//! # Architecture: Behaviors Over a Page Seam
//!
//! ```text
//! Page (trait)          ← WebPage (web-sys, wasm32)  |  MemoryPage (tests, native)
//!    ↑
//! Behavior::mount       ← looks up elements once, or declines (None)
//!    ↓
//! Trigger subscriptions → host (web::boot | site::Site) owns listeners + timers
//!    ↓
//! Behavior::handle      ← events delivered back, Outcome says "prevent default"
//! ```
//!
//! Behaviors never touch `web-sys`. They are written against the [`dom::Page`]
//! trait and declare what they want to hear about as [`event::Trigger`]s. The
//! host registers the listeners, keeps them alive and tears them down. That
//! split keeps every behavior testable natively against an in-memory page.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`dom`] | The `Page` trait, the in-memory page, and the CSS selector subset they share |
//! | [`event`] | Triggers, events and outcomes exchanged between behaviors and their host |
//! | [`behaviors`] | The seven page behaviors and the mount order |
//! | [`site`] | Native host: bubbling dispatch and a virtual clock |
//! | [`config`] | TOML configuration: selectors, markers, messages, log level |
//! | [`logging`] | `tracing` subscriber setup for the terminal and the browser console |
//! | `web` | wasm32 only: `web-sys` page backend and the module entry points |
//!
//! # Design Decisions
//!
//! ## Missing Elements Are Not Errors
//!
//! The same script ships on every page of the site, and most pages only carry
//! some of the sections. A behavior whose elements are absent does not mount;
//! nothing is logged above `debug`.
//!
//! ## One Dispatch Order Everywhere
//!
//! Element listeners fire from the clicked element outward, document
//! listeners last. The navigation menu relies on it: the toggle handler runs
//! before the outside-click handler sees the same click.
//!
//! ## Configurable Contract
//!
//! Selectors, marker classes and the contact form's messages come from
//! [`config::SiteConfig`]. The stock values match the stock markup, so a page
//! with no configuration works out of the box.

pub mod behaviors;
pub mod config;
pub mod dom;
pub mod event;
pub mod logging;
pub mod site;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
pub(crate) mod test_helpers;

/// Crate version, with the git hash appended for builds off a release tag.
pub fn version() -> String {
    let version = env!("CARGO_PKG_VERSION");
    let hash = env!("SITEWIRE_GIT_HASH");
    if env!("SITEWIRE_ON_RELEASE_TAG") == "true" || hash.is_empty() {
        version.to_string()
    } else {
        format!("{version}+{hash}")
    }
}
