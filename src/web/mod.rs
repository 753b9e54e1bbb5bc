//! Browser entry points.
//!
//! Loading the module runs [`start`]: configuration is read from the page,
//! logging is installed, the anchor behavior mounts straight away and the
//! other six mount once the document is parsed (immediately, if it already
//! is). Every listener and timer they asked for lives in a thread-local
//! runtime until [`teardown`] drops it.
//!
//! ```html
//! <script type="application/toml" id="sitewire-config">
//! [slideshow]
//! interval_ms = 7000
//! </script>
//! <script type="module">
//!   import init from "./sitewire.js";
//!   await init();
//! </script>
//! ```

mod listener;
mod page;

pub use listener::Subscription;
pub use page::WebPage;

use crate::behaviors::{self, BoxedBehavior};
use crate::config::SiteConfig;
use crate::event::{Event, EventKind, Outcome, Target, Trigger};
use gloo_timers::callback::Interval;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{Element, EventTarget, KeyboardEvent};

/// Id of the inline configuration block.
pub const CONFIG_ELEMENT_ID: &str = "sitewire-config";
const CONFIG_MIME: &str = "application/toml";

type Shared = Rc<RefCell<BoxedBehavior<WebPage>>>;

/// One mounted behavior and everything keeping it reachable.
struct Mounted {
    name: &'static str,
    _subscriptions: Vec<Subscription>,
    _timers: Vec<Interval>,
}

#[derive(Default)]
struct Runtime {
    mounted: Vec<Mounted>,
    ready: Option<Subscription>,
}

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = const { RefCell::new(None) };
}

/// Module start: boot with the page's inline configuration.
#[wasm_bindgen(start)]
pub fn start() {
    let Some(page) = WebPage::current() else {
        return;
    };
    let (config, error) = match inline_config(&page) {
        Some(toml) => match SiteConfig::from_toml_str(&toml) {
            Ok(config) => (config, None),
            Err(e) => (SiteConfig::default(), Some(e)),
        },
        None => (SiteConfig::default(), None),
    };
    crate::logging::init(&config.logging);
    if let Some(e) = error {
        tracing::warn!(error = %e, "inline config rejected, using defaults");
    }
    boot(page, config);
}

/// Tear down and boot again with `toml` merged over the stock defaults.
#[wasm_bindgen]
pub fn start_with_config(toml: &str) -> Result<(), JsValue> {
    let config = SiteConfig::from_toml_str(toml).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let page = WebPage::current().ok_or_else(|| JsValue::from_str("no document"))?;
    crate::logging::init(&config.logging);
    teardown();
    boot(page, config);
    Ok(())
}

/// Remove every listener and stop every timer.
#[wasm_bindgen]
pub fn teardown() {
    let runtime = RUNTIME.with(|r| r.borrow_mut().take());
    if let Some(runtime) = runtime {
        let names: Vec<_> = runtime.mounted.iter().map(|m| m.name).collect();
        tracing::debug!(?names, "teardown");
    }
}

/// Text of the inline configuration block, if the page has one.
fn inline_config(page: &WebPage) -> Option<String> {
    let element = page.document().get_element_by_id(CONFIG_ELEMENT_ID)?;
    if element.get_attribute("type").as_deref() != Some(CONFIG_MIME) {
        tracing::warn!(id = CONFIG_ELEMENT_ID, "config element is not {CONFIG_MIME}, ignoring");
        return None;
    }
    element.text_content()
}

fn boot(page: WebPage, config: SiteConfig) {
    tracing::info!(version = %crate::version(), "sitewire starting");

    let mut page_mut = page.clone();
    let anchors = behaviors::mount_anchors(&mut page_mut, &config);
    let mounted = anchors.into_iter().map(|b| attach(&page, b)).collect();
    RUNTIME.with(|r| {
        *r.borrow_mut() = Some(Runtime {
            mounted,
            ready: None,
        })
    });

    if page.document().ready_state() != "loading" {
        mount_initializers(&page, &config);
        return;
    }

    let target: EventTarget = page.document().clone().into();
    let waiting = page.clone();
    let ready = Subscription::new(&target, "DOMContentLoaded", move |_| {
        mount_initializers(&waiting, &config);
    });
    match ready {
        Ok(ready) => RUNTIME.with(|r| {
            if let Some(runtime) = r.borrow_mut().as_mut() {
                runtime.ready = Some(ready);
            }
        }),
        Err(e) => tracing::warn!(error = ?e, "cannot wait for DOMContentLoaded"),
    }
}

fn mount_initializers(page: &WebPage, config: &SiteConfig) {
    let mut page_mut = page.clone();
    let mounted: Vec<_> = behaviors::mount_initializers(&mut page_mut, config)
        .into_iter()
        .map(|b| attach(page, b))
        .collect();
    tracing::debug!(count = mounted.len(), "initializers mounted");
    RUNTIME.with(|r| {
        if let Some(runtime) = r.borrow_mut().as_mut() {
            runtime.mounted.extend(mounted);
        }
    });
}

/// Register the browser listeners and timers `behavior` asked for.
fn attach(page: &WebPage, behavior: BoxedBehavior<WebPage>) -> Mounted {
    let name = behavior.name();
    let triggers = behavior.triggers();
    let shared: Shared = Rc::new(RefCell::new(behavior));
    let mut subscriptions = Vec::new();
    let mut timers = Vec::new();

    for trigger in triggers {
        match trigger {
            Trigger::Listen { target, kind } => {
                let event_target: EventTarget = match &target {
                    Target::Document => page.document().clone().into(),
                    Target::Element(element) => element.clone().into(),
                };
                let shared = shared.clone();
                let page = page.clone();
                let handler = move |raw: web_sys::Event| {
                    if let Some(event) = translate(kind, &target, &raw) {
                        deliver(name, &shared, page.clone(), &event, Some(&raw));
                    }
                };
                match Subscription::new(&event_target, kind.dom_name(), handler) {
                    Ok(subscription) => subscriptions.push(subscription),
                    Err(e) => tracing::warn!(behavior = name, error = ?e, "listener not attached"),
                }
            }
            Trigger::Every(period) => {
                let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
                let shared = shared.clone();
                let page = page.clone();
                timers.push(Interval::new(millis, move || {
                    deliver(name, &shared, page.clone(), &Event::Tick, None);
                }));
            }
        }
    }

    tracing::debug!(
        behavior = name,
        listeners = subscriptions.len(),
        timers = timers.len(),
        "attached"
    );
    Mounted {
        name,
        _subscriptions: subscriptions,
        _timers: timers,
    }
}

/// Build the behavior-level event from a raw DOM event.
fn translate(kind: EventKind, current: &Target<Element>, raw: &web_sys::Event) -> Option<Event<Element>> {
    match kind {
        EventKind::Click => {
            let target = raw.target()?.dyn_into::<Element>().ok()?;
            Some(Event::Click {
                current: current.clone(),
                target,
            })
        }
        EventKind::KeyDown => {
            let key = raw.dyn_ref::<KeyboardEvent>()?.key();
            Some(Event::KeyDown { key })
        }
        EventKind::Submit => match current {
            Target::Element(form) => Some(Event::Submit { form: form.clone() }),
            Target::Document => {
                let form = raw.target()?.dyn_into::<Element>().ok()?;
                Some(Event::Submit { form })
            }
        },
    }
}

fn deliver(
    name: &'static str,
    shared: &Shared,
    mut page: WebPage,
    event: &Event<Element>,
    raw: Option<&web_sys::Event>,
) {
    let Ok(mut behavior) = shared.try_borrow_mut() else {
        tracing::warn!(behavior = name, "re-entrant event dropped");
        return;
    };
    if behavior.handle(&mut page, event) == Outcome::PreventDefault {
        if let Some(raw) = raw {
            raw.prevent_default();
        }
    }
}
