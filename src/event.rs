//! Subscriptions and events exchanged between behaviors and their host.
//!
//! A behavior never registers listeners itself. It declares [`Trigger`]s when
//! mounted; the host (the native [`Site`](crate::site::Site) or the browser
//! backend) owns the resulting subscriptions and hands matching [`Event`]s
//! back to the behavior. Dropping the host's handle disposes of every
//! subscription the behavior asked for, document-level ones included.

use std::time::Duration;

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target<N> {
    Document,
    Element(N),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyDown,
    Submit,
}

impl EventKind {
    /// DOM event type name.
    pub fn dom_name(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::KeyDown => "keydown",
            EventKind::Submit => "submit",
        }
    }
}

/// Something a behavior wants to be told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger<N> {
    Listen { target: Target<N>, kind: EventKind },
    /// Fire [`Event::Tick`] every `period`, first one a full period after mount.
    Every(Duration),
}

impl<N> Trigger<N> {
    pub fn click(node: N) -> Self {
        Trigger::Listen {
            target: Target::Element(node),
            kind: EventKind::Click,
        }
    }

    pub fn document(kind: EventKind) -> Self {
        Trigger::Listen {
            target: Target::Document,
            kind,
        }
    }

    pub fn submit(form: N) -> Self {
        Trigger::Listen {
            target: Target::Element(form),
            kind: EventKind::Submit,
        }
    }
}

/// An event delivered to a behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<N> {
    /// `current` is where the listener sits, `target` the element actually clicked.
    Click { current: Target<N>, target: N },
    KeyDown { key: String },
    Submit { form: N },
    Tick,
}

/// What the host should do with the event's default action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Proceed,
    PreventDefault,
}

impl Outcome {
    /// Combine outcomes of several listeners for one event.
    pub fn and(self, other: Outcome) -> Outcome {
        if self == Outcome::PreventDefault || other == Outcome::PreventDefault {
            Outcome::PreventDefault
        } else {
            Outcome::Proceed
        }
    }
}
