//! Event Categories
//!
//! Static classification of DOM event names into filter strategies, and the
//! handler props a framework component would declare for each event.

use serde::Serialize;

/// Filter strategy partition of DOM event names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventCategory {
    /// Targets are often non-semantic wrappers; needs ancestor search
    Pointer,
    /// Platform already constrains the target
    Form,
    /// No notion of "interactive" at all
    Ambient,
}

/// Classify an event name. Unknown names are [`EventCategory::Ambient`].
pub fn classify(event_type: &str) -> EventCategory {
    match event_type {
        "click" | "touchstart" | "touchend" => EventCategory::Pointer,
        "input" | "change" | "focus" | "blur" | "submit" => EventCategory::Form,
        _ => EventCategory::Ambient,
    }
}

/// Candidate handler prop names for an event, in priority order.
///
/// Unknown names have no candidates.
pub fn handlers_for(event_type: &str) -> &'static [&'static str] {
    match event_type {
        "click" => &[
            "onClick",
            "onClickCapture",
            "onMouseDown",
            "onMouseUp",
            "onPointerDown",
            "onPointerUp",
        ],
        "touchstart" => &["onTouchStart", "onTouchStartCapture", "onPointerDown"],
        "touchend" => &["onTouchEnd", "onTouchEndCapture", "onPointerUp", "onClick"],
        "input" => &["onInput", "onInputCapture", "onChange"],
        "change" => &["onChange", "onChangeCapture"],
        "focus" => &["onFocus", "onFocusCapture"],
        "blur" => &["onBlur", "onBlurCapture"],
        "submit" => &["onSubmit", "onSubmitCapture"],
        "scroll" => &["onScroll", "onScrollCapture"],
        "keydown" => &["onKeyDown", "onKeyDownCapture"],
        "keyup" => &["onKeyUp", "onKeyUpCapture"],
        "copy" => &["onCopy", "onCopyCapture"],
        "paste" => &["onPaste", "onPasteCapture"],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_categories() {
        for name in ["click", "touchstart", "touchend"] {
            assert_eq!(classify(name), EventCategory::Pointer, "{name}");
        }
        for name in ["input", "change", "focus", "blur", "submit"] {
            assert_eq!(classify(name), EventCategory::Form, "{name}");
        }
        for name in ["scroll", "keydown", "keyup", "copy", "paste"] {
            assert_eq!(classify(name), EventCategory::Ambient, "{name}");
        }
    }

    #[test]
    fn test_unknown_event_defaults() {
        for name in ["mousemove", "CLICK", "", "custom:event"] {
            assert_eq!(classify(name), EventCategory::Ambient);
            assert!(handlers_for(name).is_empty());
        }
    }

    #[test]
    fn test_handler_candidates_ordered() {
        assert_eq!(handlers_for("click")[0], "onClick");
        assert_eq!(handlers_for("change"), &["onChange", "onChangeCapture"]);
        assert!(handlers_for("touchend").contains(&"onClick"));
    }
}
