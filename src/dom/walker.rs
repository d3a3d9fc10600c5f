//! Upward DOM-ancestor traversal.
//!
//! A single generic walk drives both do-not-track detection and nearest
//! anchor discovery; the caller supplies the match strategy.

use crate::dom::DomElement;

/// Walk up the ancestor chain, inclusive of the start element, returning the
/// first element for which `predicate(element, ctx)` is true.
///
/// The walk stops with `None` when the chain ends or the current node cannot
/// answer attribute queries (a document or fragment root). It never panics.
pub fn walk_up<E, C, P>(start: &E, predicate: P, ctx: &C) -> Option<E>
where
    E: DomElement,
    C: ?Sized,
    P: Fn(&E, &C) -> bool,
{
    let mut current = start.clone();
    loop {
        if !current.supports_attributes() {
            return None;
        }
        if predicate(&current, ctx) {
            return Some(current);
        }
        current = current.parent()?;
    }
}

/// Whether the element or any ancestor carries the given attribute.
///
/// An attribute set to the empty string still counts as present.
pub fn is_element_dnt<E: DomElement>(element: &E, dnt_attribute: &str) -> bool {
    find_closest_by_attribute(element, dnt_attribute).is_some()
}

/// Nearest ancestor-or-self carrying the given attribute.
pub fn find_closest_by_attribute<E: DomElement>(element: &E, attribute: &str) -> Option<E> {
    walk_up(
        element,
        |el, attr: &str| el.attribute(attr).is_some(),
        attribute,
    )
}

/// Nearest ancestor-or-self whose tag is an anchor.
pub fn find_closest_anchor<E: DomElement>(element: &E) -> Option<E> {
    walk_up(
        element,
        |el, _: &()| el.tag_name().eq_ignore_ascii_case("a"),
        &(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::TreeElement;

    #[test]
    fn test_walk_up_returns_none_at_unmatched_root() {
        let root = TreeElement::new("div");
        let found = walk_up(&root, |_, _: &()| false, &());
        assert!(found.is_none());
    }

    #[test]
    fn test_walk_up_stops_at_fragment_root() {
        let fragment = TreeElement::fragment();
        let child = TreeElement::new("div");
        fragment.append(&child);

        let found = walk_up(&child, |_, _: &()| false, &());
        assert!(found.is_none());
    }

    #[test]
    fn test_find_closest_anchor_through_nesting() {
        let div = TreeElement::new("div");
        let anchor = TreeElement::new("a").with_attr("href", "https://example.com/");
        let span = TreeElement::new("span");
        div.append(&anchor);
        anchor.append(&span);

        let found = find_closest_anchor(&span).expect("anchor should be found");
        assert_eq!(found.tag_name(), "a");
        assert_eq!(
            found.attribute("href").as_deref(),
            Some("https://example.com/")
        );
    }

    #[test]
    fn test_find_closest_anchor_matches_uppercase_tag() {
        let anchor = TreeElement::new("A");
        let span = TreeElement::new("span");
        anchor.append(&span);

        assert!(find_closest_anchor(&span).is_some());
    }

    #[test]
    fn test_find_closest_anchor_absent() {
        let div = TreeElement::new("div");
        let span = TreeElement::new("span");
        div.append(&span);

        assert!(find_closest_anchor(&span).is_none());
    }

    #[test]
    fn test_dnt_detected_on_ancestor() {
        let section = TreeElement::new("section").with_attr("data-pp-dnt", "");
        let button = TreeElement::new("button");
        section.append(&button);

        // Empty attribute value still counts as present.
        assert!(is_element_dnt(&button, "data-pp-dnt"));
        assert!(!is_element_dnt(&button, "data-other"));
    }

    #[test]
    fn test_dnt_detected_on_self() {
        let button = TreeElement::new("button").with_attr("data-pp-dnt", "true");
        assert!(is_element_dnt(&button, "data-pp-dnt"));
    }
}
