//! Viewport geometry for element-visibility decisions.
//!
//! Visibility is decided purely from rectangle intersection: an element is
//! visible iff its bounding box overlaps the viewport with a strictly
//! positive area. All inputs are viewport-relative pixel coordinates.

use serde::{Deserialize, Serialize};

use crate::dom::DomElement;

/// Axis-aligned box in viewport pixel coordinates.
///
/// Degenerate or inverted boxes are accepted as input; intersection is
/// clamped to zero rather than going negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, right: f64, bottom: f64) -> Self {
        Self {
            top,
            left,
            right,
            bottom,
        }
    }
}

/// Viewport width/height in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub w: f64,
    pub h: f64,
}

/// Snapshot of the window/document surfaces a viewport probe can read.
///
/// In a browser host this is filled from `window.inner*` and the body/root
/// `client*` dimensions. A non-browser execution context simply has no
/// surface, which degrades to zeroed dimensions rather than failing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewportSurface {
    /// Window inner dimensions, when a window object exists.
    pub window_inner: Option<Dimensions>,
    /// Document body client dimensions.
    pub body_client: Option<Dimensions>,
    /// Document root element client dimensions.
    pub root_client: Option<Dimensions>,
}

/// Intersection area of two rectangles in px².
///
/// Non-overlapping or inverted inputs clamp to zero.
pub fn intersection_area(a: Rect, b: Rect) -> f64 {
    let x_overlap = (a.right.min(b.right) - a.left.max(b.left)).max(0.0);
    let y_overlap = (a.bottom.min(b.bottom) - a.top.max(b.top)).max(0.0);
    x_overlap * y_overlap
}

/// Whether an element is actually visible inside the given viewport rect.
///
/// Edge-touching intersections have zero area and count as not visible.
pub fn is_truly_visible<E: DomElement>(element: &E, viewport_rect: Rect) -> bool {
    intersection_area(element.bounding_rect(), viewport_rect) > 0.0
}

/// Read the viewport dimensions from the available surfaces.
///
/// Prefers the window inner dimensions, falling back to the body client and
/// then the root element client dimensions. A zero measurement falls through
/// to the next surface. With no surface at all this yields `{w: 0, h: 0}`.
pub fn viewport_dimensions(surface: Option<&ViewportSurface>) -> Dimensions {
    let Some(surface) = surface else {
        return Dimensions::default();
    };

    let pick = |read: fn(&Dimensions) -> f64| {
        [
            surface.window_inner.as_ref(),
            surface.body_client.as_ref(),
            surface.root_client.as_ref(),
        ]
        .into_iter()
        .flatten()
        .map(read)
        .find(|v| *v != 0.0)
        .unwrap_or(0.0)
    };

    Dimensions {
        w: pick(|d| d.w),
        h: pick(|d| d.h),
    }
}

/// Convert viewport dimensions into a rectangle anchored at the origin.
pub fn viewport_bounding_rect(dimensions: Dimensions) -> Rect {
    Rect {
        top: 0.0,
        left: 0.0,
        right: dimensions.w,
        bottom: dimensions.h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::TreeElement;

    #[test]
    fn test_disjoint_rects_have_zero_area() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 20.0, 30.0, 30.0);
        assert_eq!(intersection_area(a, b), 0.0);
        assert_eq!(intersection_area(b, a), 0.0);
    }

    #[test]
    fn test_contained_rect_yields_its_own_area() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(10.0, 10.0, 30.0, 40.0);
        assert_eq!(intersection_area(outer, inner), 20.0 * 30.0);
    }

    #[test]
    fn test_intersection_never_negative() {
        // Inverted rectangle (right < left, bottom < top)
        let inverted = Rect::new(50.0, 50.0, 10.0, 10.0);
        let normal = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(intersection_area(inverted, normal), 0.0);
        assert_eq!(intersection_area(normal, inverted), 0.0);
    }

    #[test]
    fn test_edge_touching_counts_as_not_visible() {
        let viewport = Rect::new(0.0, 0.0, 100.0, 100.0);
        let element = TreeElement::new("div").with_rect(Rect::new(0.0, 100.0, 150.0, 40.0));
        assert!(!is_truly_visible(&element, viewport));
    }

    #[test]
    fn test_overlapping_element_is_visible() {
        let viewport = Rect::new(0.0, 0.0, 100.0, 100.0);
        let element = TreeElement::new("div").with_rect(Rect::new(90.0, 90.0, 120.0, 120.0));
        assert!(is_truly_visible(&element, viewport));
    }

    #[test]
    fn test_viewport_dimensions_fallback_chain() {
        let surface = ViewportSurface {
            window_inner: Some(Dimensions { w: 0.0, h: 768.0 }),
            body_client: Some(Dimensions { w: 1024.0, h: 0.0 }),
            root_client: Some(Dimensions { w: 800.0, h: 600.0 }),
        };
        // Zero measurements fall through per-axis to the next surface.
        let dims = viewport_dimensions(Some(&surface));
        assert_eq!(dims.w, 1024.0);
        assert_eq!(dims.h, 768.0);
    }

    #[test]
    fn test_viewport_dimensions_without_surface() {
        let dims = viewport_dimensions(None);
        assert_eq!(dims, Dimensions { w: 0.0, h: 0.0 });
    }

    #[test]
    fn test_viewport_bounding_rect_anchored_at_origin() {
        let rect = viewport_bounding_rect(Dimensions { w: 1024.0, h: 768.0 });
        assert_eq!(rect, Rect::new(0.0, 0.0, 1024.0, 768.0));
    }
}
