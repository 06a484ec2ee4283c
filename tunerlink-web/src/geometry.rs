use tunerlink_core::ClickPosition;

/// Bounding box of an element in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Client coordinates of `position` inside `rect`, centre when `None`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn client_point(rect: ClientRect, position: Option<ClickPosition>) -> (i32, i32) {
    let position = position.unwrap_or(ClickPosition { x: 0.5, y: 0.5 });
    let x = rect.width.mul_add(position.x, rect.left);
    let y = rect.height.mul_add(position.y, rect.top);
    (x.round() as i32, y.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: ClientRect = ClientRect {
        left: 100.0,
        top: 20.0,
        width: 200.0,
        height: 10.0,
    };

    #[test]
    fn test_defaults_to_centre() {
        assert_eq!(client_point(RECT, None), (200, 25));
    }

    #[test]
    fn test_volume_fraction_maps_across_width() {
        assert_eq!(client_point(RECT, Some(ClickPosition::new(0.7, 0.5))), (240, 25));
        assert_eq!(client_point(RECT, Some(ClickPosition::new(0.0, 0.0))), (100, 20));
        assert_eq!(client_point(RECT, Some(ClickPosition::new(1.0, 1.0))), (300, 30));
    }
}
