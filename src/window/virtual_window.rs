//! Virtual Window Module
//!
//! Computes which rows of a uniformly sized list intersect the viewport.

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::error::{JujurlyError, Result};

// == Window Params ==
/// Validated geometry for a virtual list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowParams {
    item_height: f64,
    container_height: f64,
    overscan: usize,
}

impl WindowParams {
    /// Creates validated parameters.
    ///
    /// Both heights must be finite and strictly positive.
    pub fn new(item_height: f64, container_height: f64, overscan: usize) -> Result<Self> {
        require_positive("item_height", item_height)?;
        require_positive("container_height", container_height)?;
        Ok(Self {
            item_height,
            container_height,
            overscan,
        })
    }

    pub fn item_height(&self) -> f64 {
        self.item_height
    }

    pub fn container_height(&self) -> f64 {
        self.container_height
    }

    pub fn overscan(&self) -> usize {
        self.overscan
    }

    /// Replaces the viewport height, e.g. after a resize.
    pub fn with_container_height(self, container_height: f64) -> Result<Self> {
        Self::new(self.item_height, container_height, self.overscan)
    }

    /// Full scrollable extent of `len` rows.
    pub fn total_height(&self, len: usize) -> f64 {
        len as f64 * self.item_height
    }

    /// Largest scroll offset that still shows content.
    pub fn max_scroll_top(&self, len: usize) -> f64 {
        (self.total_height(len) - self.container_height).max(0.0)
    }

    // == Visible Range ==
    /// Index range to render for `len` rows at `scroll_top`, overscan included.
    ///
    /// Returns None for an empty list.
    pub fn range(&self, len: usize, scroll_top: f64) -> Result<Option<RangeInclusive<usize>>> {
        if !scroll_top.is_finite() {
            return Err(JujurlyError::InvalidGeometry(format!(
                "scroll_top must be finite, got {}",
                scroll_top
            )));
        }
        if len == 0 {
            return Ok(None);
        }

        let last_index = len - 1;
        // Negative offsets come from elastic overscroll
        let offset = scroll_top.clamp(0.0, self.max_scroll_top(len));

        let first_visible = ((offset / self.item_height).floor() as usize).min(last_index);
        let viewport_end = ((offset + self.container_height) / self.item_height).ceil() as usize;
        let last_visible = viewport_end
            .saturating_sub(1)
            .max(first_visible)
            .min(last_index);

        let start = first_visible.saturating_sub(self.overscan);
        let end = last_visible.saturating_add(self.overscan).min(last_index);
        Ok(Some(start..=end))
    }
}

fn require_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(JujurlyError::InvalidGeometry(format!(
            "{} must be a positive finite number, got {}",
            name, value
        )))
    }
}

// == Virtual Item ==
/// One rendered row and its vertical placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VirtualItem<'a, T> {
    pub index: usize,
    pub offset_start: f64,
    pub offset_end: f64,
    pub item: &'a T,
}

// == Virtual Window ==
/// Rows to render plus the full scroll extent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VirtualWindow<'a, T> {
    pub items: Vec<VirtualItem<'a, T>>,
    pub total_height: f64,
}

impl<'a, T> VirtualWindow<'a, T> {
    /// First and last rendered index, if any.
    pub fn range(&self) -> Option<RangeInclusive<usize>> {
        let first = self.items.first()?.index;
        let last = self.items.last()?.index;
        Some(first..=last)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

// == Compute Window ==
/// Computes the rows of `items` to render.
///
/// # Arguments
/// * `items` - The full list
/// * `item_height` - Uniform row height, must be positive
/// * `container_height` - Viewport height, must be positive
/// * `scroll_top` - Current scroll offset
/// * `overscan` - Extra rows on each side of the viewport
pub fn compute_window<T>(
    items: &[T],
    item_height: f64,
    container_height: f64,
    scroll_top: f64,
    overscan: usize,
) -> Result<VirtualWindow<'_, T>> {
    let params = WindowParams::new(item_height, container_height, overscan)?;
    window_with(items, &params, scroll_top)
}

/// Same as [`compute_window`] with pre-validated parameters.
pub fn window_with<'a, T>(
    items: &'a [T],
    params: &WindowParams,
    scroll_top: f64,
) -> Result<VirtualWindow<'a, T>> {
    let total_height = params.total_height(items.len());
    let rows = match params.range(items.len(), scroll_top)? {
        Some(range) => items[range.clone()]
            .iter()
            .zip(range)
            .map(|(item, index)| {
                let offset_start = index as f64 * params.item_height;
                VirtualItem {
                    index,
                    offset_start,
                    offset_end: offset_start + params.item_height,
                    item,
                }
            })
            .collect(),
        None => Vec::new(),
    };

    Ok(VirtualWindow {
        items: rows,
        total_height,
    })
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        // The window stays in bounds and covers every row touching the viewport.
        #[test]
        fn prop_window_covers_viewport(
            len in 0usize..500,
            item_height in 1.0f64..200.0,
            container_height in 1.0f64..2000.0,
            scroll_top in 0.0f64..100_000.0,
            overscan in 0usize..10
        ) {
            let items: Vec<usize> = (0..len).collect();
            let window = compute_window(&items, item_height, container_height, scroll_top, overscan)
                .unwrap();

            prop_assert_eq!(window.total_height, len as f64 * item_height);
            match window.range() {
                None => prop_assert_eq!(len, 0),
                Some(range) => {
                    prop_assert!(*range.end() < len);
                    prop_assert_eq!(window.len(), range.end() - range.start() + 1);

                    let params = WindowParams::new(item_height, container_height, overscan).unwrap();
                    let offset = scroll_top.min(params.max_scroll_top(len));
                    let viewport_end = offset + container_height;
                    for index in 0..len {
                        let top = index as f64 * item_height;
                        let bottom = top + item_height;
                        if bottom > offset && top < viewport_end {
                            prop_assert!(
                                range.contains(&index),
                                "Row {} intersects the viewport but is not rendered",
                                index
                            );
                        }
                    }
                }
            }
        }
    }
}
