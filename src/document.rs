//! Read-only view of the hosting document.
//!
//! The engine never measures anything itself; every client metric, scroll
//! offset and computed style it depends on comes through [`DocumentEnv`].

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollElement {
    Root,
    Body,
}

/// Computed `overflow-y` of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Clip,
    Scroll,
    Auto,
}

pub trait DocumentEnv {
    /// Content-box width of the root element (excludes scrollbars).
    fn client_width(&self) -> f32;
    /// Content-box height of the root element.
    fn client_height(&self) -> f32;
    /// Whether the document renders in legacy (quirks) mode.
    fn is_quirks_mode(&self) -> bool;
    /// Client height of the body, if the document has one.
    fn body_client_height(&self) -> Option<f32>;
    fn inner_height(&self) -> f32;
    fn scroll_offset(&self) -> Point;
    /// Total scrollable height of the root element.
    fn scroll_height(&self) -> f32;
    fn overflow_y(&self, element: ScrollElement) -> Overflow;
}

impl<T: DocumentEnv + ?Sized> DocumentEnv for &T {
    fn client_width(&self) -> f32 {
        (**self).client_width()
    }

    fn client_height(&self) -> f32 {
        (**self).client_height()
    }

    fn is_quirks_mode(&self) -> bool {
        (**self).is_quirks_mode()
    }

    fn body_client_height(&self) -> Option<f32> {
        (**self).body_client_height()
    }

    fn inner_height(&self) -> f32 {
        (**self).inner_height()
    }

    fn scroll_offset(&self) -> Point {
        (**self).scroll_offset()
    }

    fn scroll_height(&self) -> f32 {
        (**self).scroll_height()
    }

    fn overflow_y(&self, element: ScrollElement) -> Overflow {
        (**self).overflow_y(element)
    }
}

/// Height the page can be scrolled to while keeping the popup attached.
///
/// Only a document whose root and body both leave `overflow-y` visible
/// scrolls as a whole; if either clips or scrolls internally, there is no
/// page-level allowance.
pub fn page_scroll_limit(env: &impl DocumentEnv) -> Option<f32> {
    let root = env.overflow_y(ScrollElement::Root);
    let body = env.overflow_y(ScrollElement::Body);
    (root == Overflow::Visible && body == Overflow::Visible).then(|| env.scroll_height())
}

/// Snapshot of document measurements.
///
/// Optional heights fall back to `client_height` when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetrics {
    pub client_width: f32,
    pub client_height: f32,
    #[serde(default)]
    pub quirks_mode: bool,
    #[serde(default)]
    pub body_client_height: Option<f32>,
    #[serde(default)]
    pub inner_height: Option<f32>,
    #[serde(default)]
    pub scroll_x: f32,
    #[serde(default)]
    pub scroll_y: f32,
    #[serde(default)]
    pub scroll_height: Option<f32>,
    #[serde(default)]
    pub root_overflow_y: Overflow,
    #[serde(default)]
    pub body_overflow_y: Overflow,
}

impl DocumentMetrics {
    pub fn new(client_width: f32, client_height: f32) -> Self {
        Self {
            client_width,
            client_height,
            ..Self::default()
        }
    }

    pub fn with_scroll(mut self, scroll_x: f32, scroll_y: f32) -> Self {
        self.scroll_x = scroll_x;
        self.scroll_y = scroll_y;
        self
    }

    pub fn with_scroll_height(mut self, scroll_height: f32) -> Self {
        self.scroll_height = Some(scroll_height);
        self
    }
}

impl DocumentEnv for DocumentMetrics {
    fn client_width(&self) -> f32 {
        self.client_width
    }

    fn client_height(&self) -> f32 {
        self.client_height
    }

    fn is_quirks_mode(&self) -> bool {
        self.quirks_mode
    }

    fn body_client_height(&self) -> Option<f32> {
        self.body_client_height
    }

    fn inner_height(&self) -> f32 {
        self.inner_height.unwrap_or(self.client_height)
    }

    fn scroll_offset(&self) -> Point {
        Point::new(self.scroll_x, self.scroll_y)
    }

    fn scroll_height(&self) -> f32 {
        self.scroll_height.unwrap_or(self.client_height)
    }

    fn overflow_y(&self, element: ScrollElement) -> Overflow {
        match element {
            ScrollElement::Root => self.root_overflow_y,
            ScrollElement::Body => self.body_overflow_y,
        }
    }
}
