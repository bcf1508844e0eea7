//! Capability interface over a page-rendering/automation backend.
//!
//! Kept deliberately narrow so any automation provider (a real headless
//! browser, a remote driver, or a scripted fake in tests) can sit behind it.

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Opaque handle to an element on the current page. Only meaningful to the
/// driver that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub u64);

#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// Load the given URL, replacing the current page.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Block until an element matching the selector exists, or time out.
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// Type a value into the first element matching the selector.
    async fn fill(&self, selector: &str, value: &str) -> Result<()>;

    /// All elements currently matching the selector, in document order.
    async fn query_all(&self, selector: &str) -> Result<Vec<ElementHandle>>;

    /// Type a value into a previously queried element.
    async fn fill_element(&self, element: ElementHandle, value: &str) -> Result<()>;

    async fn click(&self, element: ElementHandle) -> Result<()>;

    async fn get_attribute(&self, element: ElementHandle, name: &str) -> Result<Option<String>>;

    /// Serialized markup of the current page.
    async fn page_content(&self) -> Result<String>;

    /// Block until the current URL contains any of the given keywords, or
    /// time out.
    async fn wait_for_url_contains(&self, keywords: &[&str], timeout: Duration) -> Result<()>;
}
