use alloc::sync::Arc;
use core::fmt;

use timeline_virtualizer::LoadDirection;

pub type ThumbnailClickHandler<Id> = Arc<dyn Fn(&Id) + Send + Sync>;

pub type LoadMoreHandler = Arc<dyn Fn(LoadDirection) + Send + Sync>;

/// Outbound callbacks. An unset handler makes the corresponding event a no-op.
pub struct Handlers<Id> {
    pub on_thumbnail_click: Option<ThumbnailClickHandler<Id>>,
    pub on_load_more: Option<LoadMoreHandler>,
}

impl<Id> Default for Handlers<Id> {
    fn default() -> Self {
        Self {
            on_thumbnail_click: None,
            on_load_more: None,
        }
    }
}

impl<Id> Clone for Handlers<Id> {
    fn clone(&self) -> Self {
        Self {
            on_thumbnail_click: self.on_thumbnail_click.clone(),
            on_load_more: self.on_load_more.clone(),
        }
    }
}

impl<Id> Handlers<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_on_thumbnail_click(mut self, f: impl Fn(&Id) + Send + Sync + 'static) -> Self {
        self.on_thumbnail_click = Some(Arc::new(f));
        self
    }

    pub fn with_on_load_more(mut self, f: impl Fn(LoadDirection) + Send + Sync + 'static) -> Self {
        self.on_load_more = Some(Arc::new(f));
        self
    }
}

impl<Id> fmt::Debug for Handlers<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("on_thumbnail_click", &self.on_thumbnail_click.is_some())
            .field("on_load_more", &self.on_load_more.is_some())
            .finish()
    }
}
