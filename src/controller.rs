use crate::detail::{DetailView, ModalContent};
use crate::item::Item;
use crate::sort::{SortPolicy, sort_items};
use tracing::debug;

/// What a tile shows before any detail is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub name: String,
    pub kind: Option<String>,
    pub image: String,
}

impl Thumbnail {
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            kind: item.kind.clone(),
            image: item.image.clone(),
        }
    }
}

/// Presentation target driven by a [`Controller`]. Implementations own the
/// thumbnail container, the hover panel container and the modal.
pub trait Surface {
    /// Remove every tile, panel and modal content.
    fn clear(&mut self);
    /// Add one tile with its pre-built hover panel, initially hidden.
    fn mount(&mut self, index: usize, thumbnail: Thumbnail, panel: DetailView);
    fn set_panel_visible(&mut self, index: usize, visible: bool);
    /// Replace the modal content and make it visible.
    fn show_modal(&mut self, content: ModalContent);
    fn hide_modal(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Hidden,
    Visible(usize),
}

/// User interactions the controller understands, independent of toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationEvent {
    Select(usize),
    HoverEnter(usize),
    HoverExit(usize),
    Close,
    /// Interaction with the area outside the modal content.
    Backdrop,
}

/// Owns the mounted items and the modal state machine.
pub struct Controller<S: Surface> {
    surface: S,
    items: Vec<Item>,
    modal: ModalState,
}

impl<S: Surface> Controller<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            items: Vec::new(),
            modal: ModalState::Hidden,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn modal(&self) -> ModalState {
        self.modal
    }

    /// Drop all mounted content and hide the modal.
    pub fn reset(&mut self) {
        self.items.clear();
        self.surface.clear();
        self.surface.hide_modal();
        self.modal = ModalState::Hidden;
    }

    /// Sort `items` and mount one tile and hover panel per item.
    pub fn mount(&mut self, mut items: Vec<Item>, policy: SortPolicy) {
        self.reset();
        sort_items(&mut items, policy);
        for (index, item) in items.iter().enumerate() {
            self.surface.mount(
                index,
                Thumbnail::from_item(item),
                DetailView::build(item, true),
            );
        }
        debug!(count = items.len(), policy = policy.label(), "mounted items");
        self.items = items;
    }

    pub fn handle(&mut self, event: PresentationEvent) {
        match event {
            PresentationEvent::Select(index) => self.on_select(index),
            PresentationEvent::HoverEnter(index) => self.on_hover_enter(index),
            PresentationEvent::HoverExit(index) => self.on_hover_exit(index),
            PresentationEvent::Close | PresentationEvent::Backdrop => self.on_close(),
        }
    }

    pub fn on_select(&mut self, index: usize) {
        let Some(item) = self.items.get(index) else {
            return;
        };
        self.surface.show_modal(ModalContent::build(item));
        debug!(from = ?self.modal, to = index, "modal selection");
        self.modal = ModalState::Visible(index);
    }

    pub fn on_hover_enter(&mut self, index: usize) {
        if index < self.items.len() {
            self.surface.set_panel_visible(index, true);
        }
    }

    pub fn on_hover_exit(&mut self, index: usize) {
        if index < self.items.len() {
            self.surface.set_panel_visible(index, false);
        }
    }

    pub fn on_close(&mut self) {
        if self.modal != ModalState::Hidden {
            self.surface.hide_modal();
            self.modal = ModalState::Hidden;
        }
    }
}
