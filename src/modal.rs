use crate::view_model::Block;

/// Size of a modal relative to the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalOptions {
    pub width_percent: u16,
    /// `None` lets the overlay grow to fit its content.
    pub max_height_percent: Option<u16>,
}

impl ModalOptions {
    /// Wide and capped in height, for long-form detail.
    pub fn tall() -> Self {
        Self {
            width_percent: 90,
            max_height_percent: Some(90),
        }
    }
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self {
            width_percent: 90,
            max_height_percent: None,
        }
    }
}

/// Displays a dismissible, titled panel. Fire-and-forget.
pub trait ModalPresenter {
    fn present(&mut self, title: &str, body: Vec<Block>, options: ModalOptions);
}

/// The panel currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub title: String,
    pub body: Vec<Block>,
    pub options: ModalOptions,
    pub scroll: u16,
}

/// Terminal modal: holds at most one open panel.
#[derive(Debug, Clone, Default)]
pub struct ModalOverlay {
    current: Option<Modal>,
}

impl ModalOverlay {
    pub fn current(&self) -> Option<&Modal> {
        self.current.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    pub fn scroll_down(&mut self, lines: u16) {
        if let Some(modal) = &mut self.current {
            modal.scroll = modal.scroll.saturating_add(lines);
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        if let Some(modal) = &mut self.current {
            modal.scroll = modal.scroll.saturating_sub(lines);
        }
    }
}

impl ModalPresenter for ModalOverlay {
    fn present(&mut self, title: &str, body: Vec<Block>, options: ModalOptions) {
        self.current = Some(Modal {
            title: title.to_string(),
            body,
            options,
            scroll: 0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_replaces_and_resets_scroll() {
        let mut overlay = ModalOverlay::default();
        overlay.present("First", vec![Block::Rule], ModalOptions::tall());
        overlay.scroll_down(5);
        assert_eq!(overlay.current().map(|m| m.scroll), Some(5));

        overlay.present("Second", vec![], ModalOptions::default());
        let modal = overlay.current().unwrap();
        assert_eq!(modal.title, "Second");
        assert_eq!(modal.scroll, 0);
    }

    #[test]
    fn test_close_and_scroll_when_closed() {
        let mut overlay = ModalOverlay::default();
        overlay.scroll_down(3);
        assert!(!overlay.is_open());

        overlay.present("T", vec![], ModalOptions::default());
        overlay.scroll_up(2);
        assert_eq!(overlay.current().map(|m| m.scroll), Some(0));
        overlay.close();
        assert!(overlay.current().is_none());
    }
}
