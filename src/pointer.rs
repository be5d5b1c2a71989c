//! Render and dispatch target for the cursor indicator and synthetic
//! pointer events.

use crate::{
    motion::{CursorPosition, Viewport},
    Result,
};
use log::{debug, info};

/// Kinds of synthetic pointer event the controller emits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    /// Cursor moved
    Move,
    /// Primary button click
    Click,
    /// Secondary button click, context-menu semantics
    ContextMenu,
}

/// Mouse button identity carried by an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

impl PointerButton {
    /// X11 core protocol button number
    #[must_use]
    pub const fn x11_detail(&self) -> u8 {
        match self {
            Self::Primary => 1,
            Self::Secondary => 3,
        }
    }
}

/// A synthetic pointer event at viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: CursorPosition,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(kind: PointerEventKind, position: CursorPosition) -> Self {
        Self { kind, position }
    }

    /// Button pressed by this event, if any
    #[must_use]
    pub const fn button(&self) -> Option<PointerButton> {
        match self.kind {
            PointerEventKind::Move => None,
            PointerEventKind::Click => Some(PointerButton::Primary),
            PointerEventKind::ContextMenu => Some(PointerButton::Secondary),
        }
    }
}

/// Visual cursor state as handed to the target each render tick
#[derive(Debug, Clone, PartialEq)]
pub struct CursorIndicator {
    pub position: CursorPosition,
    pub color: String,
}

/// Where the controller draws its cursor and sends pointer events
pub trait PointerTarget {
    /// Size of the area the cursor may occupy
    fn viewport(&self) -> Viewport;

    /// Draw the cursor indicator
    fn render_indicator(&mut self, indicator: &CursorIndicator) -> Result<()>;

    /// Deliver a synthetic pointer event
    fn dispatch(&mut self, event: PointerEvent) -> Result<()>;

    /// Target name for status and logs
    fn name(&self) -> &str;
}

impl<T: PointerTarget + ?Sized> PointerTarget for Box<T> {
    fn viewport(&self) -> Viewport {
        (**self).viewport()
    }

    fn render_indicator(&mut self, indicator: &CursorIndicator) -> Result<()> {
        (**self).render_indicator(indicator)
    }

    fn dispatch(&mut self, event: PointerEvent) -> Result<()> {
        (**self).dispatch(event)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Headless target that only logs what it would do
pub struct LogPointerTarget {
    viewport: Viewport,
    last_position: Option<CursorPosition>,
    clicks: usize,
    context_menus: usize,
}

impl LogPointerTarget {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        info!("Using logging pointer target, viewport {}x{}", viewport.width, viewport.height);
        Self {
            viewport,
            last_position: None,
            clicks: 0,
            context_menus: 0,
        }
    }

    /// Number of primary and secondary clicks dispatched so far
    #[must_use]
    pub const fn click_counts(&self) -> (usize, usize) {
        (self.clicks, self.context_menus)
    }

    #[must_use]
    pub const fn last_position(&self) -> Option<CursorPosition> {
        self.last_position
    }
}

impl PointerTarget for LogPointerTarget {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn render_indicator(&mut self, _indicator: &CursorIndicator) -> Result<()> {
        Ok(())
    }

    fn dispatch(&mut self, event: PointerEvent) -> Result<()> {
        let CursorPosition { x, y } = event.position;
        match event.kind {
            PointerEventKind::Move => {
                if self.last_position != Some(event.position) {
                    debug!("pointer move ({:.1}, {:.1})", x, y);
                }
                self.last_position = Some(event.position);
            }
            PointerEventKind::Click => {
                self.clicks += 1;
                info!("click at ({:.1}, {:.1})", x, y);
            }
            PointerEventKind::ContextMenu => {
                self.context_menus += 1;
                info!("context menu at ({:.1}, {:.1})", x, y);
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_buttons() {
        let p = CursorPosition::new(1.0, 2.0);
        assert_eq!(PointerEvent::new(PointerEventKind::Move, p).button(), None);
        assert_eq!(
            PointerEvent::new(PointerEventKind::Click, p).button(),
            Some(PointerButton::Primary)
        );
        assert_eq!(
            PointerEvent::new(PointerEventKind::ContextMenu, p).button(),
            Some(PointerButton::Secondary)
        );
        assert_eq!(PointerButton::Secondary.x11_detail(), 3);
    }

    #[test]
    fn test_log_target_counts() {
        let mut target = LogPointerTarget::new(Viewport::new(800.0, 600.0));
        let p = CursorPosition::new(10.0, 20.0);
        target.dispatch(PointerEvent::new(PointerEventKind::Move, p)).unwrap();
        target.dispatch(PointerEvent::new(PointerEventKind::Click, p)).unwrap();
        target.dispatch(PointerEvent::new(PointerEventKind::ContextMenu, p)).unwrap();
        target.dispatch(PointerEvent::new(PointerEventKind::Click, p)).unwrap();
        assert_eq!(target.click_counts(), (2, 1));
        assert_eq!(target.last_position(), Some(p));
        assert_eq!(target.viewport(), Viewport::new(800.0, 600.0));
    }
}
