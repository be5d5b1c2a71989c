//! Pointer target for X11-based systems.
//!
//! Moves the real pointer with `WarpPointer` and injects button presses
//! through the XTEST extension, so gesture clicks reach whatever window is
//! under the cursor.

use crate::{
    error::{AppError, Result},
    motion::Viewport,
    pointer::{CursorIndicator, PointerButton, PointerEvent, PointerEventKind, PointerTarget},
    utils::safe_cast::f64_to_i16_clamp,
};
use log::{debug, info};
use x11rb::{
    connection::{Connection, RequestConnection},
    protocol::{
        xproto::{ConnectionExt, Screen, BUTTON_PRESS_EVENT, BUTTON_RELEASE_EVENT},
        xtest::{self, ConnectionExt as XTestConnectionExt},
    },
    rust_connection::RustConnection,
    CURRENT_TIME,
};

/// Cursor control implementation for X11
pub struct X11PointerTarget {
    connection: RustConnection,
    screen: Screen,
    screen_width: u16,
    screen_height: u16,
    indicator_color: Option<String>,
}

impl X11PointerTarget {
    /// Connect to the display named by `$DISPLAY`
    pub fn new() -> Result<Self> {
        info!("Initializing X11 pointer target");

        let (connection, screen_num) = RustConnection::connect(None)
            .map_err(|e| AppError::X11(format!("Failed to connect to X11: {e}")))?;

        let screen = connection
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| AppError::X11("Failed to get screen".to_string()))?
            .clone();

        let has_xtest = connection
            .extension_information(xtest::X11_EXTENSION_NAME)
            .map_err(|e| AppError::X11(format!("Failed to query XTEST: {e}")))?
            .is_some();
        if !has_xtest {
            return Err(AppError::X11("XTEST extension not available".to_string()));
        }

        let screen_width = screen.width_in_pixels;
        let screen_height = screen.height_in_pixels;

        info!(
            "Connected to X11 display, screen: {}x{}",
            screen_width, screen_height
        );

        let target = Self {
            connection,
            screen,
            screen_width,
            screen_height,
            indicator_color: None,
        };
        let (x, y) = target.get_position()?;
        debug!("Pointer currently at ({}, {})", x, y);

        Ok(target)
    }

    /// Get current pointer position
    pub fn get_position(&self) -> Result<(i16, i16)> {
        let reply = self
            .connection
            .query_pointer(self.screen.root)
            .map_err(|e| AppError::X11(format!("Failed to send query pointer: {e}")))?
            .reply()
            .map_err(|e| AppError::X11(format!("Failed to query pointer: {e}")))?;

        Ok((reply.root_x, reply.root_y))
    }

    fn screen_point(&self, x: f64, y: f64) -> (i16, i16) {
        let max_x = i32::from(self.screen_width.saturating_sub(1));
        let max_y = i32::from(self.screen_height.saturating_sub(1));
        (f64_to_i16_clamp(x, 0, max_x), f64_to_i16_clamp(y, 0, max_y))
    }

    fn warp(&self, x: i16, y: i16) -> Result<()> {
        self.connection
            .warp_pointer(x11rb::NONE, self.screen.root, 0, 0, 0, 0, x, y)
            .map_err(|e| AppError::X11(format!("Failed to warp pointer: {e}")))?;
        Ok(())
    }

    fn press_and_release(&self, button: PointerButton, x: i16, y: i16) -> Result<()> {
        let detail = button.x11_detail();
        for event_type in [BUTTON_PRESS_EVENT, BUTTON_RELEASE_EVENT] {
            self.connection
                .xtest_fake_input(event_type, detail, CURRENT_TIME, self.screen.root, x, y, 0)
                .map_err(|e| AppError::X11(format!("Failed to inject button {detail}: {e}")))?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.connection
            .flush()
            .map_err(|e| AppError::X11(format!("Failed to flush connection: {e}")))
    }
}

impl PointerTarget for X11PointerTarget {
    fn viewport(&self) -> Viewport {
        Viewport::new(f64::from(self.screen_width), f64::from(self.screen_height))
    }

    fn render_indicator(&mut self, indicator: &CursorIndicator) -> Result<()> {
        // The system pointer is the indicator; colour changes are only traced
        if self.indicator_color.as_deref() != Some(indicator.color.as_str()) {
            debug!("Indicator colour {}", indicator.color);
            self.indicator_color = Some(indicator.color.clone());
        }
        Ok(())
    }

    fn dispatch(&mut self, event: PointerEvent) -> Result<()> {
        let (x, y) = self.screen_point(event.position.x, event.position.y);
        self.warp(x, y)?;

        match event.kind {
            PointerEventKind::Move => {}
            PointerEventKind::Click | PointerEventKind::ContextMenu => {
                if let Some(button) = event.button() {
                    debug!("Injecting button {} at ({}, {})", button.x11_detail(), x, y);
                    self.press_and_release(button, x, y)?;
                }
            }
        }

        self.flush()
    }

    fn name(&self) -> &str {
        "x11"
    }
}
