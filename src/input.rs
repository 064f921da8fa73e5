use glam::Vec2;
use web_sys as web;

/// Which manual gesture a pointer drag performs.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    #[default]
    Orbit,
    Pan,
}

#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub mode: DragMode,
    pub last: Vec2,
}

impl DragState {
    pub fn begin(&mut self, pos: Vec2, mode: DragMode) {
        self.active = true;
        self.mode = mode;
        self.last = pos;
    }

    /// Movement since the previous call, or `None` when no drag is active.
    pub fn advance(&mut self, pos: Vec2) -> Option<Vec2> {
        if !self.active {
            return None;
        }
        let delta = pos - self.last;
        self.last = pos;
        Some(delta)
    }

    pub fn end(&mut self) {
        self.active = false;
    }
}

/// Left button orbits; right button or a modifier key pans.
#[inline]
pub fn drag_mode_for(button: i16, shift_or_ctrl: bool) -> DragMode {
    if button == 2 || shift_or_ctrl {
        DragMode::Pan
    } else {
        DragMode::Orbit
    }
}

/// Wheel delta to a dolly scale factor (>1 zooms out).
#[inline]
pub fn wheel_dolly_scale(delta_y: f32, step: f32, unit: f32) -> f32 {
    step.powf(-delta_y / unit)
}

// ---------------- Pointer helpers ----------------
#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let sx = (x_css / rect.width().max(1.0) as f32) * canvas.width() as f32;
    let sy = (y_css / rect.height().max(1.0) as f32) * canvas.height() as f32;
    Vec2::new(sx, sy)
}
