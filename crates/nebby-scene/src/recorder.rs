//! Surface that records draw calls for painter tests.

use nebby_core::{Ellipse, Point, Viewport};

use crate::surface::{Paint, Rect, Shadow, Stroke, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    SetGlobalAlpha(f32),
    SetShadow(Option<Shadow>),
    FillRect {
        rect: Rect,
    },
    FillCircle {
        center: Point,
        radius: f32,
        global_alpha: f32,
        shadow: Option<Shadow>,
    },
    StrokeEllipse {
        ellipse: Ellipse,
        width: f32,
    },
    StrokeLine {
        from: Point,
        to: Point,
        width: f32,
    },
}

#[derive(Debug)]
pub struct RecordingSurface {
    viewport: Viewport,
    global_alpha: f32,
    shadow: Option<Shadow>,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            global_alpha: 1.0,
            shadow: None,
            calls: Vec::new(),
        }
    }

    pub fn count(&self, pred: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn global_alpha(&self) -> f32 {
        self.global_alpha
    }
}

impl Surface for RecordingSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = alpha;
        self.calls.push(DrawCall::SetGlobalAlpha(alpha));
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.shadow = shadow;
        self.calls.push(DrawCall::SetShadow(shadow));
    }

    fn fill_rect(&mut self, rect: Rect, _paint: &Paint) {
        self.calls.push(DrawCall::FillRect { rect });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, _paint: &Paint) {
        self.calls.push(DrawCall::FillCircle {
            center,
            radius,
            global_alpha: self.global_alpha,
            shadow: self.shadow,
        });
    }

    fn stroke_ellipse(&mut self, ellipse: &Ellipse, stroke: &Stroke) {
        self.calls.push(DrawCall::StrokeEllipse {
            ellipse: *ellipse,
            width: stroke.width,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.calls.push(DrawCall::StrokeLine {
            from,
            to,
            width: stroke.width,
        });
    }
}
