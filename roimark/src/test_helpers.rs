use image::Rgb;
use roimark_domain::{PtF, ShapeF, Surface, TPtF, ViewImage};

use crate::cfg::Cfg;
use crate::panels::{CoordGroups, TextOutput};
use crate::session::AnnotationSession;
use crate::tracing_setup::init_tracing_for_tests;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceOp {
    Clear,
    DrawImage(ShapeF),
    BeginPath,
    MoveTo(PtF),
    LineTo(PtF),
    Arc(PtF, TPtF),
    Fill,
    Stroke,
    SetFillColor([u8; 3]),
    SetStrokeColor([u8; 3]),
}

/// Surface that records operations instead of rasterizing them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingSurface {
    pub ops: Vec<SurfaceOp>,
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.ops.push(SurfaceOp::Clear);
    }
    fn draw_image(&mut self, _im: &ViewImage, target: ShapeF) {
        self.ops.push(SurfaceOp::DrawImage(target));
    }
    fn begin_path(&mut self) {
        self.ops.push(SurfaceOp::BeginPath);
    }
    fn move_to(&mut self, p: PtF) {
        self.ops.push(SurfaceOp::MoveTo(p));
    }
    fn line_to(&mut self, p: PtF) {
        self.ops.push(SurfaceOp::LineTo(p));
    }
    fn arc(&mut self, center: PtF, radius: TPtF) {
        self.ops.push(SurfaceOp::Arc(center, radius));
    }
    fn fill(&mut self) {
        self.ops.push(SurfaceOp::Fill);
    }
    fn stroke(&mut self) {
        self.ops.push(SurfaceOp::Stroke);
    }
    fn set_fill_color(&mut self, color: [u8; 3]) {
        self.ops.push(SurfaceOp::SetFillColor(color));
    }
    fn set_stroke_color(&mut self, color: [u8; 3]) {
        self.ops.push(SurfaceOp::SetStrokeColor(color));
    }
}

pub type TestSession = AnnotationSession<RecordingSurface, TextOutput, CoordGroups>;

/// 1600x800, displayed as 800x400 so both scale factors come out as 2
pub fn test_image() -> ViewImage {
    ViewImage::from_pixel(1600, 800, Rgb([60, 60, 60]))
}

pub fn make_ready_session() -> TestSession {
    init_tracing_for_tests();
    let mut session = AnnotationSession::new(
        RecordingSurface::default(),
        TextOutput::new(),
        CoordGroups::new(),
        Cfg::default(),
    );
    session.replace_image(test_image());
    session
}
