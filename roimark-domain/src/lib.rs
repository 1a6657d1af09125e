mod canvas;
mod core;
mod crossing;
mod polygon;
pub mod result;
pub use canvas::{
    anno_color, RasterSurface, Surface, ViewImage, COLOR_COMPLETE, COLOR_PENDING, POINT_RADIUS,
};
pub use core::{Calc, Point, PtF, PtI, Shape, ShapeF, ShapeI, TPtF, TPtI, HIT_TOLERANCE};
pub use crossing::{Arrow, LineCrossing, ARROW_HEAD_LEN, N_CROSSING_POINTS};
pub use polygon::Polygon;
pub use result::{to_rm, RmError, RmResult};
use serde::{Deserialize, Serialize};

/// smallest canvas width an image is scaled to
pub const CANVAS_MIN_W: TPtF = 600.0;
/// largest canvas width an image is scaled to
pub const CANVAS_MAX_W: TPtF = 800.0;

/// Annotation figure, the variant is selected by the capture mode.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub enum AnnoFig {
    Poly(Polygon),
    Crossing(LineCrossing),
}

impl AnnoFig {
    pub fn id(&self) -> u32 {
        match self {
            AnnoFig::Poly(poly) => poly.id(),
            AnnoFig::Crossing(crossing) => crossing.id(),
        }
    }
    pub fn kind_label(&self) -> &'static str {
        match self {
            AnnoFig::Poly(_) => "Polygon",
            AnnoFig::Crossing(_) => "Line crossing",
        }
    }
    pub fn points(&self) -> &Vec<PtF> {
        match self {
            AnnoFig::Poly(poly) => poly.points(),
            AnnoFig::Crossing(crossing) => crossing.points(),
        }
    }
    pub fn n_points(&self) -> usize {
        self.points().len()
    }
    pub fn is_complete(&self) -> bool {
        match self {
            AnnoFig::Poly(poly) => poly.is_complete(),
            AnnoFig::Crossing(crossing) => crossing.is_complete(),
        }
    }
    /// append during capture, auto-completes a crossing on its 4th point
    pub fn add_point(&mut self, p: PtF) -> RmResult<()> {
        match self {
            AnnoFig::Poly(poly) => {
                poly.add_point(p);
                Ok(())
            }
            AnnoFig::Crossing(crossing) => crossing.add_point(p),
        }
    }
    /// externally triggered completion, only polygons support it
    pub fn try_complete(&mut self) -> RmResult<()> {
        match self {
            AnnoFig::Poly(poly) => poly.try_complete(),
            AnnoFig::Crossing(crossing) => {
                if crossing.is_complete() {
                    Ok(())
                } else {
                    Err(RmError::InvalidShape(format!(
                        "line crossing {} completes on its 4th point, not externally",
                        crossing.id()
                    )))
                }
            }
        }
    }
    pub fn draw(&self, surface: &mut dyn Surface) {
        match self {
            AnnoFig::Poly(poly) => poly.draw(surface),
            AnnoFig::Crossing(crossing) => crossing.draw(surface),
        }
    }
    pub fn config_line(&self, scale: ScaleFactors) -> RmResult<String> {
        match self {
            AnnoFig::Poly(poly) => Ok(poly.config_line(scale)),
            AnnoFig::Crossing(crossing) => crossing.config_line(scale),
        }
    }
}

/// shape of the canvas an image with `shape_orig` is displayed on, width
/// clamped to `[min_w, max_w]`, height following the aspect ratio
pub fn canvas_shape(shape_orig: ShapeI, min_w: TPtF, max_w: TPtF) -> ShapeF {
    let aspect_ratio = shape_orig.w as TPtF / shape_orig.h as TPtF;
    let w = (shape_orig.w as TPtF).min(max_w).max(min_w);
    ShapeF {
        w,
        h: w / aspect_ratio,
    }
}

/// display→source factors, applied exclusively at serialization time
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ScaleFactors {
    pub x: TPtF,
    pub y: TPtF,
}
impl ScaleFactors {
    pub fn new(shape_orig: ShapeI, shape_canvas: ShapeF) -> Self {
        Self {
            x: shape_orig.w as TPtF / shape_canvas.w,
            y: shape_orig.h as TPtF / shape_canvas.h,
        }
    }
    /// display coordinate to source-image pixel, floored
    pub fn to_orig(&self, p: PtF) -> PtI {
        PtI {
            x: (p.x * self.x).floor() as u32,
            y: (p.y * self.y).floor() as u32,
        }
    }
}

/// canvas shape and scale factors of one loaded image, invariant until the
/// next image arrives
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ViewMetrics {
    pub canvas: ShapeF,
    pub scale: ScaleFactors,
}
impl ViewMetrics {
    pub fn new(shape_orig: ShapeI, min_w: TPtF, max_w: TPtF) -> Self {
        let canvas = canvas_shape(shape_orig, min_w, max_w);
        Self {
            canvas,
            scale: ScaleFactors::new(shape_orig, canvas),
        }
    }
}

pub fn make_test_figs() -> Vec<AnnoFig> {
    let poly = Polygon::from_vec(
        1,
        vec![(0.0, 0.0).into(), (10.0, 10.0).into(), (20.0, 0.0).into()],
        true,
    );
    let crossing = LineCrossing::from_vec(
        2,
        vec![
            (0.0, 0.0).into(),
            (1.0, 1.0).into(),
            (2.0, 2.0).into(),
            (3.0, 3.0).into(),
        ],
        true,
    );
    match (poly, crossing) {
        (Ok(poly), Ok(crossing)) => vec![AnnoFig::Poly(poly), AnnoFig::Crossing(crossing)],
        _ => vec![],
    }
}

#[test]
fn test_polygon_capture() {
    let mut poly = Polygon::new(1);
    for p in [(0.0, 0.0), (10.0, 10.0)] {
        poly.add_point(p.into());
    }
    // no auto-completion and no completion below 3 points
    assert!(!poly.is_complete());
    assert!(matches!(
        poly.try_complete(),
        Err(RmError::InvalidShape(_))
    ));
    poly.add_point((20.0, 0.0).into());
    assert!(!poly.is_complete());
    poly.try_complete().unwrap();
    assert!(poly.is_complete());
    assert!(Polygon::from_vec(1, vec![(0.0, 0.0).into(), (1.0, 1.0).into()], true).is_err());
    assert!(Polygon::from_vec(1, vec![(0.0, 0.0).into(), (1.0, 1.0).into()], false).is_ok());
}

#[test]
fn test_crossing_capture() {
    let mut crossing = LineCrossing::new(1);
    for p in [(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)] {
        crossing.add_point(p.into()).unwrap();
        assert!(!crossing.is_complete());
    }
    crossing.add_point((3.0, 3.0).into()).unwrap();
    assert!(crossing.is_complete());
    // over-capture fails and leaves the crossing unmutated
    let before = crossing.clone();
    assert!(matches!(
        crossing.add_point((4.0, 4.0).into()),
        Err(RmError::OverCapture(_))
    ));
    assert_eq!(crossing, before);
    let three = vec![(0.0, 0.0).into(), (1.0, 1.0).into(), (2.0, 2.0).into()];
    assert!(LineCrossing::from_vec(1, three, true).is_err());
    let five = (0..5).map(|i| (i as f64, 0.0).into()).collect::<Vec<PtF>>();
    assert!(LineCrossing::from_vec(1, five, false).is_err());
}

#[test]
fn test_config_lines() {
    let figs = make_test_figs();
    let scale = ScaleFactors { x: 2.0, y: 3.0 };
    assert_eq!(
        figs[0].config_line(scale).unwrap(),
        "roi-P1=0;0;20;30;40;0;"
    );
    let scale = ScaleFactors { x: 1.0, y: 1.0 };
    assert_eq!(
        figs[1].config_line(scale).unwrap(),
        "line-crossing-P2=2;2;3;3;0;0;1;1;"
    );
    let mut partial = LineCrossing::new(3);
    partial.add_point((0.0, 0.0).into()).unwrap();
    assert!(partial.config_line(scale).is_err());
}

#[test]
fn test_arrow_head() {
    let arrow = Arrow::new((0.0, 0.0).into(), (10.0, 0.0).into(), true);
    let (left, right) = arrow.head_points();
    let expected_x = 10.0 - ARROW_HEAD_LEN * (3.0f64).sqrt() / 2.0;
    assert!((left.x - expected_x).abs() < 1e-10);
    assert!((left.y - 10.0).abs() < 1e-10);
    assert!((right.x - expected_x).abs() < 1e-10);
    assert!((right.y + 10.0).abs() < 1e-10);
}

#[test]
fn test_view_metrics() {
    // wide image clamps to the max width
    let metrics = ViewMetrics::new(ShapeI::new(1600, 800), CANVAS_MIN_W, CANVAS_MAX_W);
    assert_eq!(metrics.canvas, ShapeF::new(800.0, 400.0));
    assert_eq!(metrics.scale, ScaleFactors { x: 2.0, y: 2.0 });
    // small image is stretched to the min width
    let metrics = ViewMetrics::new(ShapeI::new(300, 300), CANVAS_MIN_W, CANVAS_MAX_W);
    assert_eq!(metrics.canvas, ShapeF::new(600.0, 600.0));
    assert_eq!(metrics.scale, ScaleFactors { x: 0.5, y: 0.5 });
    // in-range width maps 1:1
    let metrics = ViewMetrics::new(ShapeI::new(700, 350), CANVAS_MIN_W, CANVAS_MAX_W);
    assert_eq!(metrics.canvas, ShapeF::new(700.0, 350.0));
    assert_eq!(metrics.scale, ScaleFactors { x: 1.0, y: 1.0 });
    // serialization floors scaled coordinates
    assert_eq!(
        ScaleFactors { x: 2.0, y: 3.0 }.to_orig((10.4, 3.5).into()),
        PtI { x: 20, y: 10 }
    );
}
