pub mod cfg;
pub mod image_reader;
pub mod panels;
pub mod session;
pub mod test_helpers;
pub mod tracing_setup;
pub use cfg::{get_cfg, Cfg};
pub use image_reader::read_image;
pub use panels::{CoordGroups, OutputPanel, SidePanel, TextOutput};
pub use roimark_domain::{
    anno_color, canvas_shape, make_test_figs, AnnoFig, Arrow, LineCrossing, Point, Polygon, PtF,
    PtI, RasterSurface, RmError, RmResult, ScaleFactors, Shape, ShapeF, ShapeI, Surface,
    ViewImage, ViewMetrics, CANVAS_MAX_W, CANVAS_MIN_W, COLOR_COMPLETE, COLOR_PENDING,
};
pub use session::{AnnotationSession, Mode};
