use image::{
    imageops::{resize, FilterType},
    ImageBuffer, Rgb,
};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut, draw_polygon_mut,
};
use imageproc::point::Point as PolyPoint;
use std::mem;
use tracing::warn;

use crate::core::{PtF, ShapeF, ShapeI, TPtF};

pub type ViewImage = ImageBuffer<Rgb<u8>, Vec<u8>>;

pub const COLOR_PENDING: [u8; 3] = [255, 0, 0];
pub const COLOR_COMPLETE: [u8; 3] = [0, 255, 0];
/// radius in display pixels of the disk drawn for a captured point
pub const POINT_RADIUS: TPtF = 5.0;

pub fn anno_color(is_complete: bool) -> [u8; 3] {
    if is_complete {
        COLOR_COMPLETE
    } else {
        COLOR_PENDING
    }
}

/// Path-based drawing surface the annotation figures render through. The
/// interactive frontend brings its own implementation, [`RasterSurface`]
/// renders into an image buffer.
pub trait Surface {
    fn clear(&mut self);
    /// blit `im` scaled to `target`, replacing the surface content
    fn draw_image(&mut self, im: &ViewImage, target: ShapeF);
    fn begin_path(&mut self);
    fn move_to(&mut self, p: PtF);
    fn line_to(&mut self, p: PtF);
    fn arc(&mut self, center: PtF, radius: TPtF);
    fn fill(&mut self);
    fn stroke(&mut self);
    fn set_fill_color(&mut self, color: [u8; 3]);
    fn set_stroke_color(&mut self, color: [u8; 3]);
}

impl PtF {
    /// filled disk of fixed radius, the canvas representation of a captured point
    pub fn draw(&self, surface: &mut dyn Surface, color: [u8; 3]) {
        surface.set_fill_color(color);
        surface.begin_path();
        surface.arc(*self, POINT_RADIUS);
        surface.fill();
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum PathElt {
    Move(PtF),
    Line(PtF),
    Arc(PtF, TPtF),
}

/// [`Surface`](Surface) over an rgb image buffer. Path operations are
/// collected and replayed on `stroke`/`fill` with imageproc primitives.
pub struct RasterSurface {
    im: ViewImage,
    path: Vec<PathElt>,
    stroke_color: Rgb<u8>,
    fill_color: Rgb<u8>,
}

impl RasterSurface {
    pub fn new(shape: ShapeI) -> Self {
        Self {
            im: ViewImage::new(shape.w, shape.h),
            path: vec![],
            stroke_color: Rgb([0, 0, 0]),
            fill_color: Rgb([0, 0, 0]),
        }
    }
    pub fn image(&self) -> &ViewImage {
        &self.im
    }
    pub fn shape(&self) -> ShapeI {
        ShapeI::from_im(&self.im)
    }
    /// polyline runs and circles of the current path
    fn subpaths(&self) -> (Vec<Vec<PtF>>, Vec<(PtF, TPtF)>) {
        let mut runs = vec![];
        let mut circles = vec![];
        let mut run: Vec<PtF> = vec![];
        for elt in &self.path {
            match elt {
                PathElt::Move(p) => {
                    if run.len() > 1 {
                        runs.push(mem::take(&mut run));
                    } else {
                        run.clear();
                    }
                    run.push(*p);
                }
                PathElt::Line(p) => run.push(*p),
                PathElt::Arc(center, radius) => circles.push((*center, *radius)),
            }
        }
        if run.len() > 1 {
            runs.push(run);
        }
        (runs, circles)
    }
}

impl Surface for RasterSurface {
    fn clear(&mut self) {
        for px in self.im.pixels_mut() {
            *px = Rgb([0, 0, 0]);
        }
    }
    fn draw_image(&mut self, im: &ViewImage, target: ShapeF) {
        let target: ShapeI = target.into();
        self.im = resize(im, target.w.max(1), target.h.max(1), FilterType::Triangle);
    }
    fn begin_path(&mut self) {
        self.path.clear();
    }
    fn move_to(&mut self, p: PtF) {
        self.path.push(PathElt::Move(p));
    }
    fn line_to(&mut self, p: PtF) {
        self.path.push(PathElt::Line(p));
    }
    fn arc(&mut self, center: PtF, radius: TPtF) {
        self.path.push(PathElt::Arc(center, radius));
    }
    fn stroke(&mut self) {
        let (runs, circles) = self.subpaths();
        if runs.is_empty() && circles.is_empty() {
            warn!("stroke on an empty path");
        }
        for run in runs {
            for seg in run.windows(2) {
                draw_line_segment_mut(
                    &mut self.im,
                    (seg[0].x as f32, seg[0].y as f32),
                    (seg[1].x as f32, seg[1].y as f32),
                    self.stroke_color,
                );
            }
        }
        for (center, radius) in circles {
            draw_hollow_circle_mut(
                &mut self.im,
                (center.x as i32, center.y as i32),
                radius as i32,
                self.stroke_color,
            );
        }
    }
    fn fill(&mut self) {
        let (runs, circles) = self.subpaths();
        for (center, radius) in circles {
            draw_filled_circle_mut(
                &mut self.im,
                (center.x as i32, center.y as i32),
                radius as i32,
                self.fill_color,
            );
        }
        for run in runs {
            // repeated vertices would cancel in the scanline fill
            let mut poly: Vec<PolyPoint<i32>> = vec![];
            for p in run {
                let p = PolyPoint::new(p.x as i32, p.y as i32);
                if !poly.contains(&p) {
                    poly.push(p);
                }
            }
            if poly.len() >= 3 {
                draw_polygon_mut(&mut self.im, &poly, self.fill_color);
            }
        }
    }
    fn set_fill_color(&mut self, color: [u8; 3]) {
        self.fill_color = Rgb(color);
    }
    fn set_stroke_color(&mut self, color: [u8; 3]) {
        self.stroke_color = Rgb(color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_segment() {
        let mut surface = RasterSurface::new(ShapeI::new(40, 40));
        surface.set_stroke_color(COLOR_PENDING);
        surface.begin_path();
        surface.move_to((0.0, 20.0).into());
        surface.line_to((39.0, 20.0).into());
        surface.stroke();
        assert_eq!(*surface.image().get_pixel(10, 20), Rgb(COLOR_PENDING));
        assert_eq!(*surface.image().get_pixel(10, 10), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_fill_disk() {
        let mut surface = RasterSurface::new(ShapeI::new(40, 40));
        surface.set_fill_color(COLOR_COMPLETE);
        surface.begin_path();
        surface.arc((20.0, 20.0).into(), POINT_RADIUS);
        surface.fill();
        assert_eq!(*surface.image().get_pixel(20, 20), Rgb(COLOR_COMPLETE));
        assert_eq!(*surface.image().get_pixel(20, 23), Rgb(COLOR_COMPLETE));
        assert_eq!(*surface.image().get_pixel(20, 30), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_fill_triangle() {
        let mut surface = RasterSurface::new(ShapeI::new(40, 40));
        surface.set_fill_color(COLOR_PENDING);
        surface.begin_path();
        surface.move_to((5.0, 5.0).into());
        surface.line_to((35.0, 5.0).into());
        surface.line_to((5.0, 35.0).into());
        // closing repeat as emitted by the arrowhead path
        surface.line_to((5.0, 5.0).into());
        surface.fill();
        assert_eq!(*surface.image().get_pixel(10, 10), Rgb(COLOR_PENDING));
        assert_eq!(*surface.image().get_pixel(35, 35), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_draw_image_resizes() {
        let mut surface = RasterSurface::new(ShapeI::new(10, 10));
        let im = ViewImage::from_pixel(100, 50, Rgb([200, 200, 200]));
        surface.draw_image(&im, ShapeF::new(80.0, 40.0));
        assert_eq!(surface.shape(), ShapeI::new(80, 40));
        assert_eq!(*surface.image().get_pixel(40, 20), Rgb([200, 200, 200]));
    }
}
