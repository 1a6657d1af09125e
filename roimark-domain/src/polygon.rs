use serde::{Deserialize, Serialize};

use crate::canvas::{anno_color, Surface};
use crate::core::PtF;
use crate::result::{RmError, RmResult};
use crate::ScaleFactors;

/// Closed region of interest. The boundary stays open during capture, the
/// closing segment only appears once the polygon is complete. Completion is
/// always triggered from the outside, capture appends unconditionally.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Polygon {
    id: u32,
    points: Vec<PtF>,
    is_complete: bool,
}

impl Polygon {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            points: vec![],
            is_complete: false,
        }
    }
    pub fn from_vec(id: u32, points: Vec<PtF>, is_complete: bool) -> RmResult<Self> {
        if is_complete && points.len() <= 2 {
            Err(RmError::InvalidShape(format!(
                "a complete polygon needs more than 2 points, got {}",
                points.len()
            )))
        } else {
            Ok(Self {
                id,
                points,
                is_complete,
            })
        }
    }
    pub fn id(&self) -> u32 {
        self.id
    }
    pub fn points(&self) -> &Vec<PtF> {
        &self.points
    }
    #[allow(clippy::needless_lifetimes)]
    pub fn points_iter<'a>(&'a self) -> impl Iterator<Item = PtF> + 'a + Clone {
        self.points.iter().copied()
    }
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }
    pub fn add_point(&mut self, p: PtF) {
        self.points.push(p);
    }
    /// close the boundary, `> 2` points required
    pub fn try_complete(&mut self) -> RmResult<()> {
        if self.points.len() <= 2 {
            Err(RmError::InvalidShape(format!(
                "polygon {} cannot be completed with {} points",
                self.id,
                self.points.len()
            )))
        } else {
            self.is_complete = true;
            Ok(())
        }
    }
    pub fn draw(&self, surface: &mut dyn Surface) {
        let color = anno_color(self.is_complete);
        if self.points.len() > 1 {
            surface.begin_path();
            surface.set_stroke_color(color);
            for seg in self.points.windows(2) {
                surface.move_to(seg[0]);
                surface.line_to(seg[1]);
            }
            if self.is_complete {
                if let (Some(&first), Some(&last)) = (self.points.first(), self.points.last()) {
                    surface.move_to(last);
                    surface.line_to(first);
                }
            }
            surface.stroke();
        }
        for p in self.points_iter() {
            p.draw(surface, color);
        }
    }
    /// one `roi-P<id>=x;y;…;` line in source-image coordinates
    pub fn config_line(&self, scale: ScaleFactors) -> String {
        let mut line = format!("roi-P{}=", self.id);
        for p in self.points_iter() {
            let p = scale.to_orig(p);
            line += &format!("{};{};", p.x, p.y);
        }
        line
    }
}
