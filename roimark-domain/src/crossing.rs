use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_6;

use crate::canvas::{anno_color, Surface};
use crate::core::{PtF, TPtF};
use crate::result::{RmError, RmResult};
use crate::ScaleFactors;

/// length in display pixels of the two arrowhead segments
pub const ARROW_HEAD_LEN: TPtF = 20.0;
pub const N_CROSSING_POINTS: usize = 4;

/// Directed segment, rendering-only. With `head` the tip carries a filled
/// triangle built from two segments at ±30° off the segment angle.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Arrow {
    pub p1: PtF,
    pub p2: PtF,
    pub head: bool,
}

impl Arrow {
    pub fn new(p1: PtF, p2: PtF, head: bool) -> Self {
        Self { p1, p2, head }
    }
    /// endpoints of the two arrowhead segments
    pub fn head_points(&self) -> (PtF, PtF) {
        let angle = (self.p2.y - self.p1.y).atan2(self.p2.x - self.p1.x);
        let tip = |a: TPtF| PtF {
            x: self.p2.x - ARROW_HEAD_LEN * a.cos(),
            y: self.p2.y - ARROW_HEAD_LEN * a.sin(),
        };
        (tip(angle - FRAC_PI_6), tip(angle + FRAC_PI_6))
    }
    pub fn draw(&self, surface: &mut dyn Surface, color: [u8; 3]) {
        surface.set_stroke_color(color);
        surface.begin_path();
        surface.move_to(self.p1);
        surface.line_to(self.p2);
        surface.stroke();
        if self.head {
            let (left, right) = self.head_points();
            surface.set_fill_color(color);
            surface.begin_path();
            surface.move_to(self.p2);
            surface.line_to(left);
            surface.line_to(right);
            surface.line_to(self.p2);
            surface.line_to(left);
            surface.stroke();
            surface.fill();
        }
    }
}

/// Directional crossing detector over exactly four points. points[0..1] form
/// the reference segment, points[2..3] the trigger segment whose direction is
/// the crossing direction. Capture completes automatically on the 4th point.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct LineCrossing {
    id: u32,
    points: Vec<PtF>,
    is_complete: bool,
}

impl LineCrossing {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            points: vec![],
            is_complete: false,
        }
    }
    pub fn from_vec(id: u32, points: Vec<PtF>, is_complete: bool) -> RmResult<Self> {
        if points.len() > N_CROSSING_POINTS || (is_complete && points.len() != N_CROSSING_POINTS) {
            Err(RmError::InvalidShape(format!(
                "a line crossing takes exactly {} points, got {}",
                N_CROSSING_POINTS,
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
    pub fn add_point(&mut self, p: PtF) -> RmResult<()> {
        if self.points.len() == N_CROSSING_POINTS {
            return Err(RmError::OverCapture(format!(
                "line crossing {} already holds {} points",
                self.id, N_CROSSING_POINTS
            )));
        }
        self.points.push(p);
        if self.points.len() == N_CROSSING_POINTS {
            self.is_complete = true;
        }
        Ok(())
    }
    pub fn reference_segment(&self) -> Option<(PtF, PtF)> {
        if self.points.len() >= 2 {
            Some((self.points[0], self.points[1]))
        } else {
            None
        }
    }
    pub fn trigger_segment(&self) -> Option<(PtF, PtF)> {
        if self.points.len() >= N_CROSSING_POINTS {
            Some((self.points[2], self.points[3]))
        } else {
            None
        }
    }
    pub fn draw(&self, surface: &mut dyn Surface) {
        let color = anno_color(self.is_complete);
        if let Some((p1, p2)) = self.reference_segment() {
            Arrow::new(p1, p2, false).draw(surface, color);
        }
        if let Some((p1, p2)) = self.trigger_segment() {
            Arrow::new(p1, p2, true).draw(surface, color);
        }
        for p in self.points_iter() {
            p.draw(surface, color);
        }
    }
    /// one `line-crossing-P<id>=…;` line in source-image coordinates, the
    /// trigger segment first as the downstream consumer expects it
    pub fn config_line(&self, scale: ScaleFactors) -> RmResult<String> {
        let (trigger, reference) = match (self.trigger_segment(), self.reference_segment()) {
            (Some(t), Some(r)) => (t, r),
            _ => {
                return Err(RmError::InvalidShape(format!(
                    "line crossing {} has {} of {} points",
                    self.id,
                    self.points.len(),
                    N_CROSSING_POINTS
                )))
            }
        };
        let mut line = format!("line-crossing-P{}=", self.id);
        for p in [trigger.0, trigger.1, reference.0, reference.1] {
            let p = scale.to_orig(p);
            line += &format!("{};{};", p.x, p.y);
        }
        Ok(line)
    }
}
