use roimark_domain::{
    AnnoFig, LineCrossing, Polygon, PtF, RmError, RmResult, ShapeI, Surface, ViewImage,
    ViewMetrics,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cfg::Cfg;
use crate::panels::{OutputPanel, SidePanel};

const INITIAL_ID: u32 = 1;

/// Capture mode, the factory for the active annotation variant.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Region,
    LineCrossing,
}
impl Mode {
    fn new_fig(&self, id: u32) -> AnnoFig {
        match self {
            Mode::Region => AnnoFig::Poly(Polygon::new(id)),
            Mode::LineCrossing => AnnoFig::Crossing(LineCrossing::new(id)),
        }
    }
}

/// The capture state machine. Per mode and image it is either idle or holds
/// exactly one figure under capture; completed figures are appended in
/// completion order and serialized into the output panel. All collaborators
/// are injected, the session itself never touches a UI.
///
/// Operations fail with [`RmError::NotReady`](RmError::NotReady) until
/// [`replace_image`](AnnotationSession::replace_image) has provided image
/// metrics.
pub struct AnnotationSession<S, O, P>
where
    S: Surface,
    O: OutputPanel,
    P: SidePanel,
{
    surface: S,
    output: O,
    side_panel: P,
    cfg: Cfg,
    mode: Mode,
    background: Option<ViewImage>,
    view: Option<ViewMetrics>,
    current: Option<AnnoFig>,
    completed: Vec<AnnoFig>,
    next_id: u32,
}

impl<S, O, P> AnnotationSession<S, O, P>
where
    S: Surface,
    O: OutputPanel,
    P: SidePanel,
{
    pub fn new(surface: S, output: O, side_panel: P, cfg: Cfg) -> Self {
        Self {
            surface,
            output,
            side_panel,
            cfg,
            mode: Mode::default(),
            background: None,
            view: None,
            current: None,
            completed: vec![],
            next_id: INITIAL_ID,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
    pub fn is_capturing(&self) -> bool {
        self.current.is_some()
    }
    pub fn completed(&self) -> &Vec<AnnoFig> {
        &self.completed
    }
    pub fn view(&self) -> Option<ViewMetrics> {
        self.view
    }
    pub fn surface(&self) -> &S {
        &self.surface
    }
    pub fn output(&self) -> &O {
        &self.output
    }
    pub fn side_panel(&self) -> &P {
        &self.side_panel
    }

    fn view_metrics(&self) -> RmResult<ViewMetrics> {
        self.view.ok_or_else(|| {
            RmError::NotReady("no image metrics yet, load an image first".to_string())
        })
    }

    /// Left click on the canvas at display position `pos`. Starts a new
    /// figure when idle, appends otherwise; a line crossing that became
    /// complete with this point is emitted right away.
    pub fn click(&mut self, pos: PtF) -> RmResult<()> {
        let metrics = self.view_metrics()?;
        if self.current.is_none() {
            let id = self.next_id;
            self.next_id += 1;
            let fig = self.mode.new_fig(id);
            info!("start {} #{id}", fig.kind_label());
            self.side_panel
                .new_group(&format!("{} #{id}", fig.kind_label()));
            self.current = Some(fig);
        }
        let mut became_complete = false;
        if let Some(fig) = &mut self.current {
            fig.add_point(pos)?;
            became_complete = fig.is_complete();
        }
        let scaled = metrics.scale.to_orig(pos);
        self.side_panel
            .append_current_group(&format!("({}, {})", scaled.x, scaled.y))?;
        self.redraw();
        if became_complete {
            self.emit_current()?;
        }
        Ok(())
    }

    /// Right click completes the polygon under capture. With `<= 2` captured
    /// points, while idle, or on a line crossing (those complete on their 4th
    /// point) this is a benign no-op.
    pub fn right_click(&mut self) -> RmResult<()> {
        let completable =
            matches!(&self.current, Some(AnnoFig::Poly(poly)) if poly.points().len() > 2);
        if !completable {
            return Ok(());
        }
        if let Some(fig) = &mut self.current {
            fig.try_complete()?;
        }
        self.emit_current()
    }

    /// serialize the completed figure, hand it to the output panel and move
    /// it out of capture
    fn emit_current(&mut self) -> RmResult<()> {
        let metrics = self.view_metrics()?;
        if let Some(fig) = self.current.take() {
            let line = fig.config_line(metrics.scale)?;
            debug!("emit {line}");
            self.output.add_line(&line);
            self.side_panel.end_group();
            self.completed.push(fig);
            self.redraw();
        }
        Ok(())
    }

    /// no-op for the active mode, a hard reset otherwise
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        info!("mode change to {mode:?}");
        self.mode = mode;
        self.hard_reset();
    }

    /// Swap the reference image. Resets like a mode change and derives the
    /// view metrics from the new image, after which the session is ready.
    pub fn replace_image(&mut self, im: ViewImage) {
        let shape_orig = ShapeI::from_im(&im);
        let metrics = ViewMetrics::new(
            shape_orig,
            self.cfg.min_canvas_width,
            self.cfg.max_canvas_width,
        );
        info!(
            "image replaced, {}x{} at scale ({}, {})",
            shape_orig.w, shape_orig.h, metrics.scale.x, metrics.scale.y
        );
        self.background = Some(im);
        self.view = Some(metrics);
        self.hard_reset();
    }

    /// discard any capture, clear completed figures and both panels, restart
    /// the id counter, keep the loaded image
    fn hard_reset(&mut self) {
        self.current = None;
        self.completed.clear();
        self.next_id = INITIAL_ID;
        self.output.reset();
        self.side_panel.reset();
        self.redraw();
    }

    fn redraw(&mut self) {
        let Some(metrics) = self.view else {
            return;
        };
        self.surface.clear();
        if let Some(background) = &self.background {
            self.surface.draw_image(background, metrics.canvas);
        }
        for fig in &self.completed {
            fig.draw(&mut self.surface);
        }
        if let Some(fig) = &self.current {
            fig.draw(&mut self.surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::{CoordGroups, TextOutput};
    use crate::test_helpers::{make_ready_session, test_image, RecordingSurface, SurfaceOp};
    use roimark_domain::{COLOR_PENDING, POINT_RADIUS};

    #[test]
    fn test_click_before_image() {
        let mut session = AnnotationSession::new(
            RecordingSurface::default(),
            TextOutput::new(),
            CoordGroups::new(),
            Cfg::default(),
        );
        assert!(matches!(
            session.click((10.0, 10.0).into()),
            Err(RmError::NotReady(_))
        ));
        assert!(!session.is_capturing());
        session.replace_image(test_image());
        session.click((10.0, 10.0).into()).unwrap();
        assert!(session.is_capturing());
    }

    #[test]
    fn test_polygon_flow() {
        // the test image maps to scale factors (2, 2)
        let mut session = make_ready_session();
        session.click((10.5, 10.5).into()).unwrap();
        session.click((20.0, 10.0).into()).unwrap();
        // premature completion attempt is ignored
        session.right_click().unwrap();
        assert!(session.is_capturing());
        assert!(session.output().lines().is_empty());
        session.click((20.0, 30.0).into()).unwrap();
        session.right_click().unwrap();
        assert!(!session.is_capturing());
        assert_eq!(session.completed().len(), 1);
        assert!(session.completed()[0].is_complete());
        assert_eq!(session.output().lines(), &["roi-P1=21;21;40;20;40;60;"]);
        let groups = session.side_panel().groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, "Polygon #1");
        assert_eq!(groups[0].1, vec!["(21, 21)", "(40, 20)", "(40, 60)"]);
        // ids are handed out monotonically
        session.click((0.0, 0.0).into()).unwrap();
        assert_eq!(session.side_panel().groups()[1].0, "Polygon #2");
    }

    #[test]
    fn test_right_click_idle() {
        let mut session = make_ready_session();
        session.right_click().unwrap();
        assert!(!session.is_capturing());
        assert!(session.output().lines().is_empty());
    }

    #[test]
    fn test_crossing_flow() {
        let mut session = make_ready_session();
        session.set_mode(Mode::LineCrossing);
        for pos in [(0.0, 0.0), (5.0, 5.0), (10.0, 10.0)] {
            session.click(pos.into()).unwrap();
        }
        // right click never completes a crossing
        session.right_click().unwrap();
        assert!(session.is_capturing());
        session.click((15.0, 5.0).into()).unwrap();
        assert!(!session.is_capturing());
        assert_eq!(session.completed().len(), 1);
        assert_eq!(
            session.output().lines(),
            &["line-crossing-P1=20;20;30;10;0;0;10;10;"]
        );
        assert_eq!(session.side_panel().groups()[0].0, "Line crossing #1");
        assert_eq!(session.side_panel().groups()[0].1.len(), 4);
    }

    #[test]
    fn test_mode_switch_resets() {
        let mut session = make_ready_session();
        for pos in [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)] {
            session.click(pos.into()).unwrap();
        }
        session.right_click().unwrap();
        // a second figure is under capture during the switch
        session.click((30.0, 30.0).into()).unwrap();
        assert!(session.is_capturing());
        session.set_mode(Mode::LineCrossing);
        assert!(!session.is_capturing());
        assert!(session.completed().is_empty());
        assert!(session.output().lines().is_empty());
        assert!(session.side_panel().groups().is_empty());
        // the id counter restarts
        session.click((0.0, 0.0).into()).unwrap();
        assert_eq!(session.side_panel().groups()[0].0, "Line crossing #1");
        // switching to the active mode is a no-op
        session.set_mode(Mode::LineCrossing);
        assert!(session.is_capturing());
    }

    #[test]
    fn test_image_replace_resets() {
        let mut session = make_ready_session();
        for pos in [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)] {
            session.click(pos.into()).unwrap();
        }
        session.right_click().unwrap();
        assert_eq!(session.completed().len(), 1);
        session.replace_image(test_image());
        assert!(session.completed().is_empty());
        assert!(session.output().lines().is_empty());
        assert!(!session.is_capturing());
        session.click((0.0, 0.0).into()).unwrap();
        assert_eq!(session.side_panel().groups()[0].0, "Polygon #1");
    }

    #[test]
    fn test_redraw_ops() {
        let mut session = make_ready_session();
        let canvas = session.view().map(|m| m.canvas);
        let n_after_load = session.surface().ops.len();
        assert_eq!(
            &session.surface().ops[n_after_load - 2..],
            &[SurfaceOp::Clear, SurfaceOp::DrawImage(canvas.unwrap())]
        );
        session.click((10.0, 10.0).into()).unwrap();
        let disk = [
            SurfaceOp::SetFillColor(COLOR_PENDING),
            SurfaceOp::BeginPath,
            SurfaceOp::Arc((10.0, 10.0).into(), POINT_RADIUS),
            SurfaceOp::Fill,
        ];
        assert_eq!(&session.surface().ops[session.surface().ops.len() - 4..], &disk);
    }
}
