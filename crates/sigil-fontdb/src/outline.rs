// this_file: crates/sigil-fontdb/src/outline.rs

//! Glyph outline recording
//!
//! One pass over the glyph's contours produces both the command list the
//! serializer writes out and the exact ink bounds (curve extrema included,
//! not just control points).

use kurbo::{BezPath, Shape};
use sigil_core::{types::PathCommand, Bounds};
use skrifa::outline::OutlinePen;

/// Pen that records commands in font units and tracks their geometry
#[derive(Debug, Default)]
pub struct RecordingPen {
    commands: Vec<PathCommand>,
    path: BezPath,
}

impl RecordingPen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands and their tight bounds (`None` when nothing was drawn)
    pub fn finish(self) -> (Vec<PathCommand>, Option<Bounds>) {
        let has_segments = self
            .commands
            .iter()
            .any(|cmd| !matches!(cmd, PathCommand::MoveTo(..) | PathCommand::Close));
        if !has_segments {
            return (Vec::new(), None);
        }

        let rect = self.path.bounding_box();
        let bounds = Bounds::new(rect.x0, rect.y0, rect.x1, rect.y1);
        (self.commands, Some(bounds))
    }
}

impl OutlinePen for RecordingPen {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = (f64::from(x), f64::from(y));
        self.commands.push(PathCommand::MoveTo(x, y));
        self.path.move_to((x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = (f64::from(x), f64::from(y));
        self.commands.push(PathCommand::LineTo(x, y));
        self.path.line_to((x, y));
    }

    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        let (ctrl_x, ctrl_y) = (f64::from(cx), f64::from(cy));
        let (x, y) = (f64::from(x), f64::from(y));
        self.commands.push(PathCommand::QuadTo {
            ctrl_x,
            ctrl_y,
            x,
            y,
        });
        self.path.quad_to((ctrl_x, ctrl_y), (x, y));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let (ctrl1_x, ctrl1_y) = (f64::from(cx0), f64::from(cy0));
        let (ctrl2_x, ctrl2_y) = (f64::from(cx1), f64::from(cy1));
        let (x, y) = (f64::from(x), f64::from(y));
        self.commands.push(PathCommand::CurveTo {
            ctrl1_x,
            ctrl1_y,
            ctrl2_x,
            ctrl2_y,
            x,
            y,
        });
        self.path
            .curve_to((ctrl1_x, ctrl1_y), (ctrl2_x, ctrl2_y), (x, y));
    }

    fn close(&mut self) {
        self.commands.push(PathCommand::Close);
        self.path.close_path();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pen_has_no_bounds() {
        let (commands, bounds) = RecordingPen::new().finish();
        assert!(commands.is_empty());
        assert!(bounds.is_none());
    }

    #[test]
    fn test_lone_move_is_empty() {
        let mut pen = RecordingPen::new();
        pen.move_to(10.0, 10.0);
        pen.close();
        let (commands, bounds) = pen.finish();
        assert!(commands.is_empty());
        assert!(bounds.is_none());
    }

    #[test]
    fn test_polygon_bounds() {
        let mut pen = RecordingPen::new();
        pen.move_to(50.0, 0.0);
        pen.line_to(450.0, 0.0);
        pen.line_to(250.0, 700.0);
        pen.close();
        let (commands, bounds) = pen.finish();
        assert_eq!(commands.len(), 4);
        assert_eq!(bounds, Some(Bounds::new(50.0, 0.0, 450.0, 700.0)));
    }

    #[test]
    fn test_curve_bounds_use_extrema_not_control_points() {
        let mut pen = RecordingPen::new();
        pen.move_to(0.0, 0.0);
        // control point at y=200, curve apex at y=100
        pen.quad_to(100.0, 200.0, 200.0, 0.0);
        pen.close();
        let (_, bounds) = pen.finish();
        let bounds = bounds.unwrap();
        assert!((bounds.y_max - 100.0).abs() < 1e-9);
        assert_eq!(bounds.x_min, 0.0);
        assert_eq!(bounds.x_max, 200.0);
    }
}
