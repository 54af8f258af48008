//! The 2D raster surface the renderer draws onto.

use glam::DVec2;
use vectorscape_common::Rgba;

/// Minimal 2D drawing target: rectangles, closed polylines and circles.
///
/// Color and line width are passed per call. Coordinates are in pixels with
/// the origin at the top-left corner.
pub trait Surface {
    /// Current size in pixels as `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Composite a filled rectangle over the existing pixels.
    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: Rgba);

    /// Stroke a closed polyline through `points`.
    fn stroke_polyline(&mut self, points: &[DVec2], color: Rgba, line_width: f64);

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba);

    fn stroke_circle(&mut self, center: DVec2, radius: f64, color: Rgba, line_width: f64);
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        origin: DVec2,
        size: DVec2,
        color: Rgba,
    },
    StrokePolyline {
        points: Vec<DVec2>,
        color: Rgba,
        line_width: f64,
    },
    FillCircle {
        center: DVec2,
        radius: f64,
        color: Rgba,
    },
    StrokeCircle {
        center: DVec2,
        radius: f64,
        color: Rgba,
        line_width: f64,
    },
}

/// Surface that records every call instead of rasterizing.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands, leaving the surface empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: Rgba) {
        self.commands.push(DrawCommand::FillRect {
            origin,
            size,
            color,
        });
    }

    fn stroke_polyline(&mut self, points: &[DVec2], color: Rgba, line_width: f64) {
        self.commands.push(DrawCommand::StrokePolyline {
            points: points.to_vec(),
            color,
            line_width,
        });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64, color: Rgba, line_width: f64) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            color,
            line_width,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_call_order() {
        let mut s = RecordingSurface::new(100, 50);
        s.fill_rect(DVec2::ZERO, DVec2::new(100.0, 50.0), Rgba::BLACK);
        s.fill_circle(DVec2::new(5.0, 5.0), 2.0, Rgba::WHITE);
        assert_eq!(s.size(), (100, 50));
        assert_eq!(s.commands().len(), 2);
        assert!(matches!(s.commands()[0], DrawCommand::FillRect { .. }));
        assert!(matches!(s.commands()[1], DrawCommand::FillCircle { .. }));
    }

    #[test]
    fn take_commands_clears() {
        let mut s = RecordingSurface::new(10, 10);
        s.stroke_polyline(&[DVec2::ZERO, DVec2::ONE], Rgba::WHITE, 1.0);
        assert_eq!(s.take_commands().len(), 1);
        assert!(s.commands().is_empty());
    }
}
