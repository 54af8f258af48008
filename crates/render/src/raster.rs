use crate::RenderError;
use crate::surface::Surface;
use glam::DVec2;
use std::path::Path;
use tiny_skia::{Color as SkiaColor, FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};
use vectorscape_common::Rgba;

/// tiny-skia backed raster surface, initially opaque black.
///
/// Pixel data is premultiplied RGBA8, row-major, no padding.
pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RenderError::InvalidSurfaceSize { width, height })?;
        pixmap.fill(SkiaColor::BLACK);
        Ok(Self { pixmap })
    }

    /// Replace the pixmap with a cleared one of the new size.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        if (width, height) != self.size() {
            *self = Self::new(width, height)?;
        }
        Ok(())
    }

    pub fn pixels(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Straight-alpha color of one pixel, `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            Rgba {
                r: c.red(),
                g: c.green(),
                b: c.blue(),
                a: c.alpha(),
            }
        })
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::Png(e.to_string()))
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        self.pixmap
            .save_png(path)
            .map_err(|e| RenderError::Png(e.to_string()))
    }
}

fn paint(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn stroke(line_width: f64) -> Stroke {
    Stroke {
        width: line_width as f32,
        ..Stroke::default()
    }
}

impl Surface for PixmapSurface {
    fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: Rgba) {
        if let Some(rect) =
            Rect::from_xywh(origin.x as f32, origin.y as f32, size.x as f32, size.y as f32)
        {
            self.pixmap
                .fill_rect(rect, &paint(color), Transform::identity(), None);
        }
    }

    fn stroke_polyline(&mut self, points: &[DVec2], color: Rgba, line_width: f64) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut pb = PathBuilder::new();
        pb.move_to(first.x as f32, first.y as f32);
        for p in rest {
            pb.line_to(p.x as f32, p.y as f32);
        }
        pb.close();
        // finish() rejects empty or non-finite paths
        if let Some(path) = pb.finish() {
            self.pixmap.stroke_path(
                &path,
                &paint(color),
                &stroke(line_width),
                Transform::identity(),
                None,
            );
        }
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        if let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32)
        {
            self.pixmap.fill_path(
                &path,
                &paint(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64, color: Rgba, line_width: f64) {
        if let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32)
        {
            self.pixmap.stroke_path(
                &path,
                &paint(color),
                &stroke(line_width),
                Transform::identity(),
                None,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(
            PixmapSurface::new(0, 10),
            Err(RenderError::InvalidSurfaceSize { width: 0, height: 10 })
        ));
    }

    #[test]
    fn starts_opaque_black() {
        let s = PixmapSurface::new(8, 4).unwrap();
        assert_eq!(s.size(), (8, 4));
        assert_eq!(s.pixels().len(), 8 * 4 * 4);
        assert_eq!(s.pixel(3, 2), Some(Rgba::BLACK));
        assert_eq!(s.pixel(8, 0), None);
    }

    #[test]
    fn filled_circle_covers_center() {
        let mut s = PixmapSurface::new(32, 32).unwrap();
        s.fill_circle(DVec2::new(16.0, 16.0), 6.0, Rgba::WHITE);
        assert_eq!(s.pixel(16, 16), Some(Rgba::WHITE));
        assert_eq!(s.pixel(1, 1), Some(Rgba::BLACK));
    }

    #[test]
    fn fade_rect_darkens_previous_frame() {
        let mut s = PixmapSurface::new(16, 16).unwrap();
        s.fill_rect(DVec2::ZERO, DVec2::new(16.0, 16.0), Rgba::WHITE);
        s.fill_rect(DVec2::ZERO, DVec2::new(16.0, 16.0), Rgba::BLACK.with_alpha(0.1));
        let p = s.pixel(8, 8).unwrap();
        assert!((225..=232).contains(&p.r), "unexpected fade result {p:?}");
        assert_eq!(p.a, 255);
    }

    #[test]
    fn degenerate_shapes_are_ignored() {
        let mut s = PixmapSurface::new(16, 16).unwrap();
        s.fill_circle(DVec2::new(f64::NAN, 3.0), 2.0, Rgba::WHITE);
        s.stroke_circle(DVec2::new(8.0, 8.0), -1.0, Rgba::WHITE, 1.0);
        s.stroke_polyline(&[], Rgba::WHITE, 1.0);
        s.stroke_polyline(
            &[DVec2::new(f64::INFINITY, 0.0), DVec2::new(4.0, 4.0)],
            Rgba::WHITE,
            1.0,
        );
        assert!(s.pixels().chunks(4).all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    fn resize_replaces_pixmap() {
        let mut s = PixmapSurface::new(16, 16).unwrap();
        s.resize(20, 10).unwrap();
        assert_eq!(s.size(), (20, 10));
        assert!(s.resize(0, 0).is_err());
    }

    #[test]
    fn writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let s = PixmapSurface::new(4, 4).unwrap();
        s.save_png(&path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(s.encode_png().unwrap(), bytes);
    }
}
