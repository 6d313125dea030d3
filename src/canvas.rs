//! Software drawing surface.
//!
//! [`Canvas`] rasterises a [`Frame`] into an RGB float buffer. Lines and
//! circles get one pixel of analytic anti-aliasing. The buffer persists
//! between frames, so the translucent trail layer produces motion blur.
//!
//! The windowed runner uploads [`Canvas::to_rgba8`] into a GPU texture; the
//! headless runner writes it to PNG with [`Canvas::save_png`].

use crate::error::CaptureError;
use crate::render::{BlendMode, Frame, GradientStop, Shape};
use glam::{Vec2, Vec3};
use std::path::Path;

/// RGB raster with alpha and additive compositing.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Vec3>,
}

impl Canvas {
    /// Create a black canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec3::ZERO; (width as usize) * (height as usize)],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Change the size, clearing the contents.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        *self = Self::new(width, height);
    }

    /// Fill the whole canvas with `color`.
    pub fn clear(&mut self, color: Vec3) {
        self.pixels.fill(color);
    }

    /// Colour of pixel `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Vec3> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    /// Play back every layer of `frame`, in order.
    pub fn draw(&mut self, frame: &Frame) {
        for layer in &frame.layers {
            for shape in &layer.shapes {
                self.draw_shape(shape, layer.blend);
            }
        }
    }

    /// Rasterise a single shape.
    pub fn draw_shape(&mut self, shape: &Shape, blend: BlendMode) {
        match shape {
            Shape::Rect { min, max, color, alpha } => self.fill_rect(*min, *max, *color, *alpha, blend),
            Shape::Line { from, to, width, color, alpha } => {
                self.stroke_line(*from, *to, *width, *color, *alpha, blend)
            }
            Shape::Circle { center, radius, color, alpha } => {
                self.fill_circle(*center, *radius, *color, *alpha, blend)
            }
            Shape::RadialGradient { center, radius, stops } => {
                self.fill_radial_gradient(*center, *radius, stops, blend)
            }
        }
    }

    pub fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Vec3, alpha: f32, blend: BlendMode) {
        let Some((x0, y0, x1, y1)) = self.clip(min, max) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend_pixel(x, y, color, alpha, blend);
            }
        }
    }

    pub fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Vec3, alpha: f32, blend: BlendMode) {
        if width <= 0.0 || alpha <= 0.0 {
            return;
        }
        // Hairlines are drawn one pixel wide and dimmed instead.
        let half = width.max(1.0) * 0.5;
        let alpha = alpha * width.min(1.0);

        let pad = Vec2::splat(half + 1.0);
        let Some((x0, y0, x1, y1)) = self.clip(from.min(to) - pad, from.max(to) + pad) else {
            return;
        };

        let seg = to - from;
        let len_sq = seg.length_squared();
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let t = if len_sq > 0.0 {
                    ((p - from).dot(seg) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let dist = (p - (from + seg * t)).length();
                let coverage = (half + 0.5 - dist).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_pixel(x, y, color, alpha * coverage, blend);
                }
            }
        }
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec3, alpha: f32, blend: BlendMode) {
        if radius <= 0.0 || alpha <= 0.0 {
            return;
        }
        // Sub-pixel dots keep their energy by fading instead of shrinking.
        let r = radius.max(0.5);
        let alpha = alpha * (radius / r).powi(2);

        let pad = Vec2::splat(r + 1.0);
        let Some((x0, y0, x1, y1)) = self.clip(center - pad, center + pad) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (r + 0.5 - p.distance(center)).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_pixel(x, y, color, alpha * coverage, blend);
                }
            }
        }
    }

    pub fn fill_radial_gradient(&mut self, center: Vec2, radius: f32, stops: &[GradientStop], blend: BlendMode) {
        if radius <= 0.0 || stops.is_empty() {
            return;
        }
        let pad = Vec2::splat(radius);
        let Some((x0, y0, x1, y1)) = self.clip(center - pad, center + pad) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let t = p.distance(center) / radius;
                if t > 1.0 {
                    continue;
                }
                let (color, alpha) = gradient_at(stops, t);
                if alpha > 0.0 {
                    self.blend_pixel(x, y, color, alpha, blend);
                }
            }
        }
    }

    /// Pixels as 8-bit RGBA, row-major, fully opaque.
    pub fn to_rgba8(&self) -> Vec<[u8; 4]> {
        self.pixels
            .iter()
            .map(|c| {
                let c = c.clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
                [c.x.round() as u8, c.y.round() as u8, c.z.round() as u8, 255]
            })
            .collect()
    }

    /// Write the current contents to a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), CaptureError> {
        let rgba = self.to_rgba8();
        let width = self.width;
        let image = image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            image::Rgba(rgba[(y * width + x) as usize])
        });
        image.save(path)?;
        Ok(())
    }

    /// Intersect the box `[min, max)` with the canvas, in whole pixels.
    fn clip(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(self.width as f32);
        let y1 = max.y.ceil().min(self.height as f32);
        if !(x0 < x1 && y0 < y1) {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    #[inline]
    fn blend_pixel(&mut self, x: u32, y: u32, color: Vec3, alpha: f32, blend: BlendMode) {
        let alpha = alpha.clamp(0.0, 1.0);
        let dst = &mut self.pixels[(y * self.width + x) as usize];
        *dst = match blend {
            BlendMode::Alpha => *dst + (color - *dst) * alpha,
            BlendMode::Additive => (*dst + color * alpha).min(Vec3::ONE),
        };
    }
}

/// Colour and alpha of a gradient at radius fraction `t`.
fn gradient_at(stops: &[GradientStop], t: f32) -> (Vec3, f32) {
    let first = stops[0];
    if t <= first.offset {
        return (first.color, first.alpha);
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = (b.offset - a.offset).max(f32::EPSILON);
            let k = ((t - a.offset) / span).clamp(0.0, 1.0);
            return (a.color.lerp(b.color, k), a.alpha + (b.alpha - a.alpha) * k);
        }
    }
    let last = stops[stops.len() - 1];
    (last.color, last.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_blend_half() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill_rect(Vec2::ZERO, Vec2::new(4.0, 4.0), Vec3::ONE, 0.5, BlendMode::Alpha);
        let p = canvas.pixel(1, 1).unwrap();
        assert!((p.x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_additive_accumulates_and_saturates() {
        let mut canvas = Canvas::new(2, 2);
        let red = Vec3::new(1.0, 0.0, 0.0);
        canvas.fill_rect(Vec2::ZERO, Vec2::new(2.0, 2.0), red, 0.4, BlendMode::Additive);
        canvas.fill_rect(Vec2::ZERO, Vec2::new(2.0, 2.0), red, 0.4, BlendMode::Additive);
        assert!((canvas.pixel(0, 0).unwrap().x - 0.8).abs() < 1e-6);
        canvas.fill_rect(Vec2::ZERO, Vec2::new(2.0, 2.0), red, 0.9, BlendMode::Additive);
        assert_eq!(canvas.pixel(0, 0).unwrap().x, 1.0);
    }

    #[test]
    fn test_offscreen_shapes_are_ignored() {
        let mut canvas = Canvas::new(8, 8);
        canvas.fill_rect(Vec2::new(-50.0, -50.0), Vec2::new(-10.0, -10.0), Vec3::ONE, 1.0, BlendMode::Alpha);
        canvas.stroke_line(Vec2::new(100.0, 0.0), Vec2::new(200.0, 5.0), 3.0, Vec3::ONE, 1.0, BlendMode::Alpha);
        canvas.fill_circle(Vec2::new(-20.0, 4.0), 3.0, Vec3::ONE, 1.0, BlendMode::Alpha);
        assert!(canvas.to_rgba8().iter().all(|p| p[0] == 0));
    }

    #[test]
    fn test_line_covers_its_path_only() {
        let mut canvas = Canvas::new(20, 20);
        canvas.stroke_line(Vec2::new(2.0, 10.0), Vec2::new(18.0, 10.0), 2.0, Vec3::ONE, 1.0, BlendMode::Alpha);
        assert!(canvas.pixel(10, 9).unwrap().x > 0.9);
        assert!(canvas.pixel(10, 10).unwrap().x > 0.9);
        assert_eq!(canvas.pixel(10, 15).unwrap(), Vec3::ZERO);
    }

    #[test]
    fn test_circle_is_round() {
        let mut canvas = Canvas::new(21, 21);
        canvas.fill_circle(Vec2::new(10.5, 10.5), 5.0, Vec3::ONE, 1.0, BlendMode::Alpha);
        assert!(canvas.pixel(10, 10).unwrap().x > 0.99);
        assert!(canvas.pixel(10, 14).unwrap().x > 0.99);
        assert_eq!(canvas.pixel(14, 14).unwrap(), Vec3::ZERO);
    }

    #[test]
    fn test_radial_gradient_interpolates() {
        let mut canvas = Canvas::new(41, 41);
        let stops = [
            GradientStop { offset: 0.0, color: Vec3::ONE, alpha: 1.0 },
            GradientStop { offset: 1.0, color: Vec3::ONE, alpha: 0.0 },
        ];
        canvas.fill_radial_gradient(Vec2::new(20.5, 20.5), 20.0, &stops, BlendMode::Alpha);
        let center = canvas.pixel(20, 20).unwrap().x;
        let mid = canvas.pixel(30, 20).unwrap().x;
        let edge = canvas.pixel(40, 20).unwrap().x;
        assert!(center > 0.95);
        assert!(mid > edge && mid < center);
        assert!((mid - 0.5).abs() < 0.05);
    }

    #[test]
    fn test_rgba8_export() {
        let mut canvas = Canvas::new(3, 2);
        canvas.clear(Vec3::new(1.0, 0.5, 0.0));
        let rgba = canvas.to_rgba8();
        assert_eq!(rgba.len(), 6);
        assert_eq!(rgba[0], [255, 128, 0, 255]);
    }

    #[test]
    fn test_resize_clears() {
        let mut canvas = Canvas::new(2, 2);
        canvas.clear(Vec3::ONE);
        canvas.resize(3, 3);
        assert_eq!(canvas.pixel(2, 2), Some(Vec3::ZERO));
        assert_eq!(canvas.pixel(3, 0), None);
    }
}
