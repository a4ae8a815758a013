use std::path::Path;

use image::{ImageResult, Rgb, RgbImage};
use log::info;

use crate::layout::{Circle, Rectangle, SceneLayout};

const BACKGROUND: Rgb<u8> = Rgb([0x2b, 0x2b, 0x2b]);
const FILL: Rgb<u8> = Rgb([0xec, 0xce, 0x6d]);

/// Rasterise a scene layout: frame, walls, goal and ball in the fill colour over a plain
/// background. Shapes hanging off the canvas edge are clipped.
pub fn render_layout(layout: &SceneLayout) -> RgbImage {

    let mut img = RgbImage::from_pixel(layout.width().0, layout.height().0, BACKGROUND);

    for rect in layout.boundaries().iter().chain(layout.walls()) {
        fill_rectangle(&mut img, rect);
    }
    fill_rectangle(&mut img, &layout.goal());
    fill_circle(&mut img, &layout.ball());

    img
}

/// Render the layout and write it out as a PNG file.
pub fn save_png<P: AsRef<Path>>(layout: &SceneLayout, path: P) -> ImageResult<()> {
    let img = render_layout(layout);
    img.save_with_format(path.as_ref(), image::ImageFormat::Png)?;
    info!("Wrote {} x {} maze image to {}", img.width(), img.height(), path.as_ref().display());
    Ok(())
}

/// Pixel range [start, end) covering [low, high] on an axis of `extent` pixels.
fn pixel_span(low: f64, high: f64, extent: u32) -> (u32, u32) {
    let clamp = |v: f64| v.max(0.0).min(extent as f64);
    (clamp(low.floor()) as u32, clamp(high.ceil()) as u32)
}

fn fill_rectangle(img: &mut RgbImage, rect: &Rectangle) {
    let (x_start, x_end) = pixel_span(rect.left(), rect.right(), img.width());
    let (y_start, y_end) = pixel_span(rect.top(), rect.bottom(), img.height());
    for y in y_start..y_end {
        for x in x_start..x_end {
            img.put_pixel(x, y, FILL);
        }
    }
}

fn fill_circle(img: &mut RgbImage, circle: &Circle) {
    let (x_start, x_end) = pixel_span(circle.centre_x - circle.radius,
                                      circle.centre_x + circle.radius,
                                      img.width());
    let (y_start, y_end) = pixel_span(circle.centre_y - circle.radius,
                                      circle.centre_y + circle.radius,
                                      img.height());
    for y in y_start..y_end {
        for x in x_start..x_end {
            // sample the pixel centre
            if circle.contains(x as f64 + 0.5, y as f64 + 0.5) {
                img.put_pixel(x, y, FILL);
            }
        }
    }
}
