//! PNG rendering of sampled surfaces with plotters.
//!
//! Both views draw the same `SampledSurface`: the contour view projects the
//! grid onto the xy-plane as a colored heat map, the 3D view draws the
//! surface cell by cell. Cells touching a NaN hole are left blank.

use crate::numerical::critical_points::CriticalPoint;
use crate::numerical::hessian::Classification;
use crate::numerical::surface::SampledSurface;
use plotters::prelude::*;

type DrawResult = Result<(), Box<dyn std::error::Error>>;

fn classification_color(classification: Classification) -> RGBColor {
    match classification {
        Classification::LocalMin => BLUE,
        Classification::LocalMax => RED,
        Classification::Saddle => MAGENTA,
        Classification::Undetermined => BLACK,
    }
}

/// Maps a normalized value in [0, 1] onto a blue-to-red heat scale.
fn heat_color(t: f64) -> HSLColor {
    HSLColor(240.0 / 360.0 * (1.0 - t.clamp(0.0, 1.0)), 1.0, 0.5)
}

/// Renders the 2D contour (heat map) view with optional critical point
/// overlay markers colored by classification.
pub fn plot_contour(
    surface: &SampledSurface,
    points: &[CriticalPoint],
    caption: &str,
    filename: &str,
) -> DrawResult {
    let (z_lo, z_hi) = surface.z_bounds().unwrap_or((0.0, 1.0));
    let span = if z_hi > z_lo { z_hi - z_lo } else { 1.0 };
    let (x0, x1) = (surface.x[0], surface.x[surface.x.len() - 1]);
    let (y0, y1) = (surface.y[0], surface.y[surface.y.len() - 1]);

    let root_area = BitMapBackend::new(filename, (800, 600)).into_drawing_area();
    root_area.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root_area)
        .caption(caption, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(x0..x1, y0..y1)?;
    chart.configure_mesh().x_desc("x").y_desc("y").draw()?;

    for i in 0..surface.x.len() - 1 {
        for j in 0..surface.y.len() - 1 {
            let z = surface.z[(i, j)];
            if !z.is_finite() {
                continue;
            }
            let t = (z - z_lo) / span;
            chart.draw_series(std::iter::once(Rectangle::new(
                [
                    (surface.x[i], surface.y[j]),
                    (surface.x[i + 1], surface.y[j + 1]),
                ],
                heat_color(t).filled(),
            )))?;
        }
    }

    for point in points {
        let color = classification_color(point.classification);
        chart.draw_series(std::iter::once(Circle::new(
            (point.x, point.y),
            5,
            color.filled(),
        )))?;
    }
    root_area.present()?;
    Ok(())
}

/// Renders the 3D surface view. Cells with any non-finite corner are
/// skipped, which leaves visible holes where the function is undefined.
pub fn plot_surface3d(surface: &SampledSurface, caption: &str, filename: &str) -> DrawResult {
    let (z_lo, z_hi) = surface.z_bounds().unwrap_or((0.0, 1.0));
    let span = if z_hi > z_lo { z_hi - z_lo } else { 1.0 };
    let (x0, x1) = (surface.x[0], surface.x[surface.x.len() - 1]);
    let (y0, y1) = (surface.y[0], surface.y[surface.y.len() - 1]);

    let root_area = BitMapBackend::new(filename, (800, 600)).into_drawing_area();
    root_area.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root_area)
        .caption(caption, ("sans-serif", 30))
        .margin(10)
        .build_cartesian_3d(x0..x1, z_lo..z_hi, y0..y1)?;
    chart.with_projection(|mut pb| {
        pb.pitch = 0.4;
        pb.yaw = 0.6;
        pb.scale = 0.8;
        pb.into_matrix()
    });
    chart.configure_axes().draw()?;

    for i in 0..surface.x.len() - 1 {
        for j in 0..surface.y.len() - 1 {
            let corners = [
                (surface.x[i], surface.z[(i, j)], surface.y[j]),
                (surface.x[i + 1], surface.z[(i + 1, j)], surface.y[j]),
                (
                    surface.x[i + 1],
                    surface.z[(i + 1, j + 1)],
                    surface.y[j + 1],
                ),
                (surface.x[i], surface.z[(i, j + 1)], surface.y[j + 1]),
            ];
            if corners.iter().any(|(_, z, _)| !z.is_finite()) {
                continue;
            }
            let t = (corners[0].1 - z_lo) / span;
            chart.draw_series(std::iter::once(Polygon::new(
                corners.to_vec(),
                heat_color(t).mix(0.8).filled(),
            )))?;
        }
    }
    root_area.present()?;
    Ok(())
}
