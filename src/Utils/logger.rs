//! Logger setup and CSV export of search and sampling results.

use crate::numerical::critical_points::CriticalPoint;
use crate::numerical::surface::SampledSurface;
use csv::Writer;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::fs::File;
use std::io;

/// Initializes terminal logging for binaries and demos. Library code only
/// emits through the `log` facade and stays silent without an installed
/// logger.
pub fn init_logger(level: LevelFilter) {
    // a second init (e.g. from several demos in one process) is not an error
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}

/// Writes classified critical points as a csv table with an x,y,z,type header.
pub fn save_critical_points_to_csv(points: &[CriticalPoint], filename: &str) -> io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    writer.write_record(["x", "y", "z", "type"])?;
    for point in points {
        writer.write_record(&[
            point.x.to_string(),
            point.y.to_string(),
            point.z.to_string(),
            point.classification.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a sampled surface in long format, one x,y,z row per lattice node.
/// Undefined nodes are written as the literal NaN.
pub fn save_surface_to_csv(surface: &SampledSurface, filename: &str) -> io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    writer.write_record(["x", "y", "z"])?;
    for (i, &x) in surface.x.iter().enumerate() {
        for (j, &y) in surface.y.iter().enumerate() {
            writer.write_record(&[
                x.to_string(),
                y.to_string(),
                surface.z[(i, j)].to_string(),
            ])?;
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{find_critical_points, sample_surface};

    #[test]
    fn test_critical_points_csv_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.csv");
        let points = find_critical_points("x^2 + y^2", (-10.0, 10.0), (-10.0, 10.0), 20).unwrap();
        save_critical_points_to_csv(&points, path.to_str().unwrap()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), "x,y,z,type");
        assert_eq!(lines.next().unwrap(), "0,0,0,Local minimum");
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_surface_csv_has_one_row_per_node() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("surface.csv");
        let surface = sample_surface("x*y", (-5.0, 5.0), (-5.0, 5.0), 10).unwrap();
        save_surface_to_csv(&surface, path.to_str().unwrap()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        // header plus 11 * 11 nodes
        assert_eq!(content.lines().count(), 1 + 11 * 11);
        assert_eq!(content.lines().next().unwrap(), "x,y,z");
    }

    #[test]
    fn test_surface_csv_writes_nan_for_holes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("holes.csv");
        let surface = sample_surface("log(x)", (-5.0, 5.0), (-5.0, 5.0), 10).unwrap();
        save_surface_to_csv(&surface, path.to_str().unwrap()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.lines().any(|line| line.ends_with("NaN")));
    }
}
