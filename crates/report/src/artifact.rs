//! Utilization chart artifacts
//!
//! Charts are written with timestamped names so successive runs never
//! collide; leftovers from earlier runs are swept at startup.

use std::path::{Path, PathBuf};

use capsim_errors::{Error, ReportError};
use chrono::Local;
use plotters::prelude::*;

const ARTIFACT_PREFIX: &str = "utilization-";
const ARTIFACT_SUFFIX: &str = ".svg";

/// Timestamped filename for a new chart artifact.
#[must_use]
pub fn artifact_filename() -> String {
    format!(
        "{ARTIFACT_PREFIX}{}{ARTIFACT_SUFFIX}",
        Local::now().format("%Y%m%d-%H%M%S")
    )
}

/// Render the utilization series as an SVG line chart.
///
/// The y-axis is fixed to 0..100 so charts from different runs compare
/// directly.
///
/// # Errors
///
/// Returns a `ReportError::Render` if the chart cannot be drawn or the SVG
/// cannot be written. Callers treat this as a warning, never fatal.
pub fn render_utilization_chart(series: &[f64], path: &Path) -> Result<(), Error> {
    let root = SVGBackend::new(path, (800, 400)).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let x_max = u32::try_from(series.len().max(1)).unwrap_or(u32::MAX);
    let mut chart = ChartBuilder::on(&root)
        .caption("Resource utilization (%)", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(0u32..x_max, 0f64..100f64)
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .x_desc("sample")
        .y_desc("utilization")
        .draw()
        .map_err(render_error)?;

    chart
        .draw_series(LineSeries::new(
            series
                .iter()
                .enumerate()
                .map(|(i, &u)| (u32::try_from(i).unwrap_or(u32::MAX), u)),
            &BLUE,
        ))
        .map_err(render_error)?;

    root.present().map_err(render_error)?;
    Ok(())
}

/// Remove chart artifacts left behind by earlier runs.
///
/// Returns how many files were deleted.
///
/// # Errors
///
/// Returns a `ReportError::ArtifactIo` if the directory cannot be read or a
/// stale file cannot be removed.
pub fn remove_stale_artifacts(dir: &Path) -> Result<usize, Error> {
    let entries = std::fs::read_dir(dir).map_err(|e| artifact_io(dir, &e))?;

    let mut removed = 0;
    for entry in entries {
        let entry = entry.map_err(|e| artifact_io(dir, &e))?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with(ARTIFACT_PREFIX) && name.ends_with(ARTIFACT_SUFFIX) {
            std::fs::remove_file(entry.path()).map_err(|e| artifact_io(&entry.path(), &e))?;
            removed += 1;
        }
    }
    Ok(removed)
}

fn render_error<E: std::fmt::Display>(err: E) -> Error {
    ReportError::Render {
        message: err.to_string(),
    }
    .into()
}

fn artifact_io(path: &Path, err: &std::io::Error) -> Error {
    ReportError::ArtifactIo {
        path: path.display().to_string(),
        message: err.to_string(),
    }
    .into()
}

/// Join the artifact directory with a fresh timestamped filename.
#[must_use]
pub fn artifact_path(dir: &Path) -> PathBuf {
    dir.join(artifact_filename())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn filename_is_timestamped_svg() {
        let name = artifact_filename();
        assert!(name.starts_with("utilization-"));
        assert!(name.ends_with(".svg"));
    }

    #[test]
    fn renders_a_nonempty_svg() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("utilization-test.svg");

        let series = vec![0.0, 25.0, 80.0, 100.0, 40.0];
        render_utilization_chart(&series, &path).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn renders_an_empty_series() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("utilization-empty.svg");
        render_utilization_chart(&[], &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn removes_only_matching_artifacts() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("utilization-20240101-120000.svg"), "x").unwrap();
        std::fs::write(dir.path().join("utilization-20240101-130000.svg"), "x").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "keep me").unwrap();
        std::fs::write(dir.path().join("chart.svg"), "keep me too").unwrap();

        let removed = remove_stale_artifacts(dir.path()).unwrap();
        assert_eq!(removed, 2);
        assert!(dir.path().join("notes.txt").exists());
        assert!(dir.path().join("chart.svg").exists());
    }

    #[test]
    fn empty_dir_removes_nothing() {
        let dir = tempdir().unwrap();
        assert_eq!(remove_stale_artifacts(dir.path()).unwrap(), 0);
    }
}
