//! Histogram plotting with plotly

use crate::benchmark::BenchmarkReport;
use crate::constants::artifacts::benchmark_file_name;
use crate::error::{Error, Result};
use plotly::common::Title;
use plotly::layout::Axis;
use plotly::{Bar, Layout, Plot};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Bar chart of the report's histogram, one bar per value
pub fn build_plot(report: &BenchmarkReport) -> Plot {
    let (values, counts): (Vec<i64>, Vec<u64>) = report.histogram.iter().unzip();

    let trace = Bar::new(values, counts).name("samples").opacity(0.7);

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(
        Layout::new()
            .title(Title::new(&format!(
                "Quantum Random Number Generator Distribution ({} samples)",
                report.iterations
            )))
            .x_axis(Axis::new().title(Title::new("Random Number")))
            .y_axis(Axis::new().title(Title::new("Frequency")))
            .show_legend(false),
    );
    plot
}

/// Write the histogram as a standalone HTML page under `dir`
pub fn save_histogram(report: &BenchmarkReport, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .map_err(|e| Error::Plotting(format!("Failed to create {}: {}", dir.display(), e)))?;

    let path = dir.join(benchmark_file_name(report.iterations));
    fs::write(&path, build_plot(report).to_html())
        .map_err(|e| Error::Plotting(format!("Failed to write {}: {}", path.display(), e)))?;

    info!(path = %path.display(), "saved benchmark histogram");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::run;
    use crate::qrng::pseudo::SeededPseudoBackend;
    use crate::sampler::{RangeSpec, Sampler};
    use tempfile::TempDir;

    fn report(iterations: usize) -> BenchmarkReport {
        let backend = SeededPseudoBackend::new(5);
        let range = RangeSpec::new(1, 6).unwrap();
        run(&range, iterations, &Sampler::new(&backend)).unwrap()
    }

    #[test]
    fn test_plot_labels() {
        let html = build_plot(&report(200)).to_html();
        assert!(html.contains("Quantum Random Number Generator Distribution (200 samples)"));
        assert!(html.contains("Random Number"));
        assert!(html.contains("Frequency"));
    }

    #[test]
    fn test_save_histogram() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("nested").join("images");

        let path = save_histogram(&report(50), &dir).unwrap();

        assert_eq!(path, dir.join("benchmark_quantum_50.html"));
        assert!(path.exists());
    }
}
