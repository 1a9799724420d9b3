//! Writing regressors and reduction summaries to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use phyz_math::DMat;
use serde::Serialize;

use crate::{ReducedRegressor, RegressorEngine, Result};

/// Write `matrix` as whitespace-separated text, one row per line.
pub fn write_matrix_text(matrix: &DMat, path: impl AsRef<Path>) -> Result<()> {
    let mut out = BufWriter::new(File::create(path.as_ref())?);
    for row in matrix.row_iter() {
        for v in row.iter() {
            write!(out, "  {v}  ")?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    log::debug!(
        "wrote {}x{} matrix to {}",
        matrix.nrows(),
        matrix.ncols(),
        path.as_ref().display()
    );
    Ok(())
}

/// Write any serializable value as JSON indented by four spaces.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: impl AsRef<Path>) -> Result<()> {
    let out = BufWriter::new(File::create(path.as_ref())?);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(out, formatter);
    value.serialize(&mut ser)?;
    ser.into_inner().flush()?;
    Ok(())
}

/// Summary of one reduction run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressorReport {
    pub mechanism: String,
    pub dof: usize,
    pub samples: usize,
    pub num_parameters: usize,
    pub tolerance: f64,
    pub threshold: f64,
    /// Retained parameter names, in column order.
    pub retained: Vec<String>,
    pub dropped: Vec<String>,
}

impl RegressorReport {
    pub fn new(engine: &RegressorEngine, reduced: &ReducedRegressor) -> Self {
        let own = |names: Vec<&str>| -> Vec<String> {
            names.into_iter().map(str::to_owned).collect()
        };
        Self {
            mechanism: engine.name().to_owned(),
            dof: engine.dof(),
            samples: reduced.nrows() / engine.dof(),
            num_parameters: engine.num_parameters(),
            tolerance: reduced.tolerance(),
            threshold: reduced.threshold(),
            retained: own(reduced.parameter_names(engine.basis())),
            dropped: own(reduced.dropped_names(engine.basis())),
        }
    }

    pub fn rank(&self) -> usize {
        self.retained.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JointTable;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("phyz-ident-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_matrix_text_layout() {
        let path = temp_path("matrix.txt");
        let m = DMat::from_row_slice(2, 2, &[1.0, -0.5, 0.0, 3.25]);
        write_matrix_text(&m, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["  1    -0.5  ", "  0    3.25  "]);
        let parsed: Vec<f64> = text.split_whitespace().map(|t| t.parse().unwrap()).collect();
        assert_eq!(parsed, vec![1.0, -0.5, 0.0, 3.25]);
    }

    #[test]
    fn test_report_json() {
        let engine = RegressorEngine::lbr_iiwa14().unwrap();
        let q = JointTable::from_fn(4, 7, |i, j| 0.1 * (i + j) as f64);
        let qd = JointTable::from_fn(4, 7, |i, j| 0.2 * i as f64 - 0.05 * j as f64);
        let qdd = JointTable::from_fn(4, 7, |i, j| 0.3 * (j as f64 - i as f64));
        let reduced = engine.compute_reduced_regressor(&q, &qd, &qdd, 1e-6).unwrap();
        let report = RegressorReport::new(&engine, &reduced);
        assert_eq!(report.samples, 4);
        assert_eq!(report.rank() + report.dropped.len(), 84);

        let path = temp_path("report.json");
        write_json(&report, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(text.contains("\n    \"mechanism\": \"lbr_iiwa14_r820\""));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["dof"], 7);
        assert_eq!(value["retained"].as_array().unwrap().len(), report.rank());
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let path = temp_path("no-such-dir").join("m.txt");
        assert!(matches!(
            write_matrix_text(&DMat::zeros(1, 1), path),
            Err(crate::IdentError::IoError(_))
        ));
    }
}
