// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records training metrics to a CSV file after each epoch.
//
// Metrics recorded per epoch:
//   - epoch:   the epoch number (1, 2, 3, ...)
//   - d_loss:  mean discriminator BCE over training batches
//   - g_loss:  mean generator BCE over training batches
//   - p_real:  mean D(x) on the test set
//   - p_fake:  mean D(G(z)) on the test set
//
// Output file: checkpoints/metrics.csv
//
// Example CSV output:
//   epoch,d_loss,g_loss,p_real,p_fake
//   1,0.412300,2.980100,0.912000,0.081000
//   2,0.655100,2.101900,0.846000,0.162000
//
// How to read the metrics:
//   - p_real → 1 and p_fake → 0 means D is winning easily
//   - Both drifting towards 0.5 means G is catching up
//   - d_loss near 2·ln2 ≈ 1.386 means D is reduced to guessing

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};
use serde::{Deserialize, Serialize};

use crate::domain::confidence::{EpochConfidence, EpochLosses};

const HEADER: &str = "epoch,d_loss,g_loss,p_real,p_fake";

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    pub epoch:  usize,
    pub d_loss: f64,
    pub g_loss: f64,
    pub p_real: f64,
    pub p_fake: f64,
}

impl EpochMetrics {
    pub fn new(losses: &EpochLosses, confidence: &EpochConfidence) -> Self {
        Self {
            epoch:  confidence.epoch,
            d_loss: losses.d_loss,
            g_loss: losses.g_loss,
            p_real: confidence.p_real,
            p_fake: confidence.p_fake,
        }
    }

    fn to_csv_row(&self) -> String {
        format!(
            "{},{:.6},{:.6},{:.6},{:.6}",
            self.epoch, self.d_loss, self.g_loss, self.p_real, self.p_fake,
        )
    }
}

/// Logs epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger.
    /// Starts a fresh file with just the header; a new run never
    /// appends to the rows of an old one.
    pub fn new(dir: impl Into<String>) -> Result<Self> {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");
        let mut f = fs::File::create(&csv_path)
            .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
        writeln!(f, "{HEADER}")?;
        tracing::debug!("Created metrics CSV: '{}'", csv_path.display());

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row in the CSV.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        writeln!(f, "{}", m.to_csv_row())?;

        tracing::debug!(
            "Logged epoch {} metrics: d_loss={:.4}, g_loss={:.4}",
            m.epoch, m.d_loss, m.g_loss,
        );

        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_row_format() {
        let m = EpochMetrics::new(
            &EpochLosses { d_loss: 1.25, g_loss: 0.5 },
            &EpochConfidence::new(4, 0.75, 0.125),
        );
        assert_eq!(m.to_csv_row(), "4,1.250000,0.500000,0.750000,0.125000");
    }

    #[test]
    fn test_log_appends_rows_after_header() {
        let dir = std::env::temp_dir()
            .join(format!("mnist-gan-metrics-{}", std::process::id()));
        let logger = MetricsLogger::new(dir.to_string_lossy()).unwrap();

        for epoch in 1..=2 {
            let m = EpochMetrics::new(
                &EpochLosses { d_loss: 1.0, g_loss: 1.0 },
                &EpochConfidence::new(epoch, 0.5, 0.5),
            );
            logger.log(&m).unwrap();
        }

        let csv   = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("2,"));

        // Re-opening starts a fresh log
        let logger = MetricsLogger::new(dir.to_string_lossy()).unwrap();
        assert_eq!(fs::read_to_string(logger.csv_path()).unwrap().lines().count(), 1);

        let _ = fs::remove_dir_all(&dir);
    }
}
