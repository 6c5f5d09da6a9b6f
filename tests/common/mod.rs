#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        self.write_bytes(name, contents.as_bytes())
    }

    pub fn write_bytes(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents).expect("write temp file contents");
        path
    }
}

/// Two inferred-rate transactions: 100 gross sales and 50 gross purchases.
pub const INFERRED_CSV: &str = "Amount,Type\n100,Sales\n50, Purchases \n";

/// Explicit VAT column with one unparseable row.
pub const EXPLICIT_CSV: &str = "amount,vat,type\n100,23,sale\n50,bad,purchase\n";

pub const INFERRED_SALES_VAT: f64 = 100.0 * 23.0 / 123.0;
pub const INFERRED_PURCHASES_VAT: f64 = 50.0 * 23.0 / 123.0;

pub fn approx_eq(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-9
}
