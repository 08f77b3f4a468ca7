//! Solution and trace writers.
//!
//! A run produces two text files named after the instance, the algorithm,
//! the cutoff and (for randomized algorithms) the seed:
//!
//! - `<stem>_<Alg>_<cutoff>[_<seed>].sol`: the tour length on the first line,
//!   the comma-separated zero-based tour on the second;
//! - `<stem>_<Alg>_<cutoff>[_<seed>].trace`: one `<seconds>, <length>` line
//!   per improvement, seconds with two decimals.

use crate::error::Result;
use crate::solver::{Algorithm, Solution};
use crate::trace::Trace;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// File names for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputNames {
    pub stem: String,
    pub algorithm: Algorithm,
    /// Cutoff in seconds, as given by the user.
    pub cutoff: f64,
    pub seed: Option<u64>,
}

impl OutputNames {
    /// Names for an instance file: the stem is its file name without the
    /// extension.
    pub fn for_instance(
        instance: &Path,
        algorithm: Algorithm,
        cutoff: f64,
        seed: Option<u64>,
    ) -> Self {
        let stem = instance
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "instance".to_string());
        Self {
            stem,
            algorithm,
            cutoff,
            seed,
        }
    }

    /// Common prefix of both files. The seed is left out for algorithms that
    /// do not use one.
    pub fn base(&self) -> String {
        let mut base = format!("{}_{}_{}", self.stem, self.algorithm, self.cutoff);
        if let Some(seed) = self.seed.filter(|_| self.algorithm.requires_seed()) {
            base.push_str(&format!("_{seed}"));
        }
        base
    }

    pub fn solution_file(&self) -> String {
        format!("{}.sol", self.base())
    }

    pub fn trace_file(&self) -> String {
        format!("{}.trace", self.base())
    }
}

/// Paths of the files written by [`write_files`].
#[derive(Debug, Clone)]
pub struct WrittenFiles {
    pub solution: PathBuf,
    pub trace: PathBuf,
}

/// Writes the solution format: length, then the comma-separated tour.
pub fn write_solution<W: Write>(mut out: W, solution: &Solution) -> io::Result<()> {
    writeln!(out, "{}", solution.cost)?;
    let tour: Vec<String> = solution.tour.iter().map(ToString::to_string).collect();
    writeln!(out, "{}", tour.join(","))
}

/// Writes one `<seconds>, <length>` line per trace event.
pub fn write_trace<W: Write>(mut out: W, trace: &Trace) -> io::Result<()> {
    for event in trace {
        writeln!(out, "{:.2}, {}", event.elapsed, event.objective)?;
    }
    Ok(())
}

/// Writes both files into `dir`, creating it if needed. Existing files are
/// overwritten.
pub fn write_files(dir: &Path, names: &OutputNames, solution: &Solution) -> Result<WrittenFiles> {
    fs::create_dir_all(dir)?;
    let files = WrittenFiles {
        solution: dir.join(names.solution_file()),
        trace: dir.join(names.trace_file()),
    };

    let mut out = BufWriter::new(File::create(&files.solution)?);
    write_solution(&mut out, solution)?;
    out.flush()?;

    let mut out = BufWriter::new(File::create(&files.trace)?);
    write_trace(&mut out, &solution.trace)?;
    out.flush()?;

    log::info!(
        "wrote {} and {}",
        files.solution.display(),
        files.trace.display()
    );
    Ok(files)
}
