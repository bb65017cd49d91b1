//! Implementation of different callback functions.
use crate::core::estimators::Estimators;
use crate::core::Checkpoint;
use log::error;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Trait for implementing callbacks for the iterative refinement of an integration.
pub trait Callback<R, E> {
    /// This method is called after each successfully finished refinement step and may print
    /// information about it.
    fn print(&self, chkpts: &[Checkpoint<R, E>]);
}

/// A callback function that does nothing
pub struct SinkCallback {}

impl<R, E> Callback<R, E> for SinkCallback {
    fn print(&self, _: &[Checkpoint<R, E>]) {}
}

/// A callback function that prints the result after each refinement step
pub struct SimpleCallback {}

impl<R, E> Callback<R, E> for SimpleCallback
where
    E: Estimators<f64>,
{
    fn print(&self, chkpts: &[Checkpoint<R, E>]) {
        // Make sure that there is at least one checkpoint
        // otherwise do nothing.
        if let Some(chkpt) = chkpts.last() {
            let estimators = chkpt.estimators();
            println!("refinement {} finished.", chkpts.len() - 1);
            println!(
                "N={} sigma={} \u{b1} {} pb (efficiency {:.3})",
                estimators.calls(),
                estimators.mean(),
                estimators.std(),
                estimators.efficiency()
            );
        }
    }
}

/// A callback that writes all checkpoints as JSON to a file, overwriting it after every
/// refinement step.
pub struct FileWriterCallback {
    path: PathBuf,
}

impl FileWriterCallback {
    /// Creates a callback writing to `path`.
    pub fn new(path: &impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn write<T: Serialize + ?Sized>(&self, value: &T) -> crate::Result<()> {
        let writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer(writer, value)?;
        Ok(())
    }
}

impl<R, E> Callback<R, E> for FileWriterCallback
where
    R: Serialize,
    E: Serialize,
{
    fn print(&self, chkpts: &[Checkpoint<R, E>]) {
        if let Err(err) = self.write(chkpts) {
            error!("could not write checkpoints to {}: {}", self.path.display(), err);
        }
    }
}
