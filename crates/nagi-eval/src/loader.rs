//! Reading and writing table files.
//!
//! Each table is a headerless file of little-endian cells in row-major
//! order. A file must be exactly as long as its shape requires.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::{EvalConfig, LoadPolicy};
use crate::error::TableError;
use crate::layout::{Cell, Layout};
use crate::tables::{TableShape, Tables};

pub const KK_FILE: &str = "KK_synthesized.bin";
pub const KKP_FILE: &str = "KKP_synthesized.bin";
pub const KPP_FILE: &str = "KPP_synthesized.bin";

/// How the tables came to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// All three files were read.
    Loaded,
    /// Loading failed and the tables are all zero.
    ZeroFilled {
        /// The error that caused the fallback.
        reason: String,
    },
}

impl LoadOutcome {
    /// Return `true` if the tables came from disk.
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded)
    }
}

/// Shared tables plus how they were obtained.
#[derive(Debug, Clone)]
pub struct Loaded<L: Layout> {
    pub tables: Arc<Tables<L>>,
    pub outcome: LoadOutcome,
}

/// Load tables as `config` describes, applying its [`LoadPolicy`].
///
/// Under [`LoadPolicy::ZeroFill`] this never fails.
pub fn init<L: Layout>(config: &EvalConfig) -> Result<Loaded<L>, TableError> {
    let start = Instant::now();
    match load::<L>(&config.eval_dir, config.shape) {
        Ok(tables) => {
            info!(
                dir = %config.eval_dir.display(),
                layout = L::NAME,
                features = tables.shape().features,
                bytes = tables.byte_size(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "evaluation tables loaded"
            );
            Ok(Loaded {
                tables: Arc::new(tables),
                outcome: LoadOutcome::Loaded,
            })
        }
        Err(err) => match config.policy {
            LoadPolicy::Strict => Err(err),
            LoadPolicy::ZeroFill => {
                warn!(
                    dir = %config.eval_dir.display(),
                    error = %err,
                    "evaluation tables unavailable, evaluating material only"
                );
                Ok(Loaded {
                    tables: Arc::new(Tables::zeroed(config.shape)),
                    outcome: LoadOutcome::ZeroFilled {
                        reason: err.to_string(),
                    },
                })
            }
        },
    }
}

/// Read KK, KKP and KPP from `dir`, in that order, stopping at the first
/// failure.
///
/// A KPP table that is not symmetric is rejected with
/// [`TableError::AsymmetricKpp`].
pub fn load<L: Layout>(dir: &Path, shape: TableShape) -> Result<Tables<L>, TableError> {
    let kk = read_table::<L::Kk>(dir, "KK", KK_FILE, shape.kk_len())?;
    let kkp = read_table::<L::Kkp>(dir, "KKP", KKP_FILE, shape.kkp_len())?;
    let kpp = read_table::<L::Kpp>(dir, "KPP", KPP_FILE, shape.kpp_len())?;
    let tables = Tables::from_parts(shape, kk, kkp, kpp)?;
    if let Some((king, a, b)) = tables.kpp_asymmetry() {
        return Err(TableError::AsymmetricKpp {
            king,
            a: a.index(),
            b: b.index(),
        });
    }
    Ok(tables)
}

/// Write the three table files into `dir`, which must exist.
pub fn save_dir<L: Layout>(dir: &Path, tables: &Tables<L>) -> Result<(), TableError> {
    write_table(dir, "KK", KK_FILE, tables.kk_cells())?;
    write_table(dir, "KKP", KKP_FILE, tables.kkp_cells())?;
    write_table(dir, "KPP", KPP_FILE, tables.kpp_cells())?;
    info!(dir = %dir.display(), layout = L::NAME, "evaluation tables saved");
    Ok(())
}

/// Cells decoded per read.
const CHUNK_CELLS: usize = 1 << 14;

fn read_table<C: Cell>(
    dir: &Path,
    table: &'static str,
    file: &str,
    cells: usize,
) -> Result<Vec<C>, TableError> {
    let path = dir.join(file);
    let io = |source| io_error(table, &path, source);
    let handle = File::open(&path).map_err(io)?;
    let found = handle.metadata().map_err(io)?.len() as usize;
    let expected = cells * C::BYTES;
    if found != expected {
        debug!(table, path = %path.display(), found, expected, "table size mismatch");
        return Err(TableError::ShapeMismatch { table, expected, found });
    }

    let mut reader = BufReader::new(handle);
    let mut out = Vec::with_capacity(cells);
    let mut chunk = vec![0u8; CHUNK_CELLS * C::BYTES];
    while out.len() < cells {
        let n = (cells - out.len()).min(CHUNK_CELLS) * C::BYTES;
        reader.read_exact(&mut chunk[..n]).map_err(io)?;
        out.extend(chunk[..n].chunks_exact(C::BYTES).map(C::from_le_bytes));
    }
    debug!(table, path = %path.display(), bytes = expected, "table read");
    Ok(out)
}

fn write_table<C: Cell>(dir: &Path, table: &'static str, file: &str, cells: &[C]) -> Result<(), TableError> {
    let path = dir.join(file);
    let io = |source| io_error(table, &path, source);
    let mut writer = BufWriter::new(File::create(&path).map_err(io)?);
    let mut chunk = Vec::with_capacity(CHUNK_CELLS * C::BYTES);
    for block in cells.chunks(CHUNK_CELLS) {
        chunk.clear();
        for &cell in block {
            cell.write_le_bytes(&mut chunk);
        }
        writer.write_all(&chunk).map_err(io)?;
    }
    writer.flush().map_err(io)?;
    debug!(table, path = %path.display(), bytes = cells.len() * C::BYTES, "table written");
    Ok(())
}

fn io_error(table: &'static str, path: &Path, source: std::io::Error) -> TableError {
    TableError::Io {
        table,
        path: PathBuf::from(path),
        source,
    }
}
