//! Command-line interface for reducing single images or whole directories

use crate::algorithm::executor::{ReducedImage, ReductionConfig, SeamMerging};
use crate::algorithm::tiebreak::SeededTieBreak;
use crate::io::configuration::{
    DEFAULT_ALPHA, DEFAULT_BETA, DEFAULT_SEED, OUTPUT_SUFFIX, SUPPORTED_EXTENSIONS,
};
use crate::io::error::{ReductionError, Result, file_system, invalid_target};
use crate::io::image::{export_image, load_image, load_map, luminance};
use crate::io::progress::{NoProgress, ProgressManager};
use clap::Parser;
use log::info;
use ndarray::{Array2, Array3};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "seammerge")]
#[command(
    author,
    version,
    about = "Shrink images by merging low-energy seams"
)]
/// Command-line arguments for the reduction tool
pub struct Cli {
    /// Input image file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Number of columns to remove
    #[arg(short, long, default_value_t = 0)]
    pub columns: usize,

    /// Number of rows to remove
    #[arg(short, long, default_value_t = 0)]
    pub rows: usize,

    /// Weight of structure preservation against importance
    #[arg(short, long, default_value_t = DEFAULT_ALPHA)]
    pub alpha: f64,

    /// Weight of the merge-count penalty
    #[arg(short, long, default_value_t = DEFAULT_BETA)]
    pub beta: f64,

    /// Random seed for breaking ties between equal seams
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Structure map to preserve (defaults to the image luminance)
    #[arg(long, value_name = "PATH")]
    pub structure: Option<PathBuf>,

    /// Importance map to protect (defaults to uniform importance)
    #[arg(long, value_name = "PATH")]
    pub importance: Option<PathBuf>,

    /// Hide the seam progress bars
    #[arg(short, long)]
    pub quiet: bool,

    /// Reduce images again even when a reduced copy exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Whether inputs that already have a reduced copy are left alone
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Whether seam bars are drawn
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Total seams removed from each file
    pub const fn seam_total(&self) -> usize {
        self.columns + self.rows
    }
}

/// Orchestrates batch reduction of image files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Processor for parsed arguments, with bars unless `--quiet` was given
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Reduce every image the target names and write the reduced copies
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or any file's reduction fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if files.len() > 1 && (self.cli.structure.is_some() || self.cli.importance.is_some()) {
            return Err(invalid_target(
                &self.cli.target,
                "structure and importance maps need a single image, not a directory",
            ));
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;

        if target.is_dir() {
            let entries = std::fs::read_dir(target)
                .and_then(|listing| listing.collect::<std::io::Result<Vec<_>>>())
                .map_err(file_system(target, "read directory"))?;
            let mut images: Vec<PathBuf> = entries
                .into_iter()
                .map(|entry| entry.path())
                .filter(|path| is_supported(path) && !is_output(path))
                .filter(|path| self.should_process_file(path))
                .collect();
            images.sort();
            return Ok(images);
        }

        if !target.is_file() {
            return Err(invalid_target(target, "no such image file or directory"));
        }
        if !is_supported(target) {
            return Err(invalid_target(target, "not a PNG or JPEG image"));
        }
        Ok(self
            .should_process_file(target)
            .then(|| target.clone())
            .into_iter()
            .collect())
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        if output_path(input_path).exists() {
            info!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    // Both passes are checked before either runs
    fn check_seam_counts(&self, image: &Array3<f64>) -> Result<()> {
        let (height, width, _) = image.dim();
        if self.cli.columns >= width {
            return Err(ReductionError::OutOfBounds {
                requested: self.cli.columns,
                width,
            });
        }
        if self.cli.rows >= height {
            return Err(ReductionError::RowsOutOfBounds {
                requested: self.cli.rows,
                height,
            });
        }
        Ok(())
    }

    fn load_maps(&self, image: &Array3<f64>) -> Result<(Array2<f64>, Array2<f64>)> {
        let structure = match self.cli.structure {
            Some(ref path) => load_map(path)?,
            None => luminance(image)?,
        };
        let importance = match self.cli.importance {
            Some(ref path) => load_map(path)?,
            None => Array2::ones(structure.raw_dim()),
        };
        Ok((structure, importance))
    }

    fn reduce(
        &mut self,
        source: ReducedImage,
        seams: usize,
        index: usize,
        offset: usize,
    ) -> Result<ReducedImage> {
        if seams == 0 {
            return Ok(source);
        }

        let config = ReductionConfig::columns(seams, self.cli.alpha, self.cli.beta);
        let engine = SeamMerging::new(&source.image, &source.structure, &source.importance, config)?;
        let mut tie_break = SeededTieBreak::new(self.cli.seed);

        match self.progress_manager {
            Some(ref mut pm) => engine.generate_all(&mut tie_break, &mut pm.reporter(index, offset)),
            None => engine.generate_all(&mut tie_break, &mut NoProgress),
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();
        let destination = output_path(input_path);

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, self.cli.seam_total());
        }

        let image = load_image(input_path)?;
        self.check_seam_counts(&image)?;
        let (structure, importance) = self.load_maps(&image)?;
        let source = ReducedImage {
            image,
            structure,
            importance,
        };

        let narrowed = self.reduce(source, self.cli.columns, index, 0)?;
        let reduced = if self.cli.rows == 0 {
            narrowed
        } else {
            self.reduce(narrowed.transposed(), self.cli.rows, index, self.cli.columns)?
                .transposed()
        };

        export_image(&reduced.image, &destination)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index);
        }

        let (rows, cols, _) = reduced.image.dim();
        info!(
            "Wrote {} ({rows}x{cols}) in {:.2?}",
            destination.display(),
            start_time.elapsed()
        );

        Ok(())
    }
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

fn is_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}

/// Location of the reduced copy of `input_path`: `<stem>_reduced.<ext>`
pub fn output_path(input_path: &Path) -> PathBuf {
    let mut name = input_path.file_stem().unwrap_or_default().to_os_string();
    name.push(OUTPUT_SUFFIX);
    if let Some(extension) = input_path.extension() {
        name.push(".");
        name.push(extension);
    }
    input_path.with_file_name(name)
}
