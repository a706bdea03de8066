use crate::{
    algorithm::energy::directional_energy,
    algorithm::merge::apply_seam,
    algorithm::normalization::{NormalizedWeights, normalize_weights},
    algorithm::path::solve,
    algorithm::seam::{Seam, trace_seam},
    algorithm::tiebreak::TieBreak,
    io::configuration::{DEFAULT_ALPHA, DEFAULT_BETA},
    io::error::{ReductionError, Result, invalid_input, invalid_parameter},
    io::progress::ProgressReporter,
    spatial::lookahead::{look_ahead, shifted_sum},
    spatial::orientation::{transpose_image, transpose_map},
    spatial::state::{MergeState, validate_shapes},
};
use log::{debug, info, trace};
use ndarray::{Array2, Array3, Axis};

/// Reduction parameters, fixed for the lifetime of an engine
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReductionConfig {
    /// Number of columns to delete
    pub delete_columns: usize,
    /// Number of rows to delete; counted as additional column seams
    pub delete_rows: usize,
    /// Weight of the structure term; importance receives `1 - alpha`
    pub alpha: f64,
    /// Weight of the iteration-count term
    pub beta: f64,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            delete_columns: 0,
            delete_rows: 0,
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
        }
    }
}

impl ReductionConfig {
    /// Create a configuration removing `delete_columns` seams
    pub const fn columns(delete_columns: usize, alpha: f64, beta: f64) -> Self {
        Self {
            delete_columns,
            delete_rows: 0,
            alpha,
            beta,
        }
    }

    /// Weight of the importance term
    pub const fn gamma(&self) -> f64 {
        1.0 - self.alpha
    }

    /// Total number of seams the engine removes
    pub const fn seam_count(&self) -> usize {
        self.delete_columns + self.delete_rows
    }

    /// Check the configuration against an image `width` columns wide
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for non-finite weights and `OutOfBounds`
    /// when at least as many seams as columns are requested
    pub fn validate(&self, width: usize) -> Result<()> {
        if !self.alpha.is_finite() {
            return Err(invalid_parameter("alpha", self.alpha, "must be finite"));
        }
        if !self.beta.is_finite() {
            return Err(invalid_parameter("beta", self.beta, "must be finite"));
        }
        if self.seam_count() >= width {
            return Err(ReductionError::OutOfBounds {
                requested: self.seam_count(),
                width,
            });
        }
        Ok(())
    }
}

/// Final grids of a reduction, all sharing the reduced dimensions
#[derive(Debug, Clone)]
pub struct ReducedImage {
    /// Average original colour of each surviving pixel
    pub image: Array3<f64>,
    /// Mean structure value of each surviving pixel
    pub structure: Array2<f64>,
    /// Mean normalized importance of each surviving pixel
    pub importance: Array2<f64>,
}

impl ReducedImage {
    /// Swap rows and columns of all three grids
    pub fn transposed(&self) -> Self {
        Self {
            image: transpose_image(&self.image),
            structure: transpose_map(&self.structure),
            importance: transpose_map(&self.importance),
        }
    }
}

/// Seam merging engine over private copies of its inputs
///
/// Holds only immutable configuration; every call to [`SeamMerging::start`]
/// or [`SeamMerging::generate`] works on fresh state.
#[derive(Debug, Clone)]
pub struct SeamMerging {
    image: Array3<f64>,
    structure: Array2<f64>,
    importance: Array2<f64>,
    config: ReductionConfig,
}

impl SeamMerging {
    /// Validate the inputs and take normalized copies
    ///
    /// The importance map is divided by its global maximum.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `InvalidInput` if the shapes disagree or `max(importance)` is not
    ///   strictly positive
    /// - `InvalidParameter` if `alpha` or `beta` is not finite
    /// - `OutOfBounds` if the seam count is not below the image width
    pub fn new(
        image: &Array3<f64>,
        structure: &Array2<f64>,
        importance: &Array2<f64>,
        config: ReductionConfig,
    ) -> Result<Self> {
        validate_shapes(image, structure, importance)?;

        let peak = importance.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !peak.is_finite() || peak <= 0.0 {
            return Err(invalid_input(&format!(
                "importance map maximum must be positive, got {peak}"
            )));
        }

        config.validate(image.len_of(Axis(1)))?;

        Ok(Self {
            image: image.clone(),
            structure: structure.clone(),
            importance: importance.mapv(|value| value / peak),
            config,
        })
    }

    /// Same as [`SeamMerging::new`] for an importance map with a trailing
    /// singleton channel axis
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the importance map has more than one channel,
    /// otherwise the errors of [`SeamMerging::new`]
    pub fn with_importance_channel(
        image: &Array3<f64>,
        structure: &Array2<f64>,
        importance: &Array3<f64>,
        config: ReductionConfig,
    ) -> Result<Self> {
        if importance.len_of(Axis(2)) != 1 {
            return Err(invalid_input(&format!(
                "importance map must have one channel, got {}",
                importance.len_of(Axis(2))
            )));
        }
        let flat = importance.index_axis(Axis(2), 0).to_owned();
        Self::new(image, structure, &flat, config)
    }

    /// Engine configuration
    pub const fn config(&self) -> &ReductionConfig {
        &self.config
    }

    /// Importance map after normalization
    pub const fn importance(&self) -> &Array2<f64> {
        &self.importance
    }

    /// Begin a reduction that can be advanced one seam at a time
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the working state cannot be assembled
    pub fn start(&self) -> Result<Reduction<'_>> {
        Ok(Reduction {
            engine: self,
            state: MergeState::new(&self.image, &self.structure, &self.importance)?,
            weights: None,
            iteration: 0,
        })
    }

    /// Remove all configured seams and return the reduced image
    ///
    /// The result is `rows × (cols - seam_count) × channels`; each pixel is
    /// the average original colour of the pixels merged into it.
    ///
    /// # Errors
    ///
    /// Propagates any failure of an iteration; no partial result is returned
    pub fn generate(
        &self,
        tie_break: &mut impl TieBreak,
        progress: &mut impl ProgressReporter,
    ) -> Result<Array3<f64>> {
        Ok(self.generate_all(tie_break, progress)?.image)
    }

    /// Like [`SeamMerging::generate`], also returning the merged structure
    /// and importance maps aligned with the reduced image
    ///
    /// # Errors
    ///
    /// Propagates any failure of an iteration; no partial result is returned
    pub fn generate_all(
        &self,
        tie_break: &mut impl TieBreak,
        progress: &mut impl ProgressReporter,
    ) -> Result<ReducedImage> {
        let total = self.config.seam_count();
        let (rows, cols, channels) = self.image.dim();
        info!("Merging {total} seams out of a {rows}x{cols}x{channels} image");

        let mut reduction = self.start()?;
        for iteration in 0..total {
            progress.report(iteration, total);
            reduction.step(tie_break)?;
        }
        progress.done();

        info!("Reduced to {rows}x{}", reduction.state().cols());
        Ok(reduction.finish())
    }
}

/// One reduction in progress
///
/// Owns the long-lived state; every per-iteration array is dropped at the
/// end of [`Reduction::step`].
pub struct Reduction<'a> {
    engine: &'a SeamMerging,
    state: MergeState,
    weights: Option<NormalizedWeights>,
    iteration: usize,
}

impl Reduction<'_> {
    /// Find and merge the next seam
    ///
    /// The first call also freezes the normalized weights.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `OutOfBounds` if fewer than two columns remain
    /// - `DegenerateNormalization` from the first call's normalization
    /// - A computation error if no seam can be traced
    pub fn step(&mut self, tie_break: &mut impl TieBreak) -> Result<Seam> {
        if self.state.cols() < 2 {
            return Err(ReductionError::OutOfBounds {
                requested: self.iteration + 1,
                width: self.engine.image.len_of(Axis(1)),
            });
        }

        let look = look_ahead(&self.state);
        let v = look.mean();
        let mut energy = directional_energy(&self.state.simg, &v, &look);

        // Look-ahead sums of the importance and count channels
        let z = &self.state.z;
        let importance = shifted_sum(&z.index_axis(Axis(2), self.state.importance_channel()));
        let count = shifted_sum(&z.index_axis(Axis(2), self.state.count_channel()));

        let weights = match self.weights {
            Some(weights) => weights,
            None => {
                let weights = normalize_weights(&importance, &energy, &self.engine.config)?;
                debug!(
                    "Normalized weights: alpha {:.6e}, gamma {:.6e}, beta {:.6e}",
                    weights.alpha, weights.gamma, weights.beta
                );
                self.weights = Some(weights);
                weights
            }
        };

        let base = energy.pixel_energy(&importance, &count, &weights);
        energy.weight_connections(weights.alpha);
        let solution = solve(base, &energy);
        let seam = trace_seam(&solution, tie_break)?;

        apply_seam(&mut self.state, &look, &v, &seam)?;
        self.iteration += 1;

        trace!(
            "Iteration {}: seam ends at column {:?}, width now {}",
            self.iteration,
            seam.columns().last(),
            self.state.cols()
        );

        Ok(seam)
    }

    /// Current working state
    pub const fn state(&self) -> &MergeState {
        &self.state
    }

    /// Frozen weights, available after the first step
    pub const fn weights(&self) -> Option<NormalizedWeights> {
        self.weights
    }

    /// Number of seams merged so far
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Reconstruct the reduced image and merged maps
    pub fn finish(self) -> ReducedImage {
        let image = self.state.reconstruct();
        let importance = self.state.mean_importance();
        ReducedImage {
            image,
            structure: self.state.simg,
            importance,
        }
    }
}
