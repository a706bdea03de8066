//! Long-lived matrices of the factorized seam merging representation
//!
//! Every tracked matrix keeps one entry per surviving pixel. A merge replaces
//! each of them with a copy one column narrower, so all six always share the
//! same row count and width. The structure map itself is never merged;
//! instead the pair `(q11, q12)` accumulates weight and negated structure so
//! that the mean structure of any merged pixel is `-q12 / q11`.

use crate::io::configuration::{DIRECTIONS, DOWN, LEFT, RIGHT, UP};
use crate::io::error::{Result, invalid_input};
use crate::spatial::lookahead::difference_into;
use ndarray::{Array2, Array3, Axis, concatenate, s};

/// Working state of one reduction, owned by the solver
#[derive(Debug, Clone)]
pub struct MergeState {
    /// Accumulated weight per pixel (starts at 1, always positive)
    pub q11: Array2<f64>,

    /// Accumulated negated structure value (starts at `-S`)
    pub q12: Array2<f64>,

    /// Sign-inverted structure differences to each neighbour (up, down, right, left)
    pub p12: Array3<f64>,

    /// Elementwise square of the initial `p12`, accumulated through merges
    pub p22: Array3<f64>,

    /// Mean structure value of each surviving pixel
    pub simg: Array2<f64>,

    /// Accumulation matrix `[X_0 .. X_{C-1}, T, 1]`
    pub z: Array3<f64>,

    /// Number of original image channels at the front of `z`
    pub image_channels: usize,
}

/// Check that image, structure and importance describe the same grid
///
/// # Errors
///
/// Returns `InvalidInput` if the image has no pixels or channels, or if the
/// structure or importance map does not match the image's rows and columns
pub fn validate_shapes(
    image: &Array3<f64>,
    structure: &Array2<f64>,
    importance: &Array2<f64>,
) -> Result<()> {
    let (rows, cols, channels) = image.dim();
    if rows == 0 || cols == 0 || channels == 0 {
        return Err(invalid_input(&format!(
            "image must be non-empty, got {rows}x{cols}x{channels}"
        )));
    }
    if structure.dim() != (rows, cols) {
        return Err(invalid_input(&format!(
            "structure map is {:?}, image is {rows}x{cols}",
            structure.dim()
        )));
    }
    if importance.dim() != (rows, cols) {
        return Err(invalid_input(&format!(
            "importance map is {:?}, image is {rows}x{cols}",
            importance.dim()
        )));
    }
    Ok(())
}

impl MergeState {
    /// Build the initial factorized state from private copies of the inputs
    ///
    /// `importance` is expected to be normalized already; it is stored
    /// unchanged as the importance channel of `z`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the three grids disagree on their dimensions
    pub fn new(
        image: &Array3<f64>,
        structure: &Array2<f64>,
        importance: &Array2<f64>,
    ) -> Result<Self> {
        validate_shapes(image, structure, importance)?;

        let (rows, cols, channels) = image.dim();

        let q11 = Array2::ones((rows, cols));
        let q12 = structure.mapv(|value| -value);

        let mut p12 = Array3::<f64>::zeros((rows, cols, DIRECTIONS));
        difference_into(
            p12.slice_mut(s![1.., .., UP]),
            structure.slice(s![1.., ..]),
            structure.slice(s![..-1, ..]),
        );
        difference_into(
            p12.slice_mut(s![..-1, .., DOWN]),
            structure.slice(s![..-1, ..]),
            structure.slice(s![1.., ..]),
        );
        difference_into(
            p12.slice_mut(s![.., ..-1, RIGHT]),
            structure.slice(s![.., ..-1]),
            structure.slice(s![.., 1..]),
        );
        difference_into(
            p12.slice_mut(s![.., 1.., LEFT]),
            structure.slice(s![.., 1..]),
            structure.slice(s![.., ..-1]),
        );
        p12.mapv_inplace(|value| -value);
        let p22 = p12.mapv(|value| value * value);

        let counts = Array3::<f64>::ones((rows, cols, 1));
        let z = concatenate(
            Axis(2),
            &[
                image.view(),
                importance.view().insert_axis(Axis(2)),
                counts.view(),
            ],
        )
        .map_err(|e| invalid_input(&format!("cannot assemble accumulation matrix: {e}")))?;

        Ok(Self {
            q11,
            q12,
            p12,
            p22,
            simg: structure.clone(),
            z,
            image_channels: channels,
        })
    }

    /// Number of rows (constant for the lifetime of the state)
    pub fn rows(&self) -> usize {
        self.q11.nrows()
    }

    /// Current number of surviving columns
    pub fn cols(&self) -> usize {
        self.q11.ncols()
    }

    /// Index of the importance channel in `z`
    pub const fn importance_channel(&self) -> usize {
        self.image_channels
    }

    /// Index of the count channel in `z`
    pub const fn count_channel(&self) -> usize {
        self.image_channels + 1
    }

    /// Rows and columns of every tracked matrix, in the order
    /// q11, q12, simg, p12, p22, z
    pub fn tracked_shapes(&self) -> [(usize, usize); 6] {
        let planar = |dims: (usize, usize, usize)| (dims.0, dims.1);
        [
            self.q11.dim(),
            self.q12.dim(),
            self.simg.dim(),
            planar(self.p12.dim()),
            planar(self.p22.dim()),
            planar(self.z.dim()),
        ]
    }

    /// Total of the count channel, equal to the original pixel count
    pub fn total_count(&self) -> f64 {
        self.z.index_axis(Axis(2), self.count_channel()).sum()
    }

    /// Average normalized importance carried by each surviving pixel
    pub fn mean_importance(&self) -> Array2<f64> {
        let counts = self.z.index_axis(Axis(2), self.count_channel());
        &self.z.index_axis(Axis(2), self.importance_channel()) / &counts
    }

    /// Average original colour carried by each surviving pixel
    pub fn reconstruct(&self) -> Array3<f64> {
        let counts = self.z.index_axis(Axis(2), self.count_channel());
        let mut image = self.z.slice(s![.., .., ..self.image_channels]).to_owned();
        image /= &counts.insert_axis(Axis(2));
        image
    }
}
