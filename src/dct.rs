// src/dct.rs
//
// 2D type-II DCT over a square f32 grid.

use std::sync::Arc;

use rustdct::{DctPlanner, TransformType2And3};

/// Planned two-dimensional DCT-II for `size` x `size` grids.
///
/// rustdct's transforms are unnormalized plain cosine sums; `forward`
/// applies the orthonormal per-axis factors afterwards (sqrt(1/N) for the
/// zero frequency, sqrt(2/N) otherwise), so the output satisfies Parseval
/// and the (0,0) cell is `N * mean`.
pub(crate) struct Dct2d {
    size: usize,
    dct: Arc<dyn TransformType2And3<f32>>,
}

impl Dct2d {
    pub(crate) fn new(size: usize) -> Self {
        let mut planner = DctPlanner::new();
        let dct = planner.plan_dct2(size);
        Self { size, dct }
    }

    /// In-place 2D transform. `matrix` is row-major and comes back as
    /// [row frequency][column frequency].
    pub(crate) fn forward(&self, matrix: &mut Vec<f32>) {
        debug_assert_eq!(matrix.len(), self.size * self.size);
        let mut scratch = vec![0.0f32; self.dct.get_scratch_len()];

        // Rows
        for row in matrix.chunks_mut(self.size) {
            self.dct.process_dct2_with_scratch(row, &mut scratch);
        }

        // Transpose, run the columns as rows, transpose back
        let mut transposed = vec![0.0f32; self.size * self.size];
        transpose::transpose(matrix, &mut transposed, self.size, self.size);
        for col in transposed.chunks_mut(self.size) {
            self.dct.process_dct2_with_scratch(col, &mut scratch);
        }
        transpose::transpose(&transposed, matrix, self.size, self.size);

        // Orthonormal scaling, per axis
        let n = self.size as f32;
        let s0 = (1.0 / n).sqrt();
        let s1 = (2.0 / n).sqrt();
        for (i, value) in matrix.iter_mut().enumerate() {
            let row_scale = if i / self.size == 0 { s0 } else { s1 };
            let col_scale = if i % self.size == 0 { s0 } else { s1 };
            *value *= row_scale * col_scale;
        }
    }
}
