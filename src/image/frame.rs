//! Owned square single-channel f32 frame in row-major layout (stride == width).
//!
//! All numeric processing in the pipeline runs on this type. Callers convert
//! 8/16-bit source imagery to f32 at the boundary; the core never dispatches
//! on bit depth.

/// Square single-channel frame of f32 intensities plus a sequence identifier.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Frame width in pixels (equals the height).
    pub width: usize,
    /// Backing storage in row-major order, `width * width` elements.
    pub data: Vec<f32>,
    /// Sequence index or acquisition time; only used to order results.
    pub index: u64,
}

impl Frame {
    /// Construct a zero-initialized frame of size `width × width`.
    pub fn new(width: usize, index: u64) -> Self {
        Self {
            width,
            data: vec![0.0; width * width],
            index,
        }
    }

    /// Wrap raw pixels, enforcing the square constraint at the boundary.
    pub fn from_pixels(
        width: usize,
        height: usize,
        data: Vec<f32>,
        index: u64,
    ) -> Result<Self, String> {
        if width != height {
            return Err(format!("Frame must be square, got {width}x{height}"));
        }
        if data.len() != width * height {
            return Err(format!(
                "Frame buffer has {} pixels, expected {}",
                data.len(),
                width * height
            ));
        }
        Ok(Self { width, data, index })
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    /// Get the pixel value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }

    #[inline]
    /// Set the pixel value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    #[inline]
    /// Borrow one pixel row.
    pub fn row(&self, y: usize) -> &[f32] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Mean intensity over the whole frame.
    pub fn mean(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.data.iter().map(|&v| v as f64).sum();
        (sum / self.data.len() as f64) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::Frame;

    #[test]
    fn from_pixels_rejects_non_square() {
        let err = Frame::from_pixels(4, 3, vec![0.0; 12], 0).unwrap_err();
        assert!(err.contains("square"), "unexpected error: {err}");
    }

    #[test]
    fn from_pixels_rejects_short_buffer() {
        assert!(Frame::from_pixels(4, 4, vec![0.0; 15], 0).is_err());
    }

    #[test]
    fn indexing_is_row_major() {
        let mut frame = Frame::new(3, 7);
        frame.set(2, 1, 5.0);
        assert_eq!(frame.data[5], 5.0);
        assert_eq!(frame.get(2, 1), 5.0);
        assert_eq!(frame.row(1), &[0.0, 0.0, 5.0]);
        assert_eq!(frame.index, 7);
    }

    #[test]
    fn mean_of_constant_frame() {
        let frame = Frame::from_pixels(2, 2, vec![3.0; 4], 0).unwrap();
        assert_eq!(frame.mean(), 3.0);
    }
}
