/// Maps a raw pixel into `[-0.5, 0.5]`.
pub fn normalize_pixel(value: u8) -> f32 {
    (1.0 / 255.0) * value as f32 - 0.5
}

pub struct Batch {
    pub images: Vec<f32>,
    pub labels: Vec<i32>,
    pub samples_in_batch: usize,
    pub height: usize,
    pub width: usize,
    pub batch_number: usize,
}

impl Batch {
    pub fn pixels_per_sample(&self) -> usize {
        self.height * self.width
    }

    pub fn image(&self, index: usize) -> &[f32] {
        let start = index * self.pixels_per_sample();
        &self.images[start..start + self.pixels_per_sample()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pixel() {
        assert!((normalize_pixel(0) + 0.5).abs() < 1e-6);
        assert!((normalize_pixel(255) - 0.5).abs() < 1e-6);
        assert!(normalize_pixel(128).abs() < 0.01);
    }
}
