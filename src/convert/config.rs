use std::path::PathBuf;

use super::error::ConvertError;

pub struct ConvertConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Leading train examples written out as the validation split
    pub validation_size: usize,
}

impl ConvertConfig {
    pub fn build(self) -> Result<Self, ConvertError> {
        if !self.data_dir.is_dir() {
            return Err(ConvertError::DataDirNotFound(self.data_dir));
        }

        Ok(self)
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("MNIST_data"),
            output_dir: PathBuf::from("."),
            validation_size: 0,
        }
    }
}
