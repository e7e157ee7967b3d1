use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DatasetSplit {
    Train,
    Test,
    Validation,
}

impl DatasetSplit {
    pub fn name(&self) -> &'static str {
        match self {
            DatasetSplit::Train => "train",
            DatasetSplit::Test => "test",
            DatasetSplit::Validation => "validation",
        }
    }

    /// IDX source prefix; validation is carved out of the train files.
    fn source_prefix(&self) -> &'static str {
        match self {
            DatasetSplit::Train | DatasetSplit::Validation => "train",
            DatasetSplit::Test => "t10k",
        }
    }

    pub fn images_file(&self) -> String {
        format!("{}-images-idx3-ubyte.gz", self.source_prefix())
    }

    pub fn labels_file(&self) -> String {
        format!("{}-labels-idx1-ubyte.gz", self.source_prefix())
    }

    pub fn record_file(&self) -> String {
        format!("{}.tfrecords", self.name())
    }
}

impl fmt::Display for DatasetSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
