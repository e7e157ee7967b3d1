use super::error::LoaderError;

pub struct LoaderConfig {
    pub threads: usize,
    pub batch_size: usize,
    pub prefetch_count: usize,
    pub shuffle: bool,
    pub shuffle_seed: Option<u64>,
    pub drop_last: bool,
}

impl LoaderConfig {
    pub fn build(self) -> Result<Self, LoaderError> {
        if self.batch_size == 0 {
            return Err(LoaderError::InvalidConfig("batch_size must be non-zero".into()));
        }
        if self.prefetch_count == 0 {
            return Err(LoaderError::InvalidConfig("prefetch_count must be non-zero".into()));
        }
        if self.threads == 0 {
            return Err(LoaderError::InvalidConfig("threads must be non-zero".into()));
        }

        Ok(self)
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
            batch_size: 100,
            prefetch_count: 2,
            shuffle: true,
            shuffle_seed: None,
            drop_last: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_builds() {
        let config = LoaderConfig::default().build().unwrap();
        assert_eq!(config.batch_size, 100);
        assert!(config.threads > 0);
    }

    #[test]
    fn test_zero_values_rejected() {
        let zero_batch = LoaderConfig {
            batch_size: 0,
            ..Default::default()
        };
        assert!(matches!(zero_batch.build(), Err(LoaderError::InvalidConfig(_))));

        let zero_prefetch = LoaderConfig {
            prefetch_count: 0,
            ..Default::default()
        };
        assert!(zero_prefetch.build().is_err());

        let zero_threads = LoaderConfig {
            threads: 0,
            ..Default::default()
        };
        assert!(zero_threads.build().is_err());
    }
}
