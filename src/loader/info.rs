use super::loader::RecordLoader;

/// Count of examples per label value, sorted by label.
pub fn label_histogram(loader: &RecordLoader) -> Vec<(i32, usize)> {
    let mut counts = std::collections::BTreeMap::new();
    for &label in loader.labels.iter() {
        *counts.entry(label).or_insert(0usize) += 1;
    }
    counts.into_iter().collect()
}

pub fn print_loader_info(loader: &RecordLoader) {
    let total_size = loader.len();
    let batch_size = loader.config.batch_size;
    let remainder = total_size % batch_size;

    println!("Record Information:");
    println!("-------------------");
    println!("Total records: {}", total_size);
    println!("Image size: {}x{}", loader.height, loader.width);
    println!();
    println!("Labels:");
    for (label, count) in label_histogram(loader) {
        println!(
            "  {}: {} ({:.2}%)",
            label,
            count,
            count as f32 / total_size as f32 * 100.0
        );
    }
    println!();
    println!("Batch size: {}", batch_size);
    println!("Batches: {}", loader.batch_count());
    println!(
        "Last batch size: {}",
        if remainder == 0 || loader.config.drop_last {
            batch_size
        } else {
            remainder
        }
    );
    println!("Drop last: {}", loader.config.drop_last);
    println!();
    println!("Shuffle: {}", loader.config.shuffle);
    println!("Seed: {:?}", loader.config.shuffle_seed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::config::LoaderConfig;
    use crate::record::Record;

    #[test]
    fn test_label_histogram() {
        let records = [3, 1, 3, 3, 0].into_iter().map(|label| {
            Ok(Record {
                height: 1,
                width: 1,
                label,
                image_raw: vec![0],
            })
        });
        let config = LoaderConfig {
            shuffle: false,
            ..Default::default()
        };
        let loader = RecordLoader::from_records(records, Some(config)).unwrap();

        assert_eq!(label_histogram(&loader), vec![(0, 1), (1, 1), (3, 3)]);
    }
}
