use criterion::{black_box, criterion_group, criterion_main, Criterion};
use symptom_check::classifier::LinearModelFile;
use symptom_check::{
    ArtifactStore, LabelDecoder, LinearClassifier, LookupService, ReferenceTable, SymptomChecker, TextNormalizer,
};

const BASE_SYMPTOMS: [&str; 8] = [
    "fever", "cough", "fatigue", "headache", "vomiting", "itching", "chills", "nausea",
];

/// Builds an in-memory store with `n_symptoms` features and `n_diseases` classes
fn setup_store(n_symptoms: usize, n_diseases: usize) -> ArtifactStore {
    let feature_names: Vec<String> = (0..n_symptoms)
        .map(|i| match BASE_SYMPTOMS.get(i) {
            Some(name) => name.to_string(),
            None => format!("symptom_{}", i),
        })
        .collect();
    let coef = (0..n_diseases)
        .map(|d| (0..n_symptoms).map(|s| if s % n_diseases == d { 1.0 } else { 0.0 }).collect())
        .collect();
    let classifier = LinearClassifier::from_parts(LinearModelFile {
        feature_names,
        classes: (0..n_diseases as i64).collect(),
        coef,
        intercept: vec![0.0; n_diseases],
    })
    .unwrap();

    let diseases: Vec<String> = (0..n_diseases).map(|i| format!("Disease {}", i)).collect();
    let lookup = LookupService::new(
        ReferenceTable::from_rows("description", diseases.iter().map(|d| (d, format!("About {}", d)))),
        ReferenceTable::from_rows("precaution", diseases.iter().map(|d| (d, "Rest".to_string()))),
    );

    ArtifactStore::builder()
        .with_classifier(Box::new(classifier))
        .with_label_decoder(LabelDecoder::new(diseases).unwrap())
        .with_lookup(lookup)
        .build()
        .unwrap()
}

fn bench_normalization(c: &mut Criterion) {
    let normalizer = TextNormalizer::new();
    let mut group = c.benchmark_group("Normalization");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    group.bench_function("short_text", |b| b.iter(|| {
        normalizer.normalize(black_box("I have a headache and vomiting")).unwrap()
    }));

    group.bench_function("long_text", |b| b.iter(|| {
        normalizer.normalize(black_box(
            "For the last three days I have had fevers that come and go, with chills \
             in the evening and a dry cough that keeps me up at night. This morning \
             I also noticed some itching on my arms, and I have been feeling nausea \
             after meals. My headaches are worse when I stand up quickly."
        )).unwrap()
    }));

    group.finish();
}

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("Encoding");
    group.sample_size(50);

    for &count in &[8, 132, 1000] {
        let store = setup_store(count, 4);
        group.bench_function(format!("symptoms_{}", count), |b| b.iter(|| {
            store.encoder().encode(black_box(["fever", "cough", "chills", "unknown"]))
        }));
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pipeline");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    // Roughly the size of the public symptom dataset
    let store = setup_store(132, 41);
    let checker = SymptomChecker::new(&store);

    group.bench_function("selection", |b| b.iter(|| {
        checker.diagnose_selection(black_box(&["fever", "cough", "chills"])).unwrap()
    }));

    group.bench_function("free_text", |b| b.iter(|| {
        checker.diagnose_text(black_box("I have had fevers, chills and a cough since Monday")).unwrap()
    }));

    group.finish();
}

criterion_group!(
    benches,
    bench_normalization,
    bench_encoding,
    bench_pipeline
);
criterion_main!(benches);
