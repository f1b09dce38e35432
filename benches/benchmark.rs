use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fitcontent_similarity::{cosine_similarity, encode, ExerciseAttributes};

fn sample_attributes(difficulty: &str, category: &str) -> ExerciseAttributes {
    ExerciseAttributes {
        difficulty_level: difficulty.to_string(),
        muscle_groups: vec!["core".to_string(), "upper_body".to_string()],
        duration_seconds: 45,
        calories_per_minute: Some(8.5),
        equipment: Some("dumbbells, resistance bands".to_string()),
        category: Some(category.to_string()),
        instruction_count: 4,
    }
}

fn bench_encode(c: &mut Criterion) {
    let attributes = sample_attributes("expert", "strength");
    c.bench_function("encode_exercise_features", |b| {
        b.iter(|| encode(black_box(&attributes)))
    });
}

fn bench_similarity(c: &mut Criterion) {
    let a = encode(&sample_attributes("expert", "strength"));
    let b = encode(&sample_attributes("beginner", "cardio"));
    c.bench_function("cosine_similarity", |bencher| {
        bencher.iter(|| cosine_similarity(black_box(&a), black_box(&b)))
    });
}

criterion_group!(benches, bench_encode, bench_similarity);
criterion_main!(benches);
