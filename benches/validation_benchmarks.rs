use blog_api::api::payload::Payload;
use blog_api::api::validation::{RequestView, rules};
use blog_api::domain::Pattern;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn payload(value: serde_json::Value) -> Payload {
    Payload::from_slice(value.to_string().as_bytes()).unwrap()
}

fn bench_rule_sets(c: &mut Criterion) {
    let valid = payload(serde_json::json!({
        "username": "newUser",
        "email": "email@random.com",
        "password": "AB,_La(2M-IoxAX",
    }));
    let empty = payload(serde_json::json!({}));
    let update = payload(serde_json::json!({
        "id": "675db12edc29a15ed143e37e",
        "title": "An updated version of the post",
        "body": "Some reasonably long body text for the updated post. ".repeat(20),
        "username": "firstUser",
    }));

    c.bench_function("validate_registration_valid", |b| {
        b.iter(|| rules::REGISTRATION.validate(&RequestView::body(black_box(&valid))))
    });

    c.bench_function("validate_registration_all_failing", |b| {
        b.iter(|| rules::REGISTRATION.validate(&RequestView::body(black_box(&empty))))
    });

    c.bench_function("validate_post_update", |b| {
        b.iter(|| rules::POST_UPDATE.validate(&RequestView::body(black_box(&update))))
    });
}

fn bench_patterns(c: &mut Criterion) {
    c.bench_function("strong_password_pattern", |b| {
        b.iter(|| Pattern::StrongPassword.is_match(black_box("AB,_La(2M-IoxAX")))
    });

    c.bench_function("email_pattern", |b| {
        b.iter(|| Pattern::Email.is_match(black_box("email@random.com")))
    });
}

fn bench_payload_parsing(c: &mut Criterion) {
    let raw = serde_json::json!({
        "title": "This is my first blogPost",
        "body": "Body text ".repeat(100),
    })
    .to_string();

    c.bench_function("payload_from_slice", |b| {
        b.iter(|| Payload::from_slice(black_box(raw.as_bytes())))
    });
}

criterion_group!(benches, bench_rule_sets, bench_patterns, bench_payload_parsing);
criterion_main!(benches);
