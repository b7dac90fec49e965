//! Benchmarks for a full analysis pass over response sets of increasing size.
//!
//! Every answer to a free-text question goes through sentiment scoring once
//! for the distribution and once per theme it mentions, so the text-heavy
//! cases dominate.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use survey_analysis::model::{Question, ResponseSet, ResponseValue, SurveyType};
use survey_analysis::SurveyAnalyzer;

const ANSWERS: &[&str] = &[
    "The pricing is too expensive and support was great",
    "Delivery was slow and the package arrived damaged, awful experience",
    "Easy interface, excellent product quality, happy with the value",
    "Nothing to add",
    "The staff were helpful but email response times are disappointing",
];

// ── Test data ────────────────────────────────────────────────────────────────

/// One rating, one NPS and `texts` analysed free-text questions
fn make_survey(texts: u32) -> (Vec<Question>, ResponseSet) {
    let mut questions = vec![
        Question::rating(1, "How satisfied are you with our service overall?", 5),
        Question::rating(2, "How likely are you to recommend us to others? (1-10)", 10),
    ];
    let mut responses = ResponseSet::from([
        (1, ResponseValue::Numeric(3.0)),
        (2, ResponseValue::Numeric(8.0)),
    ]);

    for i in 0..texts {
        let id = 3 + i;
        questions.push(Question::text(id, "Anything else?").with_ai_analysis());
        let answer = ANSWERS[i as usize % ANSWERS.len()];
        responses.insert(id, ResponseValue::Text(answer.to_string()));
    }

    (questions, responses)
}

// ── Benchmarks ───────────────────────────────────────────────────────────────

fn bench_analyze(c: &mut Criterion) {
    let analyzer = SurveyAnalyzer::default();

    let cases: Vec<(&str, (Vec<Question>, ResponseSet))> = vec![
        ("template_sized", make_survey(1)),
        ("texts_10", make_survey(10)),
        ("texts_100", make_survey(100)),
        ("texts_1000", make_survey(1000)),
    ];

    let mut group = c.benchmark_group("survey_analysis");

    for (label, (questions, responses)) in &cases {
        group.bench_with_input(
            BenchmarkId::new("analyze", label),
            &(questions, responses),
            |b, (questions, responses)| {
                b.iter(|| {
                    analyzer.analyze(
                        black_box(questions),
                        black_box(responses),
                        SurveyType::CustomerSatisfaction,
                    )
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_analyze);
criterion_main!(benches);
