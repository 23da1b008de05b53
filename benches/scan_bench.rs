use caption_assist::dom::{Document, PageTreeMut};
use caption_assist::{extract_duration, scan_text, Lexicon, SearchSession, ThresholdTable, WordMatcher};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn caption_text(cues: usize) -> String {
    let mut text = String::from("WEBVTT\n\n");
    for i in 0..cues {
        let start = i * 4;
        text.push_str(&format!(
            "{:02}:{:02}:{:02}.000 --> {:02}:{:02}:{:02}.500\n",
            start / 3600,
            (start / 60) % 60,
            start % 60,
            start / 3600,
            (start / 60) % 60,
            start % 60 + 3
        ));
        match i % 5 {
            0 => text.push_str("What the f***ing hell is going on?\n\n"),
            1 => text.push_str("Oh crap, we're going to be late again.\n\n"),
            2 => text.push_str("They kissed and then had a beer at the pub.\n\n"),
            3 => text.push_str("Shut up, you idiot. Bloody hell.\n\n"),
            _ => text.push_str("Nothing to see here, just dialogue.\n\n"),
        }
    }
    text
}

fn bench_matching(c: &mut Criterion) {
    let lexicon = Lexicon::preloaded();
    let short = caption_text(50);
    let long = caption_text(1500);

    c.bench_function("matcher_compile_preloaded", |b| {
        b.iter(|| black_box(WordMatcher::new(&lexicon)))
    });

    let matcher = WordMatcher::new(&lexicon);
    c.bench_function("matcher_count_short", |b| {
        b.iter(|| black_box(matcher.count(&short)))
    });
    c.bench_function("matcher_count_long", |b| {
        b.iter(|| black_box(matcher.count(&long)))
    });

    c.bench_function("duration_extract_long", |b| {
        b.iter(|| black_box(extract_duration(&long)))
    });

    let thresholds = ThresholdTable::default();
    c.bench_function("scan_text_long", |b| {
        b.iter(|| black_box(scan_text(&long, &lexicon, &thresholds)))
    });
}

fn bench_locator(c: &mut Criterion) {
    let lexicon = Lexicon::preloaded();

    let mut doc = Document::new();
    let body = doc.body();
    for i in 0..200 {
        let p = doc.append_element(body, "p");
        doc.append_text(p, &format!("Line {} - oh fuck, what the f***ing crap", i));
    }

    c.bench_function("locator_search_and_clear", |b| {
        b.iter(|| {
            let mut session = SearchSession::new();
            let outcome = session.search(&mut doc, "fuck", &lexicon);
            session.clear_all_highlights(&mut doc);
            doc.normalize(body);
            black_box(outcome)
        })
    });
}

criterion_group!(benches, bench_matching, bench_locator);
criterion_main!(benches);
