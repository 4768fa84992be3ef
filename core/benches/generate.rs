use criterion::{Criterion, criterion_group, criterion_main};
use linkagram_core::*;
use std::hint::black_box;

const WORDS: &str = include_str!("../tests/data/words.txt");
const LETTERS: [&str; 26] = [
    "e", "t", "a", "o", "i", "n", "s", "h", "r", "d", "l", "c", "u", "m", "w", "f", "g", "y",
    "p", "b", "v", "k", "j", "x", "q", "z",
];

fn weighted_pick(c: &mut Criterion) {
    let pool: Vec<char> = LETTERS.iter().filter_map(|l| l.chars().next()).collect();

    c.bench_function("weighted_pick_16", |b| {
        b.iter(|| SeededRng::seed(black_box("20240101,small.json,letters.json,4,4")).weighted_pick(&pool, 16))
    });
}

fn daily_puzzle(c: &mut Criterion) {
    let dictionary = Trie::build(WORDS.lines());
    let frequencies = FrequencyTable::new(LETTERS).unwrap();
    let overrides = BoardOverrides::new();

    c.bench_function("daily_puzzle", |b| {
        b.iter(|| {
            Puzzle::generate(
                PuzzleConfig::new(black_box(20240101)),
                &dictionary,
                &frequencies,
                &overrides,
            )
        })
    });
}

criterion_group!(benches, weighted_pick, daily_puzzle);
criterion_main!(benches);
