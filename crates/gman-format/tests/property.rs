use std::panic;

use gman_format::{classify, classify_help, Span, TagKind, TypeAheadNavigator};

const CASES: usize = 200;
const MAX_LEN: usize = 400;
const CHARSET: &[char] = &[
    'a', 'b', 'g', 'l', 'r', 's', 'x', 'z', 'A', 'E', 'L', 'M', 'N', 'S', 'Z', '0', '1', '8',
    ' ', ' ', ' ', '\n', '\n', '\t', '\r', '-', '-', '=', '_', '.', ',', '|', '/', '~', ':',
    '(', ')', '[', ']', '{', '}', '<', '>', '?', '\u{e9}', '\u{2010}', '\u{201c}', '\u{4e2d}',
];
const SUBJECTS: &[&str] = &["ls", "grep", "a", "-", "\u{e9}", ""];

#[test]
fn classify_never_panics_on_random_input() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = Lcg::new(0x5eed_1a2b_3c4d_5e6f);
    for case in 0..CASES {
        let len = rng.gen_range(0, MAX_LEN + 1);
        let source = random_string(&mut rng, len);
        let subject = SUBJECTS[rng.gen_range(0, SUBJECTS.len())];
        let result = panic::catch_unwind(|| (classify(&source, subject), classify_help(&source)));
        if result.is_err() {
            return Err(format!("classify panicked for case {}: {:?}", case, source).into());
        }
    }
    Ok(())
}

#[test]
fn spans_are_well_formed_on_random_input() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = Lcg::new(0x0bad_cafe_f00d_d00d);
    for case in 0..CASES {
        let len = rng.gen_range(0, MAX_LEN + 1);
        let source = random_string(&mut rng, len);
        let subject = SUBJECTS[rng.gen_range(0, SUBJECTS.len())];
        let annotations = classify(&source, subject);
        let help = classify_help(&source);
        for span in annotations.spans.iter().chain(help.iter()) {
            check_span(span, &source).map_err(|message| {
                format!("case {}: {}\nSource: {:?}", case, message, source)
            })?;
        }
        for ((start, end), name) in &annotations.references {
            let covered = annotations
                .spans
                .iter()
                .any(|s| s.kind == TagKind::ManReference && s.start == *start && s.end == *end);
            if !covered || !source[*start..*end].starts_with(name.as_str()) {
                return Err(format!("case {}: stray reference {:?}", case, name).into());
            }
        }
    }
    Ok(())
}

#[test]
fn classify_is_deterministic() {
    let mut rng = Lcg::new(0x1234_5678_9abc_def0);
    for _ in 0..CASES {
        let len = rng.gen_range(0, MAX_LEN + 1);
        let source = random_string(&mut rng, len);
        assert_eq!(classify(&source, "ls"), classify(&source, "ls"));
        assert_eq!(classify_help(&source), classify_help(&source));
    }
}

#[test]
fn uppercase_lines_are_headers() {
    let mut rng = Lcg::new(0x7777_aaaa_5555_3333);
    let letters: Vec<char> = ('A'..='Z').collect();
    for _ in 0..CASES {
        let mut line = String::new();
        line.push(letters[rng.gen_range(0, letters.len())]);
        for _ in 0..rng.gen_range(0, 20) {
            if rng.gen_range(0, 5) == 0 {
                line.push(' ');
            } else {
                line.push(letters[rng.gen_range(0, letters.len())]);
            }
        }
        let source = format!("intro text\n{line}\nbody\n");
        let start = "intro text\n".len();
        let annotations = classify(&source, "body");
        let hit = annotations
            .spans_of(TagKind::Header)
            .any(|s| s.start == start && s.end == start + line.len());
        assert!(hit, "no header span for {:?}", line);
    }
}

#[test]
fn navigator_keeps_last_ten_lowercased() {
    let mut rng = Lcg::new(0x4242_4242_4242_4242);
    let keys: Vec<char> = ('a'..='z').chain('A'..='Z').chain('0'..='9').collect();
    for _ in 0..CASES {
        let typed: String = (0..rng.gen_range(11, 40))
            .map(|_| keys[rng.gen_range(0, keys.len())])
            .collect();
        let mut nav = TypeAheadNavigator::new();
        typed.chars().for_each(|c| nav.append(c));
        let tail: String = typed[typed.len() - 10..].to_lowercase();
        assert_eq!(nav.buffer(), tail);

        let items = [format!("#{}", typed.to_uppercase()), format!("x{tail}"), tail.clone()];
        assert_eq!(nav.find_match(&items), Some(2));

        nav.reset();
        assert_eq!(nav.find_match(&items), None);
    }
}

fn check_span(span: &Span, source: &str) -> Result<(), String> {
    if span.start >= span.end {
        return Err(format!("empty or inverted span {:?}", span));
    }
    if span.end > source.len() {
        return Err(format!("span {:?} past end {}", span, source.len()));
    }
    if !source.is_char_boundary(span.start) || !source.is_char_boundary(span.end) {
        return Err(format!("span {:?} splits a char", span));
    }
    if span.text(source).contains('\n') {
        return Err(format!("span {:?} crosses a line break", span));
    }
    Ok(())
}

fn random_string(rng: &mut Lcg, len: usize) -> String {
    (0..len)
        .map(|_| CHARSET[rng.gen_range(0, CHARSET.len())])
        .collect()
}

struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state
    }

    fn gen_range(&mut self, min: usize, max: usize) -> usize {
        if max <= min {
            return min;
        }
        let span = max - min;
        let value = (self.next() >> 1) as usize;
        min + (value % span)
    }
}
