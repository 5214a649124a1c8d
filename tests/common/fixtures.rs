pub const FOX: &str = "The quick brown fox jumps over the lazy dog";

pub const SAMPLE_TEXTS: &[&str] = &[
    FOX,
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.",
    "It was the best of times, it was the worst of times, it was the age of wisdom, it was the age of foolishness.",
    "Short",
    "Antidisestablishmentarianism is a rather long word to break",
    "First paragraph ends here.\nSecond paragraph starts on a fresh line and keeps going for a while.",
    "Ünïcödé wörds wïth àccents and ćharacters spanning several bytes each",
    "a b c d e f g h i j k l m n o p q r s t u v w x y z",
];

/// Long synthetic paragraph for throughput and allocation checks.
pub fn long_paragraph(words: usize) -> String {
    let vocab = [
        "ellipsis", "measure", "width", "glyph", "line", "overflow", "budget", "font", "box",
        "text",
    ];
    let mut out = String::new();
    for i in 0..words {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(vocab[i % vocab.len()]);
    }
    out
}
