// Prints the phonetic hint for each argument, or for a fixed sample list.
// Run with: cargo run --bin phonetic_hint -- think nation "thank you"
use deck_core::core::transcriber::PhoneticEngine;

fn main() {
    let engine = PhoneticEngine::new();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let samples = [
        "think", "nation", "vision", "enough", "caught", "light", "phone", "church", "ship",
        "school", "queen", "water", "car", "turn", "small", "thank you", "good morning",
    ];
    let words: Vec<&str> = if args.is_empty() {
        samples.to_vec()
    } else {
        args.iter().map(String::as_str).collect()
    };
    for word in words {
        println!("{} => {}", word, engine.transcribe_phrase(word));
    }
}
