/// Amount-in-words example: reads amounts from the command line (or uses a
/// few samples) and prints them on the Indian scale.
///
/// Run with:
///   cargo run --example amount_in_words -p invoice-demos -- 306.8 1234567
use std::str::FromStr;

use invoice_core::format::{amount_in_words_legend, money};
use invoice_core::to_words;
use rust_decimal::Decimal;

const SAMPLES: &[&str] = &["0", "5", "42", "100", "306.8", "1234567", "999999999", "1000000000"];

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let inputs: Vec<&str> = if args.is_empty() {
        SAMPLES.to_vec()
    } else {
        args.iter().map(String::as_str).collect()
    };

    for input in inputs {
        match Decimal::from_str(input) {
            Ok(amount) => {
                let words = to_words(amount);
                let legend = amount_in_words_legend(&words).unwrap_or_else(|| words.to_string());
                println!("{:>16}  {}", money(amount), legend);
            }
            Err(e) => eprintln!("{:>16}  not a number: {}", input, e),
        }
    }
}
