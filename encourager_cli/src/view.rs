//! Terminal rendering of the four views.

use encourager_core::{translations, Language, Snapshot, Verse};

fn print_verse(verse: &Verse) {
    println!();
    for line in wrap(&verse.text, 60) {
        println!("  {}", line);
    }
    println!();
    println!("  — {}", verse.reference);
    println!();
}

/// Greedy word wrap; counts chars, not bytes
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = current.chars().count() + word.chars().count() + usize::from(!current.is_empty());
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

pub fn loading() {
    println!("\n  …");
}

pub fn prompt(snapshot: &Snapshot) {
    let t = translations(snapshot.language);
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", snapshot.language.label());
    println!("╰─────────────────────────────────────────╯");

    if let Some(verse) = &snapshot.verse {
        print_verse(verse);
    }

    println!("─────────────────────────────────────────");
    println!("Press Enter to say '{}'", t.amen);
    println!(
        "  'l' + Enter to switch language ({} -> {})",
        snapshot.language.label(),
        snapshot.language.next().label()
    );
    println!("  'q' + Enter to quit");
}

pub fn celebration(language: Language) {
    let t = translations(language);
    println!();
    println!("  ♥ ♥ ♥");
    println!();
    println!("  {}", t.god_bless);
    println!("  {}", t.may_this_word);
    println!();
}

pub fn continue_hint(language: Language) {
    println!("Press Enter: {}", translations(language).new_blessing);
}

pub fn reflection(snapshot: &Snapshot) {
    let t = translations(snapshot.language);
    println!();
    println!("  ☾");
    println!();
    for line in wrap(t.already_received, 60) {
        println!("  {}", line);
    }

    if let Some(verse) = &snapshot.verse {
        print_verse(verse);
    }

    println!("  {}", t.next_blessing_at);
    if let Some(countdown) = &snapshot.countdown {
        println!("  {}", countdown);
    }
}

/// Overwrite the current line with a countdown
pub fn countdown_line(countdown: &str) {
    use std::io::Write;
    print!("\r  {}", countdown);
    let _ = std::io::stdout().flush();
}

pub fn status(snapshot: &Snapshot) {
    println!("Language: {}", snapshot.language);
    if snapshot.locked {
        println!("Today's blessing: received");
        if let (Some(verse), Some(index)) = (&snapshot.verse, snapshot.index) {
            println!("  {} (#{})", verse.reference, index);
        }
        if let Some(countdown) = &snapshot.countdown {
            println!("Next blessing in: {}", countdown);
        }
    } else {
        println!("Today's blessing: not yet received");
    }
}
