//! Terminal rendering of replies.

use colored::{ColoredString, Colorize};
use couplebot_application::Reply;
use couplebot_core::hangman::{GameView, KeyStyle, LetterKey, ViewTone};

pub fn print_reply(reply: &Reply) {
    if let Some(view) = &reply.view {
        print_view(view);
    }

    for line in reply.content.lines() {
        if reply.ephemeral {
            println!("{} {}", "(only you)".bright_black(), line.bright_blue());
        } else {
            println!("{}", line.bright_blue());
        }
    }
    if let Some(url) = &reply.image_url {
        println!("{} {}", "image:".bright_black(), url.underline());
    }
    println!();
}

fn print_view(view: &GameView) {
    let title = format!("== {} ==", view.title);
    let title = match view.tone {
        ViewTone::InProgress => title.bright_magenta(),
        ViewTone::Success => title.bright_green(),
        ViewTone::Failure => title.bright_red(),
        ViewTone::Neutral => title.bright_black(),
    };
    println!("{}", title.bold());

    for line in view.art.lines() {
        println!("  {}", line);
    }
    println!("  {}", view.mask.bold());
    println!("  {}", view.mistakes_label.yellow());

    for row in &view.keyboard {
        let keys: Vec<String> = row.iter().map(|key| key_label(key).to_string()).collect();
        println!("  {}", keys.join(" "));
    }
    println!("  {}", view.footer.bright_black());
}

fn key_label(key: &LetterKey) -> ColoredString {
    let label = key.letter.to_string();
    match key.style {
        KeyStyle::Hit => label.green().bold(),
        KeyStyle::Miss => label.red().strikethrough(),
        KeyStyle::Unused if key.disabled => label.bright_black(),
        KeyStyle::Unused => label.normal(),
    }
}
