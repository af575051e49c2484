//! Terminal rendering.
//!
//! Every view is rendered to a `String` first so layout can be tested without
//! a terminal. Width math is unicode-aware; titles and tags are truncated to
//! keep each entry on one line.

use blarchive::api::{CmdMessage, MessageLevel};
use blarchive::caption::CaptionOutcome;
use blarchive::commands::{CategorySummary, GalleryFacets};
use blarchive::index::{DisplayCard, DisplayPlaylist};
use blarchive::media::{describe, ImageSource};
use blarchive::model::{Category, Tab};
use blarchive::seed::MediaLinks;
use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
const INDEX_WIDTH: usize = 5;
const CATEGORY_WIDTH: usize = 9;
const DATE_WIDTH: usize = 10;

pub fn render_nav(active: Tab) -> String {
    let items: Vec<String> = Tab::ALL
        .iter()
        .map(|tab| {
            if *tab == active {
                format!("[{}]", tab.label()).bold().to_string()
            } else {
                tab.label().dimmed().to_string()
            }
        })
        .collect();
    format!("{}\n\n", items.join("  "))
}

pub fn render_summaries(summaries: &[CategorySummary]) -> String {
    let mut out = String::new();
    for s in summaries {
        out.push_str(&format!(
            "  {} {} cards, {} playlists\n",
            format!("{:<width$}", s.category.label(), width = CATEGORY_WIDTH).bold(),
            s.cards,
            s.playlists
        ));
    }
    out
}

pub fn render_facets(facets: &GalleryFacets) -> String {
    let tags: Vec<String> = facets.available_tags.iter().map(|t| format!("#{}", t)).collect();
    let tag_line = if tags.is_empty() {
        "(no tags)".to_string()
    } else {
        tags.join(" ")
    };
    format!(
        "Category: {}   Tag: {}\n{}\n\n",
        facets.category.to_string().bold(),
        facets.tag.to_string().bold(),
        truncate_to_width(&tag_line, LINE_WIDTH).dimmed()
    )
}

pub fn render_card_list(cards: &[DisplayCard]) -> String {
    if cards.is_empty() {
        return "No photocards found.\n".to_string();
    }

    let mut out = String::new();
    for dc in cards {
        let card = &dc.card;
        let idx = format!("{:>width$}", format!("{}.", dc.index), width = INDEX_WIDTH - 1);
        let fixed = INDEX_WIDTH + CATEGORY_WIDTH + DATE_WIDTH + 2;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let title = truncate_to_width(&card.title, available);
        let padding = available.saturating_sub(title.width());

        out.push_str(&format!(
            "{} {}{} {:<cat$} {}\n",
            idx.yellow(),
            title,
            " ".repeat(padding),
            card.category.label(),
            card.date_added.format("%Y-%m-%d").to_string().dimmed(),
            cat = CATEGORY_WIDTH
        ));

        let mut detail = card
            .tags
            .iter()
            .map(|t| format!("#{}", t))
            .collect::<Vec<_>>()
            .join(" ");
        if let Some(memo) = &card.memo {
            if !detail.is_empty() {
                detail.push_str("  ");
            }
            detail.push_str(&format!("\"{}\"", memo));
        }
        if !detail.is_empty() {
            let line = truncate_to_width(&detail, LINE_WIDTH - INDEX_WIDTH);
            out.push_str(&format!("{}{}\n", " ".repeat(INDEX_WIDTH), line.cyan()));
        }
        out.push_str(&format!(
            "{}{}\n",
            " ".repeat(INDEX_WIDTH),
            format_source(&card.url).dimmed()
        ));
    }
    out
}

fn format_source(url: &str) -> String {
    match describe(url) {
        ImageSource::Remote(u) => truncate_to_width(u, LINE_WIDTH - INDEX_WIDTH),
        ImageSource::Embedded { mime, bytes } => {
            format!("embedded {} ({:.1} KB)", mime, bytes as f64 / 1024.0)
        }
    }
}

pub fn render_playlists(playlists: &[DisplayPlaylist]) -> String {
    if playlists.is_empty() {
        return "No playlists found.\n".to_string();
    }

    let mut out = String::new();
    for dp in playlists {
        let link = &dp.link;
        out.push_str(&format!(
            "{} {} {}\n",
            format!("{:>width$}", format!("{}.", dp.index), width = INDEX_WIDTH - 1).yellow(),
            link.name.bold(),
            format!("({}, {})", link.platform.label(), link.category.label()).dimmed()
        ));
        out.push_str(&format!(
            "{}{}\n",
            " ".repeat(INDEX_WIDTH),
            truncate_to_width(&link.url, LINE_WIDTH - INDEX_WIDTH)
        ));
    }
    out
}

pub fn render_media(media: &[(Category, MediaLinks)]) -> String {
    let mut out = String::new();
    for (category, links) in media {
        out.push_str(&format!("{}\n", category.label().bold()));
        out.push_str(&format!("  Instagram  {}\n", links.instagram));
        out.push_str(&format!("  YouTube    {}\n", links.youtube));
    }
    out
}

pub fn render_caption(outcome: &CaptionOutcome) -> String {
    if outcome.is_generated() {
        format!("{}\n", outcome.text())
    } else {
        format!("{}\n", outcome.text().yellow())
    }
}

pub fn render_text_list(lines: &[String], empty_message: &str) -> String {
    if lines.is_empty() {
        return format!("{}\n", empty_message);
    }
    let mut out = String::new();
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        out.push_str(&format!("{}\n", line));
    }
    out
}

pub fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages));
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}
