//! Built-in content used when a collection has never been stored, plus the
//! fixed official-media table.

use crate::model::{Category, Photocard, Platform, PlaylistLink};
use chrono::NaiveDate;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn initial_photocards() -> Vec<Photocard> {
    vec![
        Photocard {
            id: "1".into(),
            url: "https://i.pinimg.com/736x/f9/58/7f/f9587f77d1dd2c21143fd0f198f4953c.jpg".into(),
            title: "Riize Official".into(),
            category: Category::Riize,
            date_added: date(2024, 1, 15),
            tags: strings(&["Anton", "RIIZING"]),
            memo: Some("The aesthetic of this shot is perfect.".into()),
        },
        Photocard {
            id: "2".into(),
            url: "https://i.pinimg.com/736x/58/30/1c/58301cd93a584516f63137b0b8974f45.jpg".into(),
            title: "NCT 127 WALK".into(),
            category: Category::Nct127,
            date_added: date(2024, 2, 10),
            tags: strings(&["Doyoung", "MemberCard"]),
            memo: Some("WALK concept is everything.".into()),
        },
        Photocard {
            id: "3".into(),
            url: "https://i.pinimg.com/736x/5b/09/7d/5b097d9f485664220306edbc0ba1aa08.jpg".into(),
            title: "XngHan Kit".into(),
            category: Category::XngHan,
            date_added: date(2023, 12, 1),
            tags: strings(&["XngHan", "Solo"]),
            memo: None,
        },
    ]
}

pub fn initial_playlists() -> Vec<PlaylistLink> {
    vec![
        PlaylistLink {
            id: Uuid::new_v4(),
            name: "Riize - RIIZING".into(),
            url: "https://music.youtube.com/playlist?list=OLAK5uy_nYY8Bh88vPBAb2w_3Y6JC0ZcsykUo43zA&si=i7vOwZflwZKU3hNy".into(),
            platform: Platform::YouTube,
            category: Category::Riize,
        },
        PlaylistLink {
            id: Uuid::new_v4(),
            name: "NCT 127 - WALK".into(),
            url: "https://music.youtube.com/playlist?list=OLAK5uy_lCsEbbiKuWJAzPBH5zjaAZXV4CobCUWjg".into(),
            platform: Platform::YouTube,
            category: Category::Nct127,
        },
    ]
}

/// Official channels for one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaLinks {
    pub instagram: &'static str,
    pub youtube: &'static str,
}

pub fn media_links(category: Category) -> MediaLinks {
    match category {
        Category::Riize => MediaLinks {
            instagram: "https://www.instagram.com/riize_official/",
            youtube: "https://www.youtube.com/@RIIZE_official",
        },
        Category::Nct127 => MediaLinks {
            instagram: "https://www.instagram.com/nct127/",
            youtube: "https://www.youtube.com/@nct127",
        },
        Category::XngHan => MediaLinks {
            instagram: "https://www.instagram.com/xnghan/",
            youtube: "https://www.youtube.com/@XngHan",
        },
    }
}
