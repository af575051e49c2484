use crate::commands::{CategorySummary, CmdResult};
use crate::model::{Category, Photocard, PlaylistLink, Tab};

pub fn run(cards: &[Photocard], playlists: &[PlaylistLink]) -> CmdResult {
    let mut result = CmdResult::for_tab(Tab::Index);
    result.summaries = Category::ALL
        .iter()
        .map(|&category| CategorySummary {
            category,
            cards: cards.iter().filter(|c| c.category == category).count(),
            playlists: playlists.iter().filter(|l| l.category == category).count(),
        })
        .collect();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{initial_photocards, initial_playlists};

    #[test]
    fn counts_per_group() {
        let result = run(&initial_photocards(), &initial_playlists());
        let counts: Vec<_> = result
            .summaries
            .iter()
            .map(|s| (s.category, s.cards, s.playlists))
            .collect();
        assert_eq!(
            counts,
            vec![
                (Category::Riize, 1, 1),
                (Category::Nct127, 1, 1),
                (Category::XngHan, 1, 0),
            ]
        );
    }
}
