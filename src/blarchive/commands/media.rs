use crate::commands::CmdResult;
use crate::model::{Category, Tab};
use crate::seed::media_links;

pub fn run() -> CmdResult {
    let mut result = CmdResult::for_tab(Tab::Media);
    result.media = Category::ALL
        .iter()
        .map(|&c| (c, media_links(c)))
        .collect();
    result
}
