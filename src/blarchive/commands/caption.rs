use crate::caption::CaptionClient;
use crate::commands::CmdResult;
use crate::model::Category;

pub async fn run(client: &CaptionClient, category: Category) -> CmdResult {
    let mut result = CmdResult::default();
    result.caption = Some(client.generate(category).await);
    result
}
