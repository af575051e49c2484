//! # CLI Layer
//!
//! One possible front end for blarchive. This is the only place that touches
//! stdout, stderr, stdin and exit codes.
//!
//! - `run()`: parse arguments, set up logging and the archive, dispatch
//! - `handle_*()`: call the API and render the `CmdResult`
//! - rendering lives in `render.rs`

use super::render::{
    print_messages, render_caption, render_card_list, render_facets, render_media, render_nav,
    render_playlists, render_summaries, render_text_list,
};
use super::setup::{Cli, Commands, PlaylistCommands};
use blarchive::api::{ArchiveApi, CmdResult, ConfigAction};
use blarchive::error::{ArchiveError, Result};
use blarchive::index::DisplayIndex;
use blarchive::init::{initialize, resolve_data_dir};
use blarchive::media::StillCamera;
use blarchive::model::{Category, CategoryFilter, Direction, Platform};
use blarchive::store::fs_backend::FsBackend;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: ArchiveApi<FsBackend>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let data_dir = resolve_data_dir(cli.data_dir.clone())?;
    let mut ctx = AppContext {
        api: initialize(data_dir),
    };

    match cli.command {
        None | Some(Commands::Home) => handle_home(&ctx),
        Some(Commands::Gallery { category, tag }) => handle_gallery(&ctx, category, tag),
        Some(Commands::Music { category }) => handle_music(&ctx, category),
        Some(Commands::Media) => handle_media(&ctx),
        Some(Commands::Upload { file, category }) => handle_upload(&mut ctx, file, category),
        Some(Commands::Capture { source, category }) => {
            handle_capture(&mut ctx, source, category)
        }
        Some(Commands::Delete { index, yes }) => handle_delete(&mut ctx, index, yes),
        Some(Commands::Tag { index, tag }) => {
            let result = ctx.api.tag_card(&index, &tag)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Untag { index, tag }) => {
            let result = ctx.api.untag_card(&index, &tag)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Caption { category }) => handle_caption(&ctx, category),
        Some(Commands::Playlist(cmd)) => match cmd {
            PlaylistCommands::Add {
                name,
                url,
                category,
                platform,
            } => handle_playlist_add(&mut ctx, name, url, category, platform),
            PlaylistCommands::Delete { index } => {
                let result = ctx.api.delete_playlist(&index)?;
                print_messages(&result.messages);
                Ok(())
            }
            PlaylistCommands::Move { index, direction } => {
                handle_playlist_move(&mut ctx, index, direction)
            }
        },
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        Some(Commands::Init) => handle_init(&mut ctx),
    }
}

/// Diagnostics go to stderr. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: bool) {
    let default = if verbose { "blarchive=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn print_view(result: &CmdResult) {
    if let Some(tab) = result.tab {
        print!("{}", render_nav(tab));
    }
}

fn handle_home(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.home();
    print_view(&result);
    print!("{}", render_summaries(&result.summaries));
    Ok(())
}

fn handle_gallery(ctx: &AppContext, category: CategoryFilter, tag: Option<String>) -> Result<()> {
    let result = ctx.api.gallery(category, tag.as_deref());
    print_view(&result);
    if let Some(facets) = &result.facets {
        print!("{}", render_facets(facets));
    }
    print!("{}", render_card_list(&result.listed_cards));
    Ok(())
}

fn handle_music(ctx: &AppContext, category: CategoryFilter) -> Result<()> {
    let result = ctx.api.music(category);
    print_view(&result);
    print!("{}", render_playlists(&result.listed_playlists));
    Ok(())
}

fn handle_media(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.media();
    print_view(&result);
    print!("{}", render_media(&result.media));
    Ok(())
}

fn handle_upload(ctx: &mut AppContext, file: PathBuf, category: CategoryFilter) -> Result<()> {
    let result = ctx.api.upload(&file, category)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_capture(ctx: &mut AppContext, source: PathBuf, category: CategoryFilter) -> Result<()> {
    let mut camera = StillCamera::new(source);
    let result = ctx
        .api
        .capture(&mut camera, category, CancellationToken::new())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, index: String, yes: bool) -> Result<()> {
    if !yes {
        let parsed = index.parse::<DisplayIndex>().map_err(ArchiveError::Api)?;
        let Some(target) = ctx.api.cards().snapshot().get(parsed.position()).cloned() else {
            // Nothing to confirm; deleting a missing card is a no-op.
            return Ok(());
        };
        print!(
            "Delete \"{}\" ({})? [y/N]: ",
            target.title,
            target.category.label()
        );
        io::stdout().flush().map_err(ArchiveError::Io)?;

        let mut input = String::new();
        io::stdin().read_line(&mut input).map_err(ArchiveError::Io)?;
        if !matches!(input.trim(), "y" | "Y") {
            println!("Operation cancelled.");
            return Ok(());
        }
    }

    let result = ctx.api.delete_card(&index)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_caption(ctx: &AppContext, category: Category) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(ArchiveError::Io)?;
    let result = runtime.block_on(ctx.api.caption(category))?;
    if let Some(outcome) = &result.caption {
        print!("{}", render_caption(outcome));
    }
    Ok(())
}

fn handle_playlist_add(
    ctx: &mut AppContext,
    name: String,
    url: String,
    category: Category,
    platform: Platform,
) -> Result<()> {
    let result = ctx.api.add_playlist(&name, &url, platform, category)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_playlist_move(ctx: &mut AppContext, index: String, direction: Direction) -> Result<()> {
    let result = ctx.api.move_playlist(&index, direction)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let show_all = key.is_none();
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if show_all {
        let lines: Vec<String> = result
            .config
            .iter()
            .flat_map(|config| config.entries())
            .map(|(k, v)| format!("{} = {}", k, v))
            .collect();
        print!("{}", render_text_list(&lines, "No configuration values."));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages);
    Ok(())
}
