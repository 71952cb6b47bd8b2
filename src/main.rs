use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use termym::cli;
use termym::config::PlayOptions;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Play your liked tracks
    Likes(LikesOptions),

    /// Play one of your playlists by name
    Playlist(PlaylistOptions),

    /// Search a track and play it
    Search(SearchOptions),

    #[clap(about = "Play a well-known auto-generated feed")]
    Auto(AutoOptions),

    /// Play an explicit comma-separated id list
    Id(IdOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct LikesOptions {
    #[command(flatten)]
    pub play: PlayOptions,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    /// Name of the playlist to play
    pub playlist_name: Option<String>,

    #[command(flatten)]
    pub play: PlayOptions,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Search term
    pub term: String,

    /// Use specific search result
    #[clap(long = "search-x", short = 'x', value_name = "X", default_value_t = 1)]
    pub search_x: usize,

    /// No autocorrection for search
    #[clap(long)]
    pub search_no_correct: bool,

    #[command(flatten)]
    pub play: PlayOptions,
}

#[derive(Parser, Debug, Clone)]
pub struct AutoOptions {
    /// Feed name (playlistOfTheDay, origin, neverHeard, recentTracks, …)
    pub playlist_name: Option<String>,

    /// Do not show Alice shots
    #[clap(long = "no-alice")]
    pub no_alice: bool,

    #[command(flatten)]
    pub play: PlayOptions,
}

#[derive(Parser, Debug, Clone)]
pub struct IdOptions {
    /// Comma-separated ids: `123` track, `b123` album, `p[owner:]kind` playlist
    pub id_list: String,

    #[command(flatten)]
    pub play: PlayOptions,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Likes(opt) => cli::likes(opt.play).await,
        Command::Playlist(opt) => cli::playlist(opt.playlist_name, opt.play).await,
        Command::Search(opt) => {
            cli::search(opt.term, opt.search_x, opt.search_no_correct, opt.play).await
        }
        Command::Auto(opt) => cli::auto(opt.playlist_name, opt.no_alice, opt.play).await,
        Command::Id(opt) => cli::ids(opt.id_list, opt.play).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
