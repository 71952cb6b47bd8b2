use crate::config::PlayOptions;
use crate::error;
use crate::types::TrackHandle;
use crate::yandex::{describe_chain, retry};

pub async fn search(term: String, result_index: usize, no_correct: bool, options: PlayOptions) {
    let client = super::connect(&options).await;

    let page = match retry(|| client.search_tracks(&term, 0, no_correct)).await {
        Ok(page) => page,
        Err(err) => error!("{}", describe_chain(&err)),
    };

    match (&page.misspell_original, &page.misspell_result) {
        (Some(original), Some(corrected)) if page.misspell_corrected == Some(true) => {
            println!("Search results for \"{original}\"=>\"{corrected}\"");
        }
        _ => println!(
            "Search results for \"{}\"",
            page.text.as_deref().unwrap_or(&term)
        ),
    }

    let tracks = page.tracks.unwrap_or_else(|| crate::types::SearchTracks {
        total: None,
        results: Vec::new(),
    });
    if tracks.results.is_empty() {
        error!("Nothing found for \"{term}\", type=track");
    }
    println!(
        "tracks: {} match(es)",
        tracks.total.unwrap_or(tracks.results.len() as u64)
    );

    let index = result_index.max(1);
    let track = match tracks.results.into_iter().nth(index - 1) {
        Some(track) => track,
        None => error!("Search result {index} is out of range"),
    };
    println!("Selecting {index} [track]");

    super::run_with_tracks(
        &client,
        &options,
        false,
        1,
        vec![TrackHandle::Full(Box::new(track))],
    )
    .await;
}
