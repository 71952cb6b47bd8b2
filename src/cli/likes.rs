use crate::config::PlayOptions;
use crate::error;
use crate::types::TrackHandle;
use crate::utils::plural;
use crate::yandex::{describe_chain, retry};

pub async fn likes(options: PlayOptions) {
    let client = super::connect(&options).await;

    let tracks = match retry(|| client.likes_tracks()).await {
        Ok(tracks) => tracks,
        Err(err) => error!("{}", describe_chain(&err)),
    };

    let total = tracks.len();
    println!("Playing liked tracks. {total} track{}.", plural(total));

    let handles: Vec<TrackHandle> = tracks.into_iter().map(TrackHandle::Short).collect();
    super::run_with_tracks(&client, &options, false, total, handles).await;
}
