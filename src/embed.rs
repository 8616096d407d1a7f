const PLAYER_URL: &str = "https://w.soundcloud.com/player/";

/// SoundCloud widget iframe for `track_url`. The URL is inserted as-is.
pub fn player_iframe(track_url: &str) -> String {
    format!(
        r##"<iframe width="100%" height="200" scrolling="no" frameborder="no" allow="autoplay" src="{PLAYER_URL}?url={track_url}&color=#282c34&auto_play=false&hide_related=false&show_comments=true&show_user=true&show_reposts=false&show_teaser=true&visual=true"></iframe>"##
    )
}
