//! Link inspection for web search results

use url::Url;

/// Hosts that serve embeddable video pages
const VIDEO_HOSTS: [&str; 5] = [
    "youtube.com",
    "youtu.be",
    "vimeo.com",
    "dailymotion.com",
    "bilibili.com",
];

/// Direct media file extensions
const MEDIA_EXTENSIONS: [&str; 3] = [".mp4", ".webm", ".m3u8"];

fn host_matches(host: &str, domain: &str) -> bool {
    host == domain || host.ends_with(&format!(".{}", domain))
}

/// Extract the video id from a YouTube watch, short or embed link.
pub fn youtube_video_id(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    let host = url.host_str()?;

    let id = if host_matches(host, "youtu.be") {
        url.path_segments()?.next().map(str::to_string)
    } else if host_matches(host, "youtube.com") {
        match url.path() {
            "/watch" => url
                .query_pairs()
                .find(|(k, _)| k == "v")
                .map(|(_, v)| v.into_owned()),
            path => path
                .strip_prefix("/embed/")
                .or_else(|| path.strip_prefix("/shorts/"))
                .map(|s| s.trim_end_matches('/').to_string()),
        }
    } else {
        None
    };

    id.filter(|id| !id.is_empty())
}

/// Whether a player can be expected to play this link directly.
pub fn is_playable(link: &str) -> bool {
    let Ok(url) = Url::parse(link) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }
    let Some(host) = url.host_str() else {
        return false;
    };

    if VIDEO_HOSTS.iter().any(|domain| host_matches(host, domain)) {
        return true;
    }

    let path = url.path().to_ascii_lowercase();
    MEDIA_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}
