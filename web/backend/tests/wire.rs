use lyricbridge_core::FetchError;
use lyricbridge_web::genius::{parse_search, parse_song_page};
use lyricbridge_web::spotify::{parse_artist_search, parse_token, parse_top_tracks};

#[test]
fn genius_search_keeps_hits_with_artist_ids() {
    let body = r#"{
        "meta": {"status": 200},
        "response": {"hits": [
            {"type": "song", "result": {
                "full_title": "Envolver by Anitta",
                "primary_artist": {"id": 6546, "name": "Anitta"}
            }},
            {"type": "song", "result": {"full_title": "Orphan", "primary_artist": {"name": "Unknown"}}},
            {"type": "song", "result": null}
        ]}
    }"#;

    let hits = parse_search(body).unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].artist_id, 6546);
    assert_eq!(hits[0].artist_name.as_deref(), Some("Anitta"));
    assert_eq!(hits[0].full_title.as_deref(), Some("Envolver by Anitta"));
}

#[test]
fn genius_song_page_carries_next_page() {
    let body = r#"{"response": {
        "songs": [{
            "title": "Envolver",
            "url": "https://genius.com/Anitta-envolver-lyrics",
            "song_art_image_url": "https://images.genius.com/art.jpg",
            "header_image_url": "https://images.genius.com/header.jpg",
            "primary_artist": {"id": 6546, "name": "Anitta"}
        }],
        "next_page": 2
    }}"#;

    let page = parse_song_page(body).unwrap();

    assert_eq!(page.next_page, Some(2));
    assert_eq!(page.items[0].primary_artist_id, Some(6546));
    assert_eq!(page.items[0].title.as_deref(), Some("Envolver"));
}

#[test]
fn genius_last_page_has_no_next_page() {
    let page = parse_song_page(r#"{"response": {"songs": [], "next_page": null}}"#).unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.next_page, None);
}

#[test]
fn malformed_body_is_a_decode_error() {
    assert!(matches!(parse_search("<html>"), Err(FetchError::Decode(_))));
    assert!(matches!(parse_top_tracks("{}"), Ok(tracks) if tracks.is_empty()));
}

#[test]
fn spotify_artist_search_takes_first_item() {
    let body = r#"{"artists": {"items": [{
        "id": "7FNnA9vBm6EKceENgCGRMb",
        "name": "Anitta",
        "popularity": 84,
        "genres": ["funk carioca", "pop"],
        "followers": {"href": null, "total": 17000000},
        "images": [{"url": "https://i.scdn.co/image/large", "height": 640, "width": 640},
                   {"url": "https://i.scdn.co/image/small", "height": 160, "width": 160}]
    }]}}"#;

    let info = parse_artist_search(body).unwrap().unwrap();

    assert_eq!(info.id, "7FNnA9vBm6EKceENgCGRMb");
    assert_eq!(info.followers, Some(17_000_000));
    assert_eq!(info.genres, vec!["funk carioca", "pop"]);
    assert_eq!(info.image_url.as_deref(), Some("https://i.scdn.co/image/large"));
}

#[test]
fn spotify_empty_search_is_none() {
    assert_eq!(parse_artist_search(r#"{"artists": {"items": []}}"#).unwrap(), None);
}

#[test]
fn spotify_top_tracks_flatten_album_fields() {
    let body = r#"{"tracks": [
        {
            "id": "t1", "name": "Envolver", "popularity": 80, "preview_url": null,
            "album": {"name": "Versions of Me", "release_date": "2022-04-12",
                      "images": [{"url": "https://i.scdn.co/image/album"}]},
            "external_urls": {"spotify": "https://open.spotify.com/track/t1"}
        },
        {"id": "t2", "name": "Single", "album": {"images": []}}
    ]}"#;

    let tracks = parse_top_tracks(body).unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].album_name.as_deref(), Some("Versions of Me"));
    assert_eq!(tracks[0].album_image.as_deref(), Some("https://i.scdn.co/image/album"));
    assert_eq!(
        tracks[0].external_url.as_deref(),
        Some("https://open.spotify.com/track/t1")
    );
    assert_eq!(tracks[1].album_image, None);
    assert_eq!(tracks[1].popularity, None);
}

#[test]
fn spotify_token_without_fields_is_blank() {
    let grant = parse_token(r#"{"access_token": "abc", "token_type": "Bearer", "expires_in": 3600}"#)
        .unwrap();
    assert_eq!(grant.access_token, "abc");
    assert_eq!(grant.expires_in, 3600);

    let blank = parse_token(r#"{"error": "invalid_client"}"#).unwrap();
    assert!(blank.access_token.is_empty());
    assert_eq!(blank.expires_in, 0);
}
