use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use gamus_core::Document;
use gamus_core::document::collections;
use gamus_server::{AppState, router};
use gamus_storage::SqliteDocumentStore;
use serde_json::{Value, json};
use tower::ServiceExt;

fn doc(id: &str, value: Value) -> Document {
  let Value::Object(fields) = value else { panic!("fields must be an object") };
  Document::new(id, fields)
}

async fn seeded_store() -> SqliteDocumentStore {
  let store = SqliteDocumentStore::in_memory().unwrap();

  let seed = [
    (collections::ARTISTS, doc("a1", json!({ "Name": "The Sundays", "Description": "Indie", "ImagePath": "a1.png" }))),
    (collections::ARTISTS, doc("a2", json!({ "Name": "Quiet One" }))),
    (
      collections::COLLECTIONS,
      doc("c1", json!({ "Name": "Reading", "Artist": { "path": "Artists/a1" }, "ArtistId": "a1", "Type": "Album" })),
    ),
    (
      collections::SONGS,
      doc(
        "s1",
        json!({ "Name": "Sunday Morning", "CollectionId": "c1", "ArtistId": "a1", "ArtistName": "The Sundays", "Length": 215 }),
      ),
    ),
    (collections::SONGS, doc("s2", json!({ "Name": "SUNSET", "CollectionId": "c1", "ArtistId": "a1" }))),
    (collections::SONGS, doc("s3", json!({ "Name": "Moonlight", "CollectionId": "c2", "ArtistId": "a3" }))),
  ];
  for (collection, d) in seed {
    store.upsert(collection, d).await.unwrap();
  }

  store
}

async fn app() -> (Router, AppState) {
  let state = AppState::new(seeded_store().await);
  (router(state.clone()), state)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
  let response = app.clone().oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap()).await.unwrap();
  let status = response.status();
  let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
  (status, body.to_vec())
}

async fn get_text(app: &Router, uri: &str) -> (StatusCode, String) {
  let (status, body) = get(app, uri).await;
  (status, String::from_utf8(body).unwrap())
}

async fn get_data(app: &Router, uri: &str) -> Value {
  let (status, body) = get(app, uri).await;
  assert_eq!(status, StatusCode::OK, "{uri}: {}", String::from_utf8_lossy(&body));

  let json: Value = serde_json::from_slice(&body).unwrap();
  assert_eq!(json["status"], 200);
  json["data"].clone()
}

fn ids(songs: &Value) -> Vec<&str> {
  songs.as_array().unwrap().iter().map(|s| s["id"].as_str().unwrap()).collect()
}

#[tokio::test]
async fn missing_user_id_is_rejected_on_every_endpoint() {
  let (app, _) = app().await;

  for uri in [
    "/getAllSongs",
    "/search?subject=sun",
    "/getSongsByCollectionId?collection=c1",
    "/getArtistById?id=a1",
    "/heartSong?songId=s1",
    "/getSongsByArtist?id=a1",
    "/getHeartedSongs",
  ] {
    let (status, body) = get_text(&app, uri).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
    assert_eq!(body, "userId undefined", "{uri}");
  }
}

#[tokio::test]
async fn first_missing_parameter_wins() {
  let (app, state) = app().await;

  assert_eq!(get_text(&app, "/heartSong").await.1, "userId undefined");
  assert_eq!(get_text(&app, "/heartSong?userId=u1").await.1, "songId undefined");
  assert_eq!(get_text(&app, "/search?userId=u1").await.1, "subject undefined");
  assert_eq!(get_text(&app, "/getSongsByCollectionId?userId=u1").await.1, "collection undefined");
  assert_eq!(get_text(&app, "/getArtistById?userId=u1").await.1, "artist id undefined");
  assert_eq!(get_text(&app, "/getSongsByArtist?userId=u1").await.1, "artist id undefined");
  assert_eq!(get_text(&app, "/unheartSong").await.1, "id undefined");

  assert_eq!(state.catalog.store().count(collections::FAVORITES).await.unwrap(), 0);
}

#[tokio::test]
async fn empty_parameter_counts_as_missing() {
  let (app, _) = app().await;

  let (status, body) = get_text(&app, "/getAllSongs?userId=").await;

  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(body, "userId undefined");
}

#[tokio::test]
async fn all_songs_are_wrapped_in_the_envelope() {
  let (app, _) = app().await;

  let songs = get_data(&app, "/getAllSongs?userId=u1").await;

  assert_eq!(ids(&songs), ["s1", "s2", "s3"]);
  assert_eq!(
    songs[0],
    json!({
      "id": "s1",
      "collection": "c1",
      "artist": "a1",
      "artistName": "The Sundays",
      "name": "Sunday Morning",
      "length": 215,
      "fav": ""
    })
  );
  assert_eq!(songs[1]["artistName"], "undefined");
  assert!(songs[1].get("length").is_none());
}

#[tokio::test]
async fn songs_by_collection_only_returns_that_collection() {
  let (app, _) = app().await;

  let songs = get_data(&app, "/getSongsByCollectionId?userId=u1&collection=c1").await;
  assert_eq!(ids(&songs), ["s1", "s2"]);

  let none = get_data(&app, "/getSongsByCollectionId?userId=u1&collection=nope").await;
  assert_eq!(none, json!([]));
}

#[tokio::test]
async fn songs_by_artist_filters_on_artist_id() {
  let (app, _) = app().await;

  let songs = get_data(&app, "/getSongsByArtist?userId=u1&id=a3").await;

  assert_eq!(ids(&songs), ["s3"]);
}

#[tokio::test]
async fn heart_twice_then_unheart_one() {
  let (app, state) = app().await;

  assert_eq!(get_data(&app, "/heartSong?userId=u1&songId=s1").await, json!(true));
  assert_eq!(get_data(&app, "/heartSong?userId=u1&songId=s1").await, json!(true));
  assert_eq!(state.catalog.store().count(collections::FAVORITES).await.unwrap(), 2);

  let songs = get_data(&app, "/getAllSongs?userId=u1").await;
  let fav = songs[0]["fav"].as_str().unwrap().to_owned();
  assert!(!fav.is_empty());
  assert_eq!(songs[1]["fav"], "");

  // Otro usuario no ve los favoritos de u1.
  let other = get_data(&app, "/getAllSongs?userId=u2").await;
  assert_eq!(other[0]["fav"], "");

  assert_eq!(get_data(&app, &format!("/unheartSong?id={fav}")).await, json!(true));
  assert_eq!(state.catalog.store().count(collections::FAVORITES).await.unwrap(), 1);

  let songs = get_data(&app, "/getAllSongs?userId=u1").await;
  let remaining = songs[0]["fav"].as_str().unwrap();
  assert!(!remaining.is_empty());
  assert_ne!(remaining, fav);
}

#[tokio::test]
async fn hearted_songs_follow_the_favorite_records() {
  let (app, _) = app().await;

  get_data(&app, "/heartSong?userId=u1&songId=s2").await;
  get_data(&app, "/heartSong?userId=u1&songId=gone").await;
  get_data(&app, "/heartSong?userId=u2&songId=s1").await;

  let songs = get_data(&app, "/getHeartedSongs?userId=u1").await;

  assert_eq!(ids(&songs), ["s2", "gone"]);
  assert_ne!(songs[0]["fav"], "");
  assert_eq!(songs[1]["artistName"], "undefined");
  assert!(songs[1].get("name").is_none());
}

#[tokio::test]
async fn artist_detail_nests_collections_and_songs() {
  let (app, _) = app().await;

  let detail = get_data(&app, "/getArtistById?userId=u1&id=a1").await;

  assert_eq!(detail["artist"], json!({ "id": "a1", "name": "The Sundays", "description": "Indie", "imagePath": "a1.png" }));
  let collections = detail["collections"].as_array().unwrap();
  assert_eq!(collections.len(), 1);
  assert_eq!(collections[0]["collection"]["id"], "c1");
  assert_eq!(collections[0]["collection"]["artist"], "a1");
  assert_eq!(collections[0]["collection"]["type"], "Album");
  assert_eq!(ids(&collections[0]["songs"]), ["s1", "s2"]);
}

#[tokio::test]
async fn artist_without_collections_has_empty_list() {
  let (app, _) = app().await;

  let detail = get_data(&app, "/getArtistById?userId=u1&id=a2").await;

  assert_eq!(detail, json!({ "artist": { "id": "a2", "name": "Quiet One" }, "collections": [] }));
}

#[tokio::test]
async fn search_matches_names_case_insensitively() {
  let (app, _) = app().await;

  let results = get_data(&app, "/search?userId=u1&subject=Sun").await;

  assert_eq!(ids(&results["songs"]), ["s1", "s2"]);
  assert_eq!(results["artists"].as_array().unwrap().len(), 1);
  assert_eq!(results["artists"][0]["id"], "a1");
  assert_eq!(results["collections"], json!([]));
}

#[tokio::test]
async fn invalid_favorite_record_fails_with_plain_text() {
  let (app, state) = app().await;
  state.catalog.store().upsert(collections::FAVORITES, doc("f-bad", json!({ "UserId": "u1" }))).await.unwrap();

  let (status, body) = get_text(&app, "/getHeartedSongs?userId=u1").await;

  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert!(body.starts_with("invalid document FavSongs/f-bad"), "{body}");
}

#[tokio::test]
async fn catalog_routes_accept_any_method() {
  let (app, state) = app().await;

  let request = Request::builder().method("POST").uri("/heartSong?userId=u1&songId=s2").body(Body::empty()).unwrap();
  let response = app.clone().oneshot(request).await.unwrap();
  assert_eq!(response.status(), StatusCode::OK);
  assert_eq!(state.catalog.store().count(collections::FAVORITES).await.unwrap(), 1);

  let request = Request::builder().method("DELETE").uri("/getAllSongs").body(Body::empty()).unwrap();
  let response = app.oneshot(request).await.unwrap();
  assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
  let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
  assert_eq!(&body[..], b"userId undefined");
}

#[tokio::test]
async fn fan_out_matches_the_store_pool() {
  let (_, state) = app().await;

  assert_eq!(state.catalog.fan_out(), state.catalog.store().max_connections() as usize);
}

#[tokio::test]
async fn health_does_not_need_parameters() {
  let (app, _) = app().await;

  let (status, body) = get(&app, "/health").await;

  assert_eq!(status, StatusCode::OK);
  let json: Value = serde_json::from_slice(&body).unwrap();
  assert_eq!(json["status"], "ok");
}
