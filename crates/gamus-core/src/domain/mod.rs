pub mod artist;
pub mod collection;
pub mod favorite;
pub mod ids;
pub mod song;
pub mod views;

pub use artist::Artist;
pub use collection::Collection;
pub use favorite::Favorite;
pub use ids::{ArtistId, CollectionId, FavoriteId, SongId, UserId};
pub use song::Song;
pub use views::{ArtistDetail, CollectionSongs, SearchResults};
