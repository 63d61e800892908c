//! Wallet and movie catalog

use crate::error::{ShopError, ValidationError};
use crate::models::{FaultCodeSet, Movie};
use crate::notify::Notifier;
use crate::video::VideoResource;

const SEED_CATALOG: &str = include_str!("../assets/catalog.json");

/// Avatar given to uploads that leave the field empty
pub const DEFAULT_AVATAR: &str = "🎥";

/// Avatars are one or two glyphs
pub const MAX_AVATAR_CHARS: usize = 2;

/// Parse a catalog in the `assets/catalog.json` format
pub fn parse_catalog(json: &str) -> Result<Vec<Movie>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Movies every session starts with
pub fn seed_catalog() -> Result<Vec<Movie>, serde_json::Error> {
    parse_catalog(SEED_CATALOG)
}

/// Fields of the upload form
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub title: String,
    pub avatar: String,
    pub price: u32,
    pub video: Option<VideoResource>,
}

pub struct Ledger {
    coins: u32,
    click_count: u32,
    clicks_per_coin: u32,
    movies: Vec<Movie>,
    next_id: u64,
}

impl Ledger {
    pub fn new(starting_coins: u32, clicks_per_coin: u32, movies: Vec<Movie>) -> Self {
        let next_id = movies.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        Self {
            coins: starting_coins,
            click_count: 0,
            clicks_per_coin: clicks_per_coin.max(1),
            movies,
            next_id,
        }
    }

    pub fn with_seed_catalog(starting_coins: u32, clicks_per_coin: u32, notifier: &mut impl Notifier) -> Self {
        Self::from_catalog_json(SEED_CATALOG, starting_coins, clicks_per_coin, notifier)
    }

    /// A catalog that fails to parse leaves the shop empty and raises a warning
    pub fn from_catalog_json(
        json: &str,
        starting_coins: u32,
        clicks_per_coin: u32,
        notifier: &mut impl Notifier,
    ) -> Self {
        let movies = match parse_catalog(json) {
            Ok(movies) => movies,
            Err(e) => {
                notifier.warning("⚠️ Catalog", &format!("Movie catalog could not be read: {}", e));
                Vec::new()
            }
        };
        Self::new(starting_coins, clicks_per_coin, movies)
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn click_count(&self) -> u32 {
        self.click_count
    }

    pub fn clicks_per_coin(&self) -> u32 {
        self.clicks_per_coin
    }

    /// Fraction of the way to the next coin, for the progress bar
    pub fn click_progress(&self) -> f32 {
        self.click_count as f32 / self.clicks_per_coin as f32
    }

    #[cfg(test)]
    pub fn deposit(&mut self, coins: u32) {
        self.coins = self.coins.saturating_add(coins);
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn movie(&self, id: u64) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == id)
    }

    fn movie_mut(&mut self, id: u64) -> Result<&mut Movie, ShopError> {
        self.movies
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(ShopError::UnknownMovie(id))
    }

    /// Movies still for sale
    pub fn shop(&self) -> impl Iterator<Item = &Movie> {
        self.movies.iter().filter(|m| !m.is_purchased)
    }

    /// Movies the user owns
    pub fn library(&self) -> impl Iterator<Item = &Movie> {
        self.movies.iter().filter(|m| m.is_purchased)
    }

    /// Movies the user uploaded, sold or not
    pub fn uploads(&self) -> impl Iterator<Item = &Movie> {
        self.movies.iter().filter(|m| m.is_user_uploaded)
    }

    /// Count one coin click. Returns true when it completed a coin.
    pub fn register_click(&mut self) -> bool {
        self.click_count += 1;
        if self.click_count >= self.clicks_per_coin {
            self.click_count = 0;
            self.coins = self.coins.saturating_add(1);
            true
        } else {
            false
        }
    }

    /// Buy a movie. Nothing changes unless the purchase goes through.
    pub fn purchase(&mut self, id: u64) -> Result<&Movie, ShopError> {
        let coins = self.coins;
        let movie = self.movie_mut(id)?;
        if movie.is_purchased {
            return Err(ShopError::AlreadyPurchased);
        }
        if coins < movie.price {
            return Err(ShopError::InsufficientFunds {
                shortfall: movie.price - coins,
            });
        }

        movie.is_purchased = true;
        let price = movie.price;
        self.coins -= price;
        self.movie(id).ok_or(ShopError::UnknownMovie(id))
    }

    /// Replace a movie's codes wholesale
    pub fn edit_codes(&mut self, id: u64, codes: FaultCodeSet) -> Result<(), ShopError> {
        self.movie_mut(id)?.codes = codes;
        Ok(())
    }

    /// Add a user video to the shop with healthy codes. Returns the new id.
    pub fn upload(&mut self, request: UploadRequest) -> Result<u64, ShopError> {
        let title = request.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        let Some(video) = request.video else {
            return Err(ValidationError::MissingVideo.into());
        };
        if request.price == 0 {
            return Err(ValidationError::InvalidPrice.into());
        }

        let avatar: String = request.avatar.trim().chars().take(MAX_AVATAR_CHARS).collect();
        let id = self.next_id;
        self.next_id += 1;

        self.movies.push(Movie {
            id,
            title: title.to_string(),
            avatar: if avatar.is_empty() { DEFAULT_AVATAR.to_string() } else { avatar },
            price: request.price,
            is_purchased: false,
            is_user_uploaded: true,
            video_path: Some(video.path),
            codes: FaultCodeSet::baseline(),
        });
        Ok(id)
    }

    /// Remove a movie. Unknown ids are ignored.
    pub fn delete(&mut self, id: u64) -> Option<Movie> {
        let idx = self.movies.iter().position(|m| m.id == id)?;
        Some(self.movies.remove(idx))
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
