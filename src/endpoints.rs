//! Typed helpers for the v1 endpoints.
//!
//! Every helper builds a path, then goes through [`ModsClient::get_json`]
//! with no extra headers. Path segments are inserted verbatim.

use std::fmt::Display;

use reqwest::header::HeaderMap;
use serde_json::Value as JsonValue;

use crate::{ModsClient, Query, Result, Transport};

fn game_path(game: &str) -> String {
    format!("/v1/games/{game}.json")
}

fn mods_path(game: &str, tail: impl Display) -> String {
    format!("/v1/games/{game}/mods/{tail}.json")
}

impl<T: Transport> ModsClient<T> {
    async fn fetch(&self, path: String, query: Query) -> Result<JsonValue> {
        self.get_json(&path, query, &HeaderMap::new()).await
    }

    /// Mods updated within a period, e.g. [`crate::UpdatePeriod::Week`].
    pub async fn get_updated_mods<Q: Into<Query>>(
        &self,
        game: &str,
        query: Q,
    ) -> Result<JsonValue> {
        self.fetch(mods_path(game, "updated"), query.into()).await
    }

    pub async fn get_mod_changelogs<Q: Into<Query>>(
        &self,
        game: &str,
        mod_id: impl Display,
        query: Q,
    ) -> Result<JsonValue> {
        let path = mods_path(game, format!("{mod_id}/changelogs"));
        self.fetch(path, query.into()).await
    }

    /// Ten most recently added mods.
    pub async fn get_latest_added(&self, game: &str) -> Result<JsonValue> {
        let path = mods_path(game, "latest_added");
        self.fetch(path, Query::new()).await
    }

    /// Ten most recently updated mods.
    pub async fn get_latest_updated(&self, game: &str) -> Result<JsonValue> {
        let path = mods_path(game, "latest_updated");
        self.fetch(path, Query::new()).await
    }

    /// Ten trending mods.
    pub async fn get_trending(&self, game: &str) -> Result<JsonValue> {
        self.fetch(mods_path(game, "trending"), Query::new()).await
    }

    pub async fn get_mod(&self, game: &str, mod_id: impl Display) -> Result<JsonValue> {
        self.fetch(mods_path(game, mod_id), Query::new()).await
    }

    /// Looks up mods and files by the MD5 of a file's content.
    pub async fn md5_search(&self, game: &str, md5: &str) -> Result<JsonValue> {
        let path = mods_path(game, format!("md5_search/{md5}"));
        self.fetch(path, Query::new()).await
    }

    /// Files of a mod, optionally filtered with a `category` parameter.
    pub async fn list_mod_files<Q: Into<Query>>(
        &self,
        game: &str,
        mod_id: impl Display,
        query: Q,
    ) -> Result<JsonValue> {
        let path = mods_path(game, format!("{mod_id}/files"));
        self.fetch(path, query.into()).await
    }

    pub async fn get_mod_file(
        &self,
        game: &str,
        mod_id: impl Display,
        file_id: impl Display,
    ) -> Result<JsonValue> {
        let path = mods_path(game, format!("{mod_id}/files/{file_id}"));
        self.fetch(path, Query::new()).await
    }

    /// Download mirrors for a file.
    ///
    /// Premium accounts pass `()`. Other accounts must pass the `key` and
    /// `expires` values from the website's nxm link.
    pub async fn get_file_download_link<Q: Into<Query>>(
        &self,
        game: &str,
        mod_id: impl Display,
        file_id: impl Display,
        query: Q,
    ) -> Result<JsonValue> {
        let path = mods_path(game, format!("{mod_id}/files/{file_id}/download_link"));
        self.fetch(path, query.into()).await
    }

    pub async fn get_game(&self, game: &str) -> Result<JsonValue> {
        self.fetch(game_path(game), Query::new()).await
    }
}
