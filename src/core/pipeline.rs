use crate::adapters::steam::SteamClient;
use crate::core::{ConfigProvider, Library, LoadOutcome, Pipeline, Storage, Table, TransformResult};
use crate::utils::error::Result;
use crate::utils::filename::library_file_name;

/// Resolve the persona name, fetch the library, and write it as CSV.
pub struct LibraryPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: SteamClient,
}

impl<S: Storage, C: ConfigProvider> LibraryPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let client = SteamClient::new(config.api_base());
        Self::with_client(storage, config, client)
    }

    pub fn with_client(storage: S, config: C, client: SteamClient) -> Self {
        Self {
            storage,
            config,
            client,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for LibraryPipeline<S, C> {
    async fn extract(&self) -> Result<Library> {
        let credentials = self.config.credentials();

        // The library lookup only runs once the account is known to exist.
        let persona_name = self.client.resolve_persona_name(credentials).await?;
        tracing::info!("👤 Resolved persona name: {}", persona_name);

        let games = self.client.fetch_owned_games(credentials).await?;
        tracing::info!("🎮 Fetched {} owned games", games.len());

        Ok(Library {
            persona_name,
            games,
        })
    }

    async fn transform(&self, library: Library) -> Result<TransformResult> {
        let order = self.config.header_order();
        let table = Table::from_records(&library.games, order)?;
        tracing::debug!(
            columns = table.headers().len(),
            rows = table.rows().len(),
            ?order,
            "built table"
        );

        let csv_output = table.to_csv()?;
        Ok(TransformResult {
            file_name: library_file_name(&library.persona_name),
            persona_name: library.persona_name,
            table,
            csv_output,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<LoadOutcome> {
        tracing::debug!(
            "Writing {} ({} bytes)",
            result.file_name,
            result.csv_output.len()
        );
        let output_path = self
            .storage
            .write_file(&result.file_name, &result.csv_output)
            .await?;

        Ok(LoadOutcome {
            persona_name: result.persona_name,
            output_path,
            rows_written: result.table.rows().len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::domain::model::{Credentials, HeaderOrder};
    use crate::utils::error::SteamEtlError;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }

        async fn file_count(&self) -> usize {
            self.files.lock().await.len()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(path.to_string())
        }
    }

    fn config_for(server: &MockServer, order: HeaderOrder) -> AppConfig {
        AppConfig {
            credentials: Credentials::new("key", "76561197960287930"),
            api_base: server.base_url(),
            output_path: "test_output".to_string(),
            header_order: order,
        }
    }

    fn mock_player(server: &MockServer, players: serde_json::Value) -> httpmock::Mock<'_> {
        server.mock(|when, then| {
            when.method(GET).path("/ISteamUser/GetPlayerSummaries/v0002/");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({"response": {"players": players}}));
        })
    }

    fn mock_games(server: &MockServer, games: serde_json::Value) -> httpmock::Mock<'_> {
        server.mock(|when, then| {
            when.method(GET).path("/IPlayerService/GetOwnedGames/v0001/");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({"response": {"game_count": 2, "games": games}}));
        })
    }

    #[tokio::test]
    async fn test_extract_resolves_name_then_library() {
        let server = MockServer::start();
        let player_mock = mock_player(&server, json!([{"personaname": "Alice"}]));
        let games_mock = mock_games(
            &server,
            json!([{"appid": 10, "name": "Game A"}, {"appid": 20, "playtime_forever": 5}]),
        );

        let pipeline =
            LibraryPipeline::new(MockStorage::default(), config_for(&server, HeaderOrder::Sorted));
        let library = pipeline.extract().await.unwrap();

        player_mock.assert();
        games_mock.assert();
        assert_eq!(library.persona_name, "Alice");
        assert_eq!(library.games.len(), 2);
    }

    #[tokio::test]
    async fn test_extract_stops_when_player_is_missing() {
        let server = MockServer::start();
        let player_mock = mock_player(&server, json!([]));
        let games_mock = mock_games(&server, json!([{"appid": 10}]));

        let pipeline =
            LibraryPipeline::new(MockStorage::default(), config_for(&server, HeaderOrder::Sorted));
        let err = pipeline.extract().await.unwrap_err();

        player_mock.assert();
        games_mock.assert_hits(0);
        assert!(matches!(err, SteamEtlError::NotFoundError { .. }));
    }

    #[tokio::test]
    async fn test_transform_builds_table_and_file_name() {
        let server = MockServer::start();
        let pipeline =
            LibraryPipeline::new(MockStorage::default(), config_for(&server, HeaderOrder::Sorted));

        let library = Library {
            persona_name: "Alice/Bob".to_string(),
            games: vec![
                serde_json::from_value(json!({"appid": 10, "name": "Game A"})).unwrap(),
                serde_json::from_value(json!({"appid": 20, "playtime_forever": 5})).unwrap(),
            ],
        };
        let result = pipeline.transform(library).await.unwrap();

        assert_eq!(result.file_name, "steam_library_Alice_Bob.csv");
        assert_eq!(result.persona_name, "Alice/Bob");
        assert_eq!(result.table.headers(), ["appid", "name", "playtime_forever"]);
        assert_eq!(
            String::from_utf8(result.csv_output).unwrap(),
            "appid,name,playtime_forever\n10,Game A,\n20,,5\n"
        );
    }

    #[tokio::test]
    async fn test_transform_rejects_empty_library() {
        let server = MockServer::start();
        let pipeline =
            LibraryPipeline::new(MockStorage::default(), config_for(&server, HeaderOrder::Sorted));

        let err = pipeline
            .transform(Library {
                persona_name: "Alice".to_string(),
                games: vec![],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SteamEtlError::EmptyInputError));
    }

    #[tokio::test]
    async fn test_load_writes_csv_through_storage() {
        let server = MockServer::start();
        let storage = MockStorage::default();
        let pipeline =
            LibraryPipeline::new(storage.clone(), config_for(&server, HeaderOrder::FirstSeen));

        let library = Library {
            persona_name: "Alice".to_string(),
            games: vec![serde_json::from_value(json!({"name": "Game A", "appid": 10})).unwrap()],
        };
        let result = pipeline.transform(library).await.unwrap();
        let outcome = pipeline.load(result).await.unwrap();

        assert_eq!(outcome.output_path, "steam_library_Alice.csv");
        assert_eq!(outcome.rows_written, 1);
        assert_eq!(storage.file_count().await, 1);
        assert_eq!(
            storage.get_file("steam_library_Alice.csv").await.unwrap(),
            b"name,appid\nGame A,10\n"
        );
    }
}
