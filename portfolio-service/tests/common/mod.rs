#![allow(dead_code)]

use portfolio_service::config::{
    CorsConfig, OpenAiConfig, PortfolioConfig, ProfileConfig, StorageConfig, TestimonialConfig,
};
use portfolio_service::services::{CompletionProvider, JsonStore, LocalJsonStore, ScriptedProvider};
use portfolio_service::startup::Application;
use service_core::config::Config as CoreConfig;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub storage_path: PathBuf,
    pub client: reqwest::Client,
}

pub fn test_config(storage_path: &str) -> PortfolioConfig {
    PortfolioConfig {
        common: CoreConfig { port: 0 },
        openai: OpenAiConfig {
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            base_url: "http://127.0.0.1:9/v1".to_string(),
        },
        storage: StorageConfig {
            local_path: storage_path.to_string(),
        },
        profile: ProfileConfig {
            developer_name: "Mwenda_Dipark".to_string(),
            developer_role: "Full-Stack Developer".to_string(),
        },
        testimonials: TestimonialConfig { count: 5 },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
        },
    }
}

impl TestApp {
    /// App with no completion client, as when OPENAI_API_KEY is missing.
    pub async fn spawn_unconfigured() -> Self {
        Self::spawn_inner(None).await
    }

    pub async fn spawn_with(provider: Arc<ScriptedProvider>) -> Self {
        let provider: Arc<dyn CompletionProvider> = provider;
        Self::spawn_inner(Some(provider)).await
    }

    async fn spawn_inner(provider: Option<Arc<dyn CompletionProvider>>) -> Self {
        let storage_path = format!("target/test-storage-{}", Uuid::new_v4());
        let config = test_config(&storage_path);

        let store: Arc<dyn JsonStore> = Arc::new(
            LocalJsonStore::new(&storage_path)
                .await
                .expect("Failed to create test store"),
        );

        let app = Application::build_with(config, provider, store)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            storage_path: PathBuf::from(storage_path),
            client,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn post_chat(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url("/chatbot/chat"))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn generate_testimonials(&self) -> reqwest::Response {
        self.client
            .post(self.url("/testimonials/generate-testimonials"))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn view_testimonials(&self) -> reqwest::Response {
        self.client
            .get(self.url("/testimonials/view-testimonials"))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Raw document as written to the store.
    pub async fn stored_document(&self) -> Option<serde_json::Value> {
        let path = self.storage_path.join("testimonials.json");
        match tokio::fs::read(&path).await {
            Ok(data) => Some(serde_json::from_slice(&data).expect("Stored document is not JSON")),
            Err(_) => None,
        }
    }

    pub async fn cleanup(&self) {
        let _ = tokio::fs::remove_dir_all(&self.storage_path).await;
    }
}
