use anyhow::Result;
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, IndexModel};
use std::sync::Arc;

use crate::config::MongoConfig;
use crate::domain::{
    AppUserSpec, CredentialCreationError, IndexCreationError, IndexSpec, Initializer,
    InitializerPtr, TARGET_DATABASE,
};

/// Builds the MongoDB-backed initializer from connection configuration.
///
/// The client is constructed eagerly but connects lazily; the first issued
/// request surfaces connectivity failures, bounded by the configured driver
/// timeouts.
///
/// # Errors
/// Returns an error if the connection string cannot be parsed.
pub async fn create_mongo_initializer(config: &MongoConfig) -> Result<InitializerPtr> {
    // ---
    let mut options = ClientOptions::parse(config.uri.as_str()).await?;
    options.app_name = Some(config.app_name.clone());
    options.server_selection_timeout = Some(config.server_selection_timeout);
    options.connect_timeout = Some(config.connect_timeout);

    let client = Client::with_options(options)?;
    Ok(Arc::new(MongoInitializer::new(client)))
}

/// Issues the provisioning requests through one administrative client,
/// held for the duration of the run and dropped with it.
pub struct MongoInitializer {
    // ---
    client: Client,
}

impl MongoInitializer {
    // ---
    pub fn new(client: Client) -> Self {
        // ---
        Self { client }
    }
}

#[async_trait::async_trait]
impl Initializer for MongoInitializer {
    // ---
    #[tracing::instrument(skip(self, spec), fields(user = spec.username))]
    async fn create_application_user(
        &self,
        spec: &AppUserSpec,
    ) -> Result<(), CredentialCreationError> {
        // ---
        let roles: Vec<Document> = spec
            .grants
            .iter()
            .map(|g| doc! { "role": g.role, "db": g.db })
            .collect();

        // createUser runs against the database the principal is scoped to.
        self.client
            .database(TARGET_DATABASE)
            .run_command(doc! {
                "createUser": spec.username,
                "pwd": spec.password,
                "roles": roles,
            })
            .await
            .map_err(|e| CredentialCreationError {
                username: spec.username.to_string(),
                source: e.into(),
            })?;

        Ok(())
    }

    #[tracing::instrument(skip(self, spec), fields(index = %spec.describe()))]
    async fn create_index(&self, spec: &IndexSpec) -> Result<String, IndexCreationError> {
        // ---
        // Key order in the document is the index field order.
        let mut keys = Document::new();
        for (field, order) in spec.keys {
            keys.insert(*field, order.as_i32());
        }

        let model = IndexModel::builder()
            .keys(keys)
            .options(IndexOptions::builder().unique(spec.unique).build())
            .build();

        let result = self
            .client
            .database(TARGET_DATABASE)
            .collection::<Document>(spec.collection)
            .create_index(model)
            .await
            .map_err(|e| IndexCreationError {
                index: spec.describe(),
                source: e.into(),
            })?;

        Ok(result.index_name)
    }
}
