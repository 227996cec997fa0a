use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};

use crate::{config::Config, errors::AppResult, models::domain::WikiQuiz};

/// Handle to the quiz database plus the collection names taken from `Config`.
#[derive(Clone)]
pub struct Database {
    database: mongodb::Database,
    quizzes_collection: String,
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let client = Client::with_options(client_options(config).await?)?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;

        log::info!(
            "Connected to MongoDB database {} (pool {}..{})",
            config.mongo_db_name,
            config.mongo_min_pool_size,
            config.mongo_max_pool_size
        );

        Ok(Self {
            database: client.database(&config.mongo_db_name),
            quizzes_collection: config.quizzes_collection.clone(),
        })
    }

    pub fn wiki_quizzes(&self) -> Collection<WikiQuiz> {
        self.database.collection(&self.quizzes_collection)
    }
}

async fn client_options(config: &Config) -> AppResult<ClientOptions> {
    let mut options = ClientOptions::parse(&config.mongo_conn_string).await?;

    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
    options.max_pool_size = Some(config.mongo_max_pool_size);
    options.min_pool_size = Some(config.mongo_min_pool_size.min(config.mongo_max_pool_size));
    options.connect_timeout = Some(config.mongo_timeout());
    options.server_selection_timeout = Some(config.mongo_timeout());

    Ok(options)
}
