use std::sync::Arc;

use super::{config::Config, database::init_mongo, thoughts::Thoughts};

pub struct State {
    pub config: Config,
    pub thoughts: Thoughts,
}

impl State {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();

        let collection = init_mongo(&config.mongo_url).await;
        let thoughts = Thoughts::new(collection);

        Arc::new(Self { config, thoughts })
    }
}
