pub mod identity {
    pub mod error;
    pub mod firebase;
    pub mod model;
    pub mod provider;
}

pub mod session {
    pub mod schema;
    pub mod repository;
    pub mod repository_pg;
}

pub mod user {
    pub mod schema;
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod saga;
    pub mod handle;
    pub mod service;
    pub mod route;
}

pub mod friend {
    pub mod schema;
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod handle;
    pub mod service;
    pub mod route;
}
