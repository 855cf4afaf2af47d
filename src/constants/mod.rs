pub const DEFAULT_PAGE_LIMIT: i64 = 10;

pub const SESSION_EXPIRED: &str = "Session expired";

pub struct Env {
    pub database_url: String,
    pub database_max_connections: u32,
    pub firebase_key: String,
    pub frontend_url: String,
    pub ip: String,
    pub port: u16,
}

impl Env {
    fn new() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set in .env file or environment variable");
        let database_max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .expect("DATABASE_MAX_CONNECTIONS must be a valid u32 integer");

        // Service-account JSON blob; the lower-case name is what older deployments set.
        let firebase_key = std::env::var("FIREBASE_KEY")
            .or_else(|_| std::env::var("firebase_key"))
            .expect("FIREBASE_KEY must be set in .env file or environment variable");

        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());
        let ip = std::env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid u16 integer");
        Env { database_url, database_max_connections, firebase_key, frontend_url, ip, port }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
