pub mod cache {

    pub const SEARCH_TTL_SECONDS: u64 = 60 * 60;

    pub const SAVED_TTL_SECONDS: u64 = 5 * 60;

    pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
}

pub mod retry {

    pub const MAX_ATTEMPTS: u32 = 3;

    pub const BASE_DELAY_MS: u64 = 500;
}

pub mod provider {

    pub const DEFAULT_BASE_URL: &str = "https://trips.example.com/v1/trips";

    pub const REQUEST_TIMEOUT_SECONDS: u64 = 10;
}

pub mod env {

    pub const API_KEY: &str = "TRIPFINDER_API_KEY";

    pub const REDIS_URL: &str = "TRIPFINDER_REDIS_URL";

    pub const DATABASE_URL: &str = "TRIPFINDER_DATABASE_URL";
}
