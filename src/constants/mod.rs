pub struct Env {
    pub frontend_url: String,
    pub ip: String,
    pub port: u16,
}

impl Env {
    fn new() -> Self {
        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());
        let ip = std::env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid u16 integer");
        Env { frontend_url, ip, port }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
