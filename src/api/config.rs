use dotenvy::dotenv;
use once_cell::sync::Lazy;

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub jwt_expiration_minutes: u64,
    pub bank_name: Option<String>,
    pub bank_account_number: Option<String>,
    pub bank_account_name: Option<String>,
    pub payment_currency: String,
    pub payment_instructions: Option<String>,
    pub payment_deadline_days: i64,
}

impl Config {
    pub fn new() -> Self {
        CONFIG.clone()
    }

    /// Checkout is disabled until every bank-transfer field is present.
    pub fn payment_configured(&self) -> bool {
        self.bank_name.is_some()
            && self.bank_account_number.is_some()
            && self.bank_account_name.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok();

    let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let jwt_expiration_minutes = std::env::var("JWT_EXPIRATION_MINUTES")
        .unwrap_or_else(|_| "60".to_string())
        .parse()
        .expect("JWT_EXPIRATION_MINUTES must be a valid u64");

    let payment_currency =
        std::env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "NGN".to_string());
    let payment_deadline_days = std::env::var("PAYMENT_DEADLINE_DAYS")
        .unwrap_or_else(|_| "7".to_string())
        .parse()
        .expect("PAYMENT_DEADLINE_DAYS must be a valid i64");

    tracing::info!("Config loaded");

    Config {
        jwt_secret,
        jwt_expiration_minutes,
        bank_name: non_empty_var("BANK_NAME"),
        bank_account_number: non_empty_var("BANK_ACCOUNT_NUMBER"),
        bank_account_name: non_empty_var("BANK_ACCOUNT_NAME"),
        payment_currency,
        payment_instructions: non_empty_var("PAYMENT_INSTRUCTIONS"),
        payment_deadline_days,
    }
});

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}
