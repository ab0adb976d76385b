/// Runtime environment, selected by `APP_ENV` or the `--env` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Reads the environment from `APP_ENV`, defaulting to development.
    pub fn from_env() -> Self {
        std::env::var("APP_ENV")
            .map(|value| Self::from_name(&value))
            .unwrap_or_default()
    }

    /// Parses an environment name; anything unrecognized is development.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Environment::from_name("production"), Environment::Production);
        assert_eq!(Environment::from_name("PROD"), Environment::Production);
        assert_eq!(Environment::from_name("development"), Environment::Development);
        assert_eq!(Environment::from_name("anything"), Environment::Development);
    }

    #[test]
    fn test_as_str_round_trip() {
        for env in [Environment::Development, Environment::Production] {
            assert_eq!(Environment::from_name(env.as_str()), env);
        }
    }
}
