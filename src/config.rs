use clap::Parser;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/predict";

#[derive(Debug, Clone, Parser)]
#[command(name = "emotion_uploader")]
#[command(about = "Upload an audio or video clip and see which emotion it carries", long_about = None)]
pub struct Config {
    /// Prediction endpoint of the inference service
    #[arg(long, default_value = DEFAULT_ENDPOINT, value_parser = parse_endpoint)]
    pub endpoint: String,

    /// Log filter, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

fn parse_endpoint(raw: &str) -> Result<String, String> {
    let url = reqwest::Url::parse(raw).map_err(|e| format!("invalid endpoint URL: {}", e))?;
    match url.scheme() {
        "http" | "https" => Ok(url.to_string()),
        other => Err(format!("unsupported endpoint scheme: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_service() {
        let config = Config::try_parse_from(["emotion_uploader"]).expect("parse");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn accepts_custom_endpoint() {
        let config = Config::try_parse_from([
            "emotion_uploader",
            "--endpoint",
            "https://emotions.example.com/predict",
        ])
        .expect("parse");
        assert_eq!(config.endpoint, "https://emotions.example.com/predict");
    }

    #[test]
    fn rejects_invalid_endpoint() {
        assert!(Config::try_parse_from(["emotion_uploader", "--endpoint", "not a url"]).is_err());
        assert!(
            Config::try_parse_from(["emotion_uploader", "--endpoint", "ftp://host/predict"])
                .is_err()
        );
    }
}
