use std::env;
use std::path::PathBuf;

#[derive(Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub base_dir: PathBuf,
    pub document_db: PathBuf,
    pub users_db: PathBuf,
    pub static_dir: PathBuf,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        // PythonAnywhere deployments resolve everything to absolute paths,
        // everything else stays relative to the working directory.
        let on_pythonanywhere = env::var("PYTHONANYWHERE_DOMAIN").is_ok();

        let mut base_dir = env::var("BASE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));
        if on_pythonanywhere {
            base_dir = base_dir.canonicalize().unwrap_or(base_dir);
        }

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),
            document_db: env::var("DOCUMENT_DB")
                .map(PathBuf::from)
                .unwrap_or_else(|_| base_dir.join("ocr_database.json")),
            users_db: env::var("USERS_DB")
                .map(PathBuf::from)
                .unwrap_or_else(|_| base_dir.join("users_database.json")),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| base_dir.join("static")),
            environment: if on_pythonanywhere {
                "pythonanywhere".to_string()
            } else {
                "local".to_string()
            },
            base_dir,
        })
    }
}
