use std::env;
use std::fs;
use std::path::Path;

// Claves que AppConfig lee con option_env!
const FORWARDED_KEYS: &[&str] = &["API_URL_LOCAL", "API_URL_REMOTE", "ENVIRONMENT", "ENABLE_LOGGING"];

fn main() {
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                let Some((key, value)) = line.split_once('=') else {
                    continue;
                };
                let key = key.trim();
                let value = value.trim().trim_matches('"');

                if !FORWARDED_KEYS.contains(&key) {
                    println!("cargo:warning=.env: clave desconocida ignorada: {}", key);
                    continue;
                }

                // El entorno real tiene prioridad sobre .env
                if env::var(key).is_err() {
                    println!("cargo:rustc-env={}={}", key, value);
                }
            }
        }
    } else {
        println!("cargo:warning=No .env file found. Using http://localhost:10000 as API base URL.");
    }

    for key in FORWARDED_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }
    println!("cargo:rerun-if-changed=build.rs");
}
