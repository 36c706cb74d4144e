//! Env-definition file parsing and the safe projection served to the browser.
//!
//! The `.env` file is re-read from disk on every `/env.json` request, so edits
//! made by the setup tooling take effect without a server restart. Parsing is
//! deliberately permissive: malformed lines are skipped, never fatal.

use serde::Serialize;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;

/// Parse `KEY=VALUE` lines into an environment record.
///
/// Blank lines, `#` comments, and lines without `=` are skipped. Only the
/// first `=` splits key from value; both sides are trimmed.
pub fn parse_env_file(contents: &str) -> HashMap<String, String> {
    let mut record = HashMap::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        record.insert(key.trim().to_string(), value.trim().to_string());
    }
    record
}

/// Read and parse the env-definition file.
///
/// A missing file is not an error: the record is simply empty and every
/// projected value falls back to its default.
pub async fn load(path: &Path) -> HashMap<String, String> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => parse_env_file(&contents),
        Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read env file");
            HashMap::new()
        }
    }
}

/// The fixed set of environment variables exposed to the frontend.
///
/// This is an explicit projection: keys outside this struct never leak into
/// the response, no matter what the `.env` file contains. Flags are `true`
/// only for the literal value `"true"`; absent keys take the declared default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct SafeEnv {
    pub gemini_api_key: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub node_env: String,
    pub enable_chat: bool,
    pub enable_blog: bool,
    pub enable_resources: bool,
    pub enable_analytics: bool,
}

impl SafeEnv {
    /// Project an environment record onto the whitelisted view.
    pub fn project(record: &HashMap<String, String>) -> Self {
        let text = |key: &str| record.get(key).cloned().unwrap_or_default();
        let flag = |key: &str, default: bool| match record.get(key) {
            Some(value) => value == "true",
            None => default,
        };

        Self {
            gemini_api_key: text("GEMINI_API_KEY"),
            supabase_url: text("SUPABASE_URL"),
            supabase_anon_key: text("SUPABASE_ANON_KEY"),
            node_env: record
                .get("NODE_ENV")
                .cloned()
                .unwrap_or_else(|| "development".to_string()),
            enable_chat: flag("ENABLE_CHAT", true),
            enable_blog: flag("ENABLE_BLOG", true),
            enable_resources: flag("ENABLE_RESOURCES", true),
            enable_analytics: flag("ENABLE_ANALYTICS", false),
        }
    }
}

impl Default for SafeEnv {
    fn default() -> Self {
        Self::project(&HashMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_lines() {
        let record = parse_env_file("GEMINI_API_KEY=abc123\nSUPABASE_URL=https://x.example\n");
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("GEMINI_API_KEY").unwrap(), "abc123");
        assert_eq!(record.get("SUPABASE_URL").unwrap(), "https://x.example");
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let contents = "\n\
            # a comment\n\
            GOOD=1\n\
            no_separator_here\n\
            \t\n\
            ALSO_GOOD=2\n\
            # KEY=commented out\n";
        let record = parse_env_file(contents);
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("GOOD").unwrap(), "1");
        assert_eq!(record.get("ALSO_GOOD").unwrap(), "2");
    }

    #[test]
    fn test_parse_splits_on_first_equals_only() {
        let record = parse_env_file("SUPABASE_ANON_KEY=eyJhb=GciOi.JIUzI1=\n");
        assert_eq!(record.get("SUPABASE_ANON_KEY").unwrap(), "eyJhb=GciOi.JIUzI1=");
    }

    #[test]
    fn test_parse_trims_key_and_value() {
        let record = parse_env_file("  NODE_ENV  =  production  \n");
        assert_eq!(record.get("NODE_ENV").unwrap(), "production");
    }

    #[test]
    fn test_parse_last_duplicate_wins() {
        let record = parse_env_file("A=1\nA=2\n");
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("A").unwrap(), "2");
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let record = load(&dir.path().join(".env")).await;
        assert!(record.is_empty());
    }

    #[tokio::test]
    async fn test_load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        tokio::fs::write(&path, "ENABLE_ANALYTICS=true\n").await.unwrap();
        let record = load(&path).await;
        assert_eq!(record.get("ENABLE_ANALYTICS").unwrap(), "true");
    }

    #[test]
    fn test_project_defaults_on_empty_record() {
        let safe = SafeEnv::project(&HashMap::new());
        assert_eq!(safe.gemini_api_key, "");
        assert_eq!(safe.supabase_url, "");
        assert_eq!(safe.supabase_anon_key, "");
        assert_eq!(safe.node_env, "development");
        assert!(safe.enable_chat);
        assert!(safe.enable_blog);
        assert!(safe.enable_resources);
        assert!(!safe.enable_analytics);
    }

    #[test]
    fn test_project_flag_coercion() {
        let mut record = HashMap::new();
        record.insert("ENABLE_ANALYTICS".to_string(), "true".to_string());
        record.insert("ENABLE_CHAT".to_string(), "false".to_string());
        record.insert("ENABLE_BLOG".to_string(), "yes".to_string());
        let safe = SafeEnv::project(&record);
        assert!(safe.enable_analytics);
        assert!(!safe.enable_chat);
        // Anything other than the literal "true" is false when present.
        assert!(!safe.enable_blog);
        // Absent key keeps its default.
        assert!(safe.enable_resources);
    }

    #[test]
    fn test_serialized_view_uses_env_var_names_and_nothing_else() {
        let mut record = HashMap::new();
        record.insert("GEMINI_API_KEY".to_string(), "abc123".to_string());
        record.insert("SECRET_TOKEN".to_string(), "xyz".to_string());

        let json = serde_json::to_value(SafeEnv::project(&record)).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 8);
        assert_eq!(object.get("GEMINI_API_KEY").unwrap(), "abc123");
        assert_eq!(object.get("NODE_ENV").unwrap(), "development");
        assert_eq!(object.get("ENABLE_CHAT").unwrap(), true);
        assert!(!object.contains_key("SECRET_TOKEN"));
    }
}
